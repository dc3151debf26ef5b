//! Host descriptors and the in-memory host registry.
//!
//! Pure types only — persistence lives behind `application::ports::ConfigStore`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::HostError;

/// A configured JavaScript engine executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDescriptor {
    /// Unique key within the registry. Stored as the JSON object key, not
    /// inside the entry.
    #[serde(skip)]
    pub name: String,
    /// Engine kind, e.g. `d8` or `node`.
    #[serde(rename = "type")]
    pub host_type: String,
    /// Path to the engine executable.
    pub path: String,
    /// Extra invocation arguments, whitespace separated.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub args: String,
    /// Free-form labels used by `--tags` selection.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl HostDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, host_type: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host_type: host_type.into(),
            path: path.into(),
            args: String::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = args.into().trim().to_string();
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if any of `wanted` appears in this host's tags.
    #[must_use]
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        self.tags.iter().any(|tag| wanted.contains(tag))
    }

    /// Invocation arguments split on whitespace.
    pub fn arg_list(&self) -> impl Iterator<Item = &str> {
        self.args.split_whitespace()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordered name → descriptor mapping for the current run.
///
/// Registration order is preserved. Lookups are linear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRegistry {
    hosts: Vec<HostDescriptor>,
}

impl HostRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from descriptors, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns `HostError::DuplicateHost` on the first repeated name.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = HostDescriptor>,
    ) -> Result<Self, HostError> {
        let mut registry = Self::new();
        for host in descriptors {
            registry.upsert(host)?;
        }
        Ok(registry)
    }

    /// Look up a host by name.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if no host has that name.
    pub fn get(&self, name: &str) -> Result<&HostDescriptor, HostError> {
        self.hosts
            .iter()
            .find(|h| h.name == name)
            .ok_or_else(|| HostError::NotFound(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.hosts.iter().any(|h| h.name == name)
    }

    /// Host names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(|h| h.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostDescriptor> {
        self.hosts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Register a new host. Adding is not editing: an existing name is an
    /// error and leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// Returns `HostError::DuplicateHost` if the name is already registered.
    pub fn upsert(&mut self, host: HostDescriptor) -> Result<(), HostError> {
        if self.contains(&host.name) {
            return Err(HostError::DuplicateHost(host.name));
        }
        self.hosts.push(host);
        Ok(())
    }

    /// Replace an existing host in place, keeping its registration slot.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if the name is not registered.
    pub fn replace(&mut self, host: HostDescriptor) -> Result<(), HostError> {
        let slot = self
            .hosts
            .iter_mut()
            .find(|h| h.name == host.name)
            .ok_or_else(|| HostError::NotFound(host.name.clone()))?;
        *slot = host;
        Ok(())
    }

    /// Remove one host by name, or every host when `name` is `None`.
    /// Returns the number of hosts removed.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if a named host is not registered.
    pub fn remove(&mut self, name: Option<&str>) -> Result<usize, HostError> {
        match name {
            Some(name) => {
                let index = self
                    .hosts
                    .iter()
                    .position(|h| h.name == name)
                    .ok_or_else(|| HostError::NotFound(name.to_string()))?;
                self.hosts.remove(index);
                Ok(1)
            }
            None => {
                let removed = self.hosts.len();
                self.hosts.clear();
                Ok(removed)
            }
        }
    }
}

impl<'a> IntoIterator for &'a HostRegistry {
    type Item = &'a HostDescriptor;
    type IntoIter = std::slice::Iter<'a, HostDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}
