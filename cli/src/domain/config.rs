//! Domain types for the persisted eshost configuration.
//!
//! Pure functions only, no I/O.

use serde_json::{Map, Value};

use crate::domain::error::ConfigError;
use crate::domain::host::{HostDescriptor, HostRegistry};

/// File name of the default config under the user's home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".eshost-config.json";

/// Top-level configuration: the host registry plus any keys this version
/// does not understand, which are written back untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EshostConfig {
    pub hosts: HostRegistry,
    extra: Map<String, Value>,
}

impl EshostConfig {
    #[must_use]
    pub fn new(hosts: HostRegistry) -> Self {
        Self {
            hosts,
            extra: Map::new(),
        }
    }

    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` if the document is not a JSON object
    /// or `hosts` is not an object, and `ConfigError::MalformedHost` if any
    /// host entry fails to deserialize. No partial registry is returned.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_json::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        let Value::Object(mut root) = value else {
            return Err(ConfigError::Malformed("expected a JSON object".to_string()));
        };

        let entries = match root.remove("hosts") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(entries)) => entries,
            Some(_) => {
                return Err(ConfigError::Malformed(
                    "\"hosts\" must be an object".to_string(),
                ));
            }
        };

        let mut hosts = HostRegistry::new();
        for (name, entry) in entries {
            let mut host: HostDescriptor =
                serde_json::from_value(entry).map_err(|e| ConfigError::MalformedHost {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            host.name = name;
            // JSON object keys are unique after parsing, so this cannot collide.
            hosts
                .upsert(host)
                .map_err(|e| ConfigError::Malformed(e.to_string()))?;
        }

        Ok(Self { hosts, extra: root })
    }

    /// Serialize to a pretty-printed JSON document, hosts in registration
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if a host entry cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut hosts = Map::new();
        for host in &self.hosts {
            hosts.insert(host.name.clone(), serde_json::to_value(host)?);
        }
        let mut root = Map::new();
        root.insert("hosts".to_string(), Value::Object(hosts));
        for (key, value) in &self.extra {
            root.insert(key.clone(), value.clone());
        }
        serde_json::to_string_pretty(&Value::Object(root))
    }
}
