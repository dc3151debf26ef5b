//! Application service — host add/edit/delete use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Every mutation is saved through the injected `ConfigStore` before the
//! call returns; a failed mutation saves nothing.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::application::services::config_service::{load_config, save_config};
use crate::domain::{HostDescriptor, HostError, HostRegistry};

/// Input for `add_host`.
#[derive(Debug, Clone, Default)]
pub struct NewHost {
    pub name: String,
    pub host_type: String,
    pub path: String,
    pub args: String,
    pub tags: Vec<String>,
}

/// Fields `edit_host` may replace. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct HostEdit {
    pub args: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Reject host types outside the runner's supported set.
///
/// # Errors
///
/// Returns `HostError::UnsupportedType` listing the supported types.
pub fn validate_host_type(host_type: &str, supported: &[&str]) -> Result<(), HostError> {
    if supported.contains(&host_type) {
        return Ok(());
    }
    Err(HostError::UnsupportedType {
        host_type: host_type.to_string(),
        supported: supported.join(", "),
    })
}

/// Resolve `path` against `cwd` unless it is already absolute.
#[must_use]
pub fn absolute_path(path: &str, cwd: &Path) -> String {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        path.to_string()
    } else {
        cwd.join(candidate).display().to_string()
    }
}

/// Load the registry for listing.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn list_hosts(store: &impl ConfigStore) -> Result<HostRegistry> {
    Ok(load_config(store)?.hosts)
}

/// Register a new host and save.
///
/// # Errors
///
/// Returns an error if the type is unsupported, the name is taken, or the
/// configuration cannot be loaded or saved.
pub fn add_host(
    store: &impl ConfigStore,
    supported: &[&str],
    new: NewHost,
    cwd: &Path,
) -> Result<HostDescriptor> {
    validate_host_type(&new.host_type, supported)?;

    let mut config = load_config(store)?;
    let host = HostDescriptor::new(new.name, new.host_type, absolute_path(&new.path, cwd))
        .with_args(new.args)
        .with_tags(new.tags);
    config.hosts.upsert(host.clone())?;
    save_config(store, &config)?;
    Ok(host)
}

/// Replace the args and/or tags of an existing host and save.
///
/// # Errors
///
/// Returns an error if the host does not exist or the configuration cannot
/// be loaded or saved.
pub fn edit_host(store: &impl ConfigStore, name: &str, edit: HostEdit) -> Result<HostDescriptor> {
    let mut config = load_config(store)?;
    let mut host = config.hosts.get(name)?.clone();
    if let Some(args) = edit.args {
        host = host.with_args(args);
    }
    if let Some(tags) = edit.tags {
        host = host.with_tags(tags);
    }
    config.hosts.replace(host.clone())?;
    save_config(store, &config)?;
    Ok(host)
}

/// Delete one host, or every host when `name` is `None`, and save.
/// Returns how many hosts were removed.
///
/// # Errors
///
/// Returns an error if a named host does not exist or the configuration
/// cannot be loaded or saved.
pub fn delete_host(store: &impl ConfigStore, name: Option<&str>) -> Result<usize> {
    let mut config = load_config(store)?;
    let removed = config.hosts.remove(name)?;
    save_config(store, &config)?;
    Ok(removed)
}
