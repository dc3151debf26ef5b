//! `eshost --list | --add | --edit | --delete`: manage configured hosts.
//!
//! Every command first reports which config file it works on.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::{ConfigStore, EngineRunner};
use crate::application::services::host_crud::{self, HostEdit, NewHost};
use crate::output::table::format_host_list;

/// A host-management request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Print the configured hosts.
    List,
    /// Register a new host.
    Add {
        name: String,
        host_type: String,
        path: String,
        args: Option<String>,
        tags: Vec<String>,
    },
    /// Replace the args and/or tags of a host.
    Edit {
        name: String,
        args: Option<String>,
        tags: Option<Vec<String>>,
    },
    /// Remove one host, or all hosts when no name is given.
    Delete { name: Option<String> },
}

/// Run a host-management command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or saved, or the
/// request is invalid for the current registry.
pub fn run(app: &AppContext, cmd: HostCommand) -> Result<()> {
    let path = app.config_store.path()?;
    app.output.note(&format!("Using config \"{}\"", path.display()));

    match cmd {
        HostCommand::List => list(app),
        HostCommand::Add {
            name,
            host_type,
            path,
            args,
            tags,
        } => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            let new = NewHost {
                name,
                host_type,
                path,
                args: args.unwrap_or_default(),
                tags,
            };
            let host = host_crud::add_host(
                &app.config_store,
                app.engine.supported_types(),
                new,
                &cwd,
            )?;
            app.output.success(&format!("Host \"{}\" added", host.name));
            Ok(())
        }
        HostCommand::Edit { name, args, tags } => {
            let host = host_crud::edit_host(&app.config_store, &name, HostEdit { args, tags })?;
            app.output.success(&format!("Host \"{}\" edited", host.name));
            Ok(())
        }
        HostCommand::Delete { name: Some(name) } => {
            host_crud::delete_host(&app.config_store, Some(&name))?;
            app.output.success(&format!("Host \"{name}\" deleted"));
            Ok(())
        }
        HostCommand::Delete { name: None } => delete_all(app),
    }
}

fn list(app: &AppContext) -> Result<()> {
    let registry = host_crud::list_hosts(&app.config_store)?;
    print!("{}", format_host_list(&registry, &app.output.styles));
    Ok(())
}

fn delete_all(app: &AppContext) -> Result<()> {
    let hosts = host_crud::list_hosts(&app.config_store)?;
    if hosts.is_empty() {
        app.output.info("No configured hosts");
        return Ok(());
    }

    if !app.confirm(&format!("Delete all {} configured hosts?", hosts.len()))? {
        app.output.info("Cancelled.");
        return Ok(());
    }

    let removed = host_crud::delete_host(&app.config_store, None)?;
    for name in hosts.names() {
        app.output.success(&format!("Host \"{name}\" deleted"));
    }
    tracing::debug!(removed, "deleted all hosts");
    Ok(())
}
