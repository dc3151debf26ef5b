//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{ArgAction, ArgGroup, Parser};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;
use crate::commands::eval::{EvalArgs, Input};
use crate::commands::hosts::HostCommand;
use crate::domain::HostSelection;
use crate::domain::selection::split_tokens;

/// Run JavaScript on many engines at once and compare the results
#[derive(Parser, Debug)]
#[command(
    name = "eshost",
    version,
    disable_help_flag = true,
    arg_required_else_help = true,
    group(ArgGroup::new("manage").args(["list", "add", "edit", "delete"])),
)]
pub struct Cli {
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,

    /// Source file to evaluate (`.mjs` is evaluated as a module)
    #[arg(value_name = "FILE", conflicts_with_all = ["eval", "manage"])]
    pub file: Option<PathBuf>,

    /// Evaluate CODE instead of a file
    #[arg(short, long, value_name = "CODE", conflicts_with = "manage")]
    pub eval: Option<String>,

    /// Select hosts by name or glob (repeatable, comma-separated)
    #[arg(short = 'h', long = "host", value_name = "NAME")]
    pub hosts: Vec<String>,

    /// Select hosts by type (repeatable, comma-separated)
    #[arg(short = 'g', long = "host-group", value_name = "TYPE")]
    pub host_groups: Vec<String>,

    /// Select hosts by tag; with --add/--edit, the tags to store
    #[arg(short, long, value_name = "TAG")]
    pub tags: Vec<String>,

    /// Group hosts with identical output into one row
    #[arg(short = 's', long)]
    pub coalesce: bool,

    /// Print nothing when every host agrees; exit 1 when they do not
    #[arg(short, long)]
    pub unanimous: bool,

    /// Render results as a table
    #[arg(long)]
    pub table: bool,

    /// Print the source before the results
    #[arg(short = 'i', long)]
    pub show_source: bool,

    /// Render the results table as markdown
    #[arg(long)]
    pub markdown: bool,

    /// Wait for the host to tear down its realm before collecting output
    #[arg(long = "async")]
    pub is_async: bool,

    /// Evaluate the source as a module
    #[arg(short, long)]
    pub module: bool,

    /// Host configuration file [default: ~/.eshost-config.json]
    #[arg(long, value_name = "PATH", env = "ESHOST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-host time limit in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Disable colored output (also honoured via `NO_COLOR`)
    #[arg(long)]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub yes: bool,

    /// List configured hosts
    #[arg(short, long)]
    pub list: bool,

    /// Add a host
    #[arg(long, num_args = 3, value_names = ["NAME", "TYPE", "PATH"])]
    pub add: Option<Vec<String>>,

    /// Edit a host's args and/or tags
    #[arg(long, value_name = "NAME")]
    pub edit: Option<String>,

    /// Delete a host, or every host when NAME is omitted
    #[arg(long, value_name = "NAME", num_args = 0..=1)]
    pub delete: Option<Option<String>>,

    /// Arguments passed to the host executable (with --add/--edit)
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub args: Option<String>,
}

/// What this invocation does.
#[derive(Debug)]
pub enum Mode {
    Hosts(HostCommand),
    Eval(EvalArgs),
}

impl Cli {
    /// Decide between host management and evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if neither an input nor a host-management flag was
    /// given.
    pub fn mode(&self) -> Result<Mode> {
        if self.list {
            return Ok(Mode::Hosts(HostCommand::List));
        }
        if let Some(add) = &self.add {
            let [name, host_type, path] = add.as_slice() else {
                bail!("--add takes NAME TYPE PATH");
            };
            return Ok(Mode::Hosts(HostCommand::Add {
                name: name.clone(),
                host_type: host_type.clone(),
                path: path.clone(),
                args: self.args.clone(),
                tags: split_tokens(&self.tags),
            }));
        }
        if let Some(name) = &self.edit {
            return Ok(Mode::Hosts(HostCommand::Edit {
                name: name.clone(),
                args: self.args.clone(),
                tags: (!self.tags.is_empty()).then(|| split_tokens(&self.tags)),
            }));
        }
        if let Some(name) = &self.delete {
            return Ok(Mode::Hosts(HostCommand::Delete { name: name.clone() }));
        }

        let input = match (&self.eval, &self.file) {
            (Some(code), _) => Input::Inline(code.clone()),
            (None, Some(file)) => Input::File(file.clone()),
            (None, None) => bail!("nothing to evaluate: pass -e <CODE> or a FILE (see --help)"),
        };
        Ok(Mode::Eval(EvalArgs {
            input,
            selection: HostSelection::from_raw(&self.hosts, &self.host_groups, &self.tags),
            coalesce: self.coalesce,
            unanimous: self.unanimous,
            show_source: self.show_source,
            is_async: self.is_async,
            module: self.module,
        }))
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let mode = self.mode()?;
        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color: self.no_color,
                quiet: self.quiet,
                table: self.table,
                markdown: self.markdown,
            },
            behaviour: BehaviourFlags {
                yes: self.yes,
                config: self.config,
                timeout: Duration::from_secs(self.timeout),
            },
        });

        match mode {
            Mode::Hosts(cmd) => {
                commands::hosts::run(&app, cmd)?;
                Ok(ExitCode::SUCCESS)
            }
            Mode::Eval(args) => commands::eval::run(&app, &args).await,
        }
    }
}
