//! CLI for pumlup.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use pumlup_core::config::{self, Settings};
use std::path::PathBuf;

use commands::{run_check, run_completions, run_status, run_sync};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pumlup")]
#[command(about = "Keep the bundled PlantUML jar at the latest MIT-licensed release", long_about = None)]
pub struct Cli {
    /// Settings file to use instead of ~/.config/pumlup/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the jar (overrides `resources_dir`).
    #[arg(long, global = true, value_name = "DIR")]
    pub resources_dir: Option<PathBuf>,

    /// INI file whose `jar=` line is rewritten (overrides `ini_file`).
    #[arg(long, global = true, value_name = "FILE")]
    pub ini: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the latest jar if needed, point the config at it and remove old jars.
    Sync,

    /// Look up the latest jar and compare it with the local copy; changes nothing.
    Check,

    /// Show the configured jar and the jars present locally.
    Status,

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// How a command that ran to completion ends the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    /// No matching jar on any source. Nothing was changed.
    NotFound,
}

impl Exit {
    pub fn code(self) -> i32 {
        match self {
            Exit::Success => 0,
            Exit::NotFound => 2,
        }
    }
}

impl Cli {
    pub fn run_from_args() -> Result<Exit> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<Exit> {
        if let CliCommand::Completions { shell } = self.command {
            run_completions(shell);
            return Ok(Exit::Success);
        }

        let settings = self.settings()?;
        tracing::debug!("loaded settings: {:?}", settings);

        match self.command {
            CliCommand::Sync => run_sync(&settings),
            CliCommand::Check => run_check(&settings),
            CliCommand::Status => run_status(&settings).map(|()| Exit::Success),
            CliCommand::Completions { .. } => Ok(Exit::Success),
        }
    }

    /// Settings file (explicit or XDG default) with command-line overrides applied.
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        if let Some(dir) = &self.resources_dir {
            settings.resources_dir = dir.clone();
        }
        if let Some(ini) = &self.ini {
            settings.ini_file = ini.clone();
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests;
