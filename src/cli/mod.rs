//! CLI module - Command-line interface for Hireboard
//!
//! Serving is the default; the remaining subcommands administer jobs and
//! users directly against the database.

mod commands;

use clap::{Parser, Subcommand};

use crate::config::Config;

/// Hireboard - job board backend
#[derive(Parser)]
#[command(name = "hireboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Create default config file
    Init,

    /// Manage job postings
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum JobCommands {
    /// Post a new, open job
    Add { title: String, description: String },

    /// List all jobs, open and closed
    #[command(alias = "ls")]
    List,

    /// Stop accepting applications for a job
    Close { id: i32 },

    /// Accept applications for a job again
    Open { id: i32 },

    /// Delete a job and every application to it
    #[command(alias = "rm")]
    Remove { id: i32 },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user and print their API key
    Add {
        name: String,
        email: String,
        password: String,
    },
}

/// Runs a non-serving subcommand. Returns `false` when the caller should serve.
pub async fn dispatch(command: Option<Commands>, config: &Config) -> anyhow::Result<bool> {
    match command {
        None | Some(Commands::Serve) => Ok(false),
        Some(Commands::Init) => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(true)
        }
        Some(Commands::Job { command }) => {
            commands::job::run(config, command).await?;
            Ok(true)
        }
        Some(Commands::User { command }) => {
            commands::user::run(config, command).await?;
            Ok(true)
        }
    }
}
