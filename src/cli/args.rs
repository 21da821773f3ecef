//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::env::DEFAULT_ENV_FILE;
use crate::manifest::{LoadOptions, DEFAULT_TASK_FILE};

#[derive(Parser)]
#[command(name = "dunner")]
#[command(author, version, about = "Dunner is a Docker based task runner", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Task file to load; the default name is searched for upwards
    #[arg(
        short = 't',
        long,
        global = true,
        env = "DUNNER_TASK_FILE",
        default_value = DEFAULT_TASK_FILE
    )]
    pub task_file: PathBuf,

    /// Environment file consulted before host variables
    #[arg(
        short = 'e',
        long,
        global = true,
        env = "DUNNER_ENV_FILE",
        default_value = DEFAULT_ENV_FILE
    )]
    pub env_file: PathBuf,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Args {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            task_file: self.task_file.clone(),
            env_file: self.env_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Validate the task file and report every problem
    Validate,

    /// List the tasks in the task file
    List,

    /// Show the resolved container steps of a task
    Plan {
        /// Name of the task
        task: String,

        /// Mark the plan for asynchronous step execution
        #[arg(short = 'A', long = "async")]
        asynchronous: bool,
    },
}
