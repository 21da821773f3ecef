//! Dunner CLI - run tasks defined in a task file

use clap::Parser;
use dunner::cli::{Args, SubCommand};
use dunner::{format_output, HostFs, Manifest, OutputFormat, Report, TaskPlan};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Returns whether the command succeeded
fn run(args: Args) -> anyhow::Result<bool> {
    let format = if args.json { OutputFormat::Json } else { OutputFormat::Human };
    let options = args.load_options();
    let manifest = Manifest::load(&options, &HostFs)?;

    match args.command {
        SubCommand::Validate => {
            let errors = manifest.validate(&HostFs);
            let report = Report::Validation {
                path: &manifest.path,
                errors: &errors,
            };
            println!("{}", format_output(&report, &format));
            Ok(errors.is_empty())
        }

        SubCommand::List => {
            println!("{}", format_output(&Report::Tasks(&manifest.configs), &format));
            Ok(true)
        }

        SubCommand::Plan { task, asynchronous } => {
            let errors = manifest.validate(&HostFs);
            if !errors.is_empty() {
                let report = Report::Validation {
                    path: &manifest.path,
                    errors: &errors,
                };
                eprintln!("{}", format_output(&report, &format));
                return Ok(false);
            }

            let plan = TaskPlan::build(&manifest.configs, &task, asynchronous)?;
            println!("{}", format_output(&Report::Plan(&plan), &format));
            Ok(true)
        }
    }
}
