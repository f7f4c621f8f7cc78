use clap::Parser;

mod catalog;
mod cli;
mod commands;
mod domain;
mod services;

use catalog::CatalogError;
use cli::{Cli, Commands};
use services::installer::ProjectError;
use services::output;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::emit_error(json, error_code(&e), &e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Audit {
            verbose,
            patterns_dir,
        } => commands::handle_audit(cli, *verbose, patterns_dir.as_deref()),
        _ => {
            commands::handle_project_commands(cli)?;
            Ok(0)
        }
    }
}

fn error_code(e: &anyhow::Error) -> &'static str {
    if let Some(c) = e.downcast_ref::<CatalogError>() {
        return c.code();
    }
    if let Some(p) = e.downcast_ref::<ProjectError>() {
        return p.code();
    }
    "ERROR"
}
