//! Bottega CLI - isolated git worktrees for a fixed crew of coding assistants.

use bottega::cli::{Cli, Commands};
use bottega::commands;
use bottega::config::Config;
use bottega::identity::Identity;
use clap::{CommandFactory, Parser};
use serde::Serialize;
use std::fmt::Display;
use std::process;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let config = Config::resolve(cli.repo, cli.root, cli.trunk, cli.remote);

    let command = match cli.command {
        Some(command) => command,
        None => {
            // No arguments: print usage and succeed.
            let _ = Cli::command().print_help();
            return;
        }
    };

    if let Err(e) = run_command(command, &config, json) {
        if json {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

fn run_command(command: Commands, config: &Config, json: bool) -> bottega::Result<()> {
    match command {
        Commands::Init => output(&commands::init(config)?, json),
        Commands::Prep {
            identity,
            objective,
        } => {
            let identity: Identity = identity.parse()?;
            output(&commands::prep(config, identity, &objective)?, json)
        }
        Commands::Status => output(&commands::status(config)?, json),
        Commands::Open { identity } => {
            let identity: Identity = identity.parse()?;
            output(&commands::open(config, identity)?, json)
        }
        Commands::Reset { identity } => {
            let identity: Identity = identity.parse()?;
            output(&commands::reset(config, identity)?, json)
        }
        Commands::Remove { identity } => {
            let identity: Identity = identity.parse()?;
            output(&commands::remove(config, identity)?, json)
        }
    }
}

fn output<T: Serialize + Display>(result: &T, json: bool) -> bottega::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print!("{result}");
    }
    Ok(())
}
