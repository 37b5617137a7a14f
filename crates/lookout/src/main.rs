// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookout - a terminal assistant that searches the web only when a
//! question needs it.
//!
//! This is the binary entry point.

mod app;
mod config_check;
mod logging;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use lookout_config::LookoutConfig;
use lookout_security::SecretList;

/// Lookout - answers questions, searching the web when they need live information.
#[derive(Parser, Debug)]
#[command(name = "lookout", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive prompt loop (default).
    Shell,
    /// Answer a single question and exit.
    Ask {
        /// The question. Multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate configuration, then print a redacted summary.
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal.
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            lookout_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Commands::Config {
            action: ConfigCommand::Check,
        }) => {
            print!("{}", config_check::render_summary(&config));
            ExitCode::SUCCESS
        }
        Some(Commands::Ask { query }) => run(&config, Mode::Ask(query.join(" "))).await,
        Some(Commands::Shell) | None => run(&config, Mode::Shell).await,
    }
}

enum Mode {
    Shell,
    Ask(String),
}

async fn run(config: &LookoutConfig, mode: Mode) -> ExitCode {
    let secrets = SecretList::default();

    if let Err(e) = logging::init_tracing(&config.agent, secrets.clone()) {
        eprintln!("{}: {e}", "error".red());
        return ExitCode::FAILURE;
    }

    let router = match app::build_router(config, &secrets) {
        Ok(router) => router,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), app::redacted(&e, &secrets));
            return ExitCode::FAILURE;
        }
    };

    router.health_check().await;

    let code = match mode {
        Mode::Shell => match shell::run_shell(&router, &secrets).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}: {}", "error".red(), app::redacted(&e, &secrets));
                ExitCode::FAILURE
            }
        },
        Mode::Ask(query) => match router.answer(&query).await {
            Ok(answer) => {
                println!("{}", answer.response);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}: {}", "error".red(), app::redacted(&e, &secrets));
                ExitCode::FAILURE
            }
        },
    };

    router.shutdown().await;
    code
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<LookoutConfig, Vec<lookout_config::ConfigError>> {
    match path {
        Some(path) => lookout_config::load_and_validate_path(path),
        None => lookout_config::load_and_validate(),
    }
}
