mod app;
mod commands;
mod config;
mod connection;
mod directory;
mod events;
mod keymap;
mod logging;
mod server;
mod session;
mod terminal;
mod ui;

#[cfg(test)]
mod test_utils;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::commands::{run_directory_command, DirectoryCommand};

#[derive(Debug, Parser)]
#[command(
    name = "nxconsole",
    version,
    about = "Browse maintained equipment and open remote device consoles"
)]
struct Cli {
    /// Config file used instead of ./.nxconsole/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the mock device server
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: String,
    },
    /// Query or update the company directory API
    Directory {
        /// Overrides api.base_url from config
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        #[command(subcommand)]
        action: DirectoryAction,
    },
}

#[derive(Debug, Subcommand)]
enum DirectoryAction {
    /// List companies
    Companies,
    /// Show one company
    Company { id: String },
    /// List cities
    Cities,
    /// Register a company
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
    },
}

impl From<DirectoryAction> for DirectoryCommand {
    fn from(action: DirectoryAction) -> Self {
        match action {
            DirectoryAction::Companies => DirectoryCommand::Companies,
            DirectoryAction::Company { id } => DirectoryCommand::Company { id },
            DirectoryAction::Cities => DirectoryCommand::Cities,
            DirectoryAction::Add { name, address } => DirectoryCommand::AddCompany { name, address },
        }
    }
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        None => {
            logging::init_console();
            app::run(cli.config)
        }
        Some(Command::Serve { bind }) => {
            logging::init_server();
            server::serve(&bind)
        }
        Some(Command::Directory { api_url, action }) => {
            logging::init_server();
            let base_url = api_url.or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                config::load_config(&cwd, cli.config.as_deref()).api.base_url
            });
            let result = run_directory_command(base_url.as_deref(), &action.into());
            if result.ok {
                println!("{}", result.message);
                Ok(())
            } else {
                eprintln!("nxconsole: {}", result.message);
                process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_default_bind() {
        let cli = Cli::try_parse_from(["nxconsole", "serve"]).expect("parse");
        match cli.command {
            Some(Command::Serve { bind }) => assert_eq!(bind, "0.0.0.0:8000"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_global_config_and_directory_add() {
        let cli = Cli::try_parse_from([
            "nxconsole",
            "directory",
            "--api-url",
            "http://localhost:8000",
            "add",
            "--name",
            "GKL",
            "--address",
            "서울특별시 강남구",
            "--config",
            "/tmp/console.toml",
        ])
        .expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/console.toml")));
        match cli.command {
            Some(Command::Directory { api_url, action }) => {
                assert_eq!(api_url.as_deref(), Some("http://localhost:8000"));
                assert_eq!(
                    DirectoryCommand::from(action),
                    DirectoryCommand::AddCompany {
                        name: "GKL".to_string(),
                        address: "서울특별시 강남구".to_string(),
                    }
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_runs_the_console() {
        let cli = Cli::try_parse_from(["nxconsole"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }
}
