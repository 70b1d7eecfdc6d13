use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tache_core::{ClientConfig, TacheClient};
use tracing_subscriber::EnvFilter;

mod commands;

/// Manage your tasks from the terminal.
#[derive(Debug, Parser)]
#[command(name = "tache", version, about)]
struct Cli {
    /// API origin, e.g. http://localhost:8080/api
    #[arg(long, global = true, env = "TACHE_API_URL")]
    api_url: Option<String>,

    /// Directory holding the session token
    #[arg(long, global = true, env = "TACHE_SESSION_DIR")]
    session_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and start a session
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TACHE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Start a session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "TACHE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show whether a session is active
    Status,
    /// List all tasks
    List,
    /// Show one task
    Show { id: i64 },
    /// Create a task
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Flip a task between done and not done
    Toggle { id: i64 },
    /// Change the title or description of a task
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task
    Rm { id: i64 },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("invalid configuration")?;
    if let Some(url) = &cli.api_url {
        config.base_url = url.clone();
    }
    if let Some(dir) = &cli.session_dir {
        config.session_dir = dir.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, session_dir = %config.session_dir.display(), "loaded config");
    let client = TacheClient::from_config(&config)?;
    let output = commands::execute(&client, cli.command).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_description() {
        let cli = Cli::try_parse_from(["tache", "add", "Courses", "-d", "lait"]).unwrap();
        match cli.command {
            Command::Add { title, description } => {
                assert_eq!(title, "Courses");
                assert_eq!(description, "lait");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tache", "list", "--api-url", "http://x/api", "-vv"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["tache", "toggle", "abc"]).is_err());
    }
}
