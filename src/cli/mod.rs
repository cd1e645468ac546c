//! CLI commands for Gulgle.
//!
//! Catalog editing, one-off query checks and the native messaging host.

pub mod catalog;
pub mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::services::catalog::CatalogStore;

#[derive(Parser)]
#[command(name = "gulgle", version)]
#[command(about = "Bang shortcuts for your browser's search field", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (default: <config dir>/gulgle/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a navigated search URL the way the browser extension does
    Check {
        /// Full search engine URL
        url: String,
    },

    /// Resolve a bang in a free-text query
    Parse {
        /// Query text, e.g. "weather !w today"
        query: String,
    },

    /// List bangs (built-in merged with custom)
    List {
        /// Only show custom bangs
        #[arg(long)]
        custom: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a custom bang, or update the one with the same trigger
    Add {
        /// Primary trigger, without the '!'
        trigger: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// URL template containing %s
        #[arg(long)]
        url: String,

        /// Target domain
        #[arg(long)]
        domain: String,

        /// Extra triggers, comma separated
        #[arg(long, default_value = "")]
        aliases: String,

        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        sub_category: String,
    },

    /// Delete a custom bang by trigger
    Delete {
        trigger: String,
    },

    /// Show catalog locations, sizes and version
    Status,

    /// Convert a downloaded Kagi bang list into a built-in catalog file
    ConvertKagi {
        input: PathBuf,
        output: PathBuf,
    },

    /// Run as the browser's native messaging host on stdin/stdout
    Host,
}

/// Parse arguments, set up logging and run the command.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    init_logging(&config.logging.level, cli.verbose);

    let store = CatalogStore::new(config.catalog.paths());

    match cli.command {
        Commands::Check { url } => search::run_check(&store, &url),
        Commands::Parse { query } => search::run_parse(&store, &query),
        Commands::List { custom, json } => catalog::run_list(&store, custom, json),
        Commands::Add {
            trigger,
            name,
            url,
            domain,
            aliases,
            category,
            sub_category,
        } => catalog::run_add(
            &store,
            crate::bang::BangDraft {
                trigger,
                name,
                category,
                sub_category,
                url_template: url,
                domain,
                additional_triggers: aliases,
            },
        ),
        Commands::Delete { trigger } => catalog::run_delete(&store, &trigger),
        Commands::Status => catalog::run_status(&store),
        Commands::ConvertKagi { input, output } => catalog::run_convert(&input, &output),
        Commands::Host => search::run_host(store, config.host),
    }
}

/// Log to stderr; stdout carries command output and host frames.
fn init_logging(level: &str, verbose: u8) {
    let filter = match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if verbose > 0 {
        EnvFilter::new(filter)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from([
            "gulgle",
            "add",
            "gh",
            "--name",
            "GitHub",
            "--url",
            "https://github.com/search?q=%s",
            "--domain",
            "github.com",
            "--aliases",
            "git,hub",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Add {
                trigger, aliases, ..
            } => {
                assert_eq!(trigger, "gh");
                assert_eq!(aliases, "git,hub");
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_host_with_config() {
        let cli = Cli::try_parse_from(["gulgle", "--config", "/tmp/g.toml", "host"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/g.toml")));
        assert!(matches!(cli.command, Commands::Host));
    }
}
