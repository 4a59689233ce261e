//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Specwise CLI - Compose product specifications and translate them into queries.
#[derive(Debug, Parser)]
#[command(name = "specwise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SPECWISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (results only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate `cat1 or cat2` and run it against three sample products
    Demo,

    /// Print the translated expression and SQL filter of a specification file
    Translate(SpecArgs),

    /// Evaluate a specification file against the configured catalogue
    Eval(SpecArgs),

    /// Run a specification file as a query against the product store
    Query(QueryArgs),
}

/// Arguments for commands reading a specification document.
#[derive(Debug, Parser)]
pub struct SpecArgs {
    /// Specification document (JSON, or TOML with a .toml extension)
    #[arg(short, long)]
    pub spec: PathBuf,
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Specification document (JSON, or TOML with a .toml extension)
    #[arg(short, long)]
    pub spec: PathBuf,

    /// SQLite database file (in-memory if omitted)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["specwise"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_query_args() {
        let cli = Cli::parse_from([
            "specwise", "-vv", "--format", "json", "query", "--spec", "s.json", "--db", "p.db",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Some(Command::Query(args)) => {
                assert_eq!(args.spec, PathBuf::from("s.json"));
                assert_eq!(args.db, Some(PathBuf::from("p.db")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
