//! Specwise CLI - Compose product specifications and translate them into queries.

use clap::Parser;
use specwise_cli::commands;
use specwise_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> specwise_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // An explicit config file must load; the default one falls back to defaults
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: {}, using default configuration", e);
            Config::default()
        }),
    };

    init_tracing(cli.verbose, &config.settings.log_level);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Demo) => commands::execute_demo(&formatter)?,
        Some(Command::Translate(args)) => commands::execute_translate(args, &formatter)?,
        Some(Command::Eval(args)) => commands::execute_eval(args, &config, &formatter)?,
        Some(Command::Query(args)) => commands::execute_query(args, &config, &formatter)?,
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins, then `-v`, then the configured level.
fn init_tracing(verbose: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
