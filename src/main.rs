use clap::Parser;
use colored::*;
use std::process;
use taxon_tree::cli::{commands, exit_code, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins, then TAXON_TREE_LOG, then the -v count
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let log_level = std::env::var("TAXON_TREE_LOG").unwrap_or_else(|_| default_level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Config subcommands must work even when the file itself is broken
    let config = if matches!(cli.command, Commands::Config(_)) {
        None
    } else {
        Some(cli.load_config()?)
    };

    match cli.command {
        Commands::Tree(args) => commands::tree::run(args, &config.unwrap_or_default()),
        Commands::Resolve(args) => commands::resolve::run(args, &config.unwrap_or_default()),
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref()),
    }
}
