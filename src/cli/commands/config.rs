use crate::cli::output::*;
use crate::core::config::{default_config, load_config, load_config_or_default, save_config};
use crate::core::paths;
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the configuration in effect as TOML
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration and home directory paths
    Path,
}

/// `explicit` is the `--config` value; without it the default location is used
pub fn run(args: ConfigArgs, explicit: Option<&Path>) -> anyhow::Result<()> {
    let config_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(paths::default_config_path);

    match args.command {
        ConfigCommands::Show => {
            // An explicit --config must exist
            let config = match explicit {
                Some(path) => load_config(path)?,
                None => load_config_or_default(&config_path)?,
            };
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                error(&format!("{} already exists", config_path.display()));
                info("Use --force to overwrite");
                anyhow::bail!("Config file already exists");
            }
            save_config(&config_path, &default_config())?;
            success(&format!("Wrote {}", config_path.display()));
        }
        ConfigCommands::Path => {
            println!("{}", paths::describe_paths());
            println!("  In use: {}", config_path.display());
        }
    }
    Ok(())
}
