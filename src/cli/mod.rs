pub mod commands;
pub mod output;

use crate::core::config::{load_config, load_config_or_default, Config};
use crate::core::paths;
use crate::error::TaxonTreeError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taxon-tree",
    version,
    about = "Render the taxonomic ancestry tree of a Wikidata taxon",
    long_about = "taxon-tree follows the parent taxon (P171) statements of a Wikidata item \
                  upwards, preferring preferred-rank statements, and renders every ancestry \
                  path as a tree in text, JSON or HTML."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to $TAXON_TREE_HOME/config.toml)
    #[arg(short, long, global = true, env = "TAXON_TREE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build and render the ancestry tree of a taxon
    Tree(commands::tree::TreeArgs),

    /// Show the taxon name and every parent taxon statement of one item
    Resolve(commands::resolve::ResolveArgs),

    /// Inspect or create the configuration file
    Config(commands::config::ConfigArgs),
}

impl Cli {
    /// An explicit `--config` must exist; the default location may be absent
    pub fn load_config(&self) -> Result<Config, TaxonTreeError> {
        match &self.config {
            Some(path) => load_config(path),
            None => load_config_or_default(paths::default_config_path()),
        }
    }
}

/// Process exit status for a failed command
///
/// 2 configuration, 3 IO, 4 knowledge-base lookup, 1 anything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TaxonTreeError>() {
        Some(TaxonTreeError::Configuration(_)) => 2,
        Some(TaxonTreeError::Io(_)) => 3,
        Some(TaxonTreeError::Lookup { .. }) => 4,
        Some(TaxonTreeError::Serialization(_)) => 1,
        None if err.downcast_ref::<std::io::Error>().is_some() => 3,
        None => 1,
    }
}
