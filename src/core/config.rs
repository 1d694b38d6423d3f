use crate::error::TaxonTreeError;
use crate::report::OutputFormat;
use crate::wikidata::entity::{ClaimProperties, PARENT_TAXON_PROPERTY, TAXON_NAME_PROPERTY};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub wikidata: WikidataConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WikidataConfig {
    /// `api.php` endpoint queried with `wbgetentities`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Prefix for links to entity pages in rendered output
    #[serde(default = "default_entity_url")]
    pub entity_url: String,
    /// Wikimedia asks for a descriptive agent with contact details
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_taxon_name_property")]
    pub taxon_name_property: String,
    #[serde(default = "default_parent_taxon_property")]
    pub parent_taxon_property: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Print item ids next to taxon names
    #[serde(default = "default_show_ids")]
    pub show_ids: bool,
}

// Default value functions
fn default_api_url() -> String { "https://www.wikidata.org/w/api.php".to_string() }
fn default_entity_url() -> String { "https://www.wikidata.org/wiki/".to_string() }
fn default_user_agent() -> String {
    format!(
        "taxon-tree/{} (https://github.com/Andromeda-Tech/taxon-tree)",
        env!("CARGO_PKG_VERSION")
    )
}
fn default_timeout_secs() -> u64 { 30 }
fn default_connect_timeout_secs() -> u64 { 10 }
fn default_taxon_name_property() -> String { TAXON_NAME_PROPERTY.to_string() }
fn default_parent_taxon_property() -> String { PARENT_TAXON_PROPERTY.to_string() }
fn default_show_ids() -> bool { true }

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            entity_url: default_entity_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            taxon_name_property: default_taxon_name_property(),
            parent_taxon_property: default_parent_taxon_property(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_ids: default_show_ids(),
        }
    }
}

impl WikidataConfig {
    pub fn claim_properties(&self) -> ClaimProperties {
        ClaimProperties {
            taxon_name: self.taxon_name_property.clone(),
            parent_taxon: self.parent_taxon_property.clone(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, TaxonTreeError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| TaxonTreeError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

/// Load the config at `path`, or the defaults when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, TaxonTreeError> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::info!(path = %path.display(), "Config file not found, using defaults");
        Ok(default_config())
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), TaxonTreeError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| TaxonTreeError::Configuration(format!("Failed to serialize config: {}", e)))?;
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)?;
    Ok(())
}
