use crate::bio::taxonomy::{TaxonId, TaxonName, TaxonTree};
use crate::core::tree_builder::TreeOutcome;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

pub mod html;
pub mod json;
pub mod text;

/// Output format of a rendered tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented ASCII tree
    #[default]
    Text,
    /// Nested JSON object
    Json,
    /// Standalone HTML page
    Html,
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Html => "html",
        }
    }

    /// Infer the format from a file name such as `tree.html`
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "htm" {
            return Some(Self::Html);
        }
        [Self::Text, Self::Json, Self::Html]
            .into_iter()
            .find(|format| format.extension() == ext)
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub show_ids: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_ids: true,
        }
    }
}

/// A finished tree together with what the renderers need to present it
///
/// Names and ids come straight from the knowledge base and are untrusted;
/// the HTML renderer escapes both.
#[derive(Debug, Clone, Serialize)]
pub struct TaxonReport {
    pub taxon_name: TaxonName,
    pub item_id: TaxonId,
    pub entity_url: String,
    pub generated_at: DateTime<Utc>,
    /// Distinct entities fetched while building the tree
    pub lookups: usize,
    pub tree: Arc<TaxonTree>,
}

impl TaxonReport {
    pub fn new(outcome: &TreeOutcome, entity_url: &str) -> Self {
        Self {
            taxon_name: outcome.name.clone(),
            item_id: outcome.id.clone(),
            entity_url: entity_url.to_string(),
            generated_at: Utc::now(),
            lookups: outcome.cache.len(),
            tree: Arc::clone(&outcome.tree),
        }
    }

    /// Link to the entity page of `id`
    pub fn entity_link(&self, id: &TaxonId) -> String {
        format!("{}{}", self.entity_url, id)
    }
}

pub fn render(report: &TaxonReport, options: &ReportOptions) -> Result<String> {
    match options.format {
        OutputFormat::Text => text::render_text(report, options),
        OutputFormat::Json => Ok(json::render_json(report)?),
        OutputFormat::Html => html::render_html(report, options),
    }
}
