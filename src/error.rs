//! Error types for taxon-tree

use crate::bio::taxonomy::TaxonId;
use thiserror::Error;

/// Main error type for taxon-tree operations
#[derive(Error, Debug)]
pub enum TaxonTreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lookup of {id} failed: {source}")]
    Lookup {
        id: TaxonId,
        #[source]
        source: LookupFailure,
    },
}

/// Reasons a single entity lookup against the knowledge base can fail
#[derive(Error, Debug)]
pub enum LookupFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("entity is missing from the response")]
    MissingEntity,

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TaxonTreeError {
    /// Wrap a lookup failure with the identifier that was being resolved
    pub fn lookup(id: &TaxonId, source: impl Into<LookupFailure>) -> Self {
        TaxonTreeError::Lookup {
            id: id.clone(),
            source: source.into(),
        }
    }
}

/// Result type alias for taxon-tree operations
pub type TaxonResult<T> = Result<T, TaxonTreeError>;

impl From<serde_json::Error> for TaxonTreeError {
    fn from(err: serde_json::Error) -> Self {
        TaxonTreeError::Serialization(err.to_string())
    }
}
