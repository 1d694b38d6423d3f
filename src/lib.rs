//! Taxonomic ancestry trees resolved from Wikidata

pub mod bio;
pub mod cli;
pub mod core;
pub mod error;
pub mod report;
pub mod wikidata;

pub use crate::bio::taxonomy::{ParentEntry, TaxonId, TaxonName, TaxonTree};
pub use crate::core::tree_builder::{build_tree, RequestCache};
pub use crate::error::{LookupFailure, TaxonResult, TaxonTreeError};
pub use crate::wikidata::{EntityResolver, ResolvedTaxon, WikidataClient};

/// Version information for taxon-tree
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
