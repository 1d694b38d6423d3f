//! Entity resolution against the Wikidata API

pub mod client;
pub mod entity;

pub use client::WikidataClient;
pub use entity::{
    parse_entity, parse_entity_response, select_parents, winning_rank, ClaimProperties, TaxonEntity,
    PARENT_TAXON_PROPERTY, TAXON_NAME_PROPERTY,
};

use crate::bio::taxonomy::{TaxonId, TaxonName};
use crate::error::TaxonResult;

/// Display name and selected parents of one taxon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTaxon {
    pub name: TaxonName,
    pub parents: Vec<TaxonId>,
}

impl ResolvedTaxon {
    pub fn new(name: impl Into<TaxonName>, parents: Vec<TaxonId>) -> Self {
        Self {
            name: name.into(),
            parents,
        }
    }
}

/// Looks up a single taxon in the knowledge base
///
/// Each call is one lookup; implementations do not batch or retry.
#[cfg_attr(test, mockall::automock)]
pub trait EntityResolver {
    fn resolve(&self, id: &TaxonId) -> TaxonResult<ResolvedTaxon>;
}

impl<R: EntityResolver + ?Sized> EntityResolver for &R {
    fn resolve(&self, id: &TaxonId) -> TaxonResult<ResolvedTaxon> {
        (**self).resolve(id)
    }
}

impl<R: EntityResolver + ?Sized> EntityResolver for Box<R> {
    fn resolve(&self, id: &TaxonId) -> TaxonResult<ResolvedTaxon> {
        (**self).resolve(id)
    }
}
