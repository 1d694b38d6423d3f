//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use taxon_tree::{
    EntityResolver, LookupFailure, ResolvedTaxon, TaxonId, TaxonResult, TaxonTreeError,
};

/// In-memory resolver that records every lookup it serves
#[derive(Default)]
pub struct FakeResolver {
    taxa: HashMap<TaxonId, ResolvedTaxon>,
    failing: HashSet<TaxonId>,
    calls: RefCell<Vec<TaxonId>>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taxon(mut self, id: &str, name: &str, parents: &[&str]) -> Self {
        self.taxa.insert(
            TaxonId::from(id),
            ResolvedTaxon::new(name, parents.iter().map(|p| TaxonId::from(*p)).collect()),
        );
        self
    }

    /// Lookups of `id` fail as if the server were unavailable
    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(TaxonId::from(id));
        self
    }

    pub fn calls(&self) -> Vec<TaxonId> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, id: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == id).count()
    }
}

impl EntityResolver for FakeResolver {
    fn resolve(&self, id: &TaxonId) -> TaxonResult<ResolvedTaxon> {
        self.calls.borrow_mut().push(id.clone());

        if self.failing.contains(id) {
            return Err(TaxonTreeError::lookup(id, LookupFailure::Status(503)));
        }
        self.taxa
            .get(id)
            .cloned()
            .ok_or_else(|| TaxonTreeError::lookup(id, LookupFailure::MissingEntity))
    }
}

/// Lineage of the domestic cat, with a second path from Animalia to Eukaryota
pub fn domestic_cat() -> FakeResolver {
    FakeResolver::new()
        .with_taxon("Q146", "Felis catus", &["Q147"])
        .with_taxon("Q147", "Felis", &["Q230727"])
        .with_taxon("Q230727", "Felinae", &["Q25265"])
        .with_taxon("Q25265", "Felidae", &["Q25306"])
        .with_taxon("Q25306", "Carnivora", &["Q7377"])
        .with_taxon("Q7377", "Mammalia", &["Q729"])
        .with_taxon("Q729", "Animalia", &["Q19088", "Q1047113"])
        .with_taxon("Q1047113", "Opisthokonta", &["Q19088"])
        .with_taxon("Q19088", "Eukaryota", &["Q2382443"])
        .with_taxon("Q2382443", "Biota", &[])
}
