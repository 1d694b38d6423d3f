//! Recursive ancestry resolution with per-request memoization

use crate::bio::taxonomy::{ParentEntry, TaxonId, TaxonName, TaxonTree};
use crate::error::TaxonResult;
use crate::wikidata::EntityResolver;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Completed resolutions of a single request
///
/// Owned by the request that builds the tree and dropped with it; an id
/// present here is never passed to the resolver again.
#[derive(Debug, Default, Clone)]
pub struct RequestCache {
    entries: HashMap<TaxonId, (TaxonName, Arc<TaxonTree>)>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &TaxonId) -> Option<&(TaxonName, Arc<TaxonTree>)> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &TaxonId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of distinct taxa resolved so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, id: TaxonId, name: TaxonName, tree: Arc<TaxonTree>) {
        self.entries.insert(id, (name, tree));
    }
}

/// Result of one tree-rendering request
#[derive(Debug, Clone)]
pub struct TreeOutcome {
    pub id: TaxonId,
    pub name: TaxonName,
    pub tree: Arc<TaxonTree>,
    pub cache: RequestCache,
}

/// Build the ancestry tree of `id`, reusing and filling `cache`
///
/// Parents are visited depth-first in the order the resolver returns them.
/// A parent that is still being resolved further up the current path becomes
/// a cycle-truncated leaf, so construction terminates on cyclic data.
pub fn build_tree<R: EntityResolver + ?Sized>(
    resolver: &R,
    id: &TaxonId,
    cache: &mut RequestCache,
) -> TaxonResult<(TaxonName, Arc<TaxonTree>)> {
    let mut path = IndexMap::new();
    build_node(resolver, id, cache, &mut path)
}

/// Build the tree of `id` with a fresh cache scoped to this call
pub fn build_request_tree<R: EntityResolver + ?Sized>(
    resolver: &R,
    id: &TaxonId,
) -> TaxonResult<TreeOutcome> {
    let mut cache = RequestCache::new();
    let (name, tree) = build_tree(resolver, id, &mut cache)?;
    debug!(
        %id,
        lookups = cache.len(),
        nodes = tree.node_count(),
        depth = tree.depth(),
        "Tree complete"
    );
    Ok(TreeOutcome {
        id: id.clone(),
        name,
        tree,
        cache,
    })
}

fn build_node<R: EntityResolver + ?Sized>(
    resolver: &R,
    id: &TaxonId,
    cache: &mut RequestCache,
    path: &mut IndexMap<TaxonId, TaxonName>,
) -> TaxonResult<(TaxonName, Arc<TaxonTree>)> {
    if let Some((name, tree)) = cache.get(id) {
        trace!(%id, "Request cache hit");
        return Ok((name.clone(), Arc::clone(tree)));
    }

    let resolved = resolver.resolve(id)?;
    debug!(%id, name = %resolved.name, depth = path.len(), "Resolving parents");

    path.insert(id.clone(), resolved.name.clone());
    let parents = build_parents(resolver, &resolved.parents, cache, path);
    path.pop();

    let tree = Arc::new(parents?);
    cache.insert(id.clone(), resolved.name.clone(), Arc::clone(&tree));
    Ok((resolved.name, tree))
}

fn build_parents<R: EntityResolver + ?Sized>(
    resolver: &R,
    parent_ids: &[TaxonId],
    cache: &mut RequestCache,
    path: &mut IndexMap<TaxonId, TaxonName>,
) -> TaxonResult<TaxonTree> {
    let mut tree = TaxonTree::new();

    for parent_id in parent_ids {
        if let Some(ancestor_name) = path.get(parent_id) {
            warn!(id = %parent_id, name = %ancestor_name, "Parent taxon cycle, truncating branch");
            tree.insert(
                ancestor_name.clone(),
                ParentEntry::cycle_truncated(parent_id.clone()),
            );
            continue;
        }

        let (parent_name, subtree) = build_node(resolver, parent_id, cache, path)?;
        if let Some(replaced) = tree.insert(parent_name, ParentEntry::new(parent_id.clone(), subtree)) {
            // Same display name: the later parent wins
            debug!(replaced = %replaced.id, by = %parent_id, "Duplicate parent name");
        }
    }

    Ok(tree)
}
