/// Taxonomy types for Wikidata-backed ancestry trees
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Wikidata item identifier of a taxon (e.g. `Q146`)
///
/// Opaque: forwarded to the knowledge base untouched, no format is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonId(String);

impl TaxonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaxonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TaxonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TaxonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Human-readable taxon label
pub type TaxonName = String;

/// Rank of a Wikibase statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementRank {
    Preferred,
    Normal,
    Deprecated,
    #[serde(other)]
    Other,
}

impl StatementRank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preferred => "preferred",
            Self::Normal => "normal",
            Self::Deprecated => "deprecated",
            Self::Other => "other",
        }
    }

    /// Ranks that can supply parents at all
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Preferred | Self::Normal)
    }
}

impl fmt::Display for StatementRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a statement carries a concrete value, "unknown value" or "no value"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakType {
    Value,
    SomeValue,
    NoValue,
    #[serde(other)]
    Other,
}

impl SnakType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::SomeValue => "somevalue",
            Self::NoValue => "novalue",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SnakType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parent-taxon statement as found on an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    /// Target item; `None` unless the snak type is `value`
    pub target: Option<TaxonId>,
    pub rank: StatementRank,
    pub snak_type: SnakType,
}

impl ParentLink {
    pub fn value(target: impl Into<TaxonId>, rank: StatementRank) -> Self {
        Self {
            target: Some(target.into()),
            rank,
            snak_type: SnakType::Value,
        }
    }

    pub fn without_value(snak_type: SnakType, rank: StatementRank) -> Self {
        Self {
            target: None,
            rank,
            snak_type,
        }
    }

    /// Target of a statement with a concrete value
    pub fn value_target(&self) -> Option<&TaxonId> {
        match self.snak_type {
            SnakType::Value => self.target.as_ref(),
            _ => None,
        }
    }

    /// Whether this link contributes a parent when `rank` is the winning rank
    pub fn is_selected(&self, rank: StatementRank) -> bool {
        self.rank == rank && rank.is_selectable() && self.value_target().is_some()
    }
}

/// A resolved parent of a tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentEntry {
    pub id: TaxonId,
    /// Set when the parent was already on the active resolution path
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cycle_truncated: bool,
    #[serde(rename = "parents")]
    pub subtree: Arc<TaxonTree>,
}

impl ParentEntry {
    pub fn new(id: TaxonId, subtree: Arc<TaxonTree>) -> Self {
        Self {
            id,
            cycle_truncated: false,
            subtree,
        }
    }

    /// Leaf standing in for an ancestor that is still being resolved
    pub fn cycle_truncated(id: TaxonId) -> Self {
        Self {
            id,
            cycle_truncated: true,
            subtree: Arc::new(TaxonTree::new()),
        }
    }
}

/// Parents of a taxon keyed by display name, each with its own subtree
///
/// Keeps insertion order. Inserting a name that is already present replaces
/// the entry but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonTree {
    parents: IndexMap<TaxonName, ParentEntry>,
}

impl TaxonTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parent, returning the entry it replaced (same display name)
    pub fn insert(&mut self, name: TaxonName, entry: ParentEntry) -> Option<ParentEntry> {
        self.parents.insert(name, entry)
    }

    pub fn get(&self, name: &str) -> Option<&ParentEntry> {
        self.parents.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaxonName, &ParentEntry)> {
        self.parents.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &TaxonName> {
        self.parents.keys()
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Length of the longest ancestry chain below this node
    pub fn depth(&self) -> usize {
        self.parents
            .values()
            .map(|entry| 1 + entry.subtree.depth())
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes in the rendered tree, counting repeated subtrees each time
    pub fn node_count(&self) -> usize {
        self.parents
            .values()
            .map(|entry| 1 + entry.subtree.node_count())
            .sum()
    }

    /// Number of cycle-truncated leaves anywhere in the tree
    pub fn truncated_count(&self) -> usize {
        self.parents
            .values()
            .map(|entry| usize::from(entry.cycle_truncated) + entry.subtree.truncated_count())
            .sum()
    }
}

impl<'a> IntoIterator for &'a TaxonTree {
    type Item = (&'a TaxonName, &'a ParentEntry);
    type IntoIter = indexmap::map::Iter<'a, TaxonName, ParentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.parents.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(id: &str) -> ParentEntry {
        ParentEntry::new(TaxonId::from(id), Arc::new(TaxonTree::new()))
    }

    #[test]
    fn test_taxon_id_conversion() {
        let id = TaxonId::from("Q146");
        assert_eq!(id.as_str(), "Q146");
        assert_eq!(id.to_string(), "Q146");
        assert_eq!(TaxonId::new(String::from("Q146")), id);
    }

    #[test]
    fn test_rank_and_snak_type_parse() {
        let rank: StatementRank = serde_json::from_str("\"preferred\"").unwrap();
        assert_eq!(rank, StatementRank::Preferred);
        let rank: StatementRank = serde_json::from_str("\"something-new\"").unwrap();
        assert_eq!(rank, StatementRank::Other);

        let snak: SnakType = serde_json::from_str("\"somevalue\"").unwrap();
        assert_eq!(snak, SnakType::SomeValue);
        let snak: SnakType = serde_json::from_str("\"novalue\"").unwrap();
        assert_eq!(snak, SnakType::NoValue);
    }

    #[test]
    fn test_link_selection() {
        let preferred = ParentLink::value("Q1", StatementRank::Preferred);
        assert!(preferred.is_selected(StatementRank::Preferred));
        assert!(!preferred.is_selected(StatementRank::Normal));

        let unknown = ParentLink::without_value(SnakType::SomeValue, StatementRank::Normal);
        assert!(!unknown.is_selected(StatementRank::Normal));

        let deprecated = ParentLink::value("Q2", StatementRank::Deprecated);
        assert!(!deprecated.is_selected(StatementRank::Deprecated));
        assert!(!StatementRank::Other.is_selectable());
    }

    #[test]
    fn test_duplicate_name_last_write_wins_in_place() {
        let mut tree = TaxonTree::new();
        assert!(tree.insert("Felis".to_string(), leaf("Q1")).is_none());
        tree.insert("Lynx".to_string(), leaf("Q2"));

        let replaced = tree.insert("Felis".to_string(), leaf("Q3"));
        assert_eq!(replaced.map(|e| e.id), Some(TaxonId::from("Q1")));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get("Felis").unwrap().id, TaxonId::from("Q3"));
        let names: Vec<_> = tree.names().cloned().collect();
        assert_eq!(names, vec!["Felis".to_string(), "Lynx".to_string()]);
    }

    #[test]
    fn test_depth_and_counts() {
        let mut top = TaxonTree::new();
        top.insert("Biota".to_string(), leaf("Q2382443"));

        let mut middle = TaxonTree::new();
        middle.insert(
            "Animalia".to_string(),
            ParentEntry::new(TaxonId::from("Q729"), Arc::new(top)),
        );
        middle.insert(
            "Felis catus".to_string(),
            ParentEntry::cycle_truncated(TaxonId::from("Q146")),
        );

        assert_eq!(middle.depth(), 2);
        assert_eq!(middle.node_count(), 3);
        assert_eq!(middle.truncated_count(), 1);
        assert_eq!(TaxonTree::new().depth(), 0);
    }

    #[test]
    fn test_tree_serializes_nested_parents() {
        let mut tree = TaxonTree::new();
        tree.insert("Felis".to_string(), leaf("Q147"));

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "Felis": { "id": "Q147", "parents": {} } })
        );
    }
}
