pub mod taxonomy;

pub use taxonomy::{ParentEntry, ParentLink, SnakType, StatementRank, TaxonId, TaxonName, TaxonTree};
