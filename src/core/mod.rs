pub mod config;
pub mod paths;
pub mod tree_builder;

pub use config::Config;
pub use tree_builder::{build_tree, RequestCache};
