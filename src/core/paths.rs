use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static TAXON_TREE_HOME: OnceLock<PathBuf> = OnceLock::new();

/// Get the taxon-tree home directory
/// Checks TAXON_TREE_HOME environment variable, falls back to ${HOME}/.taxon-tree
pub fn taxon_tree_home() -> PathBuf {
    TAXON_TREE_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("TAXON_TREE_HOME") {
                PathBuf::from(path)
            } else {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".taxon-tree")
            }
        })
        .clone()
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    taxon_tree_home().join("config.toml")
}

/// Check if running with a custom home directory
pub fn is_custom_home() -> bool {
    std::env::var("TAXON_TREE_HOME").is_ok()
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "taxon-tree Paths:\n  \
        Home: {}\n  \
        Config: {}\n  \
        Custom: {}",
        taxon_tree_home().display(),
        default_config_path().display(),
        if is_custom_home() { "Yes" } else { "No (using defaults)" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_under_home() {
        let path = default_config_path();
        assert!(path.ends_with("config.toml"));
        assert!(path.starts_with(taxon_tree_home()));
    }

    #[test]
    fn test_describe_paths() {
        let description = describe_paths();
        assert!(description.contains("Home:"));
        assert!(description.contains("config.toml"));
    }
}
