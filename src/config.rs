//! Catalog asset loading.
//!
//! Catalogs (enemy types, loot items, loot tables) are immutable after
//! startup. They load once from a JSON asset file; a missing file is not an
//! error at the call sites that use `load_or_seed`-style constructors, but a
//! present-and-unparseable file surfaces a typed error so the embedding
//! layer can decide what to do.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors raised while loading a catalog asset.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File could not be found.
    #[error("catalog asset not found: {0}")]
    NotFound(String),

    /// File could not be read.
    #[error("failed to read catalog asset '{path}': {details}")]
    ReadError { path: String, details: String },

    /// JSON parsing failed.
    #[error("parse error in catalog asset '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The asset parsed but holds no usable entries.
    #[error("catalog asset '{0}' contains no entries")]
    Empty(String),
}

/// Loads and deserializes a JSON catalog asset.
pub fn load_json_asset<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(CatalogError::NotFound(display));
    }

    let text = fs::read_to_string(path).map_err(|e| CatalogError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    serde_json::from_str(&text).map_err(|e| CatalogError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("holdout_config_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = scratch_path("missing.json");
        let result: Result<Vec<String>, _> = load_json_asset(&path);
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let path = scratch_path("invalid.json");
        fs::write(&path, "{not json").unwrap();

        let result: Result<Vec<String>, _> = load_json_asset(&path);
        assert!(matches!(result, Err(CatalogError::ParseError { .. })));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_valid_json_roundtrip() {
        let path = scratch_path("valid.json");
        fs::write(&path, r#"["alpha", "beta"]"#).unwrap();

        let loaded: Vec<String> = load_json_asset(&path).unwrap();
        assert_eq!(loaded, vec!["alpha".to_string(), "beta".to_string()]);

        fs::remove_file(&path).ok();
    }
}
