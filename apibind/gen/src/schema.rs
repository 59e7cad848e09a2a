//! Catalog sources for the generator: schema files and built-in definitions.

use std::fs;
use std::path::Path;

use apibind_define::loader::{SchemaFormat, load_catalog};
use apibind_define::OperationCatalog;
use tracing::debug;

use crate::errors::GeneratorError;

/// Reads and loads a Swagger 2.0 file. `.yaml`/`.yml` files are parsed as
/// YAML, everything else as JSON.
///
/// ## Errors
///
/// Returns `ReadError` if the file cannot be read and `Schema` if it is
/// not a valid description.
pub fn load_schema_file(path: &Path) -> Result<OperationCatalog, GeneratorError> {
    let text = fs::read_to_string(path).map_err(|e| GeneratorError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let format = SchemaFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading schema file");
    Ok(load_catalog(&text, format)?)
}

/// Loads a built-in definition by name.
///
/// ## Errors
///
/// Returns `ConfigError` for unknown names.
pub fn load_builtin(name: &str) -> Result<OperationCatalog, GeneratorError> {
    match apibind_definitions::by_name(name) {
        Some(result) => Ok(result?),
        None => Err(GeneratorError::ConfigError(format!(
            "Unknown API: '{name}'. Available APIs: {}",
            apibind_definitions::AVAILABLE.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let result = load_schema_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(GeneratorError::ReadError { .. })));
    }

    #[test]
    fn test_yaml_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("api.yml");
        fs::write(
            &path,
            "swagger: '2.0'\ninfo:\n  title: Tiny\npaths:\n  /ping:\n    get: {}\n",
        )
        .unwrap();

        let catalog = load_schema_file(&path).unwrap();
        assert_eq!(catalog.title, "Tiny");
        assert_eq!(catalog.operations[0].name, "getPing");
    }

    #[test]
    fn test_malformed_file_is_schema_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("api.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_schema_file(&path),
            Err(GeneratorError::Schema(_))
        ));
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(load_builtin("rules").unwrap().operations.len(), 20);
        assert!(matches!(
            load_builtin("nope"),
            Err(GeneratorError::ConfigError(msg)) if msg.contains("rules")
        ));
    }
}
