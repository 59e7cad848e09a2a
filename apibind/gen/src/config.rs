//! Generator configuration.
//!
//! Every setting has a default derived from the catalog, so an empty
//! [`GeneratorConfig`] is usable as-is:
//!
//! | Setting | Default |
//! |---------|---------|
//! | client struct | PascalCase of `info.title` (`Rules API` -> `RulesApi`) |
//! | module file | snake_case of `info.title` (`rules_api.rs`) |
//! | params suffix | `Params` |
//! | crate name | `apibind-client` |
//! | runtime dependency | `apibind-runtime = "0.1"` |

use std::path::PathBuf;

use apibind_define::OperationCatalog;
use apibind_define::naming::{to_pascal_case, to_snake_case};

use crate::errors::GeneratorError;
use crate::naming::is_keyword;

/// Default suffix appended to params struct names.
pub const DEFAULT_PARAMS_SUFFIX: &str = "Params";

/// Default package name of the generated crate.
pub const DEFAULT_CRATE_NAME: &str = "apibind-client";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Name of the generated client struct.
    pub client_name: Option<String>,
    /// Name of the generated module file (without `.rs`).
    pub module_name: Option<String>,
    /// Suffix for params struct names (`GetVersions` + `Params`).
    pub params_suffix: String,
    /// Package name written to the generated `Cargo.toml`.
    pub crate_name: String,
    /// Local path to `apibind-runtime`; a registry version is used if unset.
    pub runtime_path: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            client_name: None,
            module_name: None,
            params_suffix: DEFAULT_PARAMS_SUFFIX.to_string(),
            crate_name: DEFAULT_CRATE_NAME.to_string(),
            runtime_path: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client struct name.
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Sets the module file name.
    pub fn module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Sets the params struct suffix.
    pub fn params_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.params_suffix = suffix.into();
        self
    }

    /// Sets the generated package name.
    pub fn crate_name(mut self, name: impl Into<String>) -> Self {
        self.crate_name = name.into();
        self
    }

    /// Points the generated crate at a local `apibind-runtime`.
    pub fn runtime_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.runtime_path = Some(path.into());
        self
    }

    /// Checks the explicit settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The params suffix is empty or not alphanumeric
    /// - The client name is not a PascalCase identifier
    /// - The module name is not a snake_case identifier or is a keyword
    /// - The crate name is empty or contains characters Cargo rejects
    pub fn validate(&self) -> Result<(), GeneratorError> {
        validate_params_suffix(&self.params_suffix)?;

        if let Some(name) = &self.client_name
            && !is_type_name(name)
        {
            return Err(GeneratorError::ConfigError(format!(
                "client name '{name}' must start with an uppercase letter and be alphanumeric"
            )));
        }

        if let Some(name) = &self.module_name
            && !is_module_name(name)
        {
            return Err(GeneratorError::ConfigError(format!(
                "module name '{name}' must be a lowercase snake_case identifier"
            )));
        }

        let crate_ok = !self.crate_name.is_empty()
            && self
                .crate_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !crate_ok {
            return Err(GeneratorError::ConfigError(format!(
                "crate name '{}' may only contain letters, digits, '-' and '_'",
                self.crate_name
            )));
        }

        Ok(())
    }

    /// Client struct name for `catalog`.
    ///
    /// ## Errors
    ///
    /// Returns an error if no name is configured and the title yields no
    /// usable identifier.
    pub fn resolve_client_name(&self, catalog: &OperationCatalog) -> Result<String, GeneratorError> {
        let name = match &self.client_name {
            Some(name) => name.clone(),
            None => to_pascal_case(&catalog.title),
        };
        if is_type_name(&name) {
            Ok(name)
        } else {
            Err(GeneratorError::ConfigError(format!(
                "cannot derive a client name from title '{}'; pass --client-name",
                catalog.title
            )))
        }
    }

    /// Module file name for `catalog`.
    ///
    /// ## Errors
    ///
    /// Returns an error if no name is configured and the title yields no
    /// usable identifier.
    pub fn resolve_module_name(&self, catalog: &OperationCatalog) -> Result<String, GeneratorError> {
        let name = match &self.module_name {
            Some(name) => name.clone(),
            None => to_snake_case(&catalog.title),
        };
        if is_module_name(&name) {
            Ok(name)
        } else {
            Err(GeneratorError::ConfigError(format!(
                "cannot derive a module name from title '{}'; pass --module",
                catalog.title
            )))
        }
    }
}

/// Validates a params suffix.
///
/// ## Errors
///
/// Returns [`GeneratorError::InvalidParamsSuffix`] if the suffix is empty or
/// contains anything but ASCII letters and digits.
pub fn validate_params_suffix(suffix: &str) -> Result<(), GeneratorError> {
    if suffix.is_empty() {
        return Err(GeneratorError::InvalidParamsSuffix {
            suffix: suffix.to_string(),
            reason: "suffix cannot be empty".to_string(),
        });
    }
    if !suffix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GeneratorError::InvalidParamsSuffix {
            suffix: suffix.to_string(),
            reason: "suffix must contain only letters and digits".to_string(),
        });
    }
    Ok(())
}

fn is_type_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
        && !is_keyword(name)
}

fn is_module_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && !is_keyword(name)
}
