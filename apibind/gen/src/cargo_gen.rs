//! Cargo.toml generation for the generated client crate.

use std::path::Path;

use tracing::info;

use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::output::write_atomic;

/// Registry version of `apibind-runtime` used when no local path is given.
const RUNTIME_VERSION: &str = "0.1";

/// Renders the manifest for the generated crate.
///
/// The manifest declares an empty `[workspace]` so the crate builds on its
/// own even when generated inside another workspace.
pub fn render_cargo_toml(config: &GeneratorConfig) -> String {
    let runtime = match &config.runtime_path {
        Some(path) => format!("{{ path = {:?} }}", path.display().to_string()),
        None => format!("{RUNTIME_VERSION:?}"),
    };

    format!(
        r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2024"
description = "Generated API client"

[workspace]

[dependencies]
apibind-runtime = {runtime}
serde = "1.0"
serde_json = "1.0"
"#,
        name = config.crate_name,
    )
}

/// Writes `Cargo.toml` into `crate_dir` (the parent of the generated `src/`).
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the file cannot be written.
pub fn write_cargo_toml(
    crate_dir: &Path,
    config: &GeneratorConfig,
    dry_run: bool,
) -> Result<(), GeneratorError> {
    let content = render_cargo_toml(config);
    if dry_run {
        println!("=== Cargo.toml ===\n{content}\n");
        return Ok(());
    }

    let path = crate_dir.join("Cargo.toml");
    write_atomic(&path, &content)?;
    info!(path = %path.display(), "wrote Cargo.toml");
    Ok(())
}
