//! apibind Code Generator
//!
//! Generates a typed Rust client crate from a Swagger 2.0 description or a
//! built-in API definition.

use std::path::{Path, PathBuf};

use apibind_gen::cargo_gen::write_cargo_toml;
use apibind_gen::config::{DEFAULT_CRATE_NAME, DEFAULT_PARAMS_SUFFIX, GeneratorConfig};
use apibind_gen::errors::GeneratorError;
use apibind_gen::output::generate_and_write;
use apibind_gen::schema::{load_builtin, load_schema_file};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// apibind code generator - turns API descriptions into typed Rust clients
#[derive(Parser, Debug)]
#[command(name = "apibind-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Swagger 2.0 file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, conflicts_with = "api", required_unless_present = "api")]
    schema: Option<PathBuf>,

    /// Built-in API definition to generate code for (e.g., "rules")
    #[arg(short, long)]
    api: Option<String>,

    /// Output directory for generated sources (the crate's src/)
    #[arg(short, long, default_value = "generated/src")]
    output: PathBuf,

    /// Client struct name (default: PascalCase of the API title)
    #[arg(long)]
    client_name: Option<String>,

    /// Module file name (default: snake_case of the API title)
    #[arg(long)]
    module: Option<String>,

    /// Suffix for generated params structs
    #[arg(long, default_value = DEFAULT_PARAMS_SUFFIX)]
    params_suffix: String,

    /// Package name written to the generated Cargo.toml
    #[arg(long, default_value = DEFAULT_CRATE_NAME)]
    crate_name: String,

    /// Local path to apibind-runtime (default: registry dependency)
    #[arg(long)]
    runtime_path: Option<PathBuf>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new()
            .params_suffix(&self.params_suffix)
            .crate_name(&self.crate_name);
        if let Some(name) = &self.client_name {
            config = config.client_name(name);
        }
        if let Some(name) = &self.module {
            config = config.module_name(name);
        }
        if let Some(path) = &self.runtime_path {
            config = config.runtime_path(path);
        }
        config
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,apibind_gen=info,apibind_define=info".to_string(),
            2 => "info,apibind_gen=debug,apibind_define=debug".to_string(),
            _ => "debug,apibind_gen=trace,apibind_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json);

    let catalog = match (&cli.schema, &cli.api) {
        (Some(path), _) => load_schema_file(path)?,
        (None, Some(name)) => load_builtin(name)?,
        (None, None) => {
            return Err(GeneratorError::ConfigError(
                "either --schema or --api is required".to_string(),
            ));
        }
    };

    info!(
        title = %catalog.title,
        operations = catalog.operations.len(),
        output = %cli.output.display(),
        dry_run = cli.dry_run,
        "generating client"
    );
    for op in &catalog.operations {
        debug!(operation = %op.name, verb = %op.verb, path = %op.path, "operation");
    }

    let config = cli.generator_config();
    generate_and_write(&catalog, &config, &cli.output, cli.dry_run)?;

    // Cargo.toml goes next to src/
    let crate_dir = cli
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    write_cargo_toml(crate_dir, &config, cli.dry_run)?;

    Ok(())
}
