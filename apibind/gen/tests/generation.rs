//! Generation tests against real API descriptions.

use std::fs;

use apibind_define::{SchemaFormat, load_catalog};
use apibind_definitions::define_rules_api;
use apibind_gen::cargo_gen::write_cargo_toml;
use apibind_gen::config::GeneratorConfig;
use apibind_gen::errors::GeneratorError;
use apibind_gen::output::{generate, generate_and_write};
use apibind_gen::schema::load_schema_file;
use tempfile::TempDir;

const KEYWORD_SCHEMA: &str = r#"
swagger: "2.0"
info:
  title: Catalog Service
  version: "3"
host: catalog.example.com
paths:
  /items/{itemId}:
    get:
      parameters:
        - { name: itemId, in: path, type: string, required: true }
        - { name: type, in: query, type: string }
        - { name: tags, in: query, type: array, items: { type: string }, collectionFormat: csv }
  /items:
    post:
      parameters:
        - { name: item, in: body, required: true }
"#;

#[test]
fn rules_api_generates_parseable_code() {
    let catalog = define_rules_api().unwrap();
    let code = generate(&catalog, &GeneratorConfig::new()).unwrap();

    assert_eq!(code.module_file, "rules_api.rs");
    syn::parse_file(&code.lib_rs).expect("lib.rs should parse");
    syn::parse_file(&code.module_rs).expect("module should parse");
}

#[test]
fn rules_api_module_has_one_method_and_struct_per_operation() {
    let catalog = define_rules_api().unwrap();
    let code = generate(&catalog, &GeneratorConfig::new()).unwrap();
    let module = &code.module_rs;

    assert!(module.contains("pub struct RulesApi"));
    assert!(module.contains("pub const BASE_URL: &str = \"https://api.ntoggle.com/v1\";"));
    assert_eq!(
        module.matches("pub async fn ").count(),
        catalog.operations.len()
    );
    assert_eq!(
        module.matches("pub fn into_args(self) -> Args").count(),
        catalog.operations.len()
    );

    assert!(module.contains("pub struct GetVersionsParams"));
    assert!(module.contains("pub async fn get_versions<T: DeserializeOwned>("));
    assert!(module.contains("pub struct PostVersionsByVersionQpsParams"));
    assert!(module.contains("\"postVersionsByVersionQps\""));
}

#[test]
fn rules_api_operations_table_lists_every_operation() {
    let catalog = define_rules_api().unwrap();
    let code = generate(&catalog, &GeneratorConfig::new()).unwrap();

    for op in &catalog.operations {
        let row = format!("`{} {}`", op.verb, op.path);
        assert!(code.module_rs.contains(&row), "missing table row {row}");
    }
}

#[test]
fn keyword_parameters_are_escaped_but_keep_wire_names() {
    let catalog = load_catalog(KEYWORD_SCHEMA, SchemaFormat::Yaml).unwrap();
    let code = generate(&catalog, &GeneratorConfig::new()).unwrap();
    let module = &code.module_rs;

    syn::parse_file(module).expect("module should parse");
    assert!(module.contains("pub struct CatalogService"));
    assert!(module.contains("pub type_: Option<String>"));
    assert!(module.contains("args.insert(\"type\", self.type_);"));
    assert!(module.contains("pub tags: Option<Vec<String>>"));
    assert!(module.contains("define::CollectionFormat::Csv"));
}

#[test]
fn custom_names_are_used() {
    let catalog = define_rules_api().unwrap();
    let config = GeneratorConfig::new()
        .client_name("Rules")
        .module_name("rules")
        .params_suffix("Args");
    let code = generate(&catalog, &config).unwrap();

    assert_eq!(code.module_file, "rules.rs");
    assert!(code.lib_rs.contains("pub mod rules;"));
    assert!(code.module_rs.contains("pub struct Rules "));
    assert!(code.module_rs.contains("pub struct GetVersionsArgs"));
    assert!(!code.module_rs.contains("GetVersionsParams"));
}

#[test]
fn client_name_colliding_with_params_struct_is_rejected() {
    let catalog = define_rules_api().unwrap();
    let config = GeneratorConfig::new()
        .client_name("GetVersionsParams")
        .params_suffix("Params");

    assert!(matches!(
        generate(&catalog, &config),
        Err(GeneratorError::NamingCollision { .. })
    ));
}

#[test]
fn writes_a_complete_crate() {
    let temp_dir = TempDir::new().unwrap();
    let crate_dir = temp_dir.path().join("rules-client");
    let src_dir = crate_dir.join("src");
    let config = GeneratorConfig::new().crate_name("rules-client");

    let catalog = define_rules_api().unwrap();
    generate_and_write(&catalog, &config, &src_dir, false).unwrap();
    write_cargo_toml(&crate_dir, &config, false).unwrap();

    assert!(src_dir.join("lib.rs").exists());
    assert!(src_dir.join("rules_api.rs").exists());

    let manifest: toml::Table = fs::read_to_string(crate_dir.join("Cargo.toml"))
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(manifest["package"]["name"].as_str(), Some("rules-client"));
    assert!(manifest["dependencies"].get("apibind-runtime").is_some());
    assert!(manifest["dependencies"].get("serde").is_some());
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let crate_dir = temp_dir.path().join("client");
    let config = GeneratorConfig::new();

    let catalog = define_rules_api().unwrap();
    generate_and_write(&catalog, &config, &crate_dir.join("src"), true).unwrap();
    write_cargo_toml(&crate_dir, &config, true).unwrap();

    assert!(!crate_dir.exists());
}

#[test]
fn loads_yaml_schema_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.yaml");
    fs::write(&path, KEYWORD_SCHEMA).unwrap();

    let catalog = load_schema_file(&path).unwrap();
    assert_eq!(catalog.title, "Catalog Service");
    assert_eq!(catalog.base_url.as_deref(), Some("https://catalog.example.com"));
    assert_eq!(catalog.operations.len(), 2);
}

#[test]
fn openapi_3_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("v3.json");
    fs::write(
        &path,
        r#"{"openapi": "3.0.0", "info": {"title": "New"}, "paths": {}}"#,
    )
    .unwrap();

    assert!(matches!(
        load_schema_file(&path),
        Err(GeneratorError::Schema(_))
    ));
}
