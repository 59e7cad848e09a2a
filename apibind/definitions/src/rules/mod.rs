//! Rules API definition.
//!
//! The Rules API configures demand partners, the supply partners they buy
//! from, versioned rule sets per supply type, and publishing.

use apibind_define::loader::{SchemaFormat, load_catalog};
use apibind_define::{OperationCatalog, SchemaError};

/// The raw Swagger 2.0 document.
pub const RULES_API_SCHEMA: &str = include_str!("rules_api.json");

/// Loads the Rules API catalog.
///
/// ## Operations
///
/// - `getDemandPartnersByDpId` - GET /demand-partners/{dpId}
/// - `getVersions` - GET /versions (requires `limit` and `offset`)
/// - `postVersionsByVersionQps` - POST /versions/{version}/qps
/// - ... 20 operations in total
///
/// ## Errors
///
/// Only fails if the embedded document is broken.
pub fn define_rules_api() -> Result<OperationCatalog, SchemaError> {
    load_catalog(RULES_API_SCHEMA, SchemaFormat::Json)
}
