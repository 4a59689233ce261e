//! Command implementations.

pub mod demo;
pub mod eval;
pub mod query;
pub mod translate;

pub use self::demo::execute_demo;
pub use self::eval::execute_eval;
pub use self::query::execute_query;
pub use self::translate::execute_translate;

use crate::error::Result;
use specwise_domain::{ProductSpec, ProductSpecification, SpecDocument};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a specification document from disk.
///
/// Files with a `.toml` extension are parsed as TOML, anything else as JSON.
pub fn load_specification(path: &Path) -> Result<ProductSpecification> {
    let contents = fs::read_to_string(path)?;
    let document: SpecDocument<ProductSpec> = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&contents)?,
        _ => serde_json::from_str(&contents)?,
    };

    let spec = ProductSpecification::try_from(document)?;
    debug!(path = %path.display(), spec = %spec, "Loaded specification");
    Ok(spec)
}
