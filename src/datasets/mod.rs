//! Embedded reference datasets.
//!
//! The canonical six-region footprint (IL, WI, NC, SC, GA, AL) ships inside
//! the crate so consumers can stand up a working atlas without authoring
//! tables. The JSON lives under `datasets/` and goes through the same
//! parse-and-validate path as caller-supplied files.

mod embedded;

pub use embedded::{get_embedded, ALL_TABLES};

use crate::atlas::{Atlas, ReferenceTables};
use crate::error::DataError;
use crate::loader;

/// Parse the embedded tables into raw vectors.
pub fn default_tables() -> Result<ReferenceTables, DataError> {
    Ok(ReferenceTables {
        regions: loader::parse_regions(embedded_json("regions")?)?,
        communities: loader::parse_communities(embedded_json("communities")?)?,
        intelligence: loader::parse_intelligence(embedded_json("intelligence")?)?,
        displacement: loader::parse_displacement(embedded_json("displacement")?)?,
        determinants: loader::parse_determinants(embedded_json("determinants")?)?,
        disability: loader::parse_disability(embedded_json("disability")?)?,
    })
}

/// Load and validate the embedded footprint.
pub fn load_default_atlas() -> Result<Atlas, DataError> {
    Atlas::new(default_tables()?)
}

fn embedded_json(table: &'static str) -> Result<&'static str, DataError> {
    get_embedded(table)
        .ok_or_else(|| DataError::Validation(format!("missing embedded table '{}'", table)))
}
