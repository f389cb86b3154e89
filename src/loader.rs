//! JSON reference table loading.
//!
//! Tables live as one JSON array per file: `regions.json`,
//! `communities.json`, `intelligence.json`, `displacement.json`,
//! `determinants.json`, `disability.json`. `regions.json` is required; a
//! missing secondary file loads as an empty table. Parsing and the
//! invariant sweep both run before any query: a value outside a closed
//! enum set or a violated range surfaces as `Validation`, malformed JSON
//! as `Parse`, and unreadable files as `Io`.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::atlas::{Atlas, ReferenceTables};
use crate::error::DataError;
use crate::types::{
    CommunityRecord, DisabilityRow, DisplacementAlert, IntelligenceItem, RegionDeterminants,
    RegionRecord,
};

fn parse_table<T: DeserializeOwned>(table: &str, json: &str) -> Result<Vec<T>, DataError> {
    serde_json::from_str(json).map_err(|e| match e.classify() {
        // Bad values (unknown enum variant, wrong type) are data problems,
        // not syntax problems.
        serde_json::error::Category::Data => {
            DataError::Validation(format!("{}: {}", table, e))
        }
        _ => DataError::Parse(format!("{}: {}", table, e)),
    })
}

/// Parse the region risk table from a JSON array.
pub fn parse_regions(json: &str) -> Result<Vec<RegionRecord>, DataError> {
    parse_table("regions", json)
}

/// Parse the community profile table from a JSON array.
pub fn parse_communities(json: &str) -> Result<Vec<CommunityRecord>, DataError> {
    parse_table("communities", json)
}

/// Parse the intelligence feed from a JSON array.
pub fn parse_intelligence(json: &str) -> Result<Vec<IntelligenceItem>, DataError> {
    parse_table("intelligence", json)
}

/// Parse the displacement alert table from a JSON array.
pub fn parse_displacement(json: &str) -> Result<Vec<DisplacementAlert>, DataError> {
    parse_table("displacement", json)
}

/// Parse the social-determinant table from a JSON array.
pub fn parse_determinants(json: &str) -> Result<Vec<RegionDeterminants>, DataError> {
    parse_table("determinants", json)
}

/// Parse the disability population table from a JSON array.
pub fn parse_disability(json: &str) -> Result<Vec<DisabilityRow>, DataError> {
    parse_table("disability", json)
}

fn read_required(dir: &Path, file: &str) -> Result<String, DataError> {
    let path = dir.join(file);
    fs::read_to_string(&path)
        .map_err(|e| DataError::Io(format!("failed to read {}: {}", path.display(), e)))
}

fn read_optional(dir: &Path, file: &str) -> Option<String> {
    let path = dir.join(file);
    if !path.exists() {
        log::debug!("{} absent, loading empty table", path.display());
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::warn!("failed to read {}: {}", path.display(), e);
            None
        }
    }
}

/// Read all table files from a directory.
pub fn load_tables_dir(dir: &Path) -> Result<ReferenceTables, DataError> {
    let regions = parse_regions(&read_required(dir, "regions.json")?)?;

    let communities = match read_optional(dir, "communities.json") {
        Some(json) => parse_communities(&json)?,
        None => Vec::new(),
    };
    let intelligence = match read_optional(dir, "intelligence.json") {
        Some(json) => parse_intelligence(&json)?,
        None => Vec::new(),
    };
    let displacement = match read_optional(dir, "displacement.json") {
        Some(json) => parse_displacement(&json)?,
        None => Vec::new(),
    };
    let determinants = match read_optional(dir, "determinants.json") {
        Some(json) => parse_determinants(&json)?,
        None => Vec::new(),
    };
    let disability = match read_optional(dir, "disability.json") {
        Some(json) => parse_disability(&json)?,
        None => Vec::new(),
    };

    Ok(ReferenceTables {
        regions,
        communities,
        intelligence,
        displacement,
        determinants,
        disability,
    })
}

/// Load and validate a full atlas from a directory of table files.
pub fn load_atlas_dir(dir: &Path) -> Result<Atlas, DataError> {
    let tables = load_tables_dir(dir)?;
    let atlas = Atlas::new(tables)?;
    log::info!("loaded atlas from {}", dir.display());
    Ok(atlas)
}
