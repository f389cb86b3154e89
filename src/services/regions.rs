//! Region service: geographic risk assessment queries.
//!
//! Business logic behind the state-by-state panel: direct lookups for the
//! drill-down view, stable risk-band filters, and score aggregates for the
//! summary strip.

use serde::Serialize;

use crate::atlas::Atlas;
use crate::error::DataError;
use crate::types::{Coverage, Impact, RegionRecord, RiskCategory, RiskFactor};

/// Risk-band selection for the region list. `All` is the no-filter
/// sentinel; `Only` keeps a single band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFilter {
    All,
    Only(RiskCategory),
}

/// Direct lookup for the drill-down panel.
pub fn region<'a>(atlas: &'a Atlas, code: &str) -> Result<&'a RegionRecord, DataError> {
    atlas.regions().get(&code.to_string())
}

/// Regions matching the filter, in table order.
pub fn filter_by_risk(atlas: &Atlas, filter: RiskFilter) -> Vec<&RegionRecord> {
    match filter {
        RiskFilter::All => atlas.regions().iter().collect(),
        RiskFilter::Only(band) => atlas.regions().filter(|r| r.risk == band),
    }
}

/// Mean composite score across the footprint. 0 when no regions are loaded.
pub fn average_score(atlas: &Atlas) -> f64 {
    atlas.regions().average_by(|r| r.score as f64)
}

/// Total LEP population across the footprint.
pub fn total_lep_population(atlas: &Atlas) -> u64 {
    atlas.regions().sum_by(|r| r.lep_population as f64) as u64
}

/// Drill-down view for one region: the record plus rollups the detail
/// panel renders alongside it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDetail<'a> {
    pub record: &'a RegionRecord,
    /// LEP population summed over the region's micro locations.
    pub micro_lep_total: u64,
    /// Distinct gap languages across micro locations, first-seen order.
    pub gap_languages: Vec<&'a str>,
    /// Micro locations whose coverage is low or critical.
    pub underserved_areas: Vec<&'a str>,
    /// Risk factors rated high impact.
    pub high_impact_factors: Vec<&'a RiskFactor>,
}

/// Assemble the drill-down view. `NotFound` for an unknown code; a region
/// with no micro locations or factors yields empty rollups, not an error.
pub fn drill_down<'a>(atlas: &'a Atlas, code: &str) -> Result<RegionDetail<'a>, DataError> {
    let record = region(atlas, code)?;

    let micro_lep_total = record
        .micro_locations
        .iter()
        .map(|m| m.lep_population)
        .sum();

    let mut gap_languages: Vec<&str> = Vec::new();
    for location in &record.micro_locations {
        for gap in &location.gaps {
            if !gap_languages.contains(&gap.as_str()) {
                gap_languages.push(gap);
            }
        }
    }

    let underserved_areas = record
        .micro_locations
        .iter()
        .filter(|m| matches!(m.coverage, Coverage::Low | Coverage::Critical))
        .map(|m| m.area.as_str())
        .collect();

    let high_impact_factors = record
        .risk_factors
        .iter()
        .filter(|f| f.impact == Impact::High)
        .collect();

    Ok(RegionDetail {
        record,
        micro_lep_total,
        gap_languages,
        underserved_areas,
        high_impact_factors,
    })
}
