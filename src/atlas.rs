//! The assembled reference tables.
//!
//! An [`Atlas`] owns every fixed table for one footprint: region risk
//! assessments, community profiles, the intelligence feed, displacement
//! alerts, social-determinant indicators, and disability population counts.
//! Tables are supplied by the caller at construction and validated before
//! any query is possible; the atlas never fetches, persists, or mutates
//! them. Selection state (selected region, active filter, expanded item)
//! belongs to the caller and is passed into queries as arguments.

use crate::collection::{Collection, Keyed};
use crate::error::DataError;
use crate::types::{
    CommunityRecord, DisabilityRow, DisplacementAlert, IntelligenceItem, RegionDeterminants,
    RegionRecord,
};

impl Keyed for RegionRecord {
    type Key = String;

    fn key(&self) -> String {
        self.code.clone()
    }
}

impl Keyed for CommunityRecord {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }
}

impl Keyed for IntelligenceItem {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

impl Keyed for DisplacementAlert {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

impl Keyed for RegionDeterminants {
    type Key = String;

    fn key(&self) -> String {
        self.region.clone()
    }
}

impl Keyed for DisabilityRow {
    type Key = String;

    fn key(&self) -> String {
        self.region.clone()
    }
}

/// Raw table vectors handed to [`Atlas::new`]. Missing tables default to
/// empty, which is valid: queries over them return empty sequences and
/// zero aggregates.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub regions: Vec<RegionRecord>,
    pub communities: Vec<CommunityRecord>,
    pub intelligence: Vec<IntelligenceItem>,
    pub displacement: Vec<DisplacementAlert>,
    pub determinants: Vec<RegionDeterminants>,
    pub disability: Vec<DisabilityRow>,
}

/// Validated, query-ready reference tables.
#[derive(Debug, Clone)]
pub struct Atlas {
    regions: Collection<RegionRecord>,
    communities: Collection<CommunityRecord>,
    intelligence: Collection<IntelligenceItem>,
    displacement: Collection<DisplacementAlert>,
    determinants: Collection<RegionDeterminants>,
    disability: Collection<DisabilityRow>,
}

impl Atlas {
    /// Validate and assemble the tables.
    ///
    /// Fails with `Validation` on the first violated invariant: duplicate
    /// keys, out-of-range scores or percentages, or determinant/disability
    /// rows naming a region that is not in the region table. Displacement
    /// alerts may reference regions outside the footprint, so their region
    /// lists are not cross-checked.
    pub fn new(tables: ReferenceTables) -> Result<Self, DataError> {
        for region in &tables.regions {
            if region.score > 100 {
                return Err(DataError::validation(format!(
                    "regions: '{}' score {} out of range [0, 100]",
                    region.code, region.score
                )));
            }
        }

        for community in &tables.communities {
            if community.satisfaction > 100 {
                return Err(DataError::validation(format!(
                    "communities: '{}' satisfaction {} out of range [0, 100]",
                    community.name, community.satisfaction
                )));
            }
        }

        let regions = Collection::new("regions", tables.regions)?;
        let communities = Collection::new("communities", tables.communities)?;
        let intelligence = Collection::new("intelligence", tables.intelligence)?;
        let displacement = Collection::new("displacement", tables.displacement)?;
        let determinants = Collection::new("determinants", tables.determinants)?;
        let disability = Collection::new("disability", tables.disability)?;

        for entry in determinants.iter() {
            if !regions.contains(&entry.region) {
                return Err(DataError::validation(format!(
                    "determinants: unknown region '{}'",
                    entry.region
                )));
            }
            for row in &entry.rows {
                for (segment, rate) in &row.rates {
                    if !(0.0..=100.0).contains(rate) {
                        return Err(DataError::validation(format!(
                            "determinants: {}/{}/{} rate {} out of range [0, 100]",
                            entry.region, row.indicator, segment, rate
                        )));
                    }
                }
            }
        }

        for row in disability.iter() {
            if !regions.contains(&row.region) {
                return Err(DataError::validation(format!(
                    "disability: unknown region '{}'",
                    row.region
                )));
            }
        }

        log::debug!(
            "atlas loaded: {} regions, {} communities, {} feed items, {} alerts",
            regions.len(),
            communities.len(),
            intelligence.len(),
            displacement.len()
        );

        Ok(Self {
            regions,
            communities,
            intelligence,
            displacement,
            determinants,
            disability,
        })
    }

    pub fn regions(&self) -> &Collection<RegionRecord> {
        &self.regions
    }

    pub fn communities(&self) -> &Collection<CommunityRecord> {
        &self.communities
    }

    pub fn intelligence(&self) -> &Collection<IntelligenceItem> {
        &self.intelligence
    }

    pub fn displacement(&self) -> &Collection<DisplacementAlert> {
        &self.displacement
    }

    pub fn determinants(&self) -> &Collection<RegionDeterminants> {
        &self.determinants
    }

    pub fn disability(&self) -> &Collection<DisabilityRow> {
        &self.disability
    }
}
