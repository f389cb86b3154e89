//! Displacement alert service.
//!
//! Early-warning queries: lookups, severity and trend filters, per-region
//! exposure, and projected-arrival totals for the demand panel.

use crate::atlas::Atlas;
use crate::error::DataError;
use crate::types::{AlertTrend, DisplacementAlert, Severity};

/// Direct lookup by alert id.
pub fn alert(atlas: &Atlas, id: u32) -> Result<&DisplacementAlert, DataError> {
    atlas.displacement().get(&id)
}

/// Alerts at or above a severity threshold, in table order.
pub fn at_or_above(atlas: &Atlas, threshold: Severity) -> Vec<&DisplacementAlert> {
    atlas
        .displacement()
        .filter(|a| a.severity.rank() >= threshold.rank())
}

/// Alerts with an increasing trend, in table order.
pub fn increasing(atlas: &Atlas) -> Vec<&DisplacementAlert> {
    atlas
        .displacement()
        .filter(|a| a.trend == AlertTrend::Increasing)
}

/// Alerts naming the region code in their affected list, in table order.
pub fn affecting_region<'a>(atlas: &'a Atlas, code: &str) -> Vec<&'a DisplacementAlert> {
    atlas
        .displacement()
        .filter(|a| a.affected_regions.iter().any(|r| r == code))
}

/// Total projected arrivals across all alerts. 0 when none loaded.
pub fn total_projected_arrivals(atlas: &Atlas) -> u64 {
    atlas
        .displacement()
        .sum_by(|a| a.projected_arrivals as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    fn atlas() -> Atlas {
        datasets::load_default_atlas().unwrap()
    }

    #[test]
    fn test_alert_lookup() {
        let atlas = atlas();
        let haiti = alert(&atlas, 1).unwrap();
        assert_eq!(haiti.country, "Haiti");
        assert_eq!(haiti.severity, Severity::Critical);
    }

    #[test]
    fn test_unknown_alert_is_not_found() {
        let atlas = atlas();
        assert!(alert(&atlas, 99).unwrap_err().is_not_found());
    }

    #[test]
    fn test_critical_alerts_in_table_order() {
        let atlas = atlas();
        let ids: Vec<u32> = at_or_above(&atlas, Severity::Critical)
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 6, 7]);
    }

    #[test]
    fn test_affecting_region_filter() {
        let atlas = atlas();
        let wi = affecting_region(&atlas, "WI");
        assert!(wi.iter().all(|a| a.affected_regions.contains(&"WI".to_string())));
        assert_eq!(wi.len(), 3); // Afghanistan, Ukraine, Burma/Myanmar
    }

    #[test]
    fn test_total_projected_arrivals() {
        let atlas = atlas();
        assert_eq!(total_projected_arrivals(&atlas), 107_400);
    }

    #[test]
    fn test_increasing_excludes_stable_alerts() {
        let atlas = atlas();
        let rising = increasing(&atlas);
        assert!(rising.iter().all(|a| a.trend == AlertTrend::Increasing));
        assert!(rising.iter().any(|a| a.country == "Venezuela"));
        assert!(!rising.iter().any(|a| a.country == "Afghanistan"));
    }
}
