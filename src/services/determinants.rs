//! Social-determinant service.
//!
//! Per-region indicator tables and segment-to-segment gap derivation for
//! the disparities panel.

use crate::atlas::Atlas;
use crate::error::DataError;
use crate::types::RegionDeterminants;

/// Signed gap between two segment rates: positive when `segment_b` runs
/// higher than `segment_a`. No clamping.
pub fn derive_gap(segment_a_rate: f64, segment_b_rate: f64) -> f64 {
    segment_b_rate - segment_a_rate
}

/// Indicator table for one region.
pub fn rows_for<'a>(atlas: &'a Atlas, region: &str) -> Result<&'a RegionDeterminants, DataError> {
    atlas.determinants().get(&region.to_string())
}

/// Rate for one region / indicator / segment. `NotFound` names the missing
/// piece so the caller can tell an unknown region from an unknown segment.
pub fn rate(atlas: &Atlas, region: &str, indicator: &str, segment: &str) -> Result<f64, DataError> {
    let rows = rows_for(atlas, region)?;
    let row = rows
        .rows
        .iter()
        .find(|r| r.indicator == indicator)
        .ok_or_else(|| DataError::not_found("determinants", format!("{}/{}", region, indicator)))?;
    row.rates.get(segment).copied().ok_or_else(|| {
        DataError::not_found(
            "determinants",
            format!("{}/{}/{}", region, indicator, segment),
        )
    })
}

/// Gap between two segments for one indicator in one region.
pub fn segment_gap(
    atlas: &Atlas,
    region: &str,
    indicator: &str,
    segment_a: &str,
    segment_b: &str,
) -> Result<f64, DataError> {
    let a = rate(atlas, region, indicator, segment_a)?;
    let b = rate(atlas, region, indicator, segment_b)?;
    Ok(derive_gap(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    fn atlas() -> Atlas {
        datasets::load_default_atlas().unwrap()
    }

    #[test]
    fn test_derive_gap_is_signed_and_unclamped() {
        assert_eq!(derive_gap(10.5, 22.8), 12.3);
        assert_eq!(derive_gap(22.8, 10.5), -12.3);
        assert_eq!(derive_gap(0.0, 150.0), 150.0);
    }

    #[test]
    fn test_rows_for_region() {
        let atlas = atlas();
        let rows = rows_for(&atlas, "IL").unwrap();
        assert_eq!(rows.rows.len(), 5);
        assert!(rows.rows.iter().any(|r| r.indicator == "Poverty"));
    }

    #[test]
    fn test_rate_lookup() {
        let atlas = atlas();
        assert_eq!(rate(&atlas, "IL", "Poverty", "LEP").unwrap(), 18.2);
        assert_eq!(rate(&atlas, "IL", "Poverty", "General").unwrap(), 11.5);
    }

    #[test]
    fn test_rate_not_found_names_the_missing_piece() {
        let atlas = atlas();
        let err = rate(&atlas, "IL", "Poverty", "Blind").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("IL/Poverty/Blind"));

        let err = rate(&atlas, "IL", "Broadband", "LEP").unwrap_err();
        assert!(err.to_string().contains("IL/Broadband"));
    }

    #[test]
    fn test_segment_gap_general_to_lep() {
        let atlas = atlas();
        // LEP uninsured rate runs well above the general population in AL.
        let gap = segment_gap(&atlas, "AL", "Uninsured", "General", "LEP").unwrap();
        assert!((gap - 28.1).abs() < 1e-9); // 38.2 - 10.1
    }

    #[test]
    fn test_segment_gap_can_be_negative() {
        let atlas = atlas();
        let gap = segment_gap(&atlas, "AL", "Uninsured", "LEP", "General").unwrap();
        assert!(gap < 0.0);
    }
}
