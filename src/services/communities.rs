//! Community profile service.
//!
//! Lookups for the community drill-down and footprint-wide rollups over
//! service gaps, facilities, and satisfaction.

use crate::atlas::Atlas;
use crate::error::DataError;
use crate::types::{CommunityRecord, ServiceGap, Severity};

/// Direct lookup by community name.
pub fn community<'a>(atlas: &'a Atlas, name: &str) -> Result<&'a CommunityRecord, DataError> {
    atlas.communities().get(&name.to_string())
}

/// Service gaps at or above a severity threshold, paired with their
/// community, in table order.
pub fn gaps_at_or_above(atlas: &Atlas, threshold: Severity) -> Vec<(&str, &ServiceGap)> {
    let mut gaps = Vec::new();
    for record in atlas.communities().iter() {
        for gap in &record.service_gaps {
            if gap.severity.rank() >= threshold.rank() {
                gaps.push((record.name.as_str(), gap));
            }
        }
    }
    gaps
}

/// Mean satisfaction percentage across communities. 0 when none loaded.
pub fn average_satisfaction(atlas: &Atlas) -> f64 {
    atlas.communities().average_by(|c| c.satisfaction as f64)
}

/// Total facility count across communities.
pub fn total_facilities(atlas: &Atlas) -> u64 {
    atlas.communities().sum_by(|c| c.facilities as f64) as u64
}

/// Communities serving a given language, in table order.
pub fn serving_language<'a>(atlas: &'a Atlas, language: &str) -> Vec<&'a CommunityRecord> {
    atlas
        .communities()
        .filter(|c| c.languages.iter().any(|l| l.eq_ignore_ascii_case(language)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    fn atlas() -> Atlas {
        datasets::load_default_atlas().unwrap()
    }

    #[test]
    fn test_community_lookup() {
        let atlas = atlas();
        let record = community(&atlas, "Deaf/Hard of Hearing").unwrap();
        assert_eq!(record.satisfaction, 91);
        assert!(record.languages.contains(&"ASL".to_string()));
    }

    #[test]
    fn test_unknown_community_is_not_found() {
        let atlas = atlas();
        assert!(community(&atlas, "Nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_critical_gaps_rollup() {
        let atlas = atlas();
        let critical = gaps_at_or_above(&atlas, Severity::Critical);
        assert!(critical
            .iter()
            .any(|(name, gap)| *name == "African Immigrant"
                && gap.gap == "Interpreter availability"));
        assert!(critical.iter().all(|(_, g)| g.severity == Severity::Critical));
    }

    #[test]
    fn test_threshold_includes_higher_bands() {
        let atlas = atlas();
        let high_and_up = gaps_at_or_above(&atlas, Severity::High);
        let critical_only = gaps_at_or_above(&atlas, Severity::Critical);
        assert!(high_and_up.len() > critical_only.len());
    }

    #[test]
    fn test_satisfaction_average() {
        let atlas = atlas();
        // (87 + 82 + 79 + 91 + 74) / 5
        assert_eq!(average_satisfaction(&atlas), 82.6);
    }

    #[test]
    fn test_serving_language_is_case_insensitive() {
        let atlas = atlas();
        let communities = serving_language(&atlas, "spanish");
        assert_eq!(communities.len(), 1);
        assert_eq!(communities[0].name, "Hispanic/Latino");
    }
}
