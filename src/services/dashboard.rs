//! Dashboard service: summary cards and the overview strip.
//!
//! Assembles every number the landing view renders from the atlas plus the
//! caller's session. All inputs are small in-memory tables, so the latency
//! budget is tight; an overrun is logged, never surfaced to the caller.

use std::time::Instant;

use serde::Serialize;

use crate::atlas::Atlas;
use crate::latency;
use crate::services::{displacement, intelligence, regions};
use crate::session::{Session, SessionCounts};
use crate::types::{Impact, RegionTrend, RiskCategory, Severity};

/// p95 budget for a full dashboard build, in microseconds.
const DASHBOARD_LATENCY_BUDGET_US: u128 = 5_000;

/// Result type for dashboard assembly.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardResult {
    Success { data: DashboardData },
    Empty { message: String },
}

/// Everything the landing view renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub overview: FootprintOverview,
    pub stats: FootprintStats,
    /// Regions on watch (medium or high risk), in table order.
    pub watchlist: Vec<RegionSummary>,
    /// Countries with critical displacement alerts, in table order.
    pub critical_alert_countries: Vec<String>,
    /// Ids of high-impact feed items, in feed order.
    pub high_impact_feed: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintOverview {
    pub headline: String,
    pub region_codes: Vec<String>,
}

/// Summary-card scalars.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintStats {
    pub regions: usize,
    pub lep_population_total: u64,
    pub average_risk_score: f64,
    pub high_risk_regions: usize,
    pub deaf_population_total: u64,
    pub critical_alerts: usize,
    pub projected_arrivals_total: u64,
    pub feed_items: usize,
    pub high_impact_items: usize,
    pub session: SessionCounts,
}

/// One row of the watchlist.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub code: String,
    pub name: String,
    pub score: u8,
    pub risk: RiskCategory,
    pub trend: RegionTrend,
}

/// Build the dashboard. `Empty` when no regions are loaded, so the consumer
/// shows its onboarding panel instead of a blank grid.
pub fn build_dashboard(atlas: &Atlas, session: &Session) -> DashboardResult {
    let started = Instant::now();

    let result = (|| {
        if atlas.regions().is_empty() {
            return DashboardResult::Empty {
                message: "No regions loaded. Supply reference tables to begin monitoring."
                    .to_string(),
            };
        }

        let region_codes: Vec<String> =
            atlas.regions().iter().map(|r| r.code.clone()).collect();
        let lep_total = regions::total_lep_population(atlas);
        let impact = intelligence::impact_tally(atlas);
        let critical_alerts = displacement::at_or_above(atlas, Severity::Critical);

        let overview = FootprintOverview {
            headline: format!(
                "{} regions monitored, {} LEP residents in footprint",
                region_codes.len(),
                format_population(lep_total)
            ),
            region_codes,
        };

        let stats = FootprintStats {
            regions: atlas.regions().len(),
            lep_population_total: lep_total,
            average_risk_score: regions::average_score(atlas),
            high_risk_regions: atlas
                .regions()
                .filter(|r| r.risk == RiskCategory::High)
                .len(),
            deaf_population_total: atlas.disability().sum_by(|d| d.deaf as f64) as u64,
            critical_alerts: critical_alerts.len(),
            projected_arrivals_total: displacement::total_projected_arrivals(atlas),
            feed_items: atlas.intelligence().len(),
            high_impact_items: impact.high,
            session: session.counts(),
        };

        let watchlist = atlas
            .regions()
            .filter(|r| r.risk != RiskCategory::Low)
            .into_iter()
            .map(|r| RegionSummary {
                code: r.code.clone(),
                name: r.name.clone(),
                score: r.score,
                risk: r.risk,
                trend: r.trend,
            })
            .collect();

        let critical_alert_countries = critical_alerts
            .into_iter()
            .map(|a| a.country.clone())
            .collect();

        let high_impact_feed = atlas
            .intelligence()
            .filter(|i| i.impact == Impact::High)
            .into_iter()
            .map(|i| i.id)
            .collect();

        DashboardResult::Success {
            data: DashboardData {
                overview,
                stats,
                watchlist,
                critical_alert_countries,
                high_impact_feed,
            },
        }
    })();

    let elapsed_us = started.elapsed().as_micros();
    latency::record_latency("build_dashboard", elapsed_us, DASHBOARD_LATENCY_BUDGET_US);
    if elapsed_us > DASHBOARD_LATENCY_BUDGET_US {
        log::warn!(
            "build_dashboard exceeded latency budget: {}us > {}us",
            elapsed_us,
            DASHBOARD_LATENCY_BUDGET_US
        );
    } else {
        log::debug!("build_dashboard completed in {}us", elapsed_us);
    }

    result
}

/// "1.15M" / "265K" style label for population counts.
fn format_population(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.2}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{}K", count / 1_000)
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::ReferenceTables;
    use crate::datasets;

    #[test]
    fn test_dashboard_over_default_atlas() {
        let atlas = datasets::load_default_atlas().unwrap();
        let session = Session::new();

        let data = match build_dashboard(&atlas, &session) {
            DashboardResult::Success { data } => data,
            DashboardResult::Empty { message } => panic!("unexpected empty: {}", message),
        };

        assert_eq!(data.stats.regions, 6);
        assert_eq!(data.stats.average_risk_score, 71.0);
        assert_eq!(data.stats.high_risk_regions, 1);
        assert_eq!(data.stats.deaf_population_total, 187_000);
        assert_eq!(data.stats.feed_items, 10);
        assert_eq!(data.stats.session.tasks, 0);

        // medium + high bands, table order
        let codes: Vec<&str> = data.watchlist.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["NC", "SC", "GA", "AL"]);
        assert!(data
            .critical_alert_countries
            .contains(&"Venezuela".to_string()));
    }

    #[test]
    fn test_dashboard_reflects_session_activity() {
        let atlas = datasets::load_default_atlas().unwrap();
        let mut session = Session::new();
        session.toggle_saved(&atlas, 1).unwrap();
        session.create_task(&atlas, 1, "Review documentation").unwrap();

        let data = match build_dashboard(&atlas, &session) {
            DashboardResult::Success { data } => data,
            DashboardResult::Empty { .. } => panic!("unexpected empty"),
        };
        assert_eq!(data.stats.session.saved_items, 1);
        assert_eq!(data.stats.session.open_tasks, 1);
    }

    #[test]
    fn test_empty_atlas_yields_empty_result() {
        let atlas = Atlas::new(ReferenceTables::default()).unwrap();
        let session = Session::new();
        assert!(matches!(
            build_dashboard(&atlas, &session),
            DashboardResult::Empty { .. }
        ));
    }

    #[test]
    fn test_format_population_labels() {
        assert_eq!(format_population(3_253_230), "3.25M");
        assert_eq!(format_population(265_217), "265K");
        assert_eq!(format_population(412), "412");
    }
}
