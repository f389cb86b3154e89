//! Pluggable analysis provider.
//!
//! The dashboard's "analyze feed" action is not a core computation: the
//! core hands the atlas to an injected [`AnalysisProvider`] and renders
//! whatever comes back. The shipped [`ScriptedAnalyzer`] reproduces the
//! product's scripted behavior: an optional fixed delay followed by a
//! canned result whose related-item ids are restricted to the loaded feed.
//! Tests inject a zero-delay instance; a real model-backed provider would
//! implement the same trait.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::atlas::Atlas;
use crate::error::DataError;
use crate::types::{Analysis, Impact, PrioritizedAction, RiskTally};

/// Produces an [`Analysis`] over the loaded feed. No cancellation and no
/// retries; a provider either resolves or fails.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn analyze(&self, atlas: &Atlas) -> Result<Analysis, DataError>;
}

/// Scripted provider with a fixed response latency.
#[derive(Debug, Clone)]
pub struct ScriptedAnalyzer {
    delay: Duration,
}

impl ScriptedAnalyzer {
    /// Interactive default: the 2.5s "thinking" pause the product ships.
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(2500),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for ScriptedAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisProvider for ScriptedAnalyzer {
    async fn analyze(&self, atlas: &Atlas) -> Result<Analysis, DataError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let feed = atlas.intelligence();
        let high_impact = feed.filter(|i| i.impact == Impact::High).len();
        let medium_impact = feed.filter(|i| i.impact == Impact::Medium).len();
        let low_impact = feed.filter(|i| i.impact == Impact::Low).len();

        // Canned playbook; ids are dropped if the feed doesn't carry them.
        let keep = |ids: &[u32]| -> Vec<u32> {
            ids.iter().copied().filter(|id| feed.contains(id)).collect()
        };

        let analysis = Analysis {
            generated_at: Utc::now(),
            summary: format!(
                "Based on analysis of {} intelligence items, there are 3 critical \
                 compliance deadlines approaching and {} high-impact regulatory \
                 changes requiring immediate attention.",
                feed.len(),
                high_impact
            ),
            prioritized_actions: vec![
                PrioritizedAction {
                    priority: 1,
                    category: "Compliance Deadline".to_string(),
                    action: "Complete Section 1557 written policies and procedures"
                        .to_string(),
                    deadline: "July 5, 2025".to_string(),
                    impact: "Critical - Federal requirement".to_string(),
                    related_items: keep(&[1, 7, 9]),
                    effort: "High".to_string(),
                    owner: "Compliance Team".to_string(),
                },
                PrioritizedAction {
                    priority: 2,
                    category: "Accreditation".to_string(),
                    action: "Implement language-stratified quality tracking for Joint \
                             Commission Goals 4 & 7"
                        .to_string(),
                    deadline: "January 2026".to_string(),
                    impact: "High - Accreditation requirement".to_string(),
                    related_items: keep(&[3]),
                    effort: "Medium".to_string(),
                    owner: "Quality Team".to_string(),
                },
                PrioritizedAction {
                    priority: 3,
                    category: "Process Improvement".to_string(),
                    action: "Audit and update machine translation processes with human \
                             review workflow"
                        .to_string(),
                    deadline: "Q1 2025".to_string(),
                    impact: "High - Regulatory guidance".to_string(),
                    related_items: keep(&[7]),
                    effort: "Medium".to_string(),
                    owner: "Translation Services".to_string(),
                },
                PrioritizedAction {
                    priority: 4,
                    category: "Documentation".to_string(),
                    action: "Verify Section 1557 coordinator designation and grievance \
                             process"
                        .to_string(),
                    deadline: "Immediate".to_string(),
                    impact: "High - Past deadline".to_string(),
                    related_items: keep(&[9]),
                    effort: "Low".to_string(),
                    owner: "HR/Compliance".to_string(),
                },
                PrioritizedAction {
                    priority: 5,
                    category: "Strategic Planning".to_string(),
                    action: "Develop VRI integration roadmap based on Lee Health best \
                             practices"
                        .to_string(),
                    deadline: "Q2 2025".to_string(),
                    impact: "Medium - Operational improvement".to_string(),
                    related_items: keep(&[6]),
                    effort: "High".to_string(),
                    owner: "Operations".to_string(),
                },
            ],
            risk_tally: RiskTally {
                high: high_impact as u32,
                medium: medium_impact as u32,
                low: low_impact as u32,
                overall: "Elevated".to_string(),
            },
            key_insights: vec![
                "July 2025 represents a critical compliance milestone with multiple \
                 overlapping requirements"
                    .to_string(),
                "Language access is transitioning from patient experience to patient \
                 safety domain"
                    .to_string(),
                "AI/machine translation use requires new human review processes"
                    .to_string(),
                "OCR enforcement activity remains aggressive - 54 Right of Access \
                 actions to date"
                    .to_string(),
            ],
        };

        log::info!(
            "scripted analysis generated over {} feed items ({} prioritized actions)",
            feed.len(),
            analysis.prioritized_actions.len()
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::ReferenceTables;
    use crate::datasets;

    #[tokio::test]
    async fn test_scripted_analyzer_resolves_with_canned_result() {
        let atlas = datasets::load_default_atlas().unwrap();
        let analyzer = ScriptedAnalyzer::with_delay(Duration::ZERO);

        let analysis = analyzer.analyze(&atlas).await.unwrap();
        assert_eq!(analysis.prioritized_actions.len(), 5);
        assert_eq!(analysis.risk_tally.overall, "Elevated");
        assert!(analysis.summary.contains("10 intelligence items"));
    }

    #[tokio::test]
    async fn test_related_items_all_exist_in_feed() {
        let atlas = datasets::load_default_atlas().unwrap();
        let analyzer = ScriptedAnalyzer::with_delay(Duration::ZERO);

        let analysis = analyzer.analyze(&atlas).await.unwrap();
        for action in &analysis.prioritized_actions {
            for id in &action.related_items {
                assert!(atlas.intelligence().contains(id), "dangling id {}", id);
            }
        }
    }

    #[tokio::test]
    async fn test_empty_feed_drops_all_related_items() {
        let atlas = Atlas::new(ReferenceTables::default()).unwrap();
        let analyzer = ScriptedAnalyzer::with_delay(Duration::ZERO);

        let analysis = analyzer.analyze(&atlas).await.unwrap();
        assert!(analysis
            .prioritized_actions
            .iter()
            .all(|a| a.related_items.is_empty()));
        assert_eq!(analysis.risk_tally.high, 0);
    }
}
