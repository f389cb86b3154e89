use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Closed vocabularies
// =============================================================================

/// Composite risk rating assigned to a region record.
///
/// The score itself is externally produced; this is the banding that ships
/// with it. Values outside the closed set are rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

/// Direction indicator attached to a region's risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTrend {
    Up,
    Stable,
    Watch,
}

/// Direction indicator attached to a displacement alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTrend {
    Increasing,
    Stable,
    Decreasing,
}

/// Three-tier impact rating used by risk factors and feed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        }
    }
}

/// Severity scale shared by service gaps and displacement alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    Elevated,
    High,
    Critical,
}

impl Severity {
    /// Ordering rank, lowest first. Used for "at or above" filters.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::Elevated => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }
}

/// Service availability band for a sub-region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    High,
    Medium,
    Low,
    Critical,
}

/// Qualitative status of a single risk factor.
///
/// The vocabulary is the full set observed across the assessment dataset.
/// It is deliberately closed: an unrecognized status is a data error, not a
/// new band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Adequate,
    Favorable,
    Good,
    Supportive,
    Neutral,
    Stable,
    Moderate,
    Elevated,
    Uncertain,
    Strained,
    Limited,
    Challenging,
    Restrictive,
    Low,
    High,
    Poor,
    Critical,
}

/// Intelligence feed item classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntelCategory {
    Legislation,
    Regulatory,
    BestPractice,
    News,
    Research,
}

impl IntelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntelCategory::Legislation => "legislation",
            IntelCategory::Regulatory => "regulatory",
            IntelCategory::BestPractice => "best_practice",
            IntelCategory::News => "news",
            IntelCategory::Research => "research",
        }
    }
}

/// Completion status of a session task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

/// Lifecycle status of a team assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Assigned,
    Completed,
}

// =============================================================================
// Reference entities (immutable after load)
// =============================================================================

/// Where a reference table row came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Freshness label as published, e.g. "Released Dec 2024" or "Q4 2024".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_age: Option<String>,
}

/// One named pressure on a region's language access posture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub factor: String,
    pub status: FactorStatus,
    pub detail: String,
    pub impact: Impact,
}

/// A metro or sub-region inside a region record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroLocation {
    pub area: String,
    pub lep_population: u64,
    pub coverage: Coverage,
    /// Languages without adequate interpreter coverage in this area.
    #[serde(default)]
    pub gaps: Vec<String>,
}

/// Risk assessment for one region in the service footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    /// Region code, e.g. "IL". Unique within the table.
    pub code: String,
    pub name: String,
    /// Display label, e.g. "1.15M LEP (9%)".
    pub population_label: String,
    pub lep_population: u64,
    /// Composite score in [0, 100], produced upstream.
    pub score: u8,
    pub risk: RiskCategory,
    pub trend: RegionTrend,
    #[serde(default)]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(default)]
    pub considerations: Vec<String>,
    #[serde(default)]
    pub micro_locations: Vec<MicroLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    pub provenance: Provenance,
}

/// A named service gap within a community profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGap {
    pub gap: String,
    pub severity: Severity,
    pub detail: String,
}

/// A localized observation inside a community profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalInsight {
    pub region: String,
    pub insight: String,
}

/// Profile of one cultural community across the footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRecord {
    /// Community name. Unique within the table.
    pub name: String,
    /// Growth label as published, e.g. "+12%". Opaque; never parsed.
    pub growth: String,
    pub languages: Vec<String>,
    pub facilities: u32,
    /// Satisfaction percentage in [0, 100].
    pub satisfaction: u8,
    pub primary_need: String,
    #[serde(default)]
    pub health_considerations: Vec<String>,
    #[serde(default)]
    pub service_gaps: Vec<ServiceGap>,
    #[serde(default)]
    pub regional_insights: Vec<RegionalInsight>,
    pub provenance: Provenance,
}

/// One curated item in the intelligence feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceItem {
    pub id: u32,
    pub category: IntelCategory,
    pub region: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Display label, e.g. "2 days ago" or "Dec 5, 2024".
    pub date_label: String,
    pub impact: Impact,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
}

/// Early warning for a population displacement event abroad.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplacementAlert {
    pub id: u32,
    pub country: String,
    pub language: String,
    pub severity: Severity,
    /// Display label for the displaced population, e.g. "5.5M".
    pub displaced_label: String,
    pub projected_arrivals: u32,
    pub timeline: String,
    /// Region codes expected to receive arrivals. May name regions outside
    /// the loaded footprint.
    #[serde(default)]
    pub affected_regions: Vec<String>,
    pub trend: AlertTrend,
    pub reason: String,
}

/// One social-determinant indicator with per-segment rates.
///
/// Segment labels ("LEP", "General", "Deaf/HH", ...) are open-ended; rates
/// are percentages in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeterminantRow {
    pub indicator: String,
    pub rates: BTreeMap<String, f64>,
    pub source: String,
}

/// Social-determinant indicators for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDeterminants {
    pub region: String,
    pub rows: Vec<DeterminantRow>,
}

/// Deaf and hard-of-hearing population counts for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabilityRow {
    pub region: String,
    pub deaf: u64,
    pub hard_of_hearing: u64,
    pub deaf_blind: u64,
    pub total: u64,
}

// =============================================================================
// Session records (created by user action, never persisted)
// =============================================================================

/// A follow-up task created from a feed item's action list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Creation timestamp in epoch millis; unique within the session.
    pub id: i64,
    pub intelligence_id: u32,
    pub title: String,
    pub source_title: String,
    pub priority: Impact,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    /// Due one week after creation, "YYYY-MM-DD".
    pub due_date: String,
}

/// A feed item captured into the session's report draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub id: i64,
    pub intelligence_id: u32,
    pub title: String,
    pub category: IntelCategory,
    pub impact: Impact,
    pub summary: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// A feed item handed to a team with its action list attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub intelligence_id: u32,
    pub title: String,
    pub team: String,
    pub members: Vec<String>,
    pub action_items: Vec<String>,
    pub assigned_at: DateTime<Utc>,
    pub status: AssignmentStatus,
}

// =============================================================================
// Analysis output (produced by a provider, not computed by the core)
// =============================================================================

/// One recommended action inside an analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedAction {
    pub priority: u8,
    pub category: String,
    pub action: String,
    pub deadline: String,
    pub impact: String,
    /// Feed item ids this action was derived from.
    #[serde(default)]
    pub related_items: Vec<u32>,
    pub effort: String,
    pub owner: String,
}

/// Impact distribution summary inside an analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskTally {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub overall: String,
}

/// Result object returned by an analysis provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub generated_at: DateTime<Utc>,
    pub summary: String,
    pub prioritized_actions: Vec<PrioritizedAction>,
    pub risk_tally: RiskTally,
    pub key_insights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(
            serde_json::to_string(&IntelCategory::BestPractice).unwrap(),
            "\"best_practice\""
        );
        assert_eq!(serde_json::to_string(&RiskCategory::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&Severity::Elevated).unwrap(), "\"elevated\"");
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let result: Result<RiskCategory, _> = serde_json::from_str("\"extreme\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_severity_rank_ordering() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Elevated.rank());
        assert!(Severity::Elevated.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }

    #[test]
    fn test_region_record_camel_case_fields() {
        let json = r#"{
            "code": "IL",
            "name": "Illinois",
            "populationLabel": "1.15M LEP (9%)",
            "lepPopulation": 1153125,
            "score": 82,
            "risk": "low",
            "trend": "up",
            "provenance": { "source": "ACS 2023" }
        }"#;
        let record: RegionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.code, "IL");
        assert_eq!(record.lep_population, 1_153_125);
        assert!(record.risk_factors.is_empty());
        assert!(record.provenance.source_url.is_none());
    }
}
