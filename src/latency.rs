//! In-memory latency rollups for hot query diagnostics.
//!
//! Keeps a bounded sample window per query so p95 figures can be surfaced
//! without persistent storage. All queries here are in-memory scans over
//! small tables; a budget violation means something is structurally wrong,
//! not that the data grew.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

const MAX_SAMPLES_PER_QUERY: usize = 128;

/// Rollup for one named query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRollup {
    pub query: String,
    pub sample_count: usize,
    pub p50_us: u128,
    pub p95_us: u128,
    pub max_us: u128,
    pub budget_us: u128,
    pub budget_violations: u64,
    pub last_recorded_at: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct QueryWindow {
    samples_us: VecDeque<u128>,
    budget_us: u128,
    budget_violations: u64,
    last_recorded_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
pub struct LatencyRecorder {
    windows: Mutex<HashMap<String, QueryWindow>>,
}

impl LatencyRecorder {
    fn global() -> &'static Self {
        static RECORDER: OnceLock<LatencyRecorder> = OnceLock::new();
        RECORDER.get_or_init(Self::default)
    }

    fn record_sample(&self, query: &str, elapsed_us: u128, budget_us: u128) {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };

        let window = windows.entry(query.to_string()).or_default();
        window.budget_us = budget_us;
        if elapsed_us > budget_us {
            window.budget_violations += 1;
        }
        if window.samples_us.len() >= MAX_SAMPLES_PER_QUERY {
            window.samples_us.pop_front();
        }
        window.samples_us.push_back(elapsed_us);
        window.last_recorded_at = Some(Utc::now());
    }

    fn snapshot(&self) -> Vec<QueryRollup> {
        let windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };

        let mut rollups: Vec<QueryRollup> = windows
            .iter()
            .map(|(query, window)| {
                let mut values: Vec<u128> = window.samples_us.iter().copied().collect();
                values.sort_unstable();

                QueryRollup {
                    query: query.clone(),
                    sample_count: values.len(),
                    p50_us: percentile(&values, 50.0).unwrap_or(0),
                    p95_us: percentile(&values, 95.0).unwrap_or(0),
                    max_us: values.last().copied().unwrap_or(0),
                    budget_us: window.budget_us,
                    budget_violations: window.budget_violations,
                    last_recorded_at: window.last_recorded_at.map(|dt| dt.to_rfc3339()),
                }
            })
            .collect();

        rollups.sort_by(|a, b| b.p95_us.cmp(&a.p95_us).then(a.query.cmp(&b.query)));
        rollups
    }
}

fn percentile(values: &[u128], p: f64) -> Option<u128> {
    if values.is_empty() {
        return None;
    }
    let n = values.len();
    let rank = ((p / 100.0) * n as f64).ceil() as usize;
    let idx = rank.saturating_sub(1).min(n - 1);
    Some(values[idx])
}

/// Record one sample against a query's budget.
pub fn record_latency(query: &str, elapsed_us: u128, budget_us: u128) {
    LatencyRecorder::global().record_sample(query, elapsed_us, budget_us);
}

/// Snapshot of all query rollups, worst p95 first.
pub fn get_rollups() -> Vec<QueryRollup> {
    LatencyRecorder::global().snapshot()
}
