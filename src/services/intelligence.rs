//! Intelligence feed service.
//!
//! Category filtering, lookups for the expanded item view, impact tallies,
//! and free-text search across titles, summaries, and tags.

use serde::Serialize;

use crate::atlas::Atlas;
use crate::error::DataError;
use crate::types::{Impact, IntelCategory, IntelligenceItem};

/// Category selection for the feed. `All` is the no-filter sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFilter {
    All,
    Category(IntelCategory),
}

/// Feed items matching the filter, in feed order. Applying the same filter
/// twice yields the same sequence.
pub fn filter_feed(atlas: &Atlas, filter: FeedFilter) -> Vec<&IntelligenceItem> {
    match filter {
        FeedFilter::All => atlas.intelligence().iter().collect(),
        FeedFilter::Category(category) => {
            atlas.intelligence().filter(|i| i.category == category)
        }
    }
}

/// Lookup for the expanded item panel.
pub fn item(atlas: &Atlas, id: u32) -> Result<&IntelligenceItem, DataError> {
    atlas.intelligence().get(&id)
}

/// Feed-wide impact distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactTally {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub fn impact_tally(atlas: &Atlas) -> ImpactTally {
    let feed = atlas.intelligence();
    ImpactTally {
        high: feed.filter(|i| i.impact == Impact::High).len(),
        medium: feed.filter(|i| i.impact == Impact::Medium).len(),
        low: feed.filter(|i| i.impact == Impact::Low).len(),
    }
}

/// Case-insensitive substring search over title, summary, and tags.
/// A blank query matches nothing.
pub fn search<'a>(atlas: &'a Atlas, query: &str) -> Vec<&'a IntelligenceItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    atlas.intelligence().filter(|i| {
        i.title.to_lowercase().contains(&needle)
            || i.summary.to_lowercase().contains(&needle)
            || i.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    })
}
