//! Community intelligence core for language access and health equity
//! programs.
//!
//! The crate owns the data side of the dashboard: fixed reference tables
//! (region risk assessments, community profiles, an intelligence feed,
//! displacement alerts, social determinants, disability populations),
//! read-only drill-down and aggregate queries over them, and a per-session
//! workspace of user-created records. Rendering is an external concern:
//! the consumer supplies tables at startup, owns all selection state, and
//! calls back into the query services as the user navigates.
//!
//! Reference data is validated when an [`Atlas`] is assembled: bad enum
//! values, out-of-range percentages, duplicate ids, and dangling
//! cross-references are rejected before the first query. Lookups against
//! unknown keys return an explicit [`DataError::NotFound`] so a missing
//! drill-down panel degrades instead of crashing the session.

pub mod analysis;
pub mod atlas;
pub mod collection;
pub mod datasets;
pub mod error;
pub mod latency;
pub mod loader;
pub mod services;
pub mod session;
pub mod types;

pub use atlas::{Atlas, ReferenceTables};
pub use collection::{toggle_membership, Collection, Keyed};
pub use error::DataError;
pub use session::{Session, SessionCounts};
