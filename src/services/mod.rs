// Query services over the atlas, one module per dashboard surface.
// All functions are stateless reads; selection state (selected region,
// active filter, expanded item) is passed in by the caller.

pub mod communities;
pub mod dashboard;
pub mod determinants;
pub mod displacement;
pub mod intelligence;
pub mod regions;
