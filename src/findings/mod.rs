//! Findings produced by a crawl
//!
//! - `TrackingItem`: a normalized email or phone number with its source page
//! - `ResultStore`: the ordered, deduplicated set of findings for one run

mod item;
mod store;

pub use item::{ItemKind, TrackingItem};
pub use store::ResultStore;
