// Core algorithm exports
pub mod discovery;
pub mod distance;
pub mod filters;
pub mod ranking;

pub use discovery::{discover, Discovery, DiscoveryEngine};
pub use distance::{display_distance_km, haversine_distance, round_to_tenth};
pub use filters::{filter_by_radius, is_within_radius};
pub use ranking::{annotate, rank};
