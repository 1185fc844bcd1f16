// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, Coordinate, FilterConfig, GeocodedPlace, Kitchen, KitchenAttributes, RankedCandidate, SortKey, UserLocation};
pub use requests::{DiscoverRequest, SaveLocationRequest};
pub use responses::{DiscoverResponse, DiscoveryOptionsResponse, ErrorResponse, HealthResponse, RadiusOption, SaveLocationResponse, SortOption};
