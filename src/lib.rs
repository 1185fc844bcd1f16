//! Kitchen Discovery - proximity discovery and ranking for home kitchens
//!
//! This library finds kitchens near a user and orders them by distance,
//! rating or name. The core is a pure, synchronous pipeline
//! (radius filter, distance annotation, stable sort). Backend access and
//! device location sit behind injectable collaborator traits.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{discover, haversine_distance, Discovery, DiscoveryEngine};
pub use models::{Candidate, Coordinate, FilterConfig, Kitchen, RankedCandidate, SortKey, UserLocation};
