use crate::core::distance::display_distance_km;
use crate::models::{Candidate, Coordinate, FilterConfig};

/// Check if a candidate lies within `radius_km` of the origin
///
/// Candidates without a coordinate can never be shown to satisfy the
/// bound and are rejected. The boundary itself is inclusive.
#[inline]
pub fn is_within_radius<A>(candidate: &Candidate<A>, origin: Coordinate, radius_km: f64) -> bool {
    match candidate.coordinate {
        Some(coordinate) => display_distance_km(origin, coordinate) <= radius_km,
        None => false,
    }
}

/// Apply the radius filter, preserving the relative order of kept candidates
///
/// With no radius configured the input comes back unchanged.
pub fn filter_by_radius<A: Clone>(
    candidates: &[Candidate<A>],
    origin: Coordinate,
    config: &FilterConfig,
) -> Vec<Candidate<A>> {
    match config.radius_km {
        None => candidates.to_vec(),
        Some(radius_km) => candidates
            .iter()
            .filter(|candidate| is_within_radius(candidate, origin, radius_km))
            .cloned()
            .collect(),
    }
}
