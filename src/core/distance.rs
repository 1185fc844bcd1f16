use crate::models::Coordinate;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// Symmetric in its arguments and zero for identical points. The result
/// is unrounded so it can feed further computation; see
/// [`display_distance_km`] for the user-visible value.
#[inline]
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 near antipodes
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place
#[inline]
pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Distance as shown to users, rounded to 0.1 km
///
/// Radius checks and distance ordering both use this value so that
/// what is displayed agrees with what is filtered.
#[inline]
pub fn display_distance_km(from: Coordinate, to: Coordinate) -> f64 {
    round_to_tenth(haversine_distance(from, to))
}
