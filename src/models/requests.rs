use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{Coordinate, FilterConfig, GeocodedPlace, SortKey, UserLocation};

/// Request to discover kitchens around the user
///
/// `radiusKm` distinguishes three states: absent (use the configured
/// default), `null` (no radius), or a number.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_discover_request"))]
pub struct DiscoverRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub place: Option<GeocodedPlace>,
    #[serde(
        alias = "radius_km",
        rename = "radiusKm",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub radius_km: Option<Option<f64>>,
    #[serde(alias = "sort_by", rename = "sortBy", default)]
    pub sort_by: Option<SortKey>,
}

impl DiscoverRequest {
    /// The origin reported by the client, if it shared one
    pub fn location(&self) -> Option<UserLocation> {
        Coordinate::from_parts(self.latitude, self.longitude)
            .map(|coordinate| UserLocation::from_fix(coordinate, self.place.as_ref()))
    }

    pub fn filter_config(&self, default_radius_km: f64) -> FilterConfig {
        match self.radius_km {
            Some(radius_km) => FilterConfig { radius_km },
            None => FilterConfig::within(default_radius_km),
        }
    }

    pub fn sort_key(&self, default: SortKey) -> SortKey {
        self.sort_by.unwrap_or(default)
    }
}

/// Maps an explicit JSON `null` to `Some(None)` so it differs from an absent field
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_discover_request(req: &DiscoverRequest) -> Result<(), ValidationError> {
    if req.latitude.is_some() != req.longitude.is_some() {
        let mut err = ValidationError::new("coordinate_pair");
        err.message = Some("latitude and longitude must be sent together".into());
        return Err(err);
    }

    if let Some(Some(radius)) = req.radius_km {
        if !radius.is_finite() || radius <= 0.0 {
            let mut err = ValidationError::new("radius_range");
            err.message = Some("radiusKm must be a positive number or null".into());
            return Err(err);
        }
    }

    Ok(())
}

/// Request to store the user's current position on their profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveLocationRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub place: Option<GeocodedPlace>,
}

impl SaveLocationRequest {
    pub fn location(&self) -> UserLocation {
        UserLocation::from_fix(
            Coordinate::new(self.latitude, self.longitude),
            self.place.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_states() {
        let absent: DiscoverRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.filter_config(10.0), FilterConfig::within(10.0));

        let all: DiscoverRequest = serde_json::from_str(r#"{"radiusKm": null}"#).unwrap();
        assert_eq!(all.filter_config(10.0), FilterConfig::unbounded());

        let five: DiscoverRequest = serde_json::from_str(r#"{"radiusKm": 5}"#).unwrap();
        assert_eq!(five.filter_config(10.0), FilterConfig::within(5.0));
    }

    #[test]
    fn test_sort_default() {
        let req: DiscoverRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.sort_key(SortKey::Distance), SortKey::Distance);

        let req: DiscoverRequest = serde_json::from_str(r#"{"sortBy": "rating"}"#).unwrap();
        assert_eq!(req.sort_key(SortKey::Distance), SortKey::Rating);
    }

    #[test]
    fn test_half_coordinate_rejected() {
        let req: DiscoverRequest = serde_json::from_str(r#"{"latitude": 31.5}"#).unwrap();
        assert!(req.validate().is_err());
        assert!(req.location().is_none());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let req: DiscoverRequest =
            serde_json::from_str(r#"{"latitude": 91.0, "longitude": 74.3}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let req: DiscoverRequest = serde_json::from_str(r#"{"radiusKm": 0}"#).unwrap();
        assert!(req.validate().is_err());

        let req: DiscoverRequest = serde_json::from_str(r#"{"radiusKm": null}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_location_uses_place() {
        let req: DiscoverRequest = serde_json::from_str(
            r#"{"latitude": 31.5, "longitude": 74.3, "place": {"city": "Lahore"}}"#,
        )
        .unwrap();

        let location = req.location().unwrap();
        assert_eq!(location.coordinate, Coordinate::new(31.5, 74.3));
        assert_eq!(location.city.as_deref(), Some("Lahore"));
        assert_eq!(location.address.as_deref(), Some(", , "));
    }
}
