use serde::{Deserialize, Serialize};
use crate::models::domain::{FilterConfig, KitchenAttributes, RankedCandidate, SortKey, UserLocation};

pub const NO_KITCHENS_NEARBY: &str =
    "No kitchens found in your area. Try increasing the search radius.";
pub const LOCATION_REQUIRED: &str = "Enable location to find nearby kitchens";

/// Response for the discover endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub kitchens: Vec<RankedCandidate<KitchenAttributes>>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    pub filter: FilterConfig,
    #[serde(rename = "sortBy")]
    pub sort_by: SortKey,
    pub location: Option<UserLocation>,
    #[serde(rename = "emptyMessage")]
    pub empty_message: Option<String>,
}

impl DiscoverResponse {
    /// Hint for an empty result list, depending on whether the user shared a location
    pub fn empty_message_for(kitchens: &[RankedCandidate<KitchenAttributes>], location_known: bool) -> Option<String> {
        if !kitchens.is_empty() {
            return None;
        }

        let message = if location_known { NO_KITCHENS_NEARBY } else { LOCATION_REQUIRED };
        Some(message.to_string())
    }
}

/// A radius preset offered to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiusOption {
    #[serde(rename = "radiusKm")]
    pub radius_km: Option<f64>,
    pub label: String,
}

/// A sort option offered to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOption {
    pub value: SortKey,
    pub label: String,
}

/// Filter and sort choices for the discovery screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryOptionsResponse {
    #[serde(rename = "radiusOptions")]
    pub radius_options: Vec<RadiusOption>,
    #[serde(rename = "sortOptions")]
    pub sort_options: Vec<SortOption>,
    #[serde(rename = "defaultFilter")]
    pub default_filter: FilterConfig,
    #[serde(rename = "defaultSort")]
    pub default_sort: SortKey,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Save location response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLocationResponse {
    pub success: bool,
    pub location: UserLocation,
}
