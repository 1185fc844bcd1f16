use crate::models::{Coordinate, Kitchen, KitchenAttributes, UserLocation};
use crate::services::{CandidateSource, ProfileStore, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Image shown for kitchens that never uploaded one
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/80";

const KITCHEN_COLUMNS: &str =
    "id,kitchen_name,cuisine_types,food_hygiene_rating,kitchen_image,latitude,longitude,kitchen_address";

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the Supabase database
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub chef_profiles: String,
    pub profiles: String,
}

/// Row shape of the chef profile table
#[derive(Debug, Deserialize)]
struct KitchenRow {
    id: String,
    kitchen_name: String,
    #[serde(default)]
    cuisine_types: Option<Vec<String>>,
    #[serde(default)]
    food_hygiene_rating: Option<f64>,
    #[serde(default)]
    kitchen_image: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    kitchen_address: Option<String>,
}

/// Supabase REST client
///
/// Handles all communication with the Supabase backend including:
/// - Listing kitchens that are active and accepting orders
/// - Saving the user's last known location on their profile
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
    storage_bucket: String,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: SupabaseTables,
        storage_bucket: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
            tables,
            storage_bucket,
        }
    }

    /// Public URL for an object in the storage bucket
    pub fn public_image_url(&self, path: Option<&str>) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(path) => format!(
                "{}/storage/v1/object/public/{}/{}",
                self.base_url, self.storage_bucket, path
            ),
            None => PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn kitchen_from_row(&self, row: KitchenRow) -> Kitchen {
        let kitchen_image_url = self.public_image_url(row.kitchen_image.as_deref());

        Kitchen {
            id: row.id,
            name: row.kitchen_name,
            coordinate: Coordinate::from_parts(row.latitude, row.longitude),
            rating: row.food_hygiene_rating,
            attributes: KitchenAttributes {
                cuisine_types: row.cuisine_types.unwrap_or_default(),
                kitchen_address: row.kitchen_address,
                kitchen_image_url,
            },
        }
    }

    /// Fetch every kitchen that is active and accepting orders
    pub async fn fetch_active_kitchens(&self) -> Result<Vec<Kitchen>, SupabaseError> {
        let url = format!(
            "{}?select={}&is_active=eq.true&is_accepting_orders=eq.true",
            self.rest_url(&self.tables.chef_profiles),
            urlencoding::encode(KITCHEN_COLUMNS)
        );

        tracing::debug!("Fetching kitchens from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to fetch kitchens: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected an array of rows".into()))?;

        let kitchens: Vec<Kitchen> = rows
            .iter()
            .filter_map(|row| match serde_json::from_value::<KitchenRow>(row.clone()) {
                Ok(row) => Some(self.kitchen_from_row(row)),
                Err(e) => {
                    tracing::debug!("Skipping malformed kitchen row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} kitchens ({} rows)", kitchens.len(), rows.len());

        Ok(kitchens)
    }

    /// Store the user's position, address and city on their profile
    pub async fn update_profile_location(
        &self,
        user_id: &str,
        location: &UserLocation,
    ) -> Result<(), SupabaseError> {
        let url = format!(
            "{}?id=eq.{}",
            self.rest_url(&self.tables.profiles),
            urlencoding::encode(user_id)
        );

        let payload = json!({
            "latitude": location.coordinate.latitude,
            "longitude": location.coordinate.longitude,
            "address": location.address,
            "city": location.city,
        });

        let response = self
            .client
            .patch(&url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to save location: {}",
                response.status()
            )));
        }

        tracing::debug!("Saved location for user: {}", user_id);

        Ok(())
    }
}

#[async_trait]
impl CandidateSource<KitchenAttributes> for SupabaseClient {
    async fn fetch_candidates(&self) -> Result<Vec<Kitchen>, SourceError> {
        Ok(self.fetch_active_kitchens().await?)
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn save_user_location(
        &self,
        user_id: &str,
        location: &UserLocation,
    ) -> Result<(), SourceError> {
        Ok(self.update_profile_location(user_id, location).await?)
    }
}
