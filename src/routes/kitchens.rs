use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

use crate::config::DiscoverySettings;
use crate::core::DiscoveryEngine;
use crate::models::{
    DiscoverRequest, DiscoverResponse, DiscoveryOptionsResponse, ErrorResponse, HealthResponse,
    KitchenAttributes, RadiusOption, SaveLocationRequest, SaveLocationResponse, SortKey, SortOption,
};
use crate::services::{CandidateSource, FixedLocationProvider, ProfileStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub candidates: Arc<dyn CandidateSource<KitchenAttributes>>,
    pub profiles: Arc<dyn ProfileStore>,
    pub discovery: DiscoverySettings,
}

/// Configure all kitchen discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/kitchens/options", web::get().to(discovery_options))
        .route("/kitchens/discover", web::post().to(discover_kitchens))
        .route("/profiles/{user_id}/location", web::put().to(save_location));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Radius presets and sort keys for the discovery screen
///
/// GET /api/v1/kitchens/options
async fn discovery_options(state: web::Data<AppState>) -> impl Responder {
    let radius_options = state
        .discovery
        .radius_presets()
        .into_iter()
        .map(|preset| RadiusOption {
            radius_km: preset.radius_km,
            label: preset.label(),
        })
        .collect();

    let sort_options = SortKey::ALL
        .iter()
        .map(|key| SortOption {
            value: *key,
            label: key.label().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(DiscoveryOptionsResponse {
        radius_options,
        sort_options,
        default_filter: state.discovery.default_filter(),
        default_sort: state.discovery.default_sort,
    })
}

/// Discover kitchens endpoint
///
/// POST /api/v1/kitchens/discover
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "latitude": 31.5,
///   "longitude": 74.3,
///   "place": { "name": "string", "street": "string", "subregion": "string", "city": "string", "region": "string" },
///   "radiusKm": 10,
///   "sortBy": "distance|rating|name"
/// }
/// ```
///
/// Every field is optional. `radiusKm: null` searches without a radius.
async fn discover_kitchens(
    state: web::Data<AppState>,
    req: web::Json<DiscoverRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for discover request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("discover", %request_id);

    run_discovery(state, req.into_inner(), request_id)
        .instrument(span)
        .await
}

async fn run_discovery(
    state: web::Data<AppState>,
    req: DiscoverRequest,
    request_id: uuid::Uuid,
) -> HttpResponse {
    let location = req.location();
    let filter = req.filter_config(state.discovery.default_radius_km);
    let sort_key = req.sort_key(state.discovery.default_sort);

    // Remember where the user is; discovery proceeds even if this fails
    if let (Some(user_id), Some(location)) = (req.user_id.as_deref(), location.as_ref()) {
        if let Err(e) = state.profiles.save_user_location(user_id, location).await {
            tracing::warn!("Failed to save location for {}: {}", user_id, e);
        }
    }

    let engine = DiscoveryEngine::new(
        state.candidates.clone(),
        Arc::new(FixedLocationProvider::new(location)),
    );

    let discovery = match engine.discover_nearby(filter, sort_key).await {
        Ok(discovery) => discovery,
        Err(e) => {
            tracing::error!("Failed to load kitchens: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load kitchens".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let empty_message =
        DiscoverResponse::empty_message_for(&discovery.kitchens, discovery.origin.is_some());

    let response = DiscoverResponse {
        request_id: request_id.to_string(),
        total_results: discovery.kitchens.len(),
        total_candidates: discovery.total_candidates,
        kitchens: discovery.kitchens,
        filter,
        sort_by: sort_key,
        location: discovery.origin,
        empty_message,
    };

    tracing::info!(
        "Returning {} kitchens (from {} candidates, radius: {}, sort: {:?})",
        response.total_results,
        response.total_candidates,
        filter.label(),
        sort_key
    );

    HttpResponse::Ok().json(response)
}

/// Save the user's current location
///
/// PUT /api/v1/profiles/{userId}/location
async fn save_location(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<SaveLocationRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let user_id = path.into_inner();
    let location = req.location();

    match state.profiles.save_user_location(&user_id, &location).await {
        Ok(()) => {
            tracing::debug!("Saved location for user {}", user_id);
            HttpResponse::Ok().json(SaveLocationResponse {
                success: true,
                location,
            })
        }
        Err(e) => {
            tracing::error!("Failed to save location for {}: {}", user_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save location".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
