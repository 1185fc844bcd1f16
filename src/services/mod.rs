// Service exports
pub mod cache;
pub mod location;
pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Candidate, UserLocation};

pub use cache::{CacheKey, CacheStats, CachedCandidateSource};
pub use location::{DeniedLocationProvider, FixedLocationProvider};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};

/// Errors surfaced by backend collaborators
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Supabase(#[from] SupabaseError),

    #[error("Candidate source unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the raw candidate set for a discovery run
#[async_trait]
pub trait CandidateSource<A>: Send + Sync {
    async fn fetch_candidates(&self) -> Result<Vec<Candidate<A>>, SourceError>;
}

/// Device location access
///
/// Implementations fail soft: denial or any acquisition problem yields
/// `false` / `None`, never an error.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> bool;

    async fn current_location(&self) -> Option<UserLocation>;

    /// Ask for permission, then for a position fix
    async fn locate(&self) -> Option<UserLocation> {
        if !self.request_permission().await {
            tracing::warn!("Location permission denied, discovering without an origin");
            return None;
        }

        self.current_location().await
    }
}

/// Persists the user's last known position on their profile
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn save_user_location(
        &self,
        user_id: &str,
        location: &UserLocation,
    ) -> Result<(), SourceError>;
}
