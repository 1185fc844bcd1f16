use async_trait::async_trait;

use crate::models::UserLocation;
use crate::services::LocationProvider;

/// A position already resolved on the client device
///
/// Permission counts as granted exactly when a location was supplied.
#[derive(Debug, Clone, Default)]
pub struct FixedLocationProvider {
    location: Option<UserLocation>,
}

impl FixedLocationProvider {
    pub fn new(location: Option<UserLocation>) -> Self {
        Self { location }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> bool {
        self.location.is_some()
    }

    async fn current_location(&self) -> Option<UserLocation> {
        self.location.clone()
    }
}

/// Provider for users who declined location access
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocationProvider;

#[async_trait]
impl LocationProvider for DeniedLocationProvider {
    async fn request_permission(&self) -> bool {
        false
    }

    async fn current_location(&self) -> Option<UserLocation> {
        None
    }
}
