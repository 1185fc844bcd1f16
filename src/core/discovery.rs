use std::sync::Arc;

use crate::core::{filters::filter_by_radius, ranking::rank};
use crate::models::{Candidate, FilterConfig, RankedCandidate, SortKey, UserLocation};
use crate::services::{CandidateSource, LocationProvider, SourceError};

/// Filter and order a candidate set around an optional origin
///
/// # Pipeline Stages
/// 1. Radius filter (only when an origin is known)
/// 2. Distance annotation
/// 3. Ordering by `sort_key`
///
/// Without an origin no candidate can be placed, so the radius is
/// ignored, every distance is `None`, and a distance sort leaves the
/// input order as-is.
pub fn discover<A: Clone>(
    candidates: &[Candidate<A>],
    origin: Option<&UserLocation>,
    filter: &FilterConfig,
    sort_key: SortKey,
) -> Vec<RankedCandidate<A>> {
    match origin {
        Some(location) => {
            let filtered = filter_by_radius(candidates, location.coordinate, filter);
            rank(&filtered, Some(location.coordinate), sort_key)
        }
        None => rank(candidates, None, sort_key),
    }
}

/// Result of a discovery run against live collaborators
#[derive(Debug, Clone)]
pub struct Discovery<A> {
    pub origin: Option<UserLocation>,
    pub kitchens: Vec<RankedCandidate<A>>,
    pub total_candidates: usize,
}

/// Discovery orchestrator wired to its collaborators
///
/// Both the candidate source and the location provider are injected, so
/// the engine can be driven by fakes in tests.
pub struct DiscoveryEngine<A> {
    source: Arc<dyn CandidateSource<A>>,
    location: Arc<dyn LocationProvider>,
}

impl<A> Clone for DiscoveryEngine<A> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            location: Arc::clone(&self.location),
        }
    }
}

impl<A: Clone + Send + Sync + 'static> DiscoveryEngine<A> {
    pub fn new(source: Arc<dyn CandidateSource<A>>, location: Arc<dyn LocationProvider>) -> Self {
        Self { source, location }
    }

    /// Fetch candidates, resolve the user's position and run [`discover`]
    ///
    /// A missing position is a normal outcome. Only a candidate source
    /// failure is reported as an error.
    pub async fn discover_nearby(
        &self,
        filter: FilterConfig,
        sort_key: SortKey,
    ) -> Result<Discovery<A>, SourceError> {
        let candidates = self.source.fetch_candidates().await?;
        let origin = self.location.locate().await;

        tracing::debug!(
            "Discovering among {} candidates (origin known: {}, radius: {}, sort: {:?})",
            candidates.len(),
            origin.is_some(),
            filter.label(),
            sort_key
        );

        let kitchens = discover(&candidates, origin.as_ref(), &filter, sort_key);

        Ok(Discovery {
            origin,
            kitchens,
            total_candidates: candidates.len(),
        })
    }
}
