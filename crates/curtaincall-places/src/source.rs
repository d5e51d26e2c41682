//! Collaborator seams for the curation engine.
//!
//! Both calls are single network round-trips with a caller-bounded timeout.
//! Failures are returned, never panicked, and the engine treats them as "no
//! data" for that step.

use async_trait::async_trait;
use curtaincall_core::Coordinate;

use crate::error::PlacesError;
use crate::hours::OpeningHours;
use crate::types::RawCandidate;

/// Finds raw candidate venues for a keyword around a point.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Return candidates within `radius_meters` of `center` matching `keyword`,
    /// in provider order. Individually malformed records are omitted.
    async fn search(
        &self,
        center: Coordinate,
        radius_meters: u32,
        keyword: &str,
        api_key: &str,
    ) -> Result<Vec<RawCandidate>, PlacesError>;
}

/// Reports a venue's published weekly opening hours.
#[async_trait]
pub trait AvailabilityOracle: Send + Sync {
    async fn hours(&self, place_id: &str, api_key: &str) -> Result<OpeningHours, PlacesError>;
}
