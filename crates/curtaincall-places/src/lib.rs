//! Proximity and availability curation for venues around a theatre.
//!
//! [`curate`] turns a [`CurationRequest`] into at most
//! [`MAX_RECOMMENDATIONS`] open, nearby venues per category. Venue discovery
//! and opening-hours lookup sit behind the [`CandidateSource`] and
//! [`AvailabilityOracle`] traits; [`GooglePlacesClient`] implements both
//! against the Google Places web service.

pub mod curate;
pub mod error;
pub mod geo;
pub mod google;
pub mod hours;
pub mod maps;
pub mod policy;
pub mod rank;
pub(crate) mod retry;
pub mod select;
pub mod source;
pub mod types;

pub use curate::{curate, CategoryLookup, CurationRequest, MAX_RECOMMENDATIONS};
pub use error::PlacesError;
pub use geo::distance_meters;
pub use google::GooglePlacesClient;
pub use hours::{OpeningHours, Period};
pub use maps::map_reference;
pub use policy::{classify, Classification};
pub use rank::rank;
pub use select::take_verified;
pub use source::{AvailabilityOracle, CandidateSource};
pub use types::{Candidate, CategoryRecommendations, Curation, RawCandidate, Recommendation};
