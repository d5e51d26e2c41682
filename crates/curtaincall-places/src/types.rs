//! Candidate and recommendation records.

use curtaincall_core::Coordinate;
use serde::Serialize;

/// A venue as returned by a candidate search, before any curation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate {
    /// Provider place ID, used for the availability lookup.
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    /// `None` when the provider has no rating for the venue.
    pub rating: Option<f64>,
}

/// A raw candidate that survived the deny list, annotated for ranking.
/// Lives only for the duration of one category lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub address: String,
    pub coordinate: Coordinate,
    pub rating: Option<f64>,
    pub distance_meters: f64,
    pub is_promoted: bool,
    pub map_reference: String,
}

/// The fields of a curated venue exposed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub rating: Option<f64>,
    pub address: String,
    pub distance_meters: f64,
    /// Map link; absent only on the mock record.
    pub map_reference: Option<String>,
    pub is_promoted: bool,
}

impl Recommendation {
    /// Fixed stand-in returned for every category when no provider key is configured.
    #[must_use]
    pub fn mock() -> Self {
        Self {
            name: "Mock Place".to_string(),
            rating: Some(5.0),
            address: "123 Mock St".to_string(),
            distance_meters: 100.0,
            map_reference: None,
            is_promoted: false,
        }
    }
}

impl From<Candidate> for Recommendation {
    fn from(candidate: Candidate) -> Self {
        Self {
            name: candidate.name,
            rating: candidate.rating,
            address: candidate.address,
            distance_meters: candidate.distance_meters,
            map_reference: Some(candidate.map_reference),
            is_promoted: candidate.is_promoted,
        }
    }
}

/// Curated venues for one category, in rank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecommendations {
    pub category: String,
    pub recommendations: Vec<Recommendation>,
}

/// Output of one curation run: one entry per requested category, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Curation {
    pub categories: Vec<CategoryRecommendations>,
}

impl Curation {
    /// Recommendations for the category named `name`, if it was requested.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Recommendation]> {
        self.categories
            .iter()
            .find(|c| c.category == name)
            .map(|c| c.recommendations.as_slice())
    }
}
