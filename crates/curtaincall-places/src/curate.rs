//! Per-category curation: search, classify, measure, rank, verify, select.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use curtaincall_core::{Category, Coordinate, ListConfig, RadiusConfig};

use crate::error::PlacesError;
use crate::geo::distance_meters;
use crate::maps::map_reference;
use crate::policy::classify;
use crate::rank::rank;
use crate::select::take_verified;
use crate::source::{AvailabilityOracle, CandidateSource};
use crate::types::{Candidate, CategoryRecommendations, Curation, RawCandidate, Recommendation};

/// Upper bound on recommendations returned per category.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// One category together with the checkpoints its venues must be open at.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLookup {
    pub category: Category,
    /// Non-empty, in caller order.
    pub checkpoints: Vec<NaiveDateTime>,
}

/// A validated curation request.
///
/// Construction checks the input shape, so [`curate`] never has to reject one.
#[derive(Clone)]
pub struct CurationRequest {
    center: Coordinate,
    radius: RadiusConfig,
    lookups: Vec<CategoryLookup>,
    lists: ListConfig,
    api_key: Option<String>,
}

impl std::fmt::Debug for CurationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurationRequest")
            .field("center", &self.center)
            .field("radius", &self.radius)
            .field("lookups", &self.lookups)
            .field("lists", &self.lists)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl CurationRequest {
    /// Build a request with per-category checkpoints.
    ///
    /// A blank `api_key` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidRequest`] when the base radius is zero, a
    /// category has an empty keyword or a duplicate name, or a category has
    /// no entry (or an empty entry) in `checkpoints_by_category`.
    pub fn new(
        center: Coordinate,
        radius: RadiusConfig,
        categories: &[Category],
        checkpoints_by_category: &HashMap<String, Vec<NaiveDateTime>>,
        lists: ListConfig,
        api_key: Option<String>,
    ) -> Result<Self, PlacesError> {
        if radius.base_radius_meters == 0 {
            return Err(PlacesError::InvalidRequest(
                "base radius must be greater than 0".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut lookups = Vec::with_capacity(categories.len());
        for category in categories {
            if category.keyword.trim().is_empty() {
                return Err(PlacesError::InvalidRequest(format!(
                    "category '{}' has an empty keyword",
                    category.name
                )));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(PlacesError::InvalidRequest(format!(
                    "duplicate category name '{}'",
                    category.name
                )));
            }
            let checkpoints = match checkpoints_by_category.get(&category.name) {
                Some(checkpoints) if !checkpoints.is_empty() => checkpoints.clone(),
                _ => {
                    return Err(PlacesError::InvalidRequest(format!(
                        "category '{}' has no checkpoints",
                        category.name
                    )))
                }
            };
            lookups.push(CategoryLookup {
                category: category.clone(),
                checkpoints,
            });
        }

        Ok(Self {
            center,
            radius,
            lookups,
            lists,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Build a request where every category shares the same checkpoints.
    ///
    /// # Errors
    ///
    /// Same as [`CurationRequest::new`].
    pub fn with_shared_checkpoints(
        center: Coordinate,
        radius: RadiusConfig,
        categories: &[Category],
        checkpoints: &[NaiveDateTime],
        lists: ListConfig,
        api_key: Option<String>,
    ) -> Result<Self, PlacesError> {
        let by_category = categories
            .iter()
            .map(|c| (c.name.clone(), checkpoints.to_vec()))
            .collect();
        Self::new(center, radius, categories, &by_category, lists, api_key)
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> RadiusConfig {
        self.radius
    }

    #[must_use]
    pub fn lookups(&self) -> &[CategoryLookup] {
        &self.lookups
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Curate up to [`MAX_RECOMMENDATIONS`] open venues for every category in
/// `request`, in request order.
///
/// Without an API key every category gets the single mock recommendation
/// and no collaborator is called. Otherwise categories are resolved one after
/// another; provider failures only ever shrink a category's result.
pub async fn curate<S, O>(request: &CurationRequest, source: &S, oracle: &O) -> Curation
where
    S: CandidateSource + ?Sized,
    O: AvailabilityOracle + ?Sized,
{
    let mut categories = Vec::with_capacity(request.lookups.len());

    for lookup in &request.lookups {
        let recommendations = match request.api_key.as_deref() {
            Some(api_key) => curate_category(request, lookup, api_key, source, oracle).await,
            None => {
                tracing::debug!(
                    category = %lookup.category.name,
                    "no places API key configured, using mock recommendation"
                );
                vec![Recommendation::mock()]
            }
        };
        categories.push(CategoryRecommendations {
            category: lookup.category.name.clone(),
            recommendations,
        });
    }

    Curation { categories }
}

async fn curate_category<S, O>(
    request: &CurationRequest,
    lookup: &CategoryLookup,
    api_key: &str,
    source: &S,
    oracle: &O,
) -> Vec<Recommendation>
where
    S: CandidateSource + ?Sized,
    O: AvailabilityOracle + ?Sized,
{
    let category = lookup.category.name.as_str();
    let keyword = lookup.category.keyword.as_str();
    let search_radius = request.radius.search_radius_meters();

    let raw = match source
        .search(request.center, search_radius, keyword, api_key)
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(
                category,
                keyword,
                error = %e,
                "candidate search failed, category left empty"
            );
            return Vec::new();
        }
    };
    let found = raw.len();

    let annotated: Vec<Candidate> = raw
        .into_iter()
        .filter_map(|candidate| annotate(candidate, request))
        .collect();
    let ranked = rank(annotated, &request.radius);
    let in_range = ranked.len();

    let checkpoints = lookup.checkpoints.as_slice();
    let accepted = take_verified(ranked, MAX_RECOMMENDATIONS, |candidate: &Candidate| {
        let place_id = candidate.id.clone();
        async move { is_open_throughout(oracle, &place_id, api_key, checkpoints).await }
    })
    .await;

    tracing::info!(
        category,
        keyword,
        found,
        in_range,
        accepted = accepted.len(),
        "category curated"
    );

    accepted.into_iter().map(Recommendation::from).collect()
}

/// Classify, measure and link a raw candidate. Returns `None` for
/// blacklisted names and unusable coordinates.
fn annotate(raw: RawCandidate, request: &CurationRequest) -> Option<Candidate> {
    let classification = classify(&raw.name, &request.lists);
    if classification.blacklisted {
        tracing::debug!(place_id = %raw.id, name = %raw.name, "dropped by blacklist");
        return None;
    }

    if !raw.coordinate.is_valid() {
        tracing::debug!(place_id = %raw.id, name = %raw.name, "dropped: invalid coordinate");
        return None;
    }

    let distance_meters = distance_meters(request.center, raw.coordinate);
    let map_reference = map_reference(&raw.name, &raw.address, &raw.id);

    Some(Candidate {
        id: raw.id,
        name: raw.name,
        address: raw.address,
        coordinate: raw.coordinate,
        rating: raw.rating,
        distance_meters,
        is_promoted: classification.is_promoted(),
        map_reference,
    })
}

/// Fetch the venue's hours once and require it to be open at every
/// checkpoint. Any failure to obtain hours counts as closed.
async fn is_open_throughout<O>(
    oracle: &O,
    place_id: &str,
    api_key: &str,
    checkpoints: &[NaiveDateTime],
) -> bool
where
    O: AvailabilityOracle + ?Sized,
{
    match oracle.hours(place_id, api_key).await {
        Ok(hours) => {
            let open = hours.window_satisfied(checkpoints);
            tracing::debug!(place_id, open, "availability checked");
            open
        }
        Err(PlacesError::MissingOpeningHours { .. }) => {
            tracing::debug!(place_id, "no published hours, treating as closed");
            false
        }
        Err(e) => {
            tracing::warn!(place_id, error = %e, "hours lookup failed, treating as closed");
            false
        }
    }
}

#[cfg(test)]
#[path = "curate_test.rs"]
mod tests;
