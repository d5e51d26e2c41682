//! HTTP client for the Google Places web service.
//!
//! Implements [`CandidateSource`] with the Nearby Search endpoint and
//! [`AvailabilityOracle`] with Place Details restricted to `opening_hours`.
//! Every response carries a `"status"` field; anything other than a success
//! status surfaces as [`PlacesError::ApiStatus`].

mod types;

use std::time::Duration;

use async_trait::async_trait;
use curtaincall_core::Coordinate;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::hours::OpeningHours;
use crate::retry::retry_with_backoff;
use crate::source::{AvailabilityOracle, CandidateSource};
use crate::types::RawCandidate;

use self::types::{DetailsResponse, NearbyResult, NearbySearchResponse, StatusEnvelope};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
const NEARBY_SEARCH_PATH: &str = "nearbysearch/json";
const DETAILS_PATH: &str = "details/json";

/// Client for the Google Places web service.
///
/// The API key is supplied per call rather than stored, so one client can be
/// shared across requests made on behalf of different keys. Use
/// [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    search_url: Url,
    details_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GooglePlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joins append instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| invalid_base_url(base_url, e))?;
        if base.cannot_be_a_base() {
            return Err(invalid_base_url(base_url, "URL cannot be used as a base"));
        }
        let search_url = base
            .join(NEARBY_SEARCH_PATH)
            .map_err(|e| invalid_base_url(base_url, e))?;
        let details_url = base
            .join(DETAILS_PATH)
            .map_err(|e| invalid_base_url(base_url, e))?;

        Ok(Self {
            client,
            search_url,
            details_url,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Enables retrying transient failures: timeouts, connection errors, 5xx
    /// responses and `UNKNOWN_ERROR` statuses.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Appends percent-encoded query parameters to an endpoint URL.
    fn build_url(endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, parses the body and checks its `status` against
    /// `accepted`, retrying the whole exchange on transient failures.
    ///
    /// URLs are stripped from transport errors since they carry the API key.
    /// `context` names the call in deserialization errors for the same reason.
    async fn request_json<T>(
        &self,
        url: &Url,
        context: &str,
        accepted: &[&str],
    ) -> Result<T, PlacesError>
    where
        T: DeserializeOwned + StatusEnvelope,
    {
        let client = &self.client;
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || {
            let url = url.clone();
            async move {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(reqwest::Error::without_url)?;
                let response = response
                    .error_for_status()
                    .map_err(reqwest::Error::without_url)?;
                let body = response
                    .text()
                    .await
                    .map_err(reqwest::Error::without_url)?;

                let parsed: T =
                    serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
                        context: context.to_string(),
                        source: e,
                    })?;
                check_status(parsed.status(), parsed.error_message(), accepted)?;
                Ok::<T, PlacesError>(parsed)
            }
        })
        .await
    }
}

fn invalid_base_url(url: &str, reason: impl std::fmt::Display) -> PlacesError {
    PlacesError::InvalidBaseUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Fails unless `status` is one of `accepted`.
fn check_status(
    status: &str,
    message: Option<&str>,
    accepted: &[&str],
) -> Result<(), PlacesError> {
    if accepted.contains(&status) {
        return Ok(());
    }
    Err(PlacesError::ApiStatus {
        status: status.to_string(),
        message: message.map(str::to_string),
    })
}

#[async_trait]
impl CandidateSource for GooglePlacesClient {
    /// Calls Nearby Search. `ZERO_RESULTS` is an empty success; individual
    /// results that do not parse are skipped.
    async fn search(
        &self,
        center: Coordinate,
        radius_meters: u32,
        keyword: &str,
        api_key: &str,
    ) -> Result<Vec<RawCandidate>, PlacesError> {
        let location = format!("{},{}", center.latitude, center.longitude);
        let radius = radius_meters.to_string();
        let url = Self::build_url(
            &self.search_url,
            &[
                ("location", &location),
                ("radius", &radius),
                ("keyword", keyword),
                ("type", "establishment"),
                ("key", api_key),
            ],
        );

        let response: NearbySearchResponse = self
            .request_json(
                &url,
                &format!("nearbysearch(keyword={keyword})"),
                &["OK", "ZERO_RESULTS"],
            )
            .await?;

        let returned = response.results.len();
        let candidates: Vec<RawCandidate> = response
            .results
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<NearbyResult>(value) {
                Ok(result) => Some(RawCandidate::from(result)),
                Err(e) => {
                    tracing::debug!(keyword, error = %e, "skipping malformed search result");
                    None
                }
            })
            .collect();

        tracing::debug!(
            keyword,
            radius_meters,
            returned,
            parsed = candidates.len(),
            "nearby search complete"
        );
        Ok(candidates)
    }
}

#[async_trait]
impl AvailabilityOracle for GooglePlacesClient {
    /// Calls Place Details with `fields=opening_hours`.
    async fn hours(&self, place_id: &str, api_key: &str) -> Result<OpeningHours, PlacesError> {
        let url = Self::build_url(
            &self.details_url,
            &[
                ("place_id", place_id),
                ("fields", "opening_hours"),
                ("key", api_key),
            ],
        );

        let response: DetailsResponse = self
            .request_json(&url, &format!("details(place_id={place_id})"), &["OK"])
            .await?;

        let block = response
            .result
            .and_then(|r| r.opening_hours)
            .ok_or_else(|| PlacesError::MissingOpeningHours {
                place_id: place_id.to_string(),
            })?;
        block.into_opening_hours(place_id)
    }
}
