use thiserror::Error;

/// Errors produced by the places provider adapter and request construction.
///
/// None of these escape [`crate::curate`]: provider failures degrade to an
/// empty or partial result there.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, timeout, or non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered with a non-success `status` field.
    #[error("places API returned status {status}: {}", message.as_deref().unwrap_or("no message"))]
    ApiStatus {
        status: String,
        message: Option<String>,
    },

    /// The detail response carried no opening-hours block for the place.
    #[error("no opening hours published for place {place_id}")]
    MissingOpeningHours { place_id: String },

    /// An opening-hours period could not be interpreted.
    #[error("malformed opening hours for place {place_id}: {reason}")]
    MalformedHours { place_id: String, reason: String },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid curation request: {0}")]
    InvalidRequest(String),
}
