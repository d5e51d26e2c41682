//! Retry policy for places provider calls.
//!
//! Google Places reports some transient failures in-band: an HTTP 200 whose
//! `status` is `UNKNOWN_ERROR`. Those are retried alongside transport
//! failures. Every other answer the provider gives (`REQUEST_DENIED`,
//! `INVALID_REQUEST`, `NOT_FOUND`, a body that does not parse) is final.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

/// Provider statuses documented as "may succeed if you try again".
const TRANSIENT_STATUSES: &[&str] = &["UNKNOWN_ERROR"];

/// Upper bound on a single back-off, before jitter.
const MAX_BACKOFF: Duration = Duration::from_secs(5);

/// `true` for failures a second attempt may fix: timeouts, connection
/// failures, 5xx responses and transient provider statuses.
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        PlacesError::ApiStatus { status, .. } => TRANSIENT_STATUSES.contains(&status.as_str()),
        PlacesError::Deserialize { .. }
        | PlacesError::MissingOpeningHours { .. }
        | PlacesError::MalformedHours { .. }
        | PlacesError::InvalidBaseUrl { .. }
        | PlacesError::InvalidRequest(_) => false,
    }
}

/// Back-off before retry number `retry` (1-based): `base`, `2 × base`,
/// `4 × base`, ... capped at [`MAX_BACKOFF`].
fn backoff(retry: u32, base_ms: u64) -> Duration {
    let factor = 2u64.saturating_pow(retry.saturating_sub(1));
    Duration::from_millis(base_ms.saturating_mul(factor)).min(MAX_BACKOFF)
}

/// Spread `delay` uniformly over ±25 %.
fn with_jitter(delay: Duration) -> Duration {
    delay.mul_f64(rand::random_range(0.75..=1.25))
}

/// Run `call`, repeating it up to `max_retries` more times while it fails
/// with a retriable error.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut call: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if retries >= max_retries || !is_retriable(&err) {
            return Err(err);
        }

        retries += 1;
        let delay = with_jitter(backoff(retries, backoff_base_ms));
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "places call failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
