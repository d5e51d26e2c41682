//! Bounded, in-order selection of verified items.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Pull items in order, keeping those for which `verify` resolves `true`,
/// until `limit` are kept or the input runs out.
///
/// Verification is lazy: once `limit` items are accepted no further item is
/// verified, so later items that would have passed are never checked.
pub async fn take_verified<T, F, Fut>(ranked: Vec<T>, limit: usize, verify: F) -> Vec<T>
where
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = bool>,
{
    stream::iter(ranked)
        .filter(verify)
        .take(limit)
        .collect()
        .await
}
