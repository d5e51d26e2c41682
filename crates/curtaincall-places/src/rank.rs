//! Tiered radius filtering and ordering of annotated candidates.

use std::cmp::Ordering;

use curtaincall_core::RadiusConfig;

use crate::types::Candidate;

/// Drop candidates outside their tier's radius, then order promoted first and
/// nearest first.
///
/// The sort is stable: candidates with equal tier and distance keep the
/// provider's response order.
#[must_use]
pub fn rank(mut candidates: Vec<Candidate>, radius: &RadiusConfig) -> Vec<Candidate> {
    candidates.retain(|c| c.distance_meters <= radius.bound_for(c.is_promoted));
    candidates.sort_by(rank_order);
    candidates
}

fn rank_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.is_promoted
        .cmp(&a.is_promoted)
        .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
}
