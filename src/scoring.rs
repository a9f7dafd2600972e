//! # Place Scoring
//!
//! Converts a candidate place (plus an optional reference coordinate) into a
//! single comparable score, and picks the best candidate out of a pool.
//!
//! ## Scoring
//!
//! The base score blends the star rating with log-scaled review volume:
//!
//! ```text
//! base = rating * 0.7 + log10(reviews + 1) * 0.3
//! ```
//!
//! Rating dominates, but log-scaling the review count keeps a 5.0-rating
//! one-review place from beating a 4.6 with thousands of reviews. When a
//! reference coordinate is given (the previously selected place of the same
//! day), an inverse-distance boost is added on top:
//!
//! ```text
//! final = base + 2 / (distance_km + 1)
//! ```
//!
//! The proximity term is weighted heavily relative to quality so that, once
//! a morning anchor is picked, the rest of the day clusters around it. That
//! is what keeps the per-day driving route short.

use std::collections::HashSet;

use crate::geo_utils::distance_km;
use crate::{LatLng, Place};

/// Weight of the star rating in the base score.
const RATING_WEIGHT: f64 = 0.7;
/// Weight of log-scaled review volume in the base score.
const REVIEW_WEIGHT: f64 = 0.3;
/// Multiplier on the inverse-distance proximity boost.
const PROXIMITY_WEIGHT: f64 = 2.0;

/// Score a place, optionally biased toward a reference coordinate.
///
/// Monotonically non-decreasing in both `rating` and `user_ratings_total`.
/// A place with zero reviews contributes nothing from the review term
/// (`log10(1) == 0`), which is valid input, not an error.
pub fn score(place: &Place, reference: Option<&LatLng>) -> f64 {
    let base = place.rating * RATING_WEIGHT
        + (place.user_ratings_total as f64 + 1.0).log10() * REVIEW_WEIGHT;

    match reference {
        Some(at) => {
            let distance = distance_km(*at, place.lat_lng());
            base + PROXIMITY_WEIGHT / (distance + 1.0)
        }
        None => base,
    }
}

/// Pick the highest-scoring candidate not yet used this day.
///
/// Candidates arrive pre-ordered by provider relevance, and ties keep the
/// first-seen candidate, so selection is deterministic for identical input.
/// Returns `None` when every candidate is excluded (or the pool is empty);
/// callers treat that as "slot unfilled", not as a failure.
pub fn select_best<'a>(
    candidates: &'a [Place],
    excluded: &HashSet<String>,
    reference: Option<&LatLng>,
) -> Option<&'a Place> {
    let mut best: Option<(&Place, f64)> = None;

    for place in candidates.iter().filter(|p| !excluded.contains(&p.place_id)) {
        let place_score = score(place, reference);
        if best.map_or(true, |(_, top)| place_score > top) {
            best = Some((place, place_score));
        }
    }

    best.map(|(place, _)| place)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn place(id: &str, rating: f64, reviews: u64) -> Place {
        Place::new(id, id, 48.8566, 2.3522).with_rating(rating, reviews)
    }

    #[test]
    fn test_score_monotonic_in_rating() {
        let low = place("a", 3.0, 100);
        let high = place("b", 4.5, 100);
        assert!(score(&high, None) > score(&low, None));
    }

    #[test]
    fn test_score_monotonic_in_reviews() {
        let few = place("a", 4.0, 10);
        let many = place("b", 4.0, 10_000);
        assert!(score(&many, None) > score(&few, None));
    }

    #[test]
    fn test_score_zero_reviews_contributes_nothing() {
        let unreviewed = place("a", 4.0, 0);
        assert!(approx_eq(score(&unreviewed, None), 4.0 * 0.7, 1e-12));
    }

    #[test]
    fn test_review_volume_tempers_rating() {
        // A 4.5 with 1000 reviews beats a 4.8 with 10: credibility wins.
        let steady = place("steady", 4.5, 1000);
        let hyped = place("hyped", 4.8, 10);

        let steady_score = score(&steady, None);
        let hyped_score = score(&hyped, None);

        assert!(approx_eq(steady_score, 4.05, 0.01));
        assert!(approx_eq(hyped_score, 3.67, 0.01));
        assert!(steady_score > hyped_score);
    }

    #[test]
    fn test_proximity_boost_favors_nearby() {
        let reference = LatLng::new(48.8566, 2.3522);
        let near = Place::new("near", "near", 48.8570, 2.3530).with_rating(4.0, 100);
        let far = Place::new("far", "far", 48.9500, 2.5500).with_rating(4.0, 100);

        assert!(score(&near, Some(&reference)) > score(&far, Some(&reference)));
        // Without a reference the two are identical.
        assert_eq!(score(&near, None), score(&far, None));
    }

    #[test]
    fn test_select_best_prefers_highest_score() {
        let candidates = vec![place("a", 4.5, 1000), place("b", 4.8, 10)];
        let best = select_best(&candidates, &HashSet::new(), None).unwrap();
        assert_eq!(best.place_id, "a");
    }

    #[test]
    fn test_select_best_never_returns_excluded() {
        let candidates = vec![place("a", 4.5, 1000), place("b", 4.8, 10)];
        let excluded: HashSet<String> = ["a".to_string()].into_iter().collect();

        let best = select_best(&candidates, &excluded, None).unwrap();
        assert_eq!(best.place_id, "b");

        let all: HashSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
        assert!(select_best(&candidates, &all, None).is_none());
    }

    #[test]
    fn test_select_best_empty_pool() {
        assert!(select_best(&[], &HashSet::new(), None).is_none());
    }

    #[test]
    fn test_select_best_tie_keeps_first_seen() {
        // Identical scores: provider ordering is the deliberate tie-break.
        let candidates = vec![place("first", 4.0, 50), place("second", 4.0, 50)];
        let best = select_best(&candidates, &HashSet::new(), None).unwrap();
        assert_eq!(best.place_id, "first");
    }

    #[test]
    fn test_proximity_flips_selection() {
        let reference = LatLng::new(48.8566, 2.3522);
        // "better" wins on quality alone, but sits across town.
        let better = Place::new("better", "better", 48.9500, 2.5500).with_rating(4.6, 5000);
        let nearby = Place::new("nearby", "nearby", 48.8570, 2.3530).with_rating(4.4, 2000);
        let candidates = vec![better.clone(), nearby.clone()];

        let unreferenced = select_best(&candidates, &HashSet::new(), None).unwrap();
        assert_eq!(unreferenced.place_id, "better");

        let clustered = select_best(&candidates, &HashSet::new(), Some(&reference)).unwrap();
        assert_eq!(clustered.place_id, "nearby");
    }
}
