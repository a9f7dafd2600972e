//! # Itinerary Construction
//!
//! Turns flat pools of candidate places into an ordered, deduplicated,
//! geographically coherent day plan, and assembles plans for every requested
//! day into a [`Trip`].
//!
//! ## Algorithm
//! 1. Geocode the destination once; every day searches around that center
//! 2. For each day, resolve one place category per slot (morning categories
//!    cycle through the traveler's interests by day number; evening is
//!    always dining) and fetch the three candidate pools
//! 3. Greedily pick one place per slot by score, excluding places already
//!    used that day and biasing toward the previous slot's location
//! 4. Ask the provider for a driving polyline over the day's places
//!
//! The selection is a deliberate greedy heuristic, not a route optimizer,
//! and is deterministic for identical provider answers. Empty pools skip a
//! slot; a failed route lookup leaves the day without a polyline; only an
//! unresolvable destination aborts the whole build.

use std::collections::HashSet;

use log::{debug, info, warn};
use thiserror::Error;

use crate::provider::{PlaceSearch, PlacesProvider, ProviderError};
use crate::scoring::select_best;
use crate::{DayPlan, LatLng, Place, PriceRange, Slot, Trip, TripRequest};

/// Morning categories used when the traveler gave no interests; only the
/// first is queried.
const DEFAULT_MORNING_TYPES: &[&str] = &["tourist_attraction", "museum"];
/// Interest assumed for the afternoon slot when none were given.
const DEFAULT_AFTERNOON_INTEREST: &str = "nature";
/// The evening slot always searches this category.
const EVENING_CATEGORY: &str = "restaurant";
/// Keyword refining the evening search for food-focused travelers.
const EVENING_FOOD_KEYWORD: &str = "fine dining";

/// Failure of a whole trip build.
#[derive(Debug, Error)]
pub enum TripError {
    /// The destination could not be geocoded. Fatal; no partial trip is
    /// returned.
    #[error("could not find location: {0}")]
    DestinationNotFound(String),
    /// The request failed boundary validation.
    #[error("invalid trip request: {0}")]
    InvalidRequest(&'static str),
    /// The provider failed in a way that prevents planning at all
    /// (currently only geocoding transport failures).
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Provider place categories for an interest tag.
///
/// Unknown interests fall back to generic sightseeing. The planner only
/// queries the first category of whichever list it resolves.
pub fn place_types_for_interest(interest: &str) -> &'static [&'static str] {
    match interest.to_ascii_lowercase().as_str() {
        "food" => &["restaurant", "cafe", "bakery", "bar"],
        "history" => &["museum", "church", "hindu_temple", "mosque", "synagogue"],
        "nature" => &["park", "zoo", "aquarium", "natural_feature"],
        "shopping" => &["shopping_mall", "clothing_store", "jewelry_store", "store"],
        "art" => &["art_gallery", "museum"],
        "nightlife" => &["night_club", "bar", "casino"],
        "adventure" => &["amusement_park", "stadium", "gym"],
        _ => &["tourist_attraction"],
    }
}

/// Build a complete trip: geocode once, plan every day, route every day.
///
/// Days re-center on the destination rather than on the previous day's
/// location, and each day's used-place set is day-local, so a place may
/// legitimately reappear on two different days.
pub async fn build_trip<P: PlacesProvider>(
    provider: &P,
    request: &TripRequest,
) -> Result<Trip, TripError> {
    let center = provider
        .geocode(&request.destination)
        .await
        .map_err(|e| match e {
            ProviderError::NotFound => TripError::DestinationNotFound(request.destination.clone()),
            other => TripError::Provider(other),
        })?;

    info!(
        "[Planner] located '{}' at {:.4}, {:.4}",
        request.destination, center.lat, center.lng
    );

    let price = request.budget.price_range();
    let mut days = Vec::with_capacity(request.days as usize);

    for day in 1..=request.days {
        debug!("[Planner] planning day {day}");
        let places = plan_day(provider, center, &request.interests, price, day).await;

        let route_polyline = if places.len() >= 2 {
            let origin = places[0].lat_lng();
            let destination = places[places.len() - 1].lat_lng();
            let waypoints: Vec<LatLng> = places[1..places.len() - 1]
                .iter()
                .map(Place::lat_lng)
                .collect();

            match provider.route_polyline(origin, destination, &waypoints).await {
                Ok(polyline) => polyline,
                Err(e) => {
                    warn!("[Planner] route lookup for day {day} failed: {e}");
                    None
                }
            }
        } else {
            None
        };

        days.push(DayPlan { day, places, route_polyline });
    }

    Ok(Trip {
        destination: request.destination.clone(),
        destination_lat: center.lat,
        destination_lng: center.lng,
        days,
    })
}

/// Plan one day: three slot searches, three greedy picks.
///
/// Category choice never depends on what earlier slots selected, so the
/// three provider queries are issued concurrently; selection then runs
/// strictly morning -> afternoon -> evening, since each pick anchors the next
/// slot's proximity bias. Returns 0–3 places tagged with their slot.
pub async fn plan_day<P: PlacesProvider>(
    provider: &P,
    center: LatLng,
    interests: &[String],
    price: PriceRange,
    day: u32,
) -> Vec<Place> {
    // Morning: sightseeing category cycled through the interest list.
    let morning_category = if interests.is_empty() {
        DEFAULT_MORNING_TYPES[0]
    } else {
        let interest = &interests[day as usize % interests.len()];
        place_types_for_interest(interest)[0]
    };

    // Afternoon: the next interest in the cycle, defaulting to nature.
    let afternoon_category = match interests.get((day as usize + 1) % interests.len().max(1)) {
        Some(interest) => place_types_for_interest(interest)
            .first()
            .copied()
            .unwrap_or("point_of_interest"),
        None => place_types_for_interest(DEFAULT_AFTERNOON_INTEREST)[0],
    };

    // Evening: always dining, refined for food-focused travelers.
    let evening_keyword = interests
        .iter()
        .any(|i| i == "food")
        .then(|| EVENING_FOOD_KEYWORD.to_string());

    let search = |category: &str, keyword: Option<String>| PlaceSearch {
        center,
        category: category.to_string(),
        keyword,
        price,
    };

    let (morning_pool, afternoon_pool, evening_pool) = futures::join!(
        candidate_pool(provider, search(morning_category, None)),
        candidate_pool(provider, search(afternoon_category, None)),
        candidate_pool(provider, search(EVENING_CATEGORY, evening_keyword)),
    );

    let mut places: Vec<Place> = Vec::with_capacity(3);
    let mut used: HashSet<String> = HashSet::new();

    // The first pick has nothing to cluster around; each later slot is
    // biased toward the previous successful one.
    let morning_at = commit_slot(
        select_best(&morning_pool, &used, None),
        Slot::MorningActivity,
        day,
        &mut places,
        &mut used,
    );

    let afternoon_at = commit_slot(
        select_best(&afternoon_pool, &used, morning_at.as_ref()),
        Slot::AfternoonActivity,
        day,
        &mut places,
        &mut used,
    );

    commit_slot(
        select_best(&evening_pool, &used, afternoon_at.as_ref()),
        Slot::EveningDining,
        day,
        &mut places,
        &mut used,
    );

    places
}

/// Fetch one slot's candidate pool, degrading provider failures to an empty
/// pool so the remaining slots and days keep making progress.
async fn candidate_pool<P: PlacesProvider>(provider: &P, search: PlaceSearch) -> Vec<Place> {
    match provider.search_places(&search).await {
        Ok(places) => places,
        Err(e) => {
            warn!(
                "[Planner] search for '{}' failed, skipping slot: {e}",
                search.category
            );
            Vec::new()
        }
    }
}

/// Record a slot selection: label it, mark it used for the day, and return
/// its location as the next slot's reference. `None` means the slot stays
/// unfilled.
fn commit_slot(
    selected: Option<&Place>,
    slot: Slot,
    day: u32,
    places: &mut Vec<Place>,
    used: &mut HashSet<String>,
) -> Option<LatLng> {
    let mut place = selected?.clone();
    place.slot = Some(slot);
    used.insert(place.place_id.clone());
    let at = place.lat_lng();
    debug!("[Planner] day {day} {slot}: {}", place.name);
    places.push(place);
    Some(at)
}

// ============================================================================
// Unit Tests
// ============================================================================
