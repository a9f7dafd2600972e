//! # Trip Planner
//!
//! Day-by-day travel itinerary planning over a mapping/places provider.
//!
//! Given a destination, a trip length, a budget tier and a list of interest
//! tags, the planner produces one [`DayPlan`] per day: up to three places
//! (morning, afternoon, evening) picked greedily from provider search
//! results, plus an encoded driving polyline per day.
//!
//! This library provides:
//! - Place scoring that blends star rating, review volume and proximity
//! - A per-day greedy selection loop over three fixed time slots
//! - A trip assembler that geocodes once and plans every requested day
//! - A [`provider::PlacesProvider`] trait narrowing the mapping provider to
//!   three operations (geocode, place search, directions)
//!
//! ## Features
//!
//! - **`http`** - Enable the Google Maps provider adapter ([`http::GoogleMapsClient`])
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashSet;
//! use trip_planner::{scoring, Place};
//!
//! // Candidates arrive provider-ordered; scoring blends rating and reviews.
//! let candidates = vec![
//!     Place::new("louvre", "Louvre Museum", 48.8606, 2.3376).with_rating(4.5, 1000),
//!     Place::new("popup", "Pop-up Gallery", 48.9000, 2.4000).with_rating(4.8, 10),
//! ];
//!
//! let best = scoring::select_best(&candidates, &HashSet::new(), None).unwrap();
//! assert_eq!(best.place_id, "louvre"); // 1000 reviews beat a 4.8 with 10
//! ```
//!
//! Planning a whole trip needs a provider; see `demos/plan_trip.rs` for the
//! end-to-end flow against Google Maps.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod geo_utils;
pub mod planner;
pub mod provider;
pub mod scoring;

// HTTP provider adapter (Google Maps)
#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::GoogleMapsClient;

pub use planner::{build_trip, plan_day, TripError};
pub use provider::{PlaceSearch, PlacesProvider, ProviderError};
pub use scoring::{score, select_best};

// ============================================================================
// Core Types
// ============================================================================

/// A WGS84 coordinate pair in degrees.
///
/// # Example
/// ```
/// use trip_planner::LatLng;
/// let paris = LatLng::new(48.8566, 2.3522);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and within WGS84 ranges.
    ///
    /// Advisory only; out-of-range values coming back from a provider are
    /// passed through untouched.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }
}

/// Time-of-day position of a place within a day plan.
///
/// Attached to a [`Place`] when the planner selects it into a day; the three
/// slots are always traversed in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    MorningActivity,
    AfternoonActivity,
    EveningDining,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::MorningActivity => "morning_activity",
            Slot::AfternoonActivity => "afternoon_activity",
            Slot::EveningDining => "evening_dining",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate place returned by the provider.
///
/// Immutable once returned by a search, except for the derived [`Slot`]
/// label the planner attaches when including it in a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Opaque provider-unique identifier.
    pub place_id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Primary provider category, e.g. "restaurant".
    pub category: String,
    /// Star rating, 0.0–5.0.
    pub rating: f64,
    /// Number of user reviews behind the rating.
    pub user_ratings_total: u64,
    /// Provider price level, 0–4.
    pub price_level: u8,
    /// Resolved photo URL, or a placeholder path.
    pub photo: String,
    pub address: String,
    /// Contact details, populated only by provider dialects that return them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Slot label, present once the place is part of a [`DayPlan`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<Slot>,
}

impl Place {
    /// Create a bare place with the given identity and location.
    ///
    /// Ratings, price and photo start at their neutral values; use the
    /// `with_*` helpers to fill them in.
    pub fn new(
        place_id: impl Into<String>,
        name: impl Into<String>,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            lat,
            lng,
            category: String::new(),
            rating: 0.0,
            user_ratings_total: 0,
            price_level: 0,
            photo: String::new(),
            address: String::new(),
            phone: None,
            website: None,
            slot: None,
        }
    }

    /// Set the star rating and review count.
    pub fn with_rating(mut self, rating: f64, user_ratings_total: u64) -> Self {
        self.rating = rating;
        self.user_ratings_total = user_ratings_total;
        self
    }

    /// Set the provider price level (0–4).
    pub fn with_price_level(mut self, price_level: u8) -> Self {
        self.price_level = price_level;
        self
    }

    /// Location of this place as a coordinate pair.
    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// One day of an assembled trip.
///
/// Holds up to three places in slot order and, when the provider could route
/// between them, an encoded driving polyline. A day with zero places is
/// valid: every slot search came back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number.
    pub day: u32,
    /// Selected places in slot order (morning, afternoon, evening).
    pub places: Vec<Place>,
    /// Encoded polyline for the day's driving route, absent when fewer than
    /// two places were selected or the route lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_polyline: Option<String>,
}

/// A fully assembled trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub destination: String,
    pub destination_lat: f64,
    pub destination_lng: f64,
    pub days: Vec<DayPlan>,
}

// ============================================================================
// Request Types
// ============================================================================

/// Budget tier requested by the traveler.
///
/// Maps onto a closed provider price-level interval via [`BudgetTier::price_range`].
/// `Any` is the unconstrained tier used for unrecognized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Medium,
    Luxury,
    Any,
}

impl BudgetTier {
    /// Parse a tier name, case-insensitively. Total: unrecognized names map
    /// to [`BudgetTier::Any`] rather than failing.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "low" => BudgetTier::Low,
            "medium" => BudgetTier::Medium,
            "luxury" => BudgetTier::Luxury,
            _ => BudgetTier::Any,
        }
    }

    /// Price-level interval searched for this tier.
    pub fn price_range(self) -> PriceRange {
        match self {
            BudgetTier::Low => PriceRange { min: 0, max: 1 },
            BudgetTier::Medium => PriceRange { min: 1, max: 2 },
            BudgetTier::Luxury => PriceRange { min: 2, max: 4 },
            BudgetTier::Any => PriceRange::FULL,
        }
    }
}

/// Closed interval over provider price levels (0–4), both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: u8,
    pub max: u8,
}

impl PriceRange {
    /// The unconstrained range.
    pub const FULL: PriceRange = PriceRange { min: 0, max: 4 };
}

/// A validated trip-generation request.
///
/// The planner assumes the request already passed [`TripRequest::validate`];
/// rejecting malformed input is the calling layer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    /// Number of days to plan, 1–14.
    pub days: u32,
    pub budget: BudgetTier,
    /// Interest tags, e.g. "food", "history". May be empty.
    #[serde(default)]
    pub interests: Vec<String>,
}

impl TripRequest {
    pub const MAX_DAYS: u32 = 14;

    /// Boundary validation for callers: day count in range, destination
    /// non-empty.
    pub fn validate(&self) -> Result<(), TripError> {
        if self.destination.trim().is_empty() {
            return Err(TripError::InvalidRequest("destination must not be empty"));
        }
        if self.days < 1 || self.days > Self::MAX_DAYS {
            return Err(TripError::InvalidRequest("days must be between 1 and 14"));
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_tier_price_ranges() {
        assert_eq!(BudgetTier::Low.price_range(), PriceRange { min: 0, max: 1 });
        assert_eq!(BudgetTier::Medium.price_range(), PriceRange { min: 1, max: 2 });
        assert_eq!(BudgetTier::Luxury.price_range(), PriceRange { min: 2, max: 4 });
        assert_eq!(BudgetTier::Any.price_range(), PriceRange::FULL);
    }

    #[test]
    fn test_budget_tier_parse_is_total() {
        assert_eq!(BudgetTier::parse("low"), BudgetTier::Low);
        assert_eq!(BudgetTier::parse("MEDIUM"), BudgetTier::Medium);
        assert_eq!(BudgetTier::parse("Luxury"), BudgetTier::Luxury);
        // Unrecognized tiers fall back to the unconstrained range.
        assert_eq!(BudgetTier::parse("lavish"), BudgetTier::Any);
        assert_eq!(BudgetTier::parse(""), BudgetTier::Any);
        assert_eq!(BudgetTier::parse("lavish").price_range(), PriceRange { min: 0, max: 4 });
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(Slot::MorningActivity.as_str(), "morning_activity");
        assert_eq!(Slot::AfternoonActivity.as_str(), "afternoon_activity");
        assert_eq!(Slot::EveningDining.as_str(), "evening_dining");

        let json = serde_json::to_string(&Slot::EveningDining).unwrap();
        assert_eq!(json, "\"evening_dining\"");
    }

    #[test]
    fn test_latlng_validity() {
        assert!(LatLng::new(48.8566, 2.3522).is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_request_validation() {
        let mut request = TripRequest {
            destination: "Paris".to_string(),
            days: 3,
            budget: BudgetTier::Medium,
            interests: vec![],
        };
        assert!(request.validate().is_ok());

        request.days = 0;
        assert!(request.validate().is_err());
        request.days = 15;
        assert!(request.validate().is_err());
        request.days = 14;
        assert!(request.validate().is_ok());

        request.destination = "  ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_day_plan_serialization_omits_missing_polyline() {
        let day = DayPlan { day: 1, places: vec![], route_polyline: None };
        let json = serde_json::to_string(&day).unwrap();
        assert!(!json.contains("route_polyline"));

        let routed = DayPlan {
            day: 1,
            places: vec![],
            route_polyline: Some("abc123".to_string()),
        };
        let json = serde_json::to_string(&routed).unwrap();
        assert!(json.contains("\"route_polyline\":\"abc123\""));
    }
}
