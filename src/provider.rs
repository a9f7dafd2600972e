//! # Provider Adapter Contract
//!
//! The planner consumes exactly three operations from a mapping/places
//! provider: geocoding, place search and directions. Everything else about
//! the provider (REST dialects, fallback chains, credentials) stays behind
//! this trait, insulating the itinerary algorithm from provider API churn.
//!
//! The `http` feature ships a Google Maps implementation
//! ([`crate::http::GoogleMapsClient`]); tests script the trait in memory.

use async_trait::async_trait;
use thiserror::Error;

use crate::{LatLng, Place, PriceRange};

/// Failure at the provider seam.
///
/// Only [`ProviderError::NotFound`] carries planner-level meaning (an
/// unresolvable destination aborts the trip build); every other variant is
/// swallowed by the planner and degraded to an empty pool or a missing
/// route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The query did not resolve to any result.
    #[error("not found")]
    NotFound,
    /// Transport-level failure (connection, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),
    /// The provider answered with a non-success API status.
    #[error("provider status: {0}")]
    Status(String),
}

/// One place-search query: a candidate pool for a single slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSearch {
    /// Center to search around (the trip destination; days do not
    /// spatially progress).
    pub center: LatLng,
    /// Provider place category, e.g. "restaurant".
    pub category: String,
    /// Optional free-text keyword refining the category.
    pub keyword: Option<String>,
    /// Inclusive price-level filter.
    pub price: PriceRange,
}

/// The narrowed mapping-provider contract the planner depends on.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Resolve a destination name to a coordinate.
    async fn geocode(&self, query: &str) -> Result<LatLng, ProviderError>;

    /// Search for candidate places around a center.
    ///
    /// Results are provider-ordered by relevance and capped at a small
    /// fixed count (10) by the adapter. An empty list is a valid answer.
    async fn search_places(&self, search: &PlaceSearch) -> Result<Vec<Place>, ProviderError>;

    /// Request an encoded driving polyline visiting the given coordinates
    /// in order. `Ok(None)` means the provider could not route the day.
    async fn route_polyline(
        &self,
        origin: LatLng,
        destination: LatLng,
        waypoints: &[LatLng],
    ) -> Result<Option<String>, ProviderError>;
}
