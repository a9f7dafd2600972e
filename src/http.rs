//! Google Maps provider adapter.
//!
//! Implements [`PlacesProvider`] over three Google Maps REST endpoints:
//! - Find Place From Text (with a Geocoding API fallback) for destinations
//! - Nearby Search for slot candidate pools
//! - Directions for the per-day driving polyline
//!
//! The API key is injected at construction; nothing here reads the process
//! environment. Dialect fallbacks stay inside this adapter so the planner
//! only ever sees the narrowed three-operation contract.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::provider::{PlaceSearch, PlacesProvider, ProviderError};
use crate::{LatLng, Place};

const PLACES_API_BASE: &str = "https://maps.googleapis.com/maps/api/place";
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Search radius around the destination center, in meters.
const SEARCH_RADIUS_M: u32 = 5000;
/// Candidate pool cap; the planner never needs more than the best few.
const MAX_CANDIDATES: usize = 10;
/// Width requested when expanding photo references into URLs.
const PHOTO_MAX_WIDTH: u32 = 400;
/// Served for places the provider has no photo for.
const PLACEHOLDER_PHOTO: &str = "/placeholder-image.jpg";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.to_string())
    }
}

/// Google Maps places/geocoding/directions client.
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
}

impl GoogleMapsClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, api_key: api_key.into() })
    }

    /// Expand a photo reference into a fetchable URL.
    fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{PLACES_API_BASE}/photo?maxwidth={PHOTO_MAX_WIDTH}&photo_reference={photo_reference}&key={}",
            self.api_key
        )
    }

    fn place_from_result(&self, raw: PlaceResult, fallback_category: &str) -> Place {
        let photo = raw
            .photos
            .first()
            .map(|p| self.photo_url(&p.photo_reference))
            .unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string());

        Place {
            place_id: raw.place_id,
            name: raw.name,
            lat: raw.geometry.location.lat,
            lng: raw.geometry.location.lng,
            category: raw
                .types
                .into_iter()
                .next()
                .unwrap_or_else(|| fallback_category.to_string()),
            rating: raw.rating,
            user_ratings_total: raw.user_ratings_total,
            price_level: raw.price_level,
            photo,
            address: raw.vicinity.or(raw.formatted_address).unwrap_or_default(),
            phone: None,
            website: None,
            slot: None,
        }
    }

    /// Primary destination lookup: Find Place From Text.
    async fn find_place(&self, query: &str) -> Result<LatLng, ProviderError> {
        let body: FindPlaceResponse = self
            .client
            .get(format!("{PLACES_API_BASE}/findplacefromtext/json"))
            .query(&[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", "geometry"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if body.status != "OK" {
            return Err(ProviderError::Status(body.status));
        }

        body.candidates
            .into_iter()
            .next()
            .map(|c| LatLng::new(c.geometry.location.lat, c.geometry.location.lng))
            .ok_or(ProviderError::NotFound)
    }

    /// Fallback destination lookup: the Geocoding API.
    async fn geocode_address(&self, query: &str) -> Result<LatLng, ProviderError> {
        let body: GeocodeResponse = self
            .client
            .get(GEOCODE_URL)
            .query(&[("address", query), ("key", self.api_key.as_str())])
            .send()
            .await?
            .json()
            .await?;

        match body.status.as_str() {
            "OK" => body
                .results
                .into_iter()
                .next()
                .map(|c| LatLng::new(c.geometry.location.lat, c.geometry.location.lng))
                .ok_or(ProviderError::NotFound),
            "ZERO_RESULTS" => Err(ProviderError::NotFound),
            status => Err(ProviderError::Status(status.to_string())),
        }
    }
}

#[async_trait]
impl PlacesProvider for GoogleMapsClient {
    async fn geocode(&self, query: &str) -> Result<LatLng, ProviderError> {
        match self.find_place(query).await {
            Ok(at) => Ok(at),
            Err(e) => {
                debug!("[GoogleMaps] find-place failed for '{query}' ({e}), trying geocoding");
                self.geocode_address(query).await
            }
        }
    }

    async fn search_places(&self, search: &PlaceSearch) -> Result<Vec<Place>, ProviderError> {
        let location = format!("{},{}", search.center.lat, search.center.lng);
        let radius = SEARCH_RADIUS_M.to_string();
        let minprice = search.price.min.to_string();
        let maxprice = search.price.max.to_string();

        let mut request = self
            .client
            .get(format!("{PLACES_API_BASE}/nearbysearch/json"))
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", search.category.as_str()),
                ("minprice", minprice.as_str()),
                ("maxprice", maxprice.as_str()),
                ("key", self.api_key.as_str()),
            ]);

        if let Some(keyword) = &search.keyword {
            request = request.query(&[("keyword", keyword.as_str())]);
        }

        let body: NearbySearchResponse = request.send().await?.json().await?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            status => {
                warn!("[GoogleMaps] nearby search returned {status}");
                return Err(ProviderError::Status(match body.error_message {
                    Some(message) => format!("{status}: {message}"),
                    None => status.to_string(),
                }));
            }
        }

        Ok(body
            .results
            .into_iter()
            .take(MAX_CANDIDATES)
            .map(|raw| self.place_from_result(raw, &search.category))
            .collect())
    }

    async fn route_polyline(
        &self,
        origin: LatLng,
        destination: LatLng,
        waypoints: &[LatLng],
    ) -> Result<Option<String>, ProviderError> {
        let origin = format!("{},{}", origin.lat, origin.lng);
        let destination = format!("{},{}", destination.lat, destination.lng);

        let mut request = self
            .client
            .get(DIRECTIONS_URL)
            .query(&[
                ("origin", origin.as_str()),
                ("destination", destination.as_str()),
                ("mode", "driving"),
                ("key", self.api_key.as_str()),
            ]);

        if !waypoints.is_empty() {
            let joined = waypoints
                .iter()
                .map(|w| format!("{},{}", w.lat, w.lng))
                .collect::<Vec<_>>()
                .join("|");
            request = request.query(&[("waypoints", joined.as_str())]);
        }

        let body: DirectionsResponse = request.send().await?.json().await?;

        if body.status != "OK" {
            warn!("[GoogleMaps] directions returned {}", body.status);
            return Ok(None);
        }

        Ok(body
            .routes
            .into_iter()
            .next()
            .map(|r| r.overview_polyline.points))
    }
}

// ============================================================================
// Response Shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    place_id: String,
    geometry: Geometry,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    user_ratings_total: u64,
    #[serde(default)]
    price_level: u8,
    #[serde(default)]
    photos: Vec<PhotoRef>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PhotoRef {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<GeometryHolder>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeometryHolder>,
}

#[derive(Debug, Deserialize)]
struct GeometryHolder {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

// ============================================================================
// Unit Tests
// ============================================================================
