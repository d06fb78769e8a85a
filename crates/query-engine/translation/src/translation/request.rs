//! Caller-supplied request objects, as they arrive.
//!
//! Every field is loosely typed here. Values are validated and coerced by the
//! translation functions before they reach a query.

use serde::Deserialize;

/// A scalar that may arrive as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

/// Requested amenities: either a list, or a percent-encoded JSON array as
/// found in query strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amenities {
    List(Vec<String>),
    Encoded(String),
}

/// Hotel search request. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HotelSearchParams {
    pub date_in: Option<String>,
    pub date_out: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<Scalar>,
    pub amenities: Option<Amenities>,
    pub rating: Option<Scalar>,
    #[serde(rename = "priceGTE")]
    pub price_gte: Option<Scalar>,
    #[serde(rename = "priceLTE")]
    pub price_lte: Option<Scalar>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "pageNumber")]
    pub page_number: Option<Scalar>,
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: Option<Scalar>,
    pub hotel_id: Option<Scalar>,
}

/// Room search request, scoped to one hotel. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoomSearchParams {
    pub hotel_id: Option<Scalar>,
    pub date_in: Option<String>,
    pub date_out: Option<String>,
    #[serde(rename = "priceGTE")]
    pub price_gte: Option<Scalar>,
    #[serde(rename = "priceLTE")]
    pub price_lte: Option<Scalar>,
    pub guests: Option<Scalar>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "pageNumber")]
    pub page_number: Option<Scalar>,
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: Option<Scalar>,
}

/// A set of rooms requested for one stay.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BookingConflictRequest {
    pub date_in: Option<String>,
    pub date_out: Option<String>,
    #[serde(default)]
    pub rooms: Vec<Scalar>,
}

/// A user's prospective stay, checked against their own bookings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DuplicateBookingRequest {
    pub user_id: Option<Scalar>,
    pub date_in: Option<String>,
    pub date_out: Option<String>,
}

/// A single room for one stay.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RoomAvailabilityRequest {
    pub date_in: Option<String>,
    pub date_out: Option<String>,
    pub room_id: Option<Scalar>,
}

/// A room committed as part of a transaction, with the price it was sold at.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookedRoom {
    pub room: i64,
    pub price: f64,
}
