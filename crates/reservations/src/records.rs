//! Typed rows returned by the operations.

use chrono::NaiveDate;
use serde::Serialize;

/// A hotel with at least one free room matching a search.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct HotelRow {
    pub hotel_id: i64,
    pub name: String,
    pub street: Option<String>,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub rating: i64,
    pub amenities: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub rooms_available: i64,
    /// Comma separated image urls.
    pub images: Option<String>,
}

/// A free room matching a search.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: i64,
    pub hotel_id: i64,
    pub room_number: i64,
    pub price: f64,
    pub bed_type: String,
    pub capacity: i64,
    /// Comma separated image urls of the room's bed type.
    pub images: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct CountRow {
    pub count: i64,
}

/// A booking together with the room it holds.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BookingRecord {
    pub booking_id: i64,
    pub user_id: Option<i64>,
    pub guest_id: Option<i64>,
    pub room_id: i64,
    pub total_price: f64,
    pub date_in: NaiveDate,
    pub date_out: NaiveDate,
    pub status: String,
    pub hotel_id: i64,
    pub room_number: i64,
    pub price: f64,
    pub bed_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct RoomIdRow {
    pub room_id: i64,
}

/// Availability and price of one room for a stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityRecord {
    pub room_id: i64,
    pub hotel_id: i64,
    pub room_number: i64,
    pub price: f64,
    pub bed_type: String,
    pub capacity: i64,
    pub booked: bool,
}

// Truth values arrive as integers from both MySQL and SQLite, so the raw
// rows below are converted into `AvailabilityRecord`.

#[derive(Debug, sqlx::FromRow)]
pub struct BookedRow {
    room_id: i64,
    hotel_id: i64,
    room_number: i64,
    price: f64,
    bed_type: String,
    capacity: i64,
    booked: i64,
}

impl From<BookedRow> for AvailabilityRecord {
    fn from(row: BookedRow) -> Self {
        AvailabilityRecord {
            room_id: row.room_id,
            hotel_id: row.hotel_id,
            room_number: row.room_number,
            price: row.price,
            bed_type: row.bed_type,
            capacity: row.capacity,
            booked: row.booked != 0,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct AvailableRow {
    room_id: i64,
    hotel_id: i64,
    room_number: i64,
    price: f64,
    bed_type: String,
    capacity: i64,
    available: i64,
}

impl From<AvailableRow> for AvailabilityRecord {
    fn from(row: AvailableRow) -> Self {
        AvailabilityRecord {
            room_id: row.room_id,
            hotel_id: row.hotel_id,
            room_number: row.room_number,
            price: row.price,
            bed_type: row.bed_type,
            capacity: row.capacity,
            booked: row.available == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct UserIdRow {
    pub user_id: i64,
}

/// What is needed to verify a login.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Credentials {
    pub user_id: i64,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct SumRow {
    pub sum: i64,
}

/// One entry of a user's reward ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RewardRecord {
    pub reward_id: i64,
    pub user_id: i64,
    pub reward_reason_id: i64,
    pub transaction_id: Option<i64>,
    pub date_active: NaiveDate,
    pub change: i64,
    pub reason: String,
}
