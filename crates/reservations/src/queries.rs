//! Read operations: searches, availability checks and account lookups.

use std::collections::BTreeSet;

use query_engine_execution::query::{DatabaseRow, QueryExecutor};
use query_engine_sql::sql::execution_plan::QueryDescriptor;
use query_engine_translation::translation::error::Error as TranslationError;
use query_engine_translation::translation::query::{
    accounts, availability, hotels, rewards, rooms, SearchMode,
};
use query_engine_translation::translation::request::{
    BookingConflictRequest, DuplicateBookingRequest, HotelSearchParams, RoomAvailabilityRequest,
    RoomSearchParams,
};
use sqlx::FromRow;
use tracing::info_span;

use crate::error::Error;
use crate::records::{
    AvailabilityRecord, AvailableRow, BookedRow, BookingRecord, CountRow, Credentials, HotelRow,
    RewardRecord, RoomIdRow, RoomRow, SumRow, UserIdRow, UserProfile,
};
use crate::state::State;

/// Compose the descriptor for `operation`. Nothing is executed when the
/// request is rejected.
pub(crate) fn plan<F>(operation: &'static str, translate: F) -> Result<QueryDescriptor, Error>
where
    F: FnOnce() -> Result<QueryDescriptor, TranslationError>,
{
    info_span!("Plan query", operation).in_scope(|| {
        translate().map_err(|err| {
            tracing::info!(operation, error = %err, "rejected request");
            Error::Translation(err)
        })
    })
}

async fn fetch_one_value<E>(state: &State<E>, descriptor: &QueryDescriptor) -> Result<i64, Error>
where
    E: QueryExecutor,
    CountRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let rows: Vec<CountRow> = state.executor.fetch_all(descriptor).await?;
    Ok(rows.first().map_or(0, |row| row.count))
}

// Searches //

pub async fn search_hotels<E>(
    state: &State<E>,
    params: &HotelSearchParams,
) -> Result<Vec<HotelRow>, Error>
where
    E: QueryExecutor,
    HotelRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("search_hotels", || {
        hotels::translate(&state.env, params, SearchMode::Rows)
    })?;
    Ok(state.executor.fetch_all(&descriptor).await?)
}

/// The number of hotels `search_hotels` would find across all pages.
pub async fn count_hotels<E>(state: &State<E>, params: &HotelSearchParams) -> Result<i64, Error>
where
    E: QueryExecutor,
    CountRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("count_hotels", || {
        hotels::translate(&state.env, params, SearchMode::Count)
    })?;
    fetch_one_value(state, &descriptor).await
}

pub async fn search_rooms<E>(
    state: &State<E>,
    params: &RoomSearchParams,
) -> Result<Vec<RoomRow>, Error>
where
    E: QueryExecutor,
    RoomRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("search_rooms", || {
        rooms::translate(&state.env, params, SearchMode::Rows)
    })?;
    Ok(state.executor.fetch_all(&descriptor).await?)
}

/// The number of rooms `search_rooms` would find across all pages.
pub async fn count_rooms<E>(state: &State<E>, params: &RoomSearchParams) -> Result<i64, Error>
where
    E: QueryExecutor,
    CountRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("count_rooms", || {
        rooms::translate(&state.env, params, SearchMode::Count)
    })?;
    fetch_one_value(state, &descriptor).await
}

// Availability //

/// The user's active bookings that overlap the requested stay.
pub async fn duplicate_booking_check<E>(
    state: &State<E>,
    request: &DuplicateBookingRequest,
) -> Result<Vec<BookingRecord>, Error>
where
    E: QueryExecutor,
    BookingRecord: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("duplicate_booking_check", || {
        availability::translate_duplicate_booking_check(&state.env, request)
    })?;
    Ok(state.executor.fetch_all(&descriptor).await?)
}

/// The requested rooms that are already held for an overlapping stay.
pub async fn is_already_booked<E>(
    state: &State<E>,
    request: &BookingConflictRequest,
) -> Result<BTreeSet<i64>, Error>
where
    E: QueryExecutor,
    RoomIdRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("is_already_booked", || {
        availability::translate_is_already_booked(&state.env, request)
    })?;
    let rows: Vec<RoomIdRow> = state.executor.fetch_all(&descriptor).await?;
    Ok(rows.into_iter().map(|row| row.room_id).collect())
}

/// One record per existing requested room, ordered by room id.
pub async fn bookable_and_price_check<E>(
    state: &State<E>,
    request: &BookingConflictRequest,
) -> Result<Vec<AvailabilityRecord>, Error>
where
    E: QueryExecutor,
    BookedRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("bookable_and_price_check", || {
        availability::translate_bookable_and_price_check(&state.env, request)
    })?;
    let rows: Vec<BookedRow> = state.executor.fetch_all(&descriptor).await?;
    Ok(rows.into_iter().map(AvailabilityRecord::from).collect())
}

/// `None` when the room does not exist.
pub async fn is_bookable<E>(
    state: &State<E>,
    request: &RoomAvailabilityRequest,
) -> Result<Option<AvailabilityRecord>, Error>
where
    E: QueryExecutor,
    AvailableRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("is_bookable", || {
        availability::translate_is_bookable(&state.env, request)
    })?;
    let rows: Vec<AvailableRow> = state.executor.fetch_all(&descriptor).await?;
    Ok(rows.into_iter().next().map(AvailabilityRecord::from))
}

// Accounts //

pub async fn user_profile<E>(state: &State<E>, user_id: i64) -> Result<Option<UserProfile>, Error>
where
    E: QueryExecutor,
    UserProfile: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("user_profile", || Ok(accounts::user_profile(&state.env, user_id)))?;
    let rows: Vec<UserProfile> = state.executor.fetch_all(&descriptor).await?;
    Ok(rows.into_iter().next())
}

pub async fn email_exists<E>(state: &State<E>, email: &str) -> Result<bool, Error>
where
    E: QueryExecutor,
    UserIdRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("email_exists", || Ok(accounts::email_exists(&state.env, email)))?;
    let rows: Vec<UserIdRow> = state.executor.fetch_all(&descriptor).await?;
    Ok(!rows.is_empty())
}

pub async fn user_name_exists<E>(state: &State<E>, name: &str) -> Result<bool, Error>
where
    E: QueryExecutor,
    UserIdRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("user_name_exists", || {
        Ok(accounts::user_name_exists(&state.env, name))
    })?;
    let rows: Vec<UserIdRow> = state.executor.fetch_all(&descriptor).await?;
    Ok(!rows.is_empty())
}

/// The stored credentials for `email`. The caller verifies the password.
pub async fn authenticate<E>(state: &State<E>, email: &str) -> Result<Option<Credentials>, Error>
where
    E: QueryExecutor,
    Credentials: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("authenticate", || Ok(accounts::authenticate(&state.env, email)))?;
    let rows: Vec<Credentials> = state.executor.fetch_all(&descriptor).await?;
    Ok(rows.into_iter().next())
}

// Rewards //

pub async fn available_rewards<E>(state: &State<E>, user_id: i64) -> Result<i64, Error>
where
    E: QueryExecutor,
    SumRow: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("available_rewards", || {
        Ok(rewards::available_rewards(&state.env, user_id))
    })?;
    let rows: Vec<SumRow> = state.executor.fetch_all(&descriptor).await?;
    Ok(rows.first().map_or(0, |row| row.sum))
}

pub async fn reward_records<E>(state: &State<E>, user_id: i64) -> Result<Vec<RewardRecord>, Error>
where
    E: QueryExecutor,
    RewardRecord: for<'r> FromRow<'r, DatabaseRow<E>>,
{
    let descriptor = plan("reward_records", || Ok(rewards::reward_records(&state.env, user_id)))?;
    Ok(state.executor.fetch_all(&descriptor).await?)
}
