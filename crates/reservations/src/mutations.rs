//! Write operations. Each runs a single statement; callers that need several
//! statements to succeed together coordinate that themselves.

use chrono::NaiveDate;
use query_engine_execution::query::{QueryExecutor, StatementOutcome};
use query_engine_sql::sql::execution_plan::QueryDescriptor;
use query_engine_translation::translation::mutation::accounts::{self, NewGuest, NewUser};
use query_engine_translation::translation::mutation::booking::{self, NewBooking, NewTransaction};
use query_engine_translation::translation::mutation::rewards;
use query_engine_translation::translation::query::bookings::StayPeriod;
use query_engine_translation::translation::request::BookedRoom;

use crate::error::Error;
use crate::queries::plan;
use crate::state::State;

async fn execute<E: QueryExecutor>(
    state: &State<E>,
    descriptor: &QueryDescriptor,
) -> Result<StatementOutcome, Error> {
    Ok(state.executor.execute_statement(descriptor).await?)
}

// Bookings //

/// Insert a booking. The new booking id is in `last_insert_id`.
pub async fn book<E: QueryExecutor>(
    state: &State<E>,
    new_booking: &NewBooking,
) -> Result<StatementOutcome, Error> {
    let descriptor = plan("book", || booking::book(&state.env, new_booking))?;
    execute(state, &descriptor).await
}

/// Returns the number of bookings cancelled: 0 or 1.
pub async fn cancel_booking<E: QueryExecutor>(
    state: &State<E>,
    booking_id: i64,
) -> Result<u64, Error> {
    let descriptor = plan("cancel_booking", || {
        Ok(booking::cancel_booking(&state.env, booking_id))
    })?;
    Ok(execute(state, &descriptor).await?.rows_affected)
}

pub async fn modify_booking<E: QueryExecutor>(
    state: &State<E>,
    booking_id: i64,
    room_id: i64,
    period: &StayPeriod,
) -> Result<u64, Error> {
    let descriptor = plan("modify_booking", || {
        Ok(booking::modify_booking(&state.env, booking_id, room_id, period))
    })?;
    Ok(execute(state, &descriptor).await?.rows_affected)
}

/// Insert a transaction header. The new transaction id is in `last_insert_id`.
pub async fn make_transaction<E: QueryExecutor>(
    state: &State<E>,
    transaction: &NewTransaction,
) -> Result<StatementOutcome, Error> {
    let descriptor = plan("make_transaction", || {
        booking::make_transaction(&state.env, transaction)
    })?;
    execute(state, &descriptor).await
}

/// Record every room of a transaction in one statement.
pub async fn make_transaction_details<E: QueryExecutor>(
    state: &State<E>,
    transaction_id: i64,
    rooms_booked: &[BookedRoom],
) -> Result<u64, Error> {
    let descriptor = plan("make_transaction_details", || {
        booking::make_transaction_details(&state.env, transaction_id, rooms_booked)
    })?;
    Ok(execute(state, &descriptor).await?.rows_affected)
}

// Accounts //

pub async fn create_user<E: QueryExecutor>(
    state: &State<E>,
    user: &NewUser,
) -> Result<StatementOutcome, Error> {
    let descriptor = plan("create_user", || Ok(accounts::create_user(&state.env, user)))?;
    execute(state, &descriptor).await
}

pub async fn insert_guest<E: QueryExecutor>(
    state: &State<E>,
    guest: &NewGuest,
) -> Result<StatementOutcome, Error> {
    let descriptor = plan("insert_guest", || Ok(accounts::insert_guest(&state.env, guest)))?;
    execute(state, &descriptor).await
}

// Rewards //

pub async fn use_rewards_on_booking<E: QueryExecutor>(
    state: &State<E>,
    user_id: i64,
    transaction_id: i64,
    change: i64,
) -> Result<u64, Error> {
    let descriptor = plan("use_rewards_on_booking", || {
        Ok(rewards::use_rewards_on_booking(
            &state.env,
            user_id,
            transaction_id,
            change,
        ))
    })?;
    Ok(execute(state, &descriptor).await?.rows_affected)
}

pub async fn gain_rewards_from_booking<E: QueryExecutor>(
    state: &State<E>,
    user_id: i64,
    transaction_id: i64,
    date_active: NaiveDate,
    change: i64,
) -> Result<u64, Error> {
    let descriptor = plan("gain_rewards_from_booking", || {
        Ok(rewards::gain_rewards_from_booking(
            &state.env,
            user_id,
            transaction_id,
            date_active,
            change,
        ))
    })?;
    Ok(execute(state, &descriptor).await?.rows_affected)
}

pub async fn remove_transaction_rewards<E: QueryExecutor>(
    state: &State<E>,
    transaction_id: i64,
) -> Result<u64, Error> {
    let descriptor = plan("remove_transaction_rewards", || {
        Ok(rewards::remove_transaction_rewards(&state.env, transaction_id))
    })?;
    Ok(execute(state, &descriptor).await?.rows_affected)
}
