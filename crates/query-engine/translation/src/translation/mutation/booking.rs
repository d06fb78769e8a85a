//! Commit, cancel and modify bookings and their transactions.

use chrono::NaiveDate;
use nonempty::NonEmpty;
use query_engine_sql::sql::execution_plan::QueryDescriptor;
use serde::Deserialize;

use super::{date, float, insert, int, optional_int, optional_text, text, update_by_key};
use crate::translation::error::Error;
use crate::translation::helpers::{self, tables, Env};
use crate::translation::query::bookings::StayPeriod;
use crate::translation::request::BookedRoom;

/// A transaction header. Either `user_id` or `guest_id` identifies the payer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    pub user_id: Option<i64>,
    pub guest_id: Option<i64>,
    pub total_price: f64,
    pub cancellation_charge: f64,
    pub date_in: NaiveDate,
    pub date_out: NaiveDate,
    pub status: String,
    pub amount_paid: f64,
    pub stripe_id: Option<String>,
}

/// A single booked room.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBooking {
    pub user_id: Option<i64>,
    pub guest_id: Option<i64>,
    pub room_id: i64,
    pub total_price: f64,
    pub cancellation_charge: f64,
    pub date_in: NaiveDate,
    pub date_out: NaiveDate,
    pub status: String,
    pub amount_paid: f64,
}

pub fn make_transaction(env: &Env, transaction: &NewTransaction) -> Result<QueryDescriptor, Error> {
    let period = StayPeriod::new(transaction.date_in, transaction.date_out)?;
    let descriptor = insert(
        env,
        tables::TRANSACTION,
        &[
            "user_id",
            "guest_id",
            "total_price",
            "cancellation_charge",
            "date_in",
            "date_out",
            "status",
            "amount_paid",
            "stripe_id",
        ],
        NonEmpty::new(vec![
            optional_int(transaction.user_id),
            optional_int(transaction.guest_id),
            float(transaction.total_price),
            float(transaction.cancellation_charge),
            date(period.date_in()),
            date(period.date_out()),
            text(&transaction.status),
            float(transaction.amount_paid),
            optional_text(transaction.stripe_id.as_deref()),
        ]),
    );
    helpers::trace_descriptor("make_transaction", &descriptor);
    Ok(descriptor)
}

/// One `(transaction_id, room_id, room_price)` row per booked room, in order.
pub fn make_transaction_details(
    env: &Env,
    transaction_id: i64,
    rooms_booked: &[BookedRoom],
) -> Result<QueryDescriptor, Error> {
    let rows = rooms_booked
        .iter()
        .map(|booked| vec![int(transaction_id), int(booked.room), float(booked.price)])
        .collect();
    let rows = NonEmpty::from_vec(rows).ok_or(Error::EmptyRoomList)?;
    let descriptor = insert(
        env,
        tables::TRANSACTION_ROOM,
        &["transaction_id", "room_id", "room_price"],
        rows,
    );
    helpers::trace_descriptor("make_transaction_details", &descriptor);
    Ok(descriptor)
}

pub fn book(env: &Env, booking: &NewBooking) -> Result<QueryDescriptor, Error> {
    let period = StayPeriod::new(booking.date_in, booking.date_out)?;
    let descriptor = insert(
        env,
        tables::BOOKING,
        &[
            "user_id",
            "guest_id",
            "room_id",
            "total_price",
            "cancellation_charge",
            "date_in",
            "date_out",
            "status",
            "amount_paid",
        ],
        NonEmpty::new(vec![
            optional_int(booking.user_id),
            optional_int(booking.guest_id),
            int(booking.room_id),
            float(booking.total_price),
            float(booking.cancellation_charge),
            date(period.date_in()),
            date(period.date_out()),
            text(&booking.status),
            float(booking.amount_paid),
        ]),
    );
    helpers::trace_descriptor("book", &descriptor);
    Ok(descriptor)
}

pub fn cancel_booking(env: &Env, booking_id: i64) -> QueryDescriptor {
    update_by_key(
        env,
        tables::BOOKING,
        vec![("status", text(helpers::CANCELLED_STATUS))],
        "booking_id",
        booking_id,
    )
}

/// Move a booking to another room and period.
pub fn modify_booking(
    env: &Env,
    booking_id: i64,
    room_id: i64,
    period: &StayPeriod,
) -> QueryDescriptor {
    update_by_key(
        env,
        tables::BOOKING,
        vec![
            ("room_id", int(room_id)),
            ("date_in", date(period.date_in())),
            ("date_out", date(period.date_out())),
        ],
        "booking_id",
        booking_id,
    )
}
