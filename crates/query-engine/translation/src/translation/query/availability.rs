//! Booking conflict and room availability checks.
//!
//! All four checks test bookings with [`bookings::overlaps_period`], so the
//! reject list of [`is_already_booked`] and the priced list of
//! [`bookable_and_price_check`] always agree on which rooms are taken.

use nonempty::NonEmpty;
use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use super::bookings::{self, StayPeriod};
use crate::translation::error::Error;
use crate::translation::helpers::{self, tables, Env};
use crate::translation::request::{
    BookingConflictRequest, DuplicateBookingRequest, RoomAvailabilityRequest,
};
use crate::translation::values;

/// Room attributes returned next to every availability flag.
const ROOM_COLUMNS: [&str; 6] = [
    "room_id",
    "hotel_id",
    "room_number",
    "price",
    "bed_type",
    "capacity",
];

/// A set of rooms requested for one stay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConflict {
    pub period: StayPeriod,
    pub rooms: NonEmpty<i64>,
}

impl BookingConflict {
    pub fn from_request(request: &BookingConflictRequest) -> Result<BookingConflict, Error> {
        let period =
            StayPeriod::from_request(request.date_in.as_deref(), request.date_out.as_deref())?;
        let rooms = request
            .rooms
            .iter()
            .map(|room| values::required_integer("rooms", Some(room)))
            .collect::<Result<Vec<_>, _>>()?;
        let rooms = NonEmpty::from_vec(rooms).ok_or(Error::EmptyRoomList)?;
        Ok(BookingConflict { period, rooms })
    }
}

fn int(value: i64) -> sql::ast::Expression {
    sql::ast::Expression::Value(sql::ast::Value::Int8(value))
}

/// `room_id = ? OR room_id = ? ...`, one disjunct per candidate.
fn is_candidate(table: &sql::ast::TableReference, rooms: &NonEmpty<i64>) -> sql::ast::Expression {
    sql::helpers::or_all(
        rooms
            .iter()
            .map(|room_id| sql::helpers::equals(sql::helpers::table_column(table, "room_id"), int(*room_id))),
    )
}

/// The distinct candidate rooms holding an active booking for the stay.
fn booked_rooms_select(env: &Env, conflict: &BookingConflict) -> sql::ast::Select {
    let booking = env.aliased_table(tables::BOOKING, "B");
    let mut select = sql::helpers::simple_select(vec![helpers::same_name_column(
        &booking.reference,
        "room_id",
    )]);
    select.distinct = true;
    select.where_ = sql::ast::Where(sql::helpers::and_all(vec![
        bookings::overlaps_period(&booking.reference, &conflict.period),
        is_candidate(&booking.reference, &conflict.rooms),
    ]));
    select.from = Some(booking.from);
    select
}

/// The user's own active bookings overlapping the stay, with their room.
pub fn duplicate_booking_check(env: &Env, user_id: i64, period: &StayPeriod) -> QueryDescriptor {
    let mut select = bookings::booking_with_room_select(env, |booking, _room| {
        sql::helpers::and_all(vec![
            bookings::overlaps_period(booking, period),
            sql::helpers::equals(sql::helpers::table_column(booking, "user_id"), int(user_id)),
        ])
    });
    let booking = sql::helpers::aliased_table(&sql::helpers::make_table_alias("B".to_string()));
    select.order_by = sql::ast::OrderBy {
        elements: vec![sql::ast::OrderByElement {
            target: sql::helpers::table_column(&booking, "booking_id"),
            direction: sql::ast::OrderByDirection::Asc,
        }],
    };
    QueryDescriptor::select(select)
}

/// The subset of the candidate rooms that is already booked for the stay.
pub fn is_already_booked(env: &Env, conflict: &BookingConflict) -> QueryDescriptor {
    QueryDescriptor::select(booked_rooms_select(env, conflict))
}

/// One row per existing candidate room, with its price and a `booked` flag.
pub fn bookable_and_price_check(env: &Env, conflict: &BookingConflict) -> QueryDescriptor {
    let room = env.aliased_table(tables::ROOM, "R");
    let mut candidates = sql::helpers::star_select(room.from);
    candidates.where_ = sql::ast::Where(is_candidate(&room.reference, &conflict.rooms));

    let candidates = helpers::aliased_select(candidates, "A");
    let booked = helpers::aliased_select(booked_rooms_select(env, conflict), "AB");

    let mut columns: Vec<_> = ROOM_COLUMNS
        .into_iter()
        .map(|name| helpers::same_name_column(&candidates.reference, name))
        .collect();
    columns.push((
        sql::helpers::make_column_alias("booked".to_string()),
        sql::ast::Expression::UnaryOperation {
            expression: Box::new(sql::helpers::table_column(&booked.reference, "room_id")),
            operator: sql::ast::UnaryOperator::IsNotNull,
        },
    ));

    let mut select = sql::helpers::simple_select(columns);
    select.from = Some(candidates.from);
    select.joins = vec![sql::ast::Join::LeftOuterJoin(sql::ast::LeftOuterJoin {
        on: sql::helpers::equals(
            sql::helpers::table_column(&candidates.reference, "room_id"),
            sql::helpers::table_column(&booked.reference, "room_id"),
        ),
        source: booked.from,
    })];
    select.order_by = sql::ast::OrderBy {
        elements: vec![sql::ast::OrderByElement {
            target: sql::helpers::table_column(&candidates.reference, "room_id"),
            direction: sql::ast::OrderByDirection::Asc,
        }],
    };
    QueryDescriptor::select(select)
}

/// The room's attributes and whether it is `available` for the whole stay.
/// Yields no row for an unknown room.
pub fn is_bookable(env: &Env, room_id: i64, period: &StayPeriod) -> QueryDescriptor {
    let room = env.aliased_table(tables::ROOM, "room");
    let booking = env.aliased_table(tables::BOOKING, "B");

    let holds_room = sql::helpers::select_one(
        booking.from,
        sql::helpers::and_all(vec![
            bookings::overlaps_period(&booking.reference, period),
            sql::helpers::equals(
                sql::helpers::table_column(&booking.reference, "room_id"),
                sql::helpers::table_column(&room.reference, "room_id"),
            ),
        ]),
    );

    let mut columns: Vec<_> = ROOM_COLUMNS
        .into_iter()
        .map(|name| helpers::same_name_column(&room.reference, name))
        .collect();
    columns.push((
        sql::helpers::make_column_alias("available".to_string()),
        sql::helpers::not(sql::helpers::exists(holds_room)),
    ));

    let mut select = sql::helpers::simple_select(columns);
    select.where_ = sql::ast::Where(sql::helpers::equals(
        sql::helpers::table_column(&room.reference, "room_id"),
        int(room_id),
    ));
    select.from = Some(room.from);
    QueryDescriptor::select(select)
}

// Request entry points //

pub fn translate_duplicate_booking_check(
    env: &Env,
    request: &DuplicateBookingRequest,
) -> Result<QueryDescriptor, Error> {
    let user_id = values::required_integer("user_id", request.user_id.as_ref())?;
    let period = StayPeriod::from_request(request.date_in.as_deref(), request.date_out.as_deref())?;
    let descriptor = duplicate_booking_check(env, user_id, &period);
    helpers::trace_descriptor("duplicate_booking_check", &descriptor);
    Ok(descriptor)
}

pub fn translate_is_already_booked(
    env: &Env,
    request: &BookingConflictRequest,
) -> Result<QueryDescriptor, Error> {
    let descriptor = is_already_booked(env, &BookingConflict::from_request(request)?);
    helpers::trace_descriptor("is_already_booked", &descriptor);
    Ok(descriptor)
}

pub fn translate_bookable_and_price_check(
    env: &Env,
    request: &BookingConflictRequest,
) -> Result<QueryDescriptor, Error> {
    let descriptor = bookable_and_price_check(env, &BookingConflict::from_request(request)?);
    helpers::trace_descriptor("bookable_and_price_check", &descriptor);
    Ok(descriptor)
}

pub fn translate_is_bookable(
    env: &Env,
    request: &RoomAvailabilityRequest,
) -> Result<QueryDescriptor, Error> {
    let period = StayPeriod::from_request(request.date_in.as_deref(), request.date_out.as_deref())?;
    let room_id = values::required_integer("room_id", request.room_id.as_ref())?;
    let descriptor = is_bookable(env, room_id, &period);
    helpers::trace_descriptor("is_bookable", &descriptor);
    Ok(descriptor)
}
