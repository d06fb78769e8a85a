//! Stay periods and the active-bookings relation.
//!
//! A stored booking `(d1, d2, status)` conflicts with a requested stay
//! `(r1, r2)` iff `status != 'cancelled' AND d1 < r2 AND d2 > r1`. Every
//! availability test in the crate is built from [`overlaps_period`].

use chrono::NaiveDate;
use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::{self, tables, Env, TableNameAndReference};
use crate::translation::values;

/// Name of the active-bookings relation.
pub const ACTIVE_BOOKINGS: &str = "rb";

/// A half-open stay `[date_in, date_out)`. Always at least one night long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayPeriod {
    date_in: NaiveDate,
    date_out: NaiveDate,
}

impl StayPeriod {
    pub fn new(date_in: NaiveDate, date_out: NaiveDate) -> Result<StayPeriod, Error> {
        if date_out <= date_in {
            return Err(Error::InvalidStayPeriod { date_in, date_out });
        }
        Ok(StayPeriod { date_in, date_out })
    }

    /// Parse both bounds of a request. Either bound missing is an error.
    pub fn from_request(date_in: Option<&str>, date_out: Option<&str>) -> Result<StayPeriod, Error> {
        let date_in = values::required_date("date_in", date_in)?;
        let date_out = values::required_date("date_out", date_out)?;
        StayPeriod::new(date_in, date_out)
    }

    pub fn date_in(&self) -> NaiveDate {
        self.date_in
    }

    pub fn date_out(&self) -> NaiveDate {
        self.date_out
    }

    /// Whether two stays share at least one night.
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.date_in < other.date_out && other.date_in < self.date_out
    }
}

/// The predicate selecting non-cancelled bookings of `booking` that overlap `period`.
pub fn overlaps_period(booking: &sql::ast::TableReference, period: &StayPeriod) -> sql::ast::Expression {
    sql::helpers::and_all(vec![
        sql::helpers::binary(
            sql::helpers::table_column(booking, "status"),
            sql::ast::BinaryOperator::NotEquals,
            sql::ast::Expression::Value(sql::ast::Value::String(
                helpers::CANCELLED_STATUS.to_string(),
            )),
        ),
        sql::helpers::binary(
            sql::helpers::table_column(booking, "date_in"),
            sql::ast::BinaryOperator::LessThan,
            sql::ast::Expression::Value(sql::ast::Value::Date(period.date_out)),
        ),
        sql::helpers::binary(
            sql::helpers::table_column(booking, "date_out"),
            sql::ast::BinaryOperator::GreaterThan,
            sql::ast::Expression::Value(sql::ast::Value::Date(period.date_in)),
        ),
    ])
}

/// Bookings joined to the room they hold, filtered by `predicate`:
///
/// `SELECT B.*, R.hotel_id, R.room_number, R.price, R.bed_type FROM booking B JOIN room R ...`
///
/// `predicate` receives the booking and room references.
pub fn booking_with_room_select(
    env: &Env,
    predicate: impl FnOnce(&sql::ast::TableReference, &sql::ast::TableReference) -> sql::ast::Expression,
) -> sql::ast::Select {
    let booking = env.aliased_table(tables::BOOKING, "B");
    let room = env.aliased_table(tables::ROOM, "R");

    let room_columns = ["hotel_id", "room_number", "price", "bed_type"]
        .into_iter()
        .map(|name| helpers::same_name_column(&room.reference, name))
        .collect();

    let mut select = sql::helpers::star_select(booking.from);
    select.select_list = sql::ast::SelectList::SelectListComposite(
        Box::new(sql::ast::SelectList::SelectStarFrom(booking.reference.clone())),
        Box::new(sql::ast::SelectList::SelectList(room_columns)),
    );
    select.joins = vec![sql::ast::Join::InnerJoin(sql::ast::InnerJoin {
        on: sql::helpers::equals(
            sql::helpers::table_column(&booking.reference, "room_id"),
            sql::helpers::table_column(&room.reference, "room_id"),
        ),
        source: room.from,
    })];
    select.where_ = sql::ast::Where(predicate(&booking.reference, &room.reference));
    select
}

/// The active-bookings relation for `period`, optionally narrowed to one hotel.
pub fn active_bookings(
    env: &Env,
    period: &StayPeriod,
    hotel_id: Option<i64>,
) -> sql::ast::CommonTableExpression {
    let select = booking_with_room_select(env, |booking, room| {
        let mut conditions = vec![overlaps_period(booking, period)];
        if let Some(hotel_id) = hotel_id {
            conditions.push(sql::helpers::equals(
                sql::helpers::table_column(room, "hotel_id"),
                sql::ast::Expression::Value(sql::ast::Value::Int8(hotel_id)),
            ));
        }
        sql::helpers::and_all(conditions)
    });

    sql::ast::CommonTableExpression {
        alias: sql::helpers::make_table_alias(ACTIVE_BOOKINGS.to_string()),
        select: Box::new(select),
    }
}

/// `NOT EXISTS (SELECT 1 FROM rb WHERE rb.room_id = room.room_id)`
///
/// Only meaningful inside a statement that defines [`active_bookings`].
pub fn room_is_free(room: &sql::ast::TableReference) -> sql::ast::Expression {
    let alias = sql::helpers::make_table_alias(ACTIVE_BOOKINGS.to_string());
    let active = TableNameAndReference {
        reference: sql::helpers::aliased_table(&alias),
        from: sql::ast::From::Table {
            reference: sql::helpers::aliased_table(&alias),
            alias,
        },
    };
    sql::helpers::not(sql::helpers::exists(sql::helpers::select_one(
        active.from,
        sql::helpers::equals(
            sql::helpers::table_column(&active.reference, "room_id"),
            sql::helpers::table_column(room, "room_id"),
        ),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use query_engine_sql::sql::execution_plan::QueryDescriptor;
    use query_engine_sql::sql::string::Param;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn period(date_in: &str, date_out: &str) -> StayPeriod {
        StayPeriod::new(date(date_in), date(date_out)).unwrap()
    }

    #[test]
    fn back_to_back_stays_do_not_overlap() {
        let first = period("2019-03-10", "2019-03-12");
        let second = period("2019-03-12", "2019-03-14");
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn contained_stay_overlaps() {
        let outer = period("2019-03-01", "2019-03-31");
        let inner = period("2019-03-10", "2019-03-11");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn empty_or_inverted_stays_are_rejected() {
        assert!(matches!(
            StayPeriod::new(date("2019-03-10"), date("2019-03-10")),
            Err(Error::InvalidStayPeriod { .. })
        ));
        assert!(StayPeriod::new(date("2019-03-12"), date("2019-03-10")).is_err());
    }

    #[test]
    fn missing_bound_is_rejected() {
        assert_eq!(
            StayPeriod::from_request(Some("2019-03-10"), None),
            Err(Error::MissingRequiredParameter("date_out"))
        );
        assert_eq!(
            StayPeriod::from_request(None, Some("2019-03-12")),
            Err(Error::MissingRequiredParameter("date_in"))
        );
    }

    #[test]
    fn active_bookings_binds_status_and_both_dates() {
        let cte = active_bookings(&Env::default(), &period("2019-03-10", "2019-03-12"), Some(5));
        let descriptor = QueryDescriptor::select(*cte.select);
        insta::assert_snapshot!(
            descriptor.template(),
            @"SELECT `B`.*, `R`.`hotel_id` AS `hotel_id`, `R`.`room_number` AS `room_number`, `R`.`price` AS `price`, `R`.`bed_type` AS `bed_type` FROM `booking` AS `B` JOIN `room` AS `R` ON (`B`.`room_id` = `R`.`room_id`) WHERE ((((`B`.`status` <> ?) AND (`B`.`date_in` < ?)) AND (`B`.`date_out` > ?)) AND (`R`.`hotel_id` = ?))"
        );
        assert_eq!(
            descriptor.values(),
            &[
                Param::String("cancelled".to_string()),
                Param::Date(date("2019-03-12")),
                Param::Date(date("2019-03-10")),
                Param::Integer(5),
            ]
        );
    }

    fn arb_period() -> impl Strategy<Value = StayPeriod> {
        (0i64..400, 1i64..30).prop_map(|(start, nights)| {
            let base = date("2019-01-01");
            StayPeriod::new(
                base + chrono::Duration::days(start),
                base + chrono::Duration::days(start + nights),
            )
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_period(), b in arb_period()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn stays_ending_before_the_other_starts_never_overlap(a in arb_period(), b in arb_period()) {
            if a.date_out() <= b.date_in() || b.date_out() <= a.date_in() {
                prop_assert!(!a.overlaps(&b));
            } else {
                prop_assert!(a.overlaps(&b));
            }
        }
    }
}
