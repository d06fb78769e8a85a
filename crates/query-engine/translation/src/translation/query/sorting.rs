//! Translate the requested sort order to an ORDER BY clause.

use enum_iterator::Sequence;
use query_engine_sql::sql;

/// The sort orders a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum SortBy {
    RatingAsc,
    RatingDes,
    NameAsc,
    NameDes,
    PriceAsc,
    PriceDes,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::RatingAsc => "rating_asc",
            SortBy::RatingDes => "rating_des",
            SortBy::NameAsc => "name_asc",
            SortBy::NameDes => "name_des",
            SortBy::PriceAsc => "price_asc",
            SortBy::PriceDes => "price_des",
        }
    }

    /// Parse a requested sort order. Unrecognized values yield `None` so each
    /// search can apply its own default.
    pub fn parse(value: Option<&str>) -> Option<SortBy> {
        let value = value?.trim();
        enum_iterator::all::<SortBy>().find(|sort_by| sort_by.as_str() == value)
    }
}

fn order_by(
    table: &sql::ast::TableReference,
    column: &str,
    direction: sql::ast::OrderByDirection,
    tie_breaker: &str,
) -> sql::ast::OrderBy {
    sql::ast::OrderBy {
        elements: vec![
            sql::ast::OrderByElement {
                target: sql::helpers::table_column(table, column),
                direction,
            },
            sql::ast::OrderByElement {
                target: sql::helpers::table_column(table, tie_breaker),
                direction: sql::ast::OrderByDirection::Asc,
            },
        ],
    }
}

/// Order grouped hotel rows. Defaults to name ascending.
pub fn translate_hotel_order_by(
    sort_by: Option<SortBy>,
    hotels: &sql::ast::TableReference,
) -> sql::ast::OrderBy {
    use sql::ast::OrderByDirection::{Asc, Desc};

    let (column, direction) = match sort_by.unwrap_or(SortBy::NameAsc) {
        SortBy::RatingAsc => ("rating", Asc),
        SortBy::RatingDes => ("rating", Desc),
        SortBy::NameAsc => ("name", Asc),
        SortBy::NameDes => ("name", Desc),
        SortBy::PriceAsc => ("min_price", Asc),
        SortBy::PriceDes => ("min_price", Desc),
    };
    order_by(hotels, column, direction, "hotel_id")
}

/// Order room rows. Defaults to price ascending; rating is a hotel attribute
/// and falls back to the default too.
pub fn translate_room_order_by(
    sort_by: Option<SortBy>,
    rooms: &sql::ast::TableReference,
) -> sql::ast::OrderBy {
    use sql::ast::OrderByDirection::{Asc, Desc};

    let (column, direction) = match sort_by {
        Some(SortBy::NameAsc) => ("room_number", Asc),
        Some(SortBy::NameDes) => ("room_number", Desc),
        Some(SortBy::PriceDes) => ("price", Desc),
        Some(SortBy::PriceAsc | SortBy::RatingAsc | SortBy::RatingDes) | None => ("price", Asc),
    };
    order_by(rooms, column, direction, "room_id")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rh() -> sql::ast::TableReference {
        sql::helpers::aliased_table(&sql::helpers::make_table_alias("rh".to_string()))
    }

    #[test]
    fn every_sort_order_round_trips_through_its_name() {
        for sort_by in enum_iterator::all::<SortBy>() {
            assert_eq!(SortBy::parse(Some(sort_by.as_str())), Some(sort_by));
        }
    }

    #[test]
    fn unknown_sort_order_is_none() {
        assert_eq!(SortBy::parse(Some("distance_asc")), None);
        assert_eq!(SortBy::parse(None), None);
    }

    #[test]
    fn hotels_fall_back_to_name_ascending() {
        assert_eq!(
            translate_hotel_order_by(SortBy::parse(Some("bogus")), &rh()),
            translate_hotel_order_by(Some(SortBy::NameAsc), &rh())
        );
    }

    #[test]
    fn rooms_fall_back_to_price_ascending() {
        let expected = translate_room_order_by(Some(SortBy::PriceAsc), &rh());
        assert_eq!(translate_room_order_by(SortBy::parse(Some("bogus")), &rh()), expected);
        assert_eq!(translate_room_order_by(Some(SortBy::RatingDes), &rh()), expected);
    }

    #[test]
    fn hotel_price_sorts_by_cheapest_room() {
        let order_by = translate_hotel_order_by(Some(SortBy::PriceDes), &rh());
        assert_eq!(
            order_by.elements[0],
            sql::ast::OrderByElement {
                target: sql::helpers::table_column(&rh(), "min_price"),
                direction: sql::ast::OrderByDirection::Desc,
            }
        );
    }
}
