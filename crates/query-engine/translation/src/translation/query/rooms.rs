//! Translate a room search within one hotel.
//!
//! Images are keyed by `(hotel_id, bed_type)`, so every room of a bed type at
//! a hotel shares one image set.

use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use super::bookings::{self, StayPeriod};
use super::filtering::{self, PriceFilter, RoomFilter};
use super::pagination::Page;
use super::sorting::{self, SortBy};
use super::SearchMode;
use crate::translation::error::Error;
use crate::translation::helpers::{self, tables, Env};
use crate::translation::request::RoomSearchParams;
use crate::translation::values;

/// A validated room search.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSearch {
    pub hotel_id: i64,
    pub period: StayPeriod,
    pub filters: Vec<RoomFilter>,
    pub sort_by: Option<SortBy>,
    pub page: Page,
}

impl RoomSearch {
    /// Validate and coerce a room search request.
    pub fn from_params(env: &Env, params: &RoomSearchParams) -> Result<RoomSearch, Error> {
        let hotel_id = values::required_integer("hotel_id", params.hotel_id.as_ref())?;
        let period = StayPeriod::from_request(params.date_in.as_deref(), params.date_out.as_deref())?;

        let mut filters = vec![];
        if let Some(bound) = values::number("priceGTE", params.price_gte.as_ref())? {
            filters.push(RoomFilter::Price(PriceFilter::AtLeast(bound)));
        }
        if let Some(bound) = values::number("priceLTE", params.price_lte.as_ref())? {
            filters.push(RoomFilter::Price(PriceFilter::AtMost(bound)));
        }
        if let Some(guests) = values::integer("guests", params.guests.as_ref())? {
            filters.push(RoomFilter::MinimumCapacity(guests));
        }

        Ok(RoomSearch {
            hotel_id,
            period,
            filters,
            sort_by: SortBy::parse(params.sort_by.as_deref()),
            page: Page::from_request(
                env,
                params.page_number.as_ref(),
                params.results_per_page.as_ref(),
            )?,
        })
    }
}

/// Translate a room search request.
pub fn translate(
    env: &Env,
    params: &RoomSearchParams,
    mode: SearchMode,
) -> Result<QueryDescriptor, Error> {
    let search = RoomSearch::from_params(env, params)?;
    let descriptor = translate_search(env, &search, mode);
    helpers::trace_descriptor("room_search", &descriptor);
    Ok(descriptor)
}

/// Translate a validated room search.
pub fn translate_search(env: &Env, search: &RoomSearch, mode: SearchMode) -> QueryDescriptor {
    let with = sql::ast::With {
        common_table_expressions: vec![bookings::active_bookings(
            env,
            &search.period,
            Some(search.hotel_id),
        )],
    };

    let room = env.aliased_table(tables::ROOM, "room");

    let mut conditions = vec![
        bookings::room_is_free(&room.reference),
        sql::helpers::equals(
            sql::helpers::table_column(&room.reference, "hotel_id"),
            sql::ast::Expression::Value(sql::ast::Value::Int8(search.hotel_id)),
        ),
    ];
    conditions.extend(
        search
            .filters
            .iter()
            .map(|filter| filtering::translate_room_filter(&room.reference, filter)),
    );

    let mut matching = sql::helpers::star_select(room.from);
    matching.where_ = sql::ast::Where(sql::helpers::and_all(conditions));

    match mode {
        SearchMode::Count => {
            matching.with = with;
            matching.select_list = sql::ast::SelectList::SelectList(vec![(
                sql::helpers::make_column_alias("count".to_string()),
                sql::ast::Expression::Count(sql::ast::CountType::Star),
            )]);
            QueryDescriptor::select(matching)
        }
        SearchMode::Rows => {
            matching.select_list = sql::ast::SelectList::SelectStarFrom(room.reference.clone());

            let rooms = helpers::aliased_select(matching, "rh");
            let images = env.aliased_table(tables::ROOM_IMAGE, "room_image");

            let mut select = sql::helpers::star_select(rooms.from);
            select.with = with;
            select.select_list = sql::ast::SelectList::SelectListComposite(
                Box::new(sql::ast::SelectList::SelectStarFrom(rooms.reference.clone())),
                Box::new(sql::ast::SelectList::SelectList(vec![(
                    sql::helpers::make_column_alias("images".to_string()),
                    sql::helpers::function(
                        sql::ast::Function::GroupConcat,
                        vec![sql::helpers::table_column(&images.reference, "url")],
                    ),
                )])),
            );
            select.joins = vec![sql::ast::Join::LeftOuterJoin(sql::ast::LeftOuterJoin {
                on: sql::helpers::and_all(vec![
                    sql::helpers::equals(
                        sql::helpers::table_column(&images.reference, "hotel_id"),
                        sql::helpers::table_column(&rooms.reference, "hotel_id"),
                    ),
                    sql::helpers::equals(
                        sql::helpers::table_column(&images.reference, "bed_type"),
                        sql::helpers::table_column(&rooms.reference, "bed_type"),
                    ),
                ]),
                source: images.from,
            })];
            select.group_by = sql::ast::GroupBy {
                elements: vec![sql::helpers::table_column(&rooms.reference, "room_id")],
            };
            select.order_by = sorting::translate_room_order_by(search.sort_by, &rooms.reference);
            select.limit = search.page.to_limit();
            QueryDescriptor::select(select)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::request::Scalar;
    use query_engine_sql::sql::string::Param;

    fn params() -> RoomSearchParams {
        RoomSearchParams {
            hotel_id: Some(Scalar::from(5)),
            date_in: Some("2019-03-10".to_string()),
            date_out: Some("2019-03-12".to_string()),
            ..RoomSearchParams::default()
        }
    }

    #[test]
    fn hotel_id_is_required() {
        let params = RoomSearchParams {
            hotel_id: None,
            ..params()
        };
        assert_eq!(
            translate(&Env::default(), &params, SearchMode::Rows),
            Err(Error::MissingRequiredParameter("hotel_id"))
        );
    }

    #[test]
    fn count_mode_counts_free_rooms() {
        let params = RoomSearchParams {
            price_lte: Some(Scalar::from("150")),
            ..params()
        };
        let descriptor = translate(&Env::default(), &params, SearchMode::Count).unwrap();
        assert!(descriptor.template().contains(
            "SELECT COUNT(*) AS `count` FROM `room` AS `room` WHERE ((NOT EXISTS (SELECT 1 FROM `rb` AS `rb` WHERE (`rb`.`room_id` = `room`.`room_id`)) AND (`room`.`hotel_id` = ?)) AND (`room`.`price` <= ?))"
        ));
        assert!(!descriptor.template().contains("LIMIT"));
        assert_eq!(
            descriptor.values()[3..],
            [Param::Integer(5), Param::Integer(5), Param::Float(150.0)]
        );
    }

    #[test]
    fn images_are_shared_per_bed_type() {
        let descriptor = translate(&Env::default(), &params(), SearchMode::Rows).unwrap();
        assert!(descriptor.template().contains(
            "LEFT OUTER JOIN `room_image` AS `room_image` ON ((`room_image`.`hotel_id` = `rh`.`hotel_id`) AND (`room_image`.`bed_type` = `rh`.`bed_type`))"
        ));
    }

    #[test]
    fn unknown_sort_falls_back_to_price() {
        let params = RoomSearchParams {
            sort_by: Some("distance".to_string()),
            ..params()
        };
        let descriptor = translate(&Env::default(), &params, SearchMode::Rows).unwrap();
        assert!(descriptor
            .template()
            .ends_with("ORDER BY `rh`.`price` ASC, `rh`.`room_id` ASC LIMIT ? OFFSET ?"));
    }

    #[test]
    fn occupancy_filter_checks_capacity() {
        let params = RoomSearchParams {
            guests: Some(Scalar::from("3")),
            ..params()
        };
        let descriptor = translate(&Env::default(), &params, SearchMode::Rows).unwrap();
        assert!(descriptor.template().contains("(`room`.`capacity` >= ?)"));
    }
}
