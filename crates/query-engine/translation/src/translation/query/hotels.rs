//! Translate a hotel search.
//!
//! Rows are hotels with at least one room that is free for the whole stay and
//! passes every filter, together with the price range and number of such
//! rooms and a comma separated list of image urls.

use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use super::bookings::{self, StayPeriod};
use super::filtering::{self, HotelFilter, PriceFilter};
use super::pagination::Page;
use super::sorting::{self, SortBy};
use super::SearchMode;
use crate::translation::error::Error;
use crate::translation::helpers::{self, tables, Env};
use crate::translation::request::HotelSearchParams;
use crate::translation::values;

/// A validated hotel search.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelSearch {
    pub period: StayPeriod,
    pub filters: Vec<HotelFilter>,
    pub sort_by: Option<SortBy>,
    pub page: Page,
}

impl HotelSearch {
    /// Validate and coerce a hotel search request.
    pub fn from_params(env: &Env, params: &HotelSearchParams) -> Result<HotelSearch, Error> {
        let period = StayPeriod::from_request(params.date_in.as_deref(), params.date_out.as_deref())?;

        let mut filters = vec![];
        if let Some(city) = values::present(params.city.as_deref()) {
            filters.push(HotelFilter::City(city.to_string()));
        }
        if let Some(state) = values::present(params.state.as_deref()) {
            filters.push(HotelFilter::State(state.to_string()));
        }
        if let Some(zip) = values::text(params.zip.as_ref()) {
            filters.push(HotelFilter::Zip(zip));
        }
        for amenity in values::amenities(params.amenities.as_ref())? {
            filters.push(HotelFilter::Amenity(amenity));
        }
        if let Some(rating) = values::integer("rating", params.rating.as_ref())? {
            filters.push(HotelFilter::Rating(rating));
        }
        if let Some(bound) = values::number("priceGTE", params.price_gte.as_ref())? {
            filters.push(HotelFilter::Price(PriceFilter::AtLeast(bound)));
        }
        if let Some(bound) = values::number("priceLTE", params.price_lte.as_ref())? {
            filters.push(HotelFilter::Price(PriceFilter::AtMost(bound)));
        }
        if let Some(hotel_id) = values::integer("hotel_id", params.hotel_id.as_ref())? {
            filters.push(HotelFilter::HotelId(hotel_id));
        }

        Ok(HotelSearch {
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

    fn hotel_scope(&self) -> Option<i64> {
        self.filters.iter().find_map(|filter| match filter {
            HotelFilter::HotelId(hotel_id) => Some(*hotel_id),
            _ => None,
        })
    }
}

/// Translate a hotel search request.
pub fn translate(
    env: &Env,
    params: &HotelSearchParams,
    mode: SearchMode,
) -> Result<QueryDescriptor, Error> {
    let search = HotelSearch::from_params(env, params)?;
    let descriptor = translate_search(env, &search, mode);
    helpers::trace_descriptor("hotel_search", &descriptor);
    Ok(descriptor)
}

/// Translate a validated hotel search.
pub fn translate_search(env: &Env, search: &HotelSearch, mode: SearchMode) -> QueryDescriptor {
    let with = sql::ast::With {
        common_table_expressions: vec![bookings::active_bookings(
            env,
            &search.period,
            search.hotel_scope(),
        )],
    };

    let room = env.aliased_table(tables::ROOM, "room");
    let hotel = env.aliased_table(tables::HOTEL, "hotel");

    let mut conditions = vec![bookings::room_is_free(&room.reference)];
    conditions.extend(
        search
            .filters
            .iter()
            .map(|filter| filtering::translate_hotel_filter(&hotel.reference, &room.reference, filter)),
    );

    // every free room of every hotel, filtered
    let mut matching = sql::helpers::star_select(room.from);
    matching.joins = vec![sql::ast::Join::InnerJoin(sql::ast::InnerJoin {
        on: sql::helpers::equals(
            sql::helpers::table_column(&room.reference, "hotel_id"),
            sql::helpers::table_column(&hotel.reference, "hotel_id"),
        ),
        source: hotel.from,
    })];
    matching.where_ = sql::ast::Where(sql::helpers::and_all(conditions));

    let hotel_id = sql::ast::ColumnReference::TableColumn {
        table: hotel.reference.clone(),
        name: sql::ast::ColumnName("hotel_id".to_string()),
    };

    match mode {
        SearchMode::Count => {
            matching.with = with;
            matching.select_list = sql::ast::SelectList::SelectList(vec![(
                sql::helpers::make_column_alias("count".to_string()),
                sql::ast::Expression::Count(sql::ast::CountType::Distinct(hotel_id)),
            )]);
            QueryDescriptor::select(matching)
        }
        SearchMode::Rows => {
            let room_price = || sql::helpers::table_column(&room.reference, "price");
            matching.select_list = sql::ast::SelectList::SelectListComposite(
                Box::new(sql::ast::SelectList::SelectStarFrom(hotel.reference.clone())),
                Box::new(sql::ast::SelectList::SelectList(vec![
                    (
                        sql::helpers::make_column_alias("min_price".to_string()),
                        sql::helpers::function(sql::ast::Function::Min, vec![room_price()]),
                    ),
                    (
                        sql::helpers::make_column_alias("max_price".to_string()),
                        sql::helpers::function(sql::ast::Function::Max, vec![room_price()]),
                    ),
                    (
                        sql::helpers::make_column_alias("rooms_available".to_string()),
                        sql::ast::Expression::Count(sql::ast::CountType::Simple(
                            sql::ast::ColumnReference::TableColumn {
                                table: room.reference.clone(),
                                name: sql::ast::ColumnName("room_id".to_string()),
                            },
                        )),
                    ),
                ])),
            );
            matching.group_by = sql::ast::GroupBy {
                elements: vec![sql::ast::Expression::ColumnReference(hotel_id)],
            };

            let hotels = helpers::aliased_select(matching, "rh");
            let images = env.aliased_table(tables::HOTEL_IMAGE, "hotel_image");

            let mut select = sql::helpers::star_select(hotels.from);
            select.with = with;
            select.select_list = sql::ast::SelectList::SelectListComposite(
                Box::new(sql::ast::SelectList::SelectStarFrom(hotels.reference.clone())),
                Box::new(sql::ast::SelectList::SelectList(vec![(
                    sql::helpers::make_column_alias("images".to_string()),
                    sql::helpers::function(
                        sql::ast::Function::GroupConcat,
                        vec![sql::helpers::table_column(&images.reference, "url")],
                    ),
                )])),
            );
            select.joins = vec![sql::ast::Join::LeftOuterJoin(sql::ast::LeftOuterJoin {
                on: sql::helpers::equals(
                    sql::helpers::table_column(&images.reference, "hotel_id"),
                    sql::helpers::table_column(&hotels.reference, "hotel_id"),
                ),
                source: images.from,
            })];
            select.group_by = sql::ast::GroupBy {
                elements: vec![sql::helpers::table_column(&hotels.reference, "hotel_id")],
            };
            select.order_by = sorting::translate_hotel_order_by(search.sort_by, &hotels.reference);
            select.limit = search.page.to_limit();
            QueryDescriptor::select(select)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::request::{Amenities, Scalar};
    use query_engine_sql::sql::string::Param;

    fn params() -> HotelSearchParams {
        HotelSearchParams {
            date_in: Some("2019-03-10".to_string()),
            date_out: Some("2019-03-12".to_string()),
            ..HotelSearchParams::default()
        }
    }

    #[test]
    fn count_mode_ignores_sort_and_pagination() {
        let params = HotelSearchParams {
            city: Some("San Jose".to_string()),
            sort_by: Some("rating_des".to_string()),
            page_number: Some(Scalar::from(3)),
            ..params()
        };
        let descriptor = translate(&Env::default(), &params, SearchMode::Count).unwrap();
        insta::assert_snapshot!(
            descriptor.template(),
            @"WITH `rb` AS (SELECT `B`.*, `R`.`hotel_id` AS `hotel_id`, `R`.`room_number` AS `room_number`, `R`.`price` AS `price`, `R`.`bed_type` AS `bed_type` FROM `booking` AS `B` JOIN `room` AS `R` ON (`B`.`room_id` = `R`.`room_id`) WHERE (((`B`.`status` <> ?) AND (`B`.`date_in` < ?)) AND (`B`.`date_out` > ?))) SELECT COUNT(DISTINCT `hotel`.`hotel_id`) AS `count` FROM `room` AS `room` JOIN `hotel` AS `hotel` ON (`room`.`hotel_id` = `hotel`.`hotel_id`) WHERE (NOT EXISTS (SELECT 1 FROM `rb` AS `rb` WHERE (`rb`.`room_id` = `room`.`room_id`)) AND (LOWER(`hotel`.`city`) = LOWER(?)))"
        );
        assert_eq!(descriptor.values().len(), 4);
    }

    #[test]
    fn row_mode_ends_with_bound_pagination() {
        let params = HotelSearchParams {
            page_number: Some(Scalar::from("2")),
            results_per_page: Some(Scalar::from(10)),
            ..params()
        };
        let descriptor = translate(&Env::default(), &params, SearchMode::Rows).unwrap();
        assert!(descriptor
            .template()
            .ends_with("ORDER BY `rh`.`name` ASC, `rh`.`hotel_id` ASC LIMIT ? OFFSET ?"));
        assert_eq!(
            &descriptor.values()[descriptor.values().len() - 2..],
            &[Param::Integer(10), Param::Integer(20)]
        );
    }

    #[test]
    fn every_amenity_adds_a_conjunct() {
        let params = HotelSearchParams {
            amenities: Some(Amenities::List(vec!["pool".to_string(), "wifi".to_string()])),
            ..params()
        };
        let search = HotelSearch::from_params(&Env::default(), &params).unwrap();
        assert_eq!(
            search.filters,
            vec![
                HotelFilter::Amenity("pool".to_string()),
                HotelFilter::Amenity("wifi".to_string())
            ]
        );
    }

    #[test]
    fn hotel_id_scopes_the_active_bookings() {
        let params = HotelSearchParams {
            hotel_id: Some(Scalar::from("7")),
            ..params()
        };
        let descriptor = translate(&Env::default(), &params, SearchMode::Count).unwrap();
        // once inside the relation, once as a filter
        assert_eq!(
            descriptor
                .values()
                .iter()
                .filter(|value| **value == Param::Integer(7))
                .count(),
            2
        );
    }

    #[test]
    fn missing_dates_fail_closed() {
        let params = HotelSearchParams {
            date_out: None,
            ..params()
        };
        assert_eq!(
            translate(&Env::default(), &params, SearchMode::Rows),
            Err(Error::MissingRequiredParameter("date_out"))
        );
    }

    #[test]
    fn non_numeric_rating_is_rejected() {
        let params = HotelSearchParams {
            rating: Some(Scalar::from("five")),
            ..params()
        };
        assert!(matches!(
            translate(&Env::default(), &params, SearchMode::Rows),
            Err(Error::MalformedInput {
                parameter: "rating",
                ..
            })
        ));
    }

    #[test]
    fn tables_are_qualified_by_the_configured_schema() {
        let env = Env::new(Some("spartanhotel".to_string()), 10);
        let descriptor = translate(&env, &params(), SearchMode::Rows).unwrap();
        assert!(descriptor
            .template()
            .contains("FROM `spartanhotel`.`booking` AS `B`"));
        assert!(descriptor
            .template()
            .contains("LEFT OUTER JOIN `spartanhotel`.`hotel_image` AS `hotel_image`"));
    }
}
