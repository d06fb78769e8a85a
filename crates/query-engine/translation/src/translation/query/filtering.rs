//! Handle filtering/where clauses translation.

use query_engine_sql::sql;

/// A bound on a room's nightly price. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceFilter {
    AtLeast(f64),
    AtMost(f64),
}

/// A single hotel search filter, each with one fixed effect on the query.
#[derive(Debug, Clone, PartialEq)]
pub enum HotelFilter {
    /// Case-insensitive match on the hotel's city.
    City(String),
    /// Case-insensitive match on the hotel's state.
    State(String),
    /// Exact match on the hotel's zip code.
    Zip(String),
    /// The hotel's amenities must mention this item. Repeated filters must all hold.
    Amenity(String),
    /// Exact match on the hotel's rating.
    Rating(i64),
    Price(PriceFilter),
    HotelId(i64),
}

/// A single room search filter.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomFilter {
    Price(PriceFilter),
    /// The room must sleep at least this many guests.
    MinimumCapacity(i64),
}

fn value(value: sql::ast::Value) -> sql::ast::Expression {
    sql::ast::Expression::Value(value)
}

fn case_insensitive_equals(column: sql::ast::Expression, text: &str) -> sql::ast::Expression {
    sql::helpers::equals(
        sql::helpers::function(sql::ast::Function::Lower, vec![column]),
        sql::helpers::function(
            sql::ast::Function::Lower,
            vec![value(sql::ast::Value::String(text.to_string()))],
        ),
    )
}

/// Translate a price bound against a room reference.
pub fn translate_price_filter(
    room: &sql::ast::TableReference,
    filter: PriceFilter,
) -> sql::ast::Expression {
    let (operator, bound) = match filter {
        PriceFilter::AtLeast(bound) => (sql::ast::BinaryOperator::GreaterThanOrEqualTo, bound),
        PriceFilter::AtMost(bound) => (sql::ast::BinaryOperator::LessThanOrEqualTo, bound),
    };
    sql::helpers::binary(
        sql::helpers::table_column(room, "price"),
        operator,
        value(sql::ast::Value::Float8(bound)),
    )
}

/// Translate a hotel filter against the hotel and room references of a search.
pub fn translate_hotel_filter(
    hotel: &sql::ast::TableReference,
    room: &sql::ast::TableReference,
    filter: &HotelFilter,
) -> sql::ast::Expression {
    match filter {
        HotelFilter::City(city) => {
            case_insensitive_equals(sql::helpers::table_column(hotel, "city"), city)
        }
        HotelFilter::State(state) => {
            case_insensitive_equals(sql::helpers::table_column(hotel, "state"), state)
        }
        HotelFilter::Zip(zip) => sql::helpers::equals(
            sql::helpers::table_column(hotel, "zipcode"),
            value(sql::ast::Value::String(zip.clone())),
        ),
        HotelFilter::Amenity(amenity) => {
            sql::helpers::contains_text(sql::helpers::table_column(hotel, "amenities"), amenity)
        }
        HotelFilter::Rating(rating) => sql::helpers::equals(
            sql::helpers::table_column(hotel, "rating"),
            value(sql::ast::Value::Int8(*rating)),
        ),
        HotelFilter::Price(price) => translate_price_filter(room, *price),
        HotelFilter::HotelId(hotel_id) => sql::helpers::equals(
            sql::helpers::table_column(hotel, "hotel_id"),
            value(sql::ast::Value::Int8(*hotel_id)),
        ),
    }
}

/// Translate a room filter against a room reference.
pub fn translate_room_filter(
    room: &sql::ast::TableReference,
    filter: &RoomFilter,
) -> sql::ast::Expression {
    match filter {
        RoomFilter::Price(price) => translate_price_filter(room, *price),
        RoomFilter::MinimumCapacity(guests) => sql::helpers::binary(
            sql::helpers::table_column(room, "capacity"),
            sql::ast::BinaryOperator::GreaterThanOrEqualTo,
            value(sql::ast::Value::Int8(*guests)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_sql::sql::execution_plan::QueryDescriptor;
    use query_engine_sql::sql::string::Param;

    fn render(expression: sql::ast::Expression) -> QueryDescriptor {
        let mut select = sql::helpers::simple_select(vec![]);
        select.select_list = sql::ast::SelectList::Select1;
        select.where_ = sql::ast::Where(expression);
        QueryDescriptor::select(select)
    }

    fn table(name: &str) -> sql::ast::TableReference {
        sql::helpers::aliased_table(&sql::helpers::make_table_alias(name.to_string()))
    }

    #[test]
    fn city_matches_case_insensitively() {
        let descriptor = render(translate_hotel_filter(
            &table("hotel"),
            &table("room"),
            &HotelFilter::City("San Jose".to_string()),
        ));
        insta::assert_snapshot!(
            descriptor.template(),
            @"SELECT 1 WHERE (LOWER(`hotel`.`city`) = LOWER(?))"
        );
        assert_eq!(descriptor.values(), &[Param::String("San Jose".to_string())]);
    }

    #[test]
    fn amenity_is_a_containment_test() {
        let descriptor = render(translate_hotel_filter(
            &table("hotel"),
            &table("room"),
            &HotelFilter::Amenity("pool".to_string()),
        ));
        insta::assert_snapshot!(
            descriptor.template(),
            @"SELECT 1 WHERE (`hotel`.`amenities` LIKE ? ESCAPE '!')"
        );
        assert_eq!(descriptor.values(), &[Param::String("%pool%".to_string())]);
    }

    #[test]
    fn amenity_wildcards_are_literal() {
        let descriptor = render(translate_hotel_filter(
            &table("hotel"),
            &table("room"),
            &HotelFilter::Amenity("%".to_string()),
        ));
        assert_eq!(descriptor.values(), &[Param::String("%!%%".to_string())]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let descriptor = render(sql::helpers::and_all(vec![
            translate_room_filter(&table("room"), &RoomFilter::Price(PriceFilter::AtLeast(50.0))),
            translate_room_filter(&table("room"), &RoomFilter::Price(PriceFilter::AtMost(150.0))),
        ]));
        insta::assert_snapshot!(
            descriptor.template(),
            @"SELECT 1 WHERE ((`room`.`price` >= ?) AND (`room`.`price` <= ?))"
        );
    }
}
