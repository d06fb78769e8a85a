//! An in-memory SQLite database seeded with three hotels.
//!
//! For the stay 2019-03-10 to 2019-03-12 rooms 1 and 2 are held, room 3 only
//! has a cancelled booking and every room of hotel 3 is taken.

#![allow(dead_code)]

use chrono::NaiveDate;
use query_engine_execution::sqlite::SqliteExecutor;
use query_engine_translation::translation::request::Scalar;
use reservations::state::{create_sqlite_state, State};
use reservations_configuration::{Configuration, PoolSettings};
use sqlx::Executor;

const SCHEMA: &str = r"
CREATE TABLE hotel (
    hotel_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    phone_number TEXT,
    street TEXT,
    city TEXT NOT NULL,
    state TEXT NOT NULL,
    zipcode TEXT NOT NULL,
    rating INTEGER NOT NULL,
    amenities TEXT
);
CREATE TABLE hotel_image (
    image_id INTEGER PRIMARY KEY,
    hotel_id INTEGER NOT NULL,
    url TEXT NOT NULL
);
CREATE TABLE room (
    room_id INTEGER PRIMARY KEY,
    hotel_id INTEGER NOT NULL,
    room_number INTEGER NOT NULL,
    price REAL NOT NULL,
    bed_type TEXT NOT NULL,
    capacity INTEGER NOT NULL
);
CREATE TABLE room_image (
    image_id INTEGER PRIMARY KEY,
    hotel_id INTEGER NOT NULL,
    bed_type TEXT NOT NULL,
    url TEXT NOT NULL
);
CREATE TABLE `user` (
    user_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    password TEXT NOT NULL,
    email TEXT NOT NULL
);
CREATE TABLE guest (
    guest_id INTEGER PRIMARY KEY,
    email TEXT NOT NULL,
    name TEXT NOT NULL
);
CREATE TABLE booking (
    booking_id INTEGER PRIMARY KEY,
    user_id INTEGER,
    guest_id INTEGER,
    room_id INTEGER NOT NULL,
    total_price REAL NOT NULL,
    cancellation_charge REAL NOT NULL DEFAULT 0,
    date_in DATE NOT NULL,
    date_out DATE NOT NULL,
    status TEXT NOT NULL,
    amount_paid REAL NOT NULL DEFAULT 0
);
CREATE TABLE `transaction` (
    transaction_id INTEGER PRIMARY KEY,
    user_id INTEGER,
    guest_id INTEGER,
    total_price REAL NOT NULL,
    cancellation_charge REAL NOT NULL,
    date_in DATE NOT NULL,
    date_out DATE NOT NULL,
    status TEXT NOT NULL,
    amount_paid REAL NOT NULL,
    stripe_id TEXT
);
CREATE TABLE transaction_room (
    transaction_id INTEGER NOT NULL,
    room_id INTEGER NOT NULL,
    room_price REAL NOT NULL
);
CREATE TABLE reward_reason (
    reward_reason_id INTEGER PRIMARY KEY,
    reason TEXT NOT NULL
);
CREATE TABLE reward (
    reward_id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    reward_reason_id INTEGER NOT NULL,
    transaction_id INTEGER,
    date_active DATE NOT NULL,
    change INTEGER NOT NULL
);
";

const DATA: &str = r"
INSERT INTO hotel VALUES
    (1, 'Hotel Julian', '408-555-0101', '1 Market St', 'San Jose', 'CA', '95112', 4, 'wifi,pool'),
    (2, 'Fairmont', '408-555-0102', '170 S Market St', 'San Jose', 'CA', '95113', 5, 'wifi,gym'),
    (3, 'Ritz', '415-555-0103', '600 Stockton St', 'San Francisco', 'CA', '94108', 5, 'pool');
INSERT INTO hotel_image (hotel_id, url) VALUES
    (1, 'julian-lobby.jpg'),
    (1, 'julian-pool.jpg'),
    (2, 'fairmont-front.jpg');
INSERT INTO room VALUES
    (1, 1, 101, 100.0, 'king', 2),
    (2, 1, 102, 120.0, 'queen', 2),
    (3, 1, 103, 150.0, 'king', 4),
    (4, 2, 201, 200.0, 'king', 2),
    (5, 2, 202, 220.0, 'double', 3),
    (6, 3, 301, 300.0, 'king', 2);
INSERT INTO room_image (hotel_id, bed_type, url) VALUES
    (1, 'king', 'julian-king.jpg'),
    (1, 'queen', 'julian-queen.jpg');
INSERT INTO `user` VALUES
    (1, 'ada', '$2b$10$adahash', 'ada@example.com'),
    (2, 'grace', '$2b$10$gracehash', 'grace@example.com');
INSERT INTO booking (booking_id, user_id, guest_id, room_id, total_price, date_in, date_out, status) VALUES
    (1, 1, NULL, 1, 200.0, '2019-03-09', '2019-03-11', 'booked'),
    (2, 2, NULL, 2, 240.0, '2019-03-11', '2019-03-13', 'booked'),
    (3, 1, NULL, 3, 300.0, '2019-03-10', '2019-03-12', 'cancelled'),
    (4, 2, NULL, 6, 5700.0, '2019-03-01', '2019-03-20', 'booked');
INSERT INTO reward_reason VALUES
    (1, 'Used on booking'),
    (2, 'Earned from booking');
INSERT INTO reward (user_id, reward_reason_id, transaction_id, date_active, change) VALUES
    (1, 2, 10, '2019-01-01', 200),
    (1, 1, 11, '2019-02-01', -50),
    (1, 2, 12, '2999-01-01', 500);
";

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

pub fn scalars(values: &[i64]) -> Vec<Scalar> {
    values.iter().copied().map(Scalar::from).collect()
}

pub async fn fixture() -> State<SqliteExecutor> {
    let _ = env_logger::builder().is_test(true).try_init();

    // a single connection that is never recycled keeps the in-memory
    // database alive for the whole test
    let configuration = Configuration {
        schema: None,
        default_results_per_page: 10,
        pool_settings: PoolSettings {
            max_connections: 1,
            pool_timeout: 30,
            idle_timeout: None,
            connection_lifetime: None,
        },
        connection_uri: "sqlite::memory:".to_string(),
    };
    let state = create_sqlite_state(&configuration, &prometheus::Registry::new())
        .await
        .expect("in-memory database");

    let pool = state.executor.pool();
    pool.execute(SCHEMA).await.expect("schema");
    pool.execute(DATA).await.expect("data");
    state
}
