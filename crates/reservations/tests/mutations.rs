mod common;

use std::collections::BTreeSet;

use query_engine_translation::translation::error::Error as TranslationError;
use query_engine_translation::translation::mutation::accounts::{NewGuest, NewUser};
use query_engine_translation::translation::mutation::booking::{NewBooking, NewTransaction};
use query_engine_translation::translation::query::bookings::StayPeriod;
use query_engine_translation::translation::request::{BookedRoom, BookingConflictRequest};
use reservations::{mutations, queries, Error};

use common::{date, fixture, scalars};

fn april_stay(rooms: &[i64]) -> BookingConflictRequest {
    BookingConflictRequest {
        date_in: Some("2019-04-01".to_string()),
        date_out: Some("2019-04-03".to_string()),
        rooms: scalars(rooms),
    }
}

fn april_booking(room_id: i64) -> NewBooking {
    NewBooking {
        user_id: Some(2),
        guest_id: None,
        room_id,
        total_price: 400.0,
        cancellation_charge: 0.0,
        date_in: date("2019-04-01"),
        date_out: date("2019-04-03"),
        status: "booked".to_string(),
        amount_paid: 400.0,
    }
}

#[tokio::test]
async fn booked_rooms_stay_taken_until_cancelled() {
    let state = fixture().await;

    let outcome = mutations::book(&state, &april_booking(4)).await.unwrap();
    assert_eq!(outcome.rows_affected, 1);
    let booking_id = outcome.last_insert_id.unwrap();

    let booked = queries::is_already_booked(&state, &april_stay(&[4, 5])).await.unwrap();
    assert_eq!(booked, BTreeSet::from([4]));

    assert_eq!(mutations::cancel_booking(&state, booking_id).await.unwrap(), 1);
    let booked = queries::is_already_booked(&state, &april_stay(&[4, 5])).await.unwrap();
    assert!(booked.is_empty());
}

#[tokio::test]
async fn modified_bookings_move_with_their_room() {
    let state = fixture().await;
    let booking_id = mutations::book(&state, &april_booking(4))
        .await
        .unwrap()
        .last_insert_id
        .unwrap();

    let period = StayPeriod::new(date("2019-04-02"), date("2019-04-05")).unwrap();
    assert_eq!(
        mutations::modify_booking(&state, booking_id, 5, &period).await.unwrap(),
        1
    );

    let booked = queries::is_already_booked(&state, &april_stay(&[4, 5])).await.unwrap();
    assert_eq!(booked, BTreeSet::from([5]));
}

#[tokio::test]
async fn inverted_booking_is_not_written() {
    let state = fixture().await;
    let booking = NewBooking {
        date_out: date("2019-03-31"),
        ..april_booking(4)
    };
    let result = mutations::book(&state, &booking).await;
    assert!(matches!(
        result,
        Err(Error::Translation(TranslationError::InvalidStayPeriod { .. }))
    ));
}

#[tokio::test]
async fn transactions_record_every_booked_room() {
    let state = fixture().await;
    let transaction = NewTransaction {
        user_id: Some(1),
        guest_id: None,
        total_price: 600.0,
        cancellation_charge: 0.0,
        date_in: date("2019-04-01"),
        date_out: date("2019-04-03"),
        status: "booked".to_string(),
        amount_paid: 600.0,
        stripe_id: Some("ch_1".to_string()),
    };
    let transaction_id = mutations::make_transaction(&state, &transaction)
        .await
        .unwrap()
        .last_insert_id
        .unwrap();

    let rooms = vec![
        BookedRoom {
            room: 4,
            price: 200.0,
        },
        BookedRoom {
            room: 5,
            price: 400.0,
        },
    ];
    let inserted = mutations::make_transaction_details(&state, transaction_id, &rooms)
        .await
        .unwrap();
    assert_eq!(inserted, 2);

    let stored: Vec<(i64, f64)> = sqlx::query_as(
        "SELECT room_id, room_price FROM transaction_room WHERE transaction_id = ? ORDER BY room_id",
    )
    .bind(transaction_id)
    .fetch_all(state.executor.pool())
    .await
    .unwrap();
    similar_asserts::assert_eq!(stored, vec![(4, 200.0), (5, 400.0)]);
}

#[tokio::test]
async fn transaction_without_rooms_is_rejected() {
    let state = fixture().await;
    let result = mutations::make_transaction_details(&state, 1, &[]).await;
    assert!(matches!(
        result,
        Err(Error::Translation(TranslationError::EmptyRoomList))
    ));
}

#[tokio::test]
async fn accounts_can_be_created_and_found() {
    let state = fixture().await;
    assert!(!queries::email_exists(&state, "linus@example.com").await.unwrap());

    let user = NewUser {
        name: "linus".to_string(),
        password_hash: "$2b$10$linushash".to_string(),
        email: "linus@example.com".to_string(),
    };
    let user_id = mutations::create_user(&state, &user)
        .await
        .unwrap()
        .last_insert_id
        .unwrap();

    assert!(queries::email_exists(&state, "linus@example.com").await.unwrap());
    assert!(queries::user_name_exists(&state, "linus").await.unwrap());

    let credentials = queries::authenticate(&state, "linus@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(credentials.user_id, user_id);
    assert_eq!(credentials.password, "$2b$10$linushash");

    let profile = queries::user_profile(&state, user_id).await.unwrap().unwrap();
    assert_eq!(profile.name, "linus");
    assert_eq!(queries::user_profile(&state, 99).await.unwrap(), None);

    let guest = NewGuest {
        email: "guest@example.com".to_string(),
        name: "guest".to_string(),
    };
    let outcome = mutations::insert_guest(&state, &guest).await.unwrap();
    assert_eq!(outcome.rows_affected, 1);
}

#[tokio::test]
async fn only_active_rewards_can_be_spent() {
    let state = fixture().await;
    assert_eq!(queries::available_rewards(&state, 1).await.unwrap(), 150);
    assert_eq!(queries::available_rewards(&state, 2).await.unwrap(), 0);

    mutations::use_rewards_on_booking(&state, 1, 20, -100).await.unwrap();
    assert_eq!(queries::available_rewards(&state, 1).await.unwrap(), 50);

    mutations::gain_rewards_from_booking(&state, 1, 20, date("2019-01-15"), 30)
        .await
        .unwrap();
    assert_eq!(queries::available_rewards(&state, 1).await.unwrap(), 80);

    assert_eq!(
        mutations::remove_transaction_rewards(&state, 20).await.unwrap(),
        2
    );
    assert_eq!(queries::available_rewards(&state, 1).await.unwrap(), 150);
}

#[tokio::test]
async fn reward_records_carry_their_reason() {
    let state = fixture().await;
    let records = queries::reward_records(&state, 1).await.unwrap();
    assert_eq!(
        records
            .iter()
            .map(|record| (record.change, record.reason.as_str()))
            .collect::<Vec<_>>(),
        vec![
            (200, "Earned from booking"),
            (-50, "Used on booking"),
            (500, "Earned from booking"),
        ]
    );
}
