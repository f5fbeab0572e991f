mod common;

use chrono::NaiveDate;
use common::*;
use model::fix::{Fix, Metadata};
use tracking::{
    client::Client,
    config::TrackingConfig,
    database::{memory::MemoryDatabase, Database, LocationRepo},
    filter::Decision,
    server::Server,
    RequestError,
};

fn setup() -> (MemoryDatabase, Client<MemoryDatabase>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let database = MemoryDatabase::new();
    let server = Server::new(database.clone(), TrackingConfig::default());
    (database, server.client("test"))
}

fn fix_from(topic: &str, latitude: f64, timestamp: i64) -> Fix {
    Fix {
        metadata: Metadata {
            topic: Some(topic.to_owned()),
            ..Default::default()
        },
        ..fix(latitude, START_LON, 5.0, timestamp)
    }
}

async fn stored(database: &MemoryDatabase) -> i64 {
    database.auto().count_locations().await.unwrap()
}

#[tokio::test]
async fn accepted_fixes_are_stored_smoothed() {
    let (database, client) = setup();

    let first = client.ingest(fix(START_LAT, START_LON, 5.0, EVENING)).await.unwrap();
    let second = client.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 10)).await.unwrap();
    assert_eq!(first.decision, Decision::Buffering);
    assert_eq!(second.decision, Decision::Buffering);
    assert!(second.location.is_none());
    assert_eq!(stored(&database).await, 0);

    let third = client.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 20)).await.unwrap();
    assert_eq!(third.decision, Decision::Accepted);
    let location = third.location.unwrap().content;
    assert_eq!(location.latitude, START_LAT);
    assert_eq!(location.longitude, START_LON);
    assert_eq!(location.timestamp, EVENING + 20);
    assert_eq!(location.readable_time.to_string(), "2026-01-01 19:36:15");
    assert_eq!(stored(&database).await, 1);
}

#[tokio::test]
async fn rejected_fixes_are_not_stored() {
    let (database, client) = setup();

    let result = client.ingest(fix(START_LAT, START_LON, 75.0, EVENING)).await.unwrap();
    assert_eq!(result.decision, Decision::RejectedAccuracy);
    let result = client.ingest(fix(f64::NAN, START_LON, 5.0, EVENING)).await.unwrap();
    assert_eq!(result.decision, Decision::RejectedBadInput);
    assert_eq!(stored(&database).await, 0);
}

#[tokio::test]
async fn devices_are_filtered_independently() {
    let (database, client) = setup();

    // two fixes each; a shared window would already be full
    for timestamp in [EVENING, EVENING + 10] {
        for topic in ["owntracks/a/phone", "owntracks/b/phone"] {
            let result = client.ingest(fix_from(topic, START_LAT, timestamp)).await.unwrap();
            assert_eq!(result.decision, Decision::Buffering, "{}", topic);
        }
    }
    assert_eq!(stored(&database).await, 0);

    let result = client
        .ingest(fix_from("owntracks/a/phone", START_LAT, EVENING + 20))
        .await
        .unwrap();
    assert_eq!(result.decision, Decision::Accepted);
    assert_eq!(stored(&database).await, 1);
}

#[tokio::test]
async fn clients_of_one_server_share_sessions() {
    let database = MemoryDatabase::new();
    let server = Server::new(database.clone(), TrackingConfig::default());
    let (a, b) = (server.client("a"), server.client("b"));

    a.ingest(fix(START_LAT, START_LON, 5.0, EVENING)).await.unwrap();
    b.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 10)).await.unwrap();
    let result = a.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 20)).await.unwrap();
    assert_eq!(result.decision, Decision::Accepted);
}

#[tokio::test]
async fn least_recently_seen_device_is_forgotten_beyond_the_limit() {
    let config = TrackingConfig {
        max_sessions: 2,
        ..TrackingConfig::default()
    };
    let client = Server::new(MemoryDatabase::new(), config).client("test");

    for timestamp in [EVENING, EVENING + 10] {
        let result = client.ingest(fix_from("owntracks/a/phone", START_LAT, timestamp)).await.unwrap();
        assert_eq!(result.decision, Decision::Buffering);
    }
    client.ingest(fix_from("owntracks/b/phone", START_LAT, EVENING)).await.unwrap();
    client.ingest(fix_from("owntracks/c/phone", START_LAT, EVENING)).await.unwrap();

    // `a` was evicted, so its window starts over
    let result = client
        .ingest(fix_from("owntracks/a/phone", START_LAT, EVENING + 20))
        .await
        .unwrap();
    assert_eq!(result.decision, Decision::Buffering);
}

#[tokio::test]
async fn storage_failure_is_reported() {
    let (database, client) = setup();
    database.reject_writes(true);

    client.ingest(fix(START_LAT, START_LON, 5.0, EVENING)).await.unwrap();
    client.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 10)).await.unwrap();
    let result = client.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 20)).await;
    assert!(matches!(result, Err(RequestError::Storage(_))));
    assert_eq!(stored(&database).await, 0);
}

#[tokio::test]
async fn resent_fix_is_stored_after_storage_recovers() {
    let (database, client) = setup();

    client.ingest(fix(START_LAT, START_LON, 5.0, EVENING)).await.unwrap();
    client.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 10)).await.unwrap();
    database.reject_writes(true);
    let result = client.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 20)).await;
    assert!(matches!(result, Err(RequestError::Storage(_))));

    database.reject_writes(false);
    let result = client.ingest(fix(START_LAT, START_LON, 5.0, EVENING + 20)).await.unwrap();
    assert_eq!(result.decision, Decision::Accepted);
    assert_eq!(result.location.unwrap().content.timestamp, EVENING + 20);
    assert_eq!(stored(&database).await, 1);

    // now that the point is stored, jitter around it is dropped again
    let result = client.ingest(fix(north(1.0), START_LON, 5.0, EVENING + 30)).await.unwrap();
    assert_eq!(result.decision, Decision::RejectedTooClose);
    assert_eq!(stored(&database).await, 1);
}

#[tokio::test]
async fn days_follow_the_local_calendar() {
    let (database, client) = setup();
    let mut auto = database.auto();
    // 2025-12-31 23:30 UTC is 00:30 on January 1st in Amsterdam
    let just_after_midnight = 1_767_223_800;
    // 2026-01-01 23:30 UTC is already January 2nd
    let next_day = 1_767_310_200;
    for timestamp in [just_after_midnight, EVENING, EVENING + 60, next_day] {
        auto.insert_location(location(START_LAT, START_LON, timestamp))
            .await
            .unwrap();
    }

    let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let (from, to) = client.day_range(new_year).timestamps();
    assert_eq!((from, to), (1_767_222_000, 1_767_308_400));

    let locations = client.get_locations_on_day(new_year).await.unwrap();
    let timestamps = locations
        .iter()
        .map(|row| row.content.timestamp)
        .collect::<Vec<_>>();
    assert_eq!(timestamps, vec![just_after_midnight, EVENING, EVENING + 60]);

    let summary = client.get_trips_on_day(new_year).await.unwrap();
    assert_eq!(summary.point_count, 3);
    assert_eq!(summary.trips.len(), 2);
    assert_eq!(summary.trips[1].summary.label, "Trip 2: 19:35:55 to 19:36:55");

    let summary = client
        .get_trips_on_day(new_year.succ_opt().unwrap())
        .await
        .unwrap();
    assert_eq!(summary.point_count, 1);
}

#[tokio::test]
async fn day_without_locations_is_empty() {
    let (_, client) = setup();
    let summary = client
        .get_trips_on_day(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        .await
        .unwrap();
    assert!(summary.trips.is_empty());
    assert_eq!(summary.total_distance_km, 0.0);
}

#[tokio::test]
async fn summer_days_use_daylight_saving_time() {
    let (_, client) = setup();
    // CEST is UTC+2: 2026-07-01 starts at 2026-06-30 22:00 UTC
    let (from, to) = client
        .day_range(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap())
        .timestamps();
    assert_eq!(from, 1_782_856_800);
    assert_eq!(to - from, 86_400);
}
