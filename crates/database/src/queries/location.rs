use model::{location::Location, WithId};
use sqlx::{Executor, PgConnection, Postgres};
use tracking::database::Result;
use utility::let_also::LetAlso;

use crate::data_model::{location::LocationRow, with_id, with_ids};

use super::convert_error;

const COLUMNS: [&str; 18] = [
    "latitude",
    "longitude",
    "timestamp",
    "readable_time",
    "accuracy",
    "velocity",
    "altitude",
    "ssid",
    "battery",
    "battery_status",
    "course",
    "connectivity",
    "created_at",
    "monitoring_mode",
    "source",
    "tracker_id",
    "topic",
    "vertical_accuracy",
];

// Repo

pub async fn insert<'c, E>(executor: E, location: Location) -> Result<WithId<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    let metadata = location.metadata;
    sqlx::query_as(
        "
        INSERT INTO locations(
            latitude, longitude, timestamp, readable_time, accuracy,
            velocity, altitude, ssid, battery, battery_status,
            course, connectivity, created_at, monitoring_mode, source,
            tracker_id, topic, vertical_accuracy
        )
        VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9,
            $10, $11, $12, $13, $14, $15, $16, $17, $18
        )
        RETURNING
            id, latitude, longitude, timestamp, readable_time, accuracy,
            velocity, altitude, ssid, battery, battery_status,
            course, connectivity, created_at, monitoring_mode, source,
            tracker_id, topic, vertical_accuracy;
        ",
    )
    .bind(location.latitude)
    .bind(location.longitude)
    .bind(location.timestamp)
    .bind(location.readable_time)
    .bind(location.accuracy)
    .bind(location.velocity)
    .bind(location.altitude)
    .bind(metadata.ssid)
    .bind(metadata.battery)
    .bind(metadata.battery_status)
    .bind(metadata.course)
    .bind(metadata.connectivity)
    .bind(metadata.created_at)
    .bind(metadata.monitoring_mode)
    .bind(metadata.source)
    .bind(metadata.tracker_id)
    .bind(metadata.topic)
    .bind(metadata.vertical_accuracy)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: LocationRow| with_id(row))
}

pub async fn insert_all(connection: &mut PgConnection, locations: &[Location]) -> Result<u64> {
    super::insert_all(connection, "locations", &COLUMNS, locations, |query, location| {
        let metadata = &location.metadata;
        query
            .bind(location.latitude)
            .bind(location.longitude)
            .bind(location.timestamp)
            .bind(location.readable_time)
            .bind(location.accuracy)
            .bind(location.velocity)
            .bind(location.altitude)
            .bind(metadata.ssid.clone())
            .bind(metadata.battery)
            .bind(metadata.battery_status)
            .bind(metadata.course)
            .bind(metadata.connectivity.clone())
            .bind(metadata.created_at)
            .bind(metadata.monitoring_mode)
            .bind(metadata.source.clone())
            .bind(metadata.tracker_id.clone())
            .bind(metadata.topic.clone())
            .bind(metadata.vertical_accuracy)
    })
    .await
    .map_err(convert_error)
}

/// Locations with `from <= timestamp < to`, oldest first.
pub async fn between<'c, E>(executor: E, from: i64, to: i64) -> Result<Vec<WithId<Location>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, latitude, longitude, timestamp, readable_time, accuracy,
            velocity, altitude, ssid, battery, battery_status,
            course, connectivity, created_at, monitoring_mode, source,
            tracker_id, topic, vertical_accuracy
        FROM
            locations
        WHERE
            timestamp >= $1 AND timestamp < $2
        ORDER BY
            timestamp ASC, id ASC;
        ",
    )
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<LocationRow>| Ok(with_ids(rows)))
}

pub async fn count<'c, E>(executor: E) -> Result<i64>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM locations;")
        .fetch_one(executor)
        .await
        .map_err(convert_error)
}
