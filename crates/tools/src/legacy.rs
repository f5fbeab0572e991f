use chrono::NaiveDateTime;
use chrono_tz::Tz;
use model::{
    fix::Metadata,
    location::{local_time, Location},
};
use sqlx::prelude::FromRow;
use utility::serde::READABLE_TIME_FORMAT;

/// All columns of the `locations` table of the SQLite based predecessor.
pub const SELECT_LEGACY_LOCATIONS: &str = "
    SELECT
        readable_time, SSID, acc, alt, batt, bs, cog, conn,
        created_at, lat, lon, m, source, tid, topic, vac, vel, timestamp
    FROM
        locations
    ORDER BY
        timestamp ASC;
";

/// A row of the legacy SQLite table. SQLite does not enforce column types, so
/// everything is optional.
#[derive(Debug, Clone, Default, FromRow)]
pub struct LegacyRow {
    pub readable_time: Option<String>,
    #[sqlx(rename = "SSID")]
    pub ssid: Option<String>,
    pub acc: Option<f64>,
    pub alt: Option<f64>,
    pub batt: Option<i32>,
    pub bs: Option<i32>,
    pub cog: Option<f64>,
    pub conn: Option<String>,
    pub created_at: Option<i64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub m: Option<i32>,
    pub source: Option<String>,
    pub tid: Option<String>,
    pub topic: Option<String>,
    pub vac: Option<f64>,
    pub vel: Option<f64>,
    pub timestamp: Option<i64>,
}

impl LegacyRow {
    /// Returns `None` for rows without coordinates, accuracy or timestamp.
    /// An unreadable `readable_time` is recomputed from the timestamp.
    pub fn into_location(self, timezone: &Tz) -> Option<Location> {
        let timestamp = self.timestamp?;
        let readable_time = self
            .readable_time
            .as_deref()
            .and_then(|time| NaiveDateTime::parse_from_str(time.trim(), READABLE_TIME_FORMAT).ok())
            .unwrap_or_else(|| local_time(timestamp, timezone));

        Some(Location {
            latitude: self.lat?,
            longitude: self.lon?,
            timestamp,
            readable_time,
            accuracy: self.acc?,
            velocity: self.vel,
            altitude: self.alt,
            metadata: Metadata {
                ssid: self.ssid,
                battery: self.batt,
                battery_status: self.bs,
                course: self.cog,
                connectivity: self.conn,
                created_at: self.created_at,
                monitoring_mode: self.m,
                source: self.source,
                tracker_id: self.tid,
                topic: self.topic,
                vertical_accuracy: self.vac,
            },
        })
    }
}
