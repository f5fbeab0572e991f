use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use schemars::JsonSchema;
use serde::Serialize;
use utility::{
    id::{HasId, Id},
    serde::readable_time,
};

use crate::{
    device::Device,
    fix::{Fix, Metadata},
    ExampleData,
};

/// A persisted point of the timeline. Rows are append-only and always read
/// back ordered by `timestamp`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Unix seconds.
    pub timestamp: i64,
    /// `timestamp` in the configured local timezone.
    #[serde(with = "readable_time")]
    #[schemars(schema_with = "readable_time::schema")]
    pub readable_time: NaiveDateTime,
    pub accuracy: f64,
    pub velocity: Option<f64>,
    pub altitude: Option<f64>,
    pub metadata: Metadata,
}

impl HasId for Location {
    type IdType = i64;
}

impl Location {
    /// Stores `fix` at the given (smoothed) coordinates. Everything else is
    /// taken from the fix as is.
    pub fn from_fix(fix: Fix, latitude: f64, longitude: f64, timezone: &Tz) -> Self {
        Self {
            latitude,
            longitude,
            readable_time: local_time(fix.timestamp, timezone),
            timestamp: fix.timestamp,
            accuracy: fix.accuracy,
            velocity: fix.velocity,
            altitude: fix.altitude,
            metadata: fix.metadata,
        }
    }

    /// The device that reported this location, keyed like its fixes.
    pub fn device_id(&self) -> Id<Device> {
        self.metadata.device_id()
    }
}

/// Converts unix seconds to wall clock time in `timezone`. Timestamps outside
/// of chrono's range map to the epoch.
pub fn local_time(timestamp: i64, timezone: &Tz) -> NaiveDateTime {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(timezone).naive_local())
        .unwrap_or_default()
}

impl ExampleData for Location {
    fn example_data() -> Self {
        let fix = Fix {
            velocity: Some(2.0),
            altitude: Some(54.0),
            metadata: Metadata {
                ssid: Some("weiler12".to_owned()),
                battery: Some(79),
                tracker_id: Some("xm".to_owned()),
                topic: Some("owntracks/ajan/a14xm".to_owned()),
                ..Default::default()
            },
            ..Fix::new(52.1885381, 5.3213312, 5.0, 1_767_292_555)
        };
        Self::from_fix(fix, 52.1885381, 5.3213312, &chrono_tz::Europe::Amsterdam)
    }
}
