use chrono::NaiveDateTime;
use model::{fix::Metadata, location::Location};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::DatabaseRow;

/// Table: `locations`
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
    pub readable_time: NaiveDateTime,
    pub accuracy: f64,
    pub velocity: Option<f64>,
    pub altitude: Option<f64>,
    pub ssid: Option<String>,
    pub battery: Option<i32>,
    pub battery_status: Option<i32>,
    pub course: Option<f64>,
    pub connectivity: Option<String>,
    pub created_at: Option<i64>,
    pub monitoring_mode: Option<i32>,
    pub source: Option<String>,
    pub tracker_id: Option<String>,
    pub topic: Option<String>,
    pub vertical_accuracy: Option<f64>,
}

impl DatabaseRow for LocationRow {
    type Model = Location;

    fn get_id(&self) -> Id<Location> {
        Id::new(self.id)
    }

    fn to_model(self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp,
            readable_time: self.readable_time,
            accuracy: self.accuracy,
            velocity: self.velocity,
            altitude: self.altitude,
            metadata: Metadata {
                ssid: self.ssid,
                battery: self.battery,
                battery_status: self.battery_status,
                course: self.course,
                connectivity: self.connectivity,
                created_at: self.created_at,
                monitoring_mode: self.monitoring_mode,
                source: self.source,
                tracker_id: self.tracker_id,
                topic: self.topic,
                vertical_accuracy: self.vertical_accuracy,
            },
        }
    }
}
