use chrono::NaiveDate;
use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::Serialize;
use utility::serde::{day, readable_time};

use crate::{location::Location, ExampleData};

/// A maximal run of locations without a time gap above the configured
/// threshold. Trips are derived on every read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub points: Vec<Location>,
}

impl Trip {
    pub fn first(&self) -> Option<&Location> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Location> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for Coordinate {
    fn from(location: &Location) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    /// 1-based position of the trip within its day.
    pub number: usize,
    /// e.g. `Trip 2: 08:15:00 to 08:47:12`
    pub label: String,
    #[serde(with = "readable_time")]
    #[schemars(schema_with = "readable_time::schema")]
    pub start_time: NaiveDateTime,
    #[serde(with = "readable_time")]
    #[schemars(schema_with = "readable_time::schema")]
    pub end_time: NaiveDateTime,
    pub point_count: usize,
    /// Distance travelled, segments below the noise floor excluded.
    pub distance_m: f64,
    /// `distance_m` in kilometres, rounded to two decimals.
    pub distance_km: f64,
    pub start: Coordinate,
    pub end: Coordinate,
}

/// A trip ready for display: its summary plus the path to draw.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    #[serde(flatten)]
    pub summary: TripSummary,
    pub path: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    #[serde(with = "day")]
    #[schemars(with = "String")]
    pub day: NaiveDate,
    #[serde(with = "day")]
    #[schemars(with = "String")]
    pub previous_day: NaiveDate,
    #[serde(with = "day")]
    #[schemars(with = "String")]
    pub next_day: NaiveDate,
    pub point_count: usize,
    /// Sum of all trip distances, rounded to two decimals.
    pub total_distance_km: f64,
    pub trips: Vec<TripView>,
}

impl ExampleData for DaySummary {
    fn example_data() -> Self {
        let location = Location::example_data();
        let day = location.readable_time.date();
        let summary = TripSummary {
            number: 1,
            label: "Trip 1: 19:35:55 to 19:35:55".to_owned(),
            start_time: location.readable_time,
            end_time: location.readable_time,
            point_count: 1,
            distance_m: 0.0,
            distance_km: 0.0,
            start: Coordinate::from(&location),
            end: Coordinate::from(&location),
        };
        Self {
            day,
            previous_day: day.pred_opt().unwrap_or(day),
            next_day: day.succ_opt().unwrap_or(day),
            point_count: 1,
            total_distance_km: 0.0,
            trips: vec![TripView {
                path: vec![Coordinate::from(&location)],
                summary,
            }],
        }
    }
}
