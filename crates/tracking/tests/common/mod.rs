#![allow(dead_code)]

use model::{fix::Fix, location::Location};
use utility::geo::metres_to_latitude_degrees;

pub const START_LAT: f64 = 52.1885381;
pub const START_LON: f64 = 5.3213312;

/// 2026-01-01 19:35:55 in Amsterdam.
pub const EVENING: i64 = 1_767_292_555;

pub fn fix(latitude: f64, longitude: f64, accuracy: f64, timestamp: i64) -> Fix {
    Fix::new(latitude, longitude, accuracy, timestamp)
}

/// Latitude `metres` north of `START_LAT`.
pub fn north(metres: f64) -> f64 {
    START_LAT + metres_to_latitude_degrees(metres)
}

pub fn location(latitude: f64, longitude: f64, timestamp: i64) -> Location {
    Location::from_fix(
        fix(latitude, longitude, 5.0, timestamp),
        latitude,
        longitude,
        &chrono_tz::Europe::Amsterdam,
    )
}

pub fn locations_at(timestamps: &[i64]) -> Vec<Location> {
    timestamps
        .iter()
        .map(|timestamp| location(START_LAT, START_LON, *timestamp))
        .collect()
}
