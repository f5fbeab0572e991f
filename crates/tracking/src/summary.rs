use chrono::NaiveDate;
use itertools::Itertools;
use model::{
    location::Location,
    trip::{Coordinate, DaySummary, Trip, TripSummary, TripView},
};
use utility::geo::haversine_distance;

use crate::config::TripConfig;
use crate::segment::segment;

/// Sum of the distances between consecutive points, leaving out every segment
/// shorter than `noise_floor` metres.
pub fn distance(points: &[Location], noise_floor: f64) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude))
        .filter(|segment| *segment >= noise_floor)
        .sum()
}

pub fn round_km(metres: f64) -> f64 {
    (metres / 10.0).round() / 100.0
}

/// Summarises a trip. `number` is its 1-based position within the day and is
/// only used for the label. Returns `None` for an empty trip.
pub fn summarize(trip: &Trip, number: usize, noise_floor: f64) -> Option<TripSummary> {
    let first = trip.first()?;
    let last = trip.last()?;
    let distance_m = distance(&trip.points, noise_floor);

    Some(TripSummary {
        number,
        label: format!(
            "Trip {}: {} to {}",
            number,
            first.readable_time.format("%H:%M:%S"),
            last.readable_time.format("%H:%M:%S")
        ),
        start_time: first.readable_time,
        end_time: last.readable_time,
        point_count: trip.len(),
        distance_m,
        distance_km: round_km(distance_m),
        start: Coordinate::from(first),
        end: Coordinate::from(last),
    })
}

/// Segments the locations of one day into trips and summarises each of them.
/// Every device is segmented on its own, so two trackers reporting at the same
/// time never end up in one trip. Trips are numbered by start time.
pub fn summarize_day(day: NaiveDate, locations: Vec<Location>, config: &TripConfig) -> DaySummary {
    let point_count = locations.len();
    let trips = locations
        .into_iter()
        .into_group_map_by(|location| location.device_id().raw())
        .into_iter()
        .flat_map(|(device, points)| {
            segment(points, config.gap_threshold)
                .into_iter()
                .map(move |trip| (device.clone(), trip))
        })
        .filter_map(|(device, trip)| Some((trip.first()?.timestamp, device, trip)))
        .sorted_by(|(a_start, a_device, _), (b_start, b_device, _)| {
            a_start.cmp(b_start).then_with(|| a_device.cmp(b_device))
        })
        .enumerate()
        .filter_map(|(index, (_, _, trip))| {
            summarize(&trip, index + 1, config.noise_floor).map(|summary| TripView {
                summary,
                path: trip.points.iter().map(Coordinate::from).collect(),
            })
        })
        .collect::<Vec<_>>();
    let total_distance_m = trips.iter().map(|trip| trip.summary.distance_m).sum::<f64>();

    DaySummary {
        day,
        previous_day: day.pred_opt().unwrap_or(day),
        next_day: day.succ_opt().unwrap_or(day),
        point_count,
        total_distance_km: round_km(total_distance_m),
        trips,
    }
}
