use model::{location::Location, trip::Trip};

/// Splits locations ordered by ascending timestamp into trips. A new trip
/// starts wherever two consecutive points are more than `gap_threshold`
/// seconds apart. Every location ends up in exactly one trip and the order is
/// preserved.
pub fn segment(points: Vec<Location>, gap_threshold: i64) -> Vec<Trip> {
    let mut trips = Vec::new();
    let mut current: Vec<Location> = Vec::new();

    for point in points {
        if let Some(previous) = current.last() {
            if point.timestamp - previous.timestamp > gap_threshold {
                trips.push(Trip {
                    points: std::mem::take(&mut current),
                });
            }
        }
        current.push(point);
    }

    if !current.is_empty() {
        trips.push(Trip { points: current });
    }
    trips
}
