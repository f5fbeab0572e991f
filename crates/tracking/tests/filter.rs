mod common;

use assert_float_eq::*;
use common::*;
use tracking::{
    config::FilterConfig,
    filter::{process, Decision, FilterState, PointFilter, SavedPoint},
};

/// A filter that already saved a point at `START_LAT, START_LON` at `EVENING`.
fn warmed_up() -> PointFilter {
    let mut filter = PointFilter::new(FilterConfig::default());
    for offset in [0, 10, 20] {
        let (_, point) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING - 20 + offset));
        if let Some(point) = point {
            filter.confirm_saved(point);
        }
    }
    assert_eq!(
        filter.state().last_saved,
        Some(SavedPoint {
            latitude: START_LAT,
            longitude: START_LON,
            timestamp: EVENING,
        })
    );
    filter
}

#[test]
fn inaccurate_fixes_are_rejected_everywhere() {
    let config = FilterConfig::default();
    for (lat, lon) in [(START_LAT, START_LON), (-33.79, 151.14), (0.0, 0.0), (89.9, -179.9)] {
        let (decision, point, state) = process(&fix(lat, lon, 20.5, EVENING), FilterState::default(), &config);
        assert_eq!(decision, Decision::RejectedAccuracy);
        assert!(point.is_none());
        assert_eq!(state, FilterState::default());
    }

    let mut filter = warmed_up();
    let before = filter.state().clone();
    let (decision, _) = filter.process(&fix(north(500.0), START_LON, 250.0, EVENING + 60));
    assert_eq!(decision, Decision::RejectedAccuracy);
    assert_eq!(filter.state(), &before);
}

#[test]
fn accuracy_at_the_threshold_passes() {
    let (decision, _, _) = process(
        &fix(START_LAT, START_LON, 20.0, EVENING),
        FilterState::default(),
        &FilterConfig::default(),
    );
    assert_eq!(decision, Decision::Buffering);
}

#[test]
fn invalid_coordinates_are_bad_input() {
    let config = FilterConfig::default();
    for bad in [
        fix(f64::NAN, START_LON, 5.0, EVENING),
        fix(START_LAT, 181.0, 5.0, EVENING),
        fix(START_LAT, START_LON, f64::INFINITY, EVENING),
    ] {
        let (decision, point, state) = process(&bad, FilterState::default(), &config);
        assert_eq!(decision, Decision::RejectedBadInput);
        assert!(point.is_none());
        assert_eq!(state, FilterState::default());
    }
}

#[test]
fn identical_fixes_are_smoothed_to_themselves() {
    let mut filter = PointFilter::new(FilterConfig::default());
    let (first, _) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING));
    let (second, _) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING + 10));
    let (third, point) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING + 20));

    assert_eq!(first, Decision::Buffering);
    assert_eq!(second, Decision::Buffering);
    assert_eq!(third, Decision::Accepted);
    let point = point.unwrap();
    assert_eq!(point.latitude, START_LAT);
    assert_eq!(point.longitude, START_LON);
    assert_eq!(point.timestamp, EVENING + 20);

    filter.confirm_saved(point);
    assert_eq!(filter.state().last_saved.unwrap().timestamp, EVENING + 20);
}

#[test]
fn unconfirmed_point_does_not_become_the_reference() {
    let mut filter = PointFilter::new(FilterConfig::default());
    filter.process(&fix(START_LAT, START_LON, 5.0, EVENING));
    filter.process(&fix(START_LAT, START_LON, 5.0, EVENING + 10));
    let (decision, _) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING + 20));
    assert_eq!(decision, Decision::Accepted);
    assert_eq!(filter.state().last_saved, None);

    // storing failed, so the same fix sent again is accepted once more
    let (decision, point) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING + 20));
    assert_eq!(decision, Decision::Accepted);
    assert_eq!(point.unwrap().latitude, START_LAT);
}

#[test]
fn jitter_next_to_the_last_saved_point_is_too_close() {
    let mut filter = warmed_up();
    let before = filter.state().clone();

    let (decision, point) = filter.process(&fix(north(1.0), START_LON, 5.0, EVENING + 10));
    assert_eq!(decision, Decision::RejectedTooClose);
    assert!(point.is_none());
    assert_eq!(filter.state(), &before);
}

#[test]
fn stationary_check_runs_before_too_close_check() {
    let mut filter = warmed_up();
    // both within min_distance and stationary for longer than the grace period
    let (decision, _) = filter.process(&fix(north(1.0), START_LON, 5.0, EVENING + 301));
    assert_eq!(decision, Decision::RejectedStationary);
}

#[test]
fn stationary_suppression_beyond_min_distance() {
    let mut filter = warmed_up();
    let before = filter.state().clone();

    // far enough to escape "too close", still inside the stationary radius
    let (decision, _) = filter.process(&fix(north(6.0), START_LON, 5.0, EVENING + 400));
    assert_eq!(decision, Decision::RejectedStationary);
    assert_eq!(filter.state(), &before);

    // the same spot within the grace period is a regular fix
    let (decision, point) = filter.process(&fix(north(6.0), START_LON, 5.0, EVENING + 100));
    assert_eq!(decision, Decision::Accepted);
    assert!(point.is_some());
}

#[test]
fn too_close_dominates_when_stationary_radius_is_smaller() {
    let config = FilterConfig {
        stationary_radius: 2.0,
        min_distance: 3.0,
        ..FilterConfig::default()
    };
    let state = FilterState {
        last_saved: Some(SavedPoint {
            latitude: START_LAT,
            longitude: START_LON,
            timestamp: EVENING,
        }),
        ..FilterState::default()
    };
    let (decision, _, _) = process(&fix(north(2.5), START_LON, 5.0, EVENING + 1000), state, &config);
    assert_eq!(decision, Decision::RejectedTooClose);
}

#[test]
fn window_keeps_sliding_after_acceptance() {
    let mut filter = PointFilter::new(FilterConfig::default());
    filter.process(&fix(north(0.0), START_LON, 5.0, EVENING));
    filter.process(&fix(north(100.0), START_LON, 5.0, EVENING + 10));
    let (decision, point) = filter.process(&fix(north(200.0), START_LON, 5.0, EVENING + 20));
    assert_eq!(decision, Decision::Accepted);
    assert_float_absolute_eq!(point.unwrap().latitude, north(100.0), 1e-9);

    // the window is full, so the very next fix is accepted again
    let (decision, point) = filter.process(&fix(north(300.0), START_LON, 5.0, EVENING + 30));
    assert_eq!(decision, Decision::Accepted);
    assert_float_absolute_eq!(point.unwrap().latitude, north(200.0), 1e-9);
    assert_eq!(filter.state().recent_points.len(), 3);
}

#[test]
fn window_of_one_accepts_every_passing_fix() {
    let mut filter = PointFilter::new(FilterConfig {
        smooth_window: 1,
        ..FilterConfig::default()
    });
    let (decision, point) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING));
    assert_eq!(decision, Decision::Accepted);
    assert_eq!(point.unwrap().latitude, START_LAT);

    let (decision, point) = filter.process(&fix(north(50.0), START_LON, 5.0, EVENING + 10));
    assert_eq!(decision, Decision::Accepted);
    assert_eq!(point.unwrap().latitude, north(50.0));
}

#[test]
fn rejected_fixes_do_not_fill_the_window() {
    let mut filter = PointFilter::new(FilterConfig::default());
    filter.process(&fix(START_LAT, START_LON, 5.0, EVENING));
    filter.process(&fix(START_LAT, START_LON, 80.0, EVENING + 5));
    let (decision, _) = filter.process(&fix(START_LAT, START_LON, 5.0, EVENING + 10));
    assert_eq!(decision, Decision::Buffering);
    assert_eq!(filter.state().recent_points.len(), 2);
}
