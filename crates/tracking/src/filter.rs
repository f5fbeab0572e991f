use std::{collections::VecDeque, fmt};

use model::fix::Fix;
use utility::geo::haversine_distance;

use crate::config::FilterConfig;

/// What the filter did with a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    RejectedBadInput,
    RejectedAccuracy,
    RejectedStationary,
    RejectedTooClose,
    /// The fix entered the smoothing window, which is not full yet.
    Buffering,
    /// The window is full; a smoothed point must be persisted and then
    /// confirmed with [`FilterState::confirm_saved`].
    Accepted,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RejectedBadInput => "rejected (bad input)",
            Self::RejectedAccuracy => "rejected (accuracy)",
            Self::RejectedStationary => "rejected (stationary)",
            Self::RejectedTooClose => "rejected (too close)",
            Self::Buffering => "buffering",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
}

/// The smoothed coordinates to store for an accepted fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Time of the fix that completed the window.
    pub timestamp: i64,
}

impl From<SmoothedPoint> for SavedPoint {
    fn from(point: SmoothedPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
            timestamp: point.timestamp,
        }
    }
}

/// Per device history the filter needs. Lives only in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// The most recent raw coordinates that passed all gates, oldest first.
    pub recent_points: VecDeque<(f64, f64)>,
    /// Only moves once a smoothed point has been stored.
    pub last_saved: Option<SavedPoint>,
}

impl FilterState {
    /// Records that `point` was persisted.
    pub fn confirm_saved(&mut self, point: SmoothedPoint) {
        self.last_saved = Some(point.into());
    }
}

/// Runs one fix through the filter gates, in order:
///
/// 1. invalid coordinates or accuracy
/// 2. accuracy above `max_accuracy`
/// 3. within `stationary_radius` of the last saved point for longer than
///    `stationary_time`
/// 4. within `min_distance` of the last saved point
/// 5. smoothing window not yet full
///
/// A fix that passes all of them is accepted and the mean of the window is
/// returned. Rejected fixes leave the state untouched. The window slides
/// continuously and is never cleared. `last_saved` is left alone here; the
/// caller confirms the point once it has been stored.
pub fn process(
    fix: &Fix,
    mut state: FilterState,
    config: &FilterConfig,
) -> (Decision, Option<SmoothedPoint>, FilterState) {
    if let Err(why) = fix.validate() {
        log::debug!("fix rejected: {}", why);
        return (Decision::RejectedBadInput, None, state);
    }

    if fix.accuracy > config.max_accuracy {
        log::debug!("fix rejected: accuracy {}m", fix.accuracy);
        return (Decision::RejectedAccuracy, None, state);
    }

    if let Some(last_saved) = state.last_saved {
        let distance = haversine_distance(
            last_saved.latitude,
            last_saved.longitude,
            fix.latitude,
            fix.longitude,
        );
        let elapsed = fix.timestamp - last_saved.timestamp;

        if distance < config.stationary_radius && elapsed > config.stationary_time {
            log::debug!(
                "fix rejected: stationary for {}s within {:.1}m",
                elapsed,
                distance
            );
            return (Decision::RejectedStationary, None, state);
        }

        if distance < config.min_distance {
            log::debug!("fix rejected: distance {:.1}m", distance);
            return (Decision::RejectedTooClose, None, state);
        }
    }

    state.recent_points.push_back((fix.latitude, fix.longitude));
    while state.recent_points.len() > config.smooth_window {
        state.recent_points.pop_front();
    }
    if state.recent_points.len() < config.smooth_window {
        return (Decision::Buffering, None, state);
    }

    let smoothed = mean(&state.recent_points, fix.timestamp);
    (Decision::Accepted, Some(smoothed), state)
}

/// Running mean; averaging identical coordinates yields them exactly.
fn mean(points: &VecDeque<(f64, f64)>, timestamp: i64) -> SmoothedPoint {
    let mut latitude = 0.0;
    let mut longitude = 0.0;
    for (n, (lat, lon)) in points.iter().enumerate() {
        let k = (n + 1) as f64;
        latitude += (lat - latitude) / k;
        longitude += (lon - longitude) / k;
    }
    SmoothedPoint {
        latitude,
        longitude,
        timestamp,
    }
}

/// A filter bundled with its state, for callers that keep one per device.
#[derive(Debug, Clone)]
pub struct PointFilter {
    config: FilterConfig,
    state: FilterState,
}

impl PointFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            state: FilterState::default(),
        }
    }

    pub fn process(&mut self, fix: &Fix) -> (Decision, Option<SmoothedPoint>) {
        let state = std::mem::take(&mut self.state);
        let (decision, point, state) = process(fix, state, &self.config);
        self.state = state;
        (decision, point)
    }

    pub fn confirm_saved(&mut self, point: SmoothedPoint) {
        self.state.confirm_saved(point);
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }
}
