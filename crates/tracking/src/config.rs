use std::{env, error, fmt, str::FromStr};

use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Fixes with a worse horizontal accuracy (metres) are dropped.
    pub max_accuracy: f64,
    /// Fixes closer than this (metres) to the last saved point are jitter.
    pub min_distance: f64,
    /// Number of raw fixes averaged into one saved point.
    pub smooth_window: usize,
    /// Radius (metres) around the last saved point considered "not moving".
    pub stationary_radius: f64,
    /// Grace period (seconds) after which fixes inside the stationary radius
    /// are suppressed.
    pub stationary_time: i64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_accuracy: 20.0,
            min_distance: 3.0,
            smooth_window: 3,
            stationary_radius: 10.0,
            stationary_time: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TripConfig {
    /// A time gap (seconds) above this starts a new trip.
    pub gap_threshold: i64,
    /// Segments shorter than this (metres) do not count towards distance.
    pub noise_floor: f64,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            gap_threshold: 900,
            noise_floor: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingConfig {
    pub filter: FilterConfig,
    pub trips: TripConfig,
    /// Used for readable timestamps and calendar day boundaries.
    pub timezone: Tz,
    /// Upper bound on devices whose filter state is kept in memory. The
    /// least recently seen device loses its state first.
    pub max_sessions: usize,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            trips: TripConfig::default(),
            timezone: chrono_tz::Europe::Amsterdam,
            max_sessions: 1024,
        }
    }
}

impl TrackingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for
    /// absent keys.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            filter: FilterConfig {
                max_accuracy: parse_or(&lookup, "TIMELINE_MAX_ACCURACY", defaults.filter.max_accuracy)?,
                min_distance: parse_or(&lookup, "TIMELINE_MIN_DISTANCE", defaults.filter.min_distance)?,
                smooth_window: parse_or(&lookup, "TIMELINE_SMOOTH_WINDOW", defaults.filter.smooth_window)?,
                stationary_radius: parse_or(
                    &lookup,
                    "TIMELINE_STATIONARY_RADIUS",
                    defaults.filter.stationary_radius,
                )?,
                stationary_time: parse_or(
                    &lookup,
                    "TIMELINE_STATIONARY_TIME",
                    defaults.filter.stationary_time,
                )?,
            },
            trips: TripConfig {
                gap_threshold: parse_or(&lookup, "TIMELINE_GAP_THRESHOLD", defaults.trips.gap_threshold)?,
                noise_floor: parse_or(&lookup, "TIMELINE_NOISE_FLOOR", defaults.trips.noise_floor)?,
            },
            timezone: parse_or(&lookup, "TIMELINE_TIMEZONE", defaults.timezone)?,
            max_sessions: parse_or(&lookup, "TIMELINE_MAX_SESSIONS", defaults.max_sessions)?,
        };

        if config.filter.smooth_window == 0 {
            return Err(ConfigError::Invalid {
                key: "TIMELINE_SMOOTH_WINDOW".to_owned(),
                value: "0".to_owned(),
                reason: "the smoothing window needs at least one point".to_owned(),
            });
        }

        if config.max_sessions == 0 {
            return Err(ConfigError::Invalid {
                key: "TIMELINE_MAX_SESSIONS".to_owned(),
                value: "0".to_owned(),
                reason: "at least one device session is needed".to_owned(),
            });
        }

        Ok(config)
    }
}

fn parse_or<L, T>(lookup: &L, key: &str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|why: T::Err| ConfigError::Invalid {
                key: key.to_owned(),
                value,
                reason: why.to_string(),
            })
        }
        _ => Ok(default),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Invalid { key, value, reason } = self;
        write!(f, "invalid value `{}` for `{}`: {}", value, key, reason)
    }
}

impl error::Error for ConfigError {}
