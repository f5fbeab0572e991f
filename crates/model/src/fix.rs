use std::{error, fmt};

use chrono::DateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::device::Device;

/// Raw metadata a tracker sends along with a fix. None of it influences
/// filtering, it is stored as received.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub ssid: Option<String>,
    /// Battery level in percent.
    pub battery: Option<i32>,
    /// 0 unknown, 1 unplugged, 2 charging, 3 full.
    pub battery_status: Option<i32>,
    /// Course over ground in degrees.
    pub course: Option<f64>,
    /// `w` wifi, `o` offline, `m` mobile data.
    pub connectivity: Option<String>,
    pub created_at: Option<i64>,
    pub monitoring_mode: Option<i32>,
    pub source: Option<String>,
    pub tracker_id: Option<String>,
    pub topic: Option<String>,
    pub vertical_accuracy: Option<f64>,
}

impl Metadata {
    pub fn device_id(&self) -> Id<Device> {
        [&self.topic, &self.tracker_id]
            .into_iter()
            .flatten()
            .find(|id| !id.trim().is_empty())
            .map(|id| Id::new(id.clone()))
            .unwrap_or_else(Device::default_id)
    }
}

/// One GPS observation as reported by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in metres.
    pub accuracy: f64,
    /// Unix seconds.
    pub timestamp: i64,
    /// Metres per second.
    pub velocity: Option<f64>,
    pub altitude: Option<f64>,
    pub metadata: Metadata,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            timestamp,
            velocity: None,
            altitude: None,
            metadata: Metadata::default(),
        }
    }

    /// The stream this fix belongs to: its topic, then its tracker id.
    pub fn device_id(&self) -> Id<Device> {
        self.metadata.device_id()
    }

    pub fn validate(&self) -> Result<(), BadInput> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(BadInput::OutOfRange {
                field: "lat",
                value: self.latitude.to_string(),
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(BadInput::OutOfRange {
                field: "lon",
                value: self.longitude.to_string(),
            });
        }
        if !self.accuracy.is_finite() || self.accuracy < 0.0 {
            return Err(BadInput::OutOfRange {
                field: "acc",
                value: self.accuracy.to_string(),
            });
        }
        if DateTime::from_timestamp(self.timestamp, 0).is_none() {
            return Err(BadInput::OutOfRange {
                field: "tst",
                value: self.timestamp.to_string(),
            });
        }
        Ok(())
    }
}

/// Why an inbound payload could not be turned into a `Fix`.
#[derive(Debug, Clone, PartialEq)]
pub enum BadInput {
    MissingField(&'static str),
    OutOfRange { field: &'static str, value: String },
}

impl fmt::Display for BadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing field `{}`", field),
            Self::OutOfRange { field, value } => {
                write!(f, "field `{}` out of range: {}", field, value)
            }
        }
    }
}

impl error::Error for BadInput {}
