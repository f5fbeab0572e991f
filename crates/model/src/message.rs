use serde::{Deserialize, Serialize};

use crate::fix::{BadInput, Fix, Metadata};

pub const LOCATION_MESSAGE_TYPE: &str = "location";

/// A message as published by an OwnTracks compatible tracker. Every field is
/// optional here; `into_fix` decides whether the message is usable. Unknown
/// fields are ignored.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationMessage {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub acc: Option<f64>,
    pub tst: Option<i64>,
    pub vel: Option<f64>,
    pub alt: Option<f64>,
    #[serde(rename = "SSID")]
    pub ssid: Option<String>,
    pub batt: Option<i32>,
    pub bs: Option<i32>,
    pub cog: Option<f64>,
    pub conn: Option<String>,
    pub created_at: Option<i64>,
    pub m: Option<i32>,
    pub source: Option<String>,
    pub tid: Option<String>,
    pub topic: Option<String>,
    pub vac: Option<f64>,
}

impl LocationMessage {
    /// Trackers also publish waypoints, transitions, status reports and so on.
    /// Only `location` messages carry fixes.
    pub fn is_location(&self) -> bool {
        self.kind.as_deref() == Some(LOCATION_MESSAGE_TYPE)
    }

    pub fn into_fix(self) -> Result<Fix, BadInput> {
        let latitude = self.lat.ok_or(BadInput::MissingField("lat"))?;
        let longitude = self.lon.ok_or(BadInput::MissingField("lon"))?;
        let accuracy = self.acc.ok_or(BadInput::MissingField("acc"))?;
        let timestamp = self.tst.ok_or(BadInput::MissingField("tst"))?;

        let fix = Fix {
            latitude,
            longitude,
            accuracy,
            timestamp,
            velocity: self.vel,
            altitude: self.alt,
            metadata: Metadata {
                ssid: self.ssid,
                battery: self.batt,
                battery_status: self.bs,
                course: self.cog,
                connectivity: self.conn,
                created_at: self.created_at,
                monitoring_mode: self.m,
                source: self.source,
                tracker_id: self.tid,
                topic: self.topic,
                vertical_accuracy: self.vac,
            },
        };
        fix.validate()?;
        Ok(fix)
    }
}
