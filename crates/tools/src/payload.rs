use model::message::{LocationMessage, LOCATION_MESSAGE_TYPE};

/// A location message shaped like the ones the OwnTracks app publishes.
pub fn test_message(
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    tracker_id: &str,
    timestamp: i64,
) -> LocationMessage {
    LocationMessage {
        kind: Some(LOCATION_MESSAGE_TYPE.to_owned()),
        lat: Some(latitude),
        lon: Some(longitude),
        acc: Some(accuracy),
        tst: Some(timestamp),
        vel: Some(2.0),
        alt: Some(54.0),
        ssid: Some("weiler12".to_owned()),
        batt: Some(79),
        bs: Some(1),
        cog: Some(0.0),
        conn: Some("w".to_owned()),
        created_at: Some(timestamp),
        m: Some(1),
        source: Some("fused".to_owned()),
        tid: Some(tracker_id.to_owned()),
        topic: Some(format!("owntracks/test/{}", tracker_id)),
        vac: Some(1.0),
    }
}
