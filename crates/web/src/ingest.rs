use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::UserAgent;
use model::message::LocationMessage;
use tracking::{database::Database, filter::Decision};

use crate::WebState;

/// What a tracker gets to hear back for a published message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishResponse {
    /// A smoothed point was stored.
    Ok,
    Buffering,
    /// Filtered by policy, or not a location message at all.
    Ignored,
    BadRequest,
    /// The point was accepted but could not be stored. It is lost.
    Error,
}

impl PublishResponse {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Ok | Self::Buffering | Self::Ignored => StatusCode::OK,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Error => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Buffering => "buffering",
            Self::Ignored => "ignored",
            Self::BadRequest => "bad request",
            Self::Error => "error",
        }
    }
}

impl From<Decision> for PublishResponse {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accepted => Self::Ok,
            Decision::Buffering => Self::Buffering,
            Decision::RejectedBadInput => Self::BadRequest,
            Decision::RejectedAccuracy
            | Decision::RejectedStationary
            | Decision::RejectedTooClose => Self::Ignored,
        }
    }
}

impl IntoResponse for PublishResponse {
    fn into_response(self) -> Response {
        (self.status_code(), self.body()).into_response()
    }
}

/// `POST /pub`, the HTTP endpoint of OwnTracks compatible trackers. The body
/// is parsed leniently: unknown fields are ignored and no content type is
/// required.
pub(crate) async fn publish<D: Database>(
    State(WebState { tracker }): State<WebState<D>>,
    user_agent: Option<TypedHeader<UserAgent>>,
    body: Bytes,
) -> PublishResponse {
    let message: LocationMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(why) => {
            log::warn!("malformed message: {}", why);
            return PublishResponse::BadRequest;
        }
    };

    if !message.is_location() {
        log::info!(
            "ignoring `{}` message",
            message.kind.as_deref().unwrap_or("untyped")
        );
        return PublishResponse::Ignored;
    }

    let fix = match message.into_fix() {
        Ok(fix) => fix,
        Err(why) => {
            log::warn!("bad location message: {}", why);
            return PublishResponse::BadRequest;
        }
    };

    if let Some(TypedHeader(user_agent)) = user_agent {
        log::debug!("fix from `{}` via {}", fix.device_id(), user_agent.as_str());
    }

    match tracker.ingest(fix).await {
        Ok(ingested) => PublishResponse::from(ingested.decision),
        // already logged by the client
        Err(_) => PublishResponse::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisions_map_to_responses() {
        assert_eq!(PublishResponse::from(Decision::Accepted).body(), "ok");
        assert_eq!(PublishResponse::from(Decision::Buffering).body(), "buffering");
        for rejected in [
            Decision::RejectedAccuracy,
            Decision::RejectedStationary,
            Decision::RejectedTooClose,
        ] {
            let response = PublishResponse::from(rejected);
            assert_eq!(response.status_code(), StatusCode::OK);
            assert_eq!(response.body(), "ignored");
        }
        assert_eq!(
            PublishResponse::from(Decision::RejectedBadInput).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
