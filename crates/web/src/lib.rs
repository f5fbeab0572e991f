pub use crate::common::RouteResult;

use std::{error, fmt, io};

use axum::{
    routing::{get, on, post},
    Router,
};
use common::{route_not_found, METHOD_FILTER_ALL};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracking::{client::Client, config::ConfigError, database::Database};

pub mod api;
pub mod common;
pub mod hateoas;
pub mod ingest;
pub mod middleware;
pub mod timeline;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

#[derive(Clone)]
pub struct WebState<D>
where
    D: Database,
{
    pub tracker: Client<D>,
}

/// The complete application: ingestion, the timeline page and the JSON API.
pub fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/", get(timeline::day_page::<D>))
        .route("/pub", post(ingest::publish::<D>))
        .nest_service("/api", api::routes(state.clone()))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
}

pub async fn start_web_server<D: Database>(state: WebState<D>, address: &str) -> io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    log::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, routes(state).into_make_service()).await
}

/// Conditions that keep the service from starting.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    MissingDatabaseConfig,
    Database(Box<dyn error::Error + Send + Sync>),
    Io(io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(why) => write!(f, "invalid configuration: {}", why),
            Self::MissingDatabaseConfig => write!(
                f,
                "expected DATABASE_USER, DATABASE_PASSWORD, DATABASE_HOST, DATABASE_PORT and DATABASE_NAME in env"
            ),
            Self::Database(why) => write!(f, "could not connect to database: {}", why),
            Self::Io(why) => write!(f, "web server failed: {}", why),
        }
    }
}

impl error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(why: ConfigError) -> Self {
        Self::Config(why)
    }
}

impl From<io::Error> for StartupError {
    fn from(why: io::Error) -> Self {
        Self::Io(why)
    }
}
