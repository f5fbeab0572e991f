use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use model::trip::DaySummary;
use tracking::database::Database;
use utility::serde::DAY_FORMAT;

use crate::{
    common::{
        route_not_found, schema, DayQuery, HateoasResult, RouteErrorResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/trips{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<DaySummary>))
        .route("/", get(get_trips::<D>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_trips<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { tracker }): State<WebState<D>>,
    Query(params): Query<DayQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<DaySummary> {
    let day = params.day.unwrap_or_else(|| tracker.today());
    tracker
        .get_trips_on_day(day)
        .await
        .map(|summary| day_summary_hateoas(summary, base_url).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

pub(crate) fn day_summary_hateoas(
    summary: DaySummary,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<DaySummary> {
    let day = summary.day.format(DAY_FORMAT).to_string();
    let previous_day = summary.previous_day.format(DAY_FORMAT).to_string();
    let next_day = summary.next_day.format(DAY_FORMAT).to_string();
    let trip_count = summary.trips.len();

    hateoas::Response::builder(summary, base_url)
        .debug_info("tripCount", trip_count)
        .link("self", resource!("?day={}", day))
        .link("previous", resource!("?day={}", previous_day))
        .link("next", resource!("?day={}", next_day))
        .link("locations", super::resource!("/locations?day={}", day))
        .link("page", format!("/?day={}", day))
        .build()
}
