use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::{get, on},
    Extension, Router,
};
use model::{location::Location, WithId};
use tracking::database::Database;
use utility::serde::DAY_FORMAT;

use crate::{
    common::{
        route_not_found, DayQuery, HateoasResult, RouteErrorResponse, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/locations{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/", get(get_locations::<D>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

/// The stored locations of one local day, oldest first.
async fn get_locations<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { tracker }): State<WebState<D>>,
    Query(params): Query<DayQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<WithId<Location>>> {
    let day = params.day.unwrap_or_else(|| tracker.today());
    let day_str = day.format(DAY_FORMAT).to_string();

    tracker
        .get_locations_on_day(day)
        .await
        .map(|locations| {
            hateoas::Response::builder(VecResponse::non_paginated(locations), base_url)
                .link("self", resource!("?day={}", day_str))
                .link("trips", super::resource!("/trips?day={}", day_str))
                .build()
                .json()
        })
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}
