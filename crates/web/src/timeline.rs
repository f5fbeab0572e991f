use axum::{
    extract::{Query, State},
    http::Method,
    response::Html,
};
use model::trip::DaySummary;
use tracking::database::Database;
use utility::serde::DAY_FORMAT;

use crate::{
    common::{DayQuery, RouteErrorResponse, RouteResult},
    WebState,
};

const TEMPLATE: &str = include_str!("../resources/timeline.html");

/// `GET /?day=YYYY-MM-DD`, the map of one day.
pub(crate) async fn day_page<D: Database>(
    State(WebState { tracker }): State<WebState<D>>,
    Query(params): Query<DayQuery>,
) -> RouteResult<Html<String>> {
    let day = params.day.unwrap_or_else(|| tracker.today());
    tracker
        .get_trips_on_day(day)
        .await
        .map(|summary| Html(render(&summary)))
        .map_err(|why| {
            log::error!("could not load day {}: {}", day, why);
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(format!("/?day={}", day.format(DAY_FORMAT)))
        })
}

pub fn render(summary: &DaySummary) -> String {
    let trips = if summary.trips.is_empty() {
        "<li>No trips recorded.</li>".to_owned()
    } else {
        summary
            .trips
            .iter()
            .map(|trip| {
                format!(
                    "<li>{} &middot; {:.2} km &middot; {} points</li>",
                    escape_html(&trip.summary.label),
                    trip.summary.distance_km,
                    trip.summary.point_count
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    // keep the embedded json from closing the script element
    let data = serde_json::to_string(summary)
        .unwrap_or_else(|_| "null".to_owned())
        .replace("</", "<\\/");

    TEMPLATE
        .replace("{{day}}", &summary.day.format(DAY_FORMAT).to_string())
        .replace("{{previous_day}}", &summary.previous_day.format(DAY_FORMAT).to_string())
        .replace("{{next_day}}", &summary.next_day.format(DAY_FORMAT).to_string())
        .replace("{{total_distance_km}}", &format!("{:.2}", summary.total_distance_km))
        .replace("{{point_count}}", &summary.point_count.to_string())
        .replace("{{trips}}", &trips)
        .replace("{{data}}", &data)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
