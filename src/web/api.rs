use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::filter::filter_records;
use crate::render::map::render_map;
use crate::render::views::{count_message, render_list, render_table};
use crate::report::generator;

use super::AppState;

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/app.js", get(app_js))
        .route("/api/stats", get(get_stats))
        .route("/api/map", get(get_default_map))
        .route("/api/history", get(get_history))
        .route("/api/query", post(run_query))
        .route("/api/report", post(download_report))
        .with_state(state)
}

async fn index_html() -> Html<&'static str> {
    Html(include_str!("static/index.html"))
}

async fn style_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_str!("static/style.css"),
    )
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        include_str!("static/app.js"),
    )
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let kpis = state.store.kpis();
    Json(json!({
        "total": kpis.total,
        "late": kpis.late,
        "due": kpis.due,
        "on_time": kpis.on_time,
        "data_loaded": !state.store.is_empty(),
    }))
}

/// The map shown before any query has been submitted.
async fn get_default_map() -> Html<String> {
    Html(render_map(&[]))
}

async fn get_history(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let entries = match state.history.lock() {
        Ok(history) => history.newest_first(),
        Err(_) => Vec::new(),
    };
    Json(json!({ "history": entries }))
}

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: String,
}

async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Json<serde_json::Value> {
    // Every submitted query lands in the history, even when there is no
    // data to run it against.
    if let Ok(mut history) = state.history.lock() {
        history.record(&req.query);
    }

    if state.store.is_empty() {
        return Json(json!({
            "count": 0,
            "message": "No promise data loaded.",
            "list_html": "<p>No promise data loaded.</p>",
            "table_html": "<p>No promise data loaded.</p>",
            "map_html": render_map(&[]),
            "download_enabled": false,
        }));
    }

    let records = filter_records(&state.store, &state.config.llm, &req.query).await;

    Json(json!({
        "count": records.len(),
        "message": count_message(records.len()),
        "list_html": render_list(&records),
        "table_html": render_table(&records),
        "map_html": render_map(&records),
        "download_enabled": !records.is_empty(),
    }))
}

/// Re-run the filter and stream the generated report back as a download.
/// An empty result set or a generation failure comes back as a JSON payload
/// the client shows as a dismissible alert; the panel degrades, the session
/// does not.
async fn download_report(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Response {
    let records = filter_records(&state.store, &state.config.llm, &req.query).await;

    match generator::generate(&records, &req.query, &state.config.data.reports_dir) {
        Ok(Some(path)) => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "report.html".to_string());

            match std::fs::read(&path) {
                Ok(bytes) => (
                    [
                        (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                        (
                            header::CONTENT_DISPOSITION,
                            format!("attachment; filename=\"{}\"", filename),
                        ),
                    ],
                    bytes,
                )
                    .into_response(),
                Err(_) => report_alert("danger", "An error occurred while generating the report."),
            }
        }
        Ok(None) => report_alert("warning", "No data to generate report for the given query."),
        Err(_) => report_alert("danger", "An error occurred while generating the report."),
    }
}

fn report_alert(level: &str, message: &str) -> Response {
    Json(json!({ "alert": { "level": level, "message": message } })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Config;
    use crate::data::records::RecordStore;

    // The empty-store path returns before any filtering, so the handler is
    // testable without the external service.
    #[tokio::test]
    async fn test_query_recorded_even_with_no_data() {
        let state = Arc::new(AppState::new(RecordStore::default(), Config::default()));

        let response = run_query(
            State(state.clone()),
            Json(QueryRequest {
                query: "late promises".to_string(),
            }),
        )
        .await;

        assert_eq!(response.0["count"], 0);
        assert_eq!(response.0["download_enabled"], false);

        let entries = state.history.lock().unwrap().newest_first();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "late promises");
    }
}
