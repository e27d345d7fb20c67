use crate::api::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Route templates served under `/api`; anything else is labelled `unmatched`.
const ROUTES: &[&str] = &[
    "/api/jobs",
    "/api/jobs/{id}",
    "/api/jobs/{id}/apply",
    "/api/applications",
    "/api/health",
    "/api/metrics",
];

const APPLY_ROUTE: &str = "/api/jobs/{id}/apply";

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Maps a concrete request path to its route template and the job id it names.
///
/// This middleware wraps the whole router, so `MatchedPath` is not yet known
/// when it runs; numeric segments are folded into `{id}` instead.
fn route_template(path: &str) -> (&'static str, Option<i32>) {
    let mut job_id = None;
    let template = path
        .trim_end_matches('/')
        .split('/')
        .map(|segment| match segment.parse::<i32>() {
            Ok(id) => {
                job_id = Some(id);
                "{id}"
            }
            Err(_) => segment,
        })
        .collect::<Vec<_>>()
        .join("/");

    ROUTES
        .iter()
        .find(|route| **route == template)
        .map_or(("unmatched", None), |route| (*route, job_id))
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let (route, job_id) = route_template(&path);

    let span = info_span!(
        "request",
        %request_id,
        %method,
        %path,
        route,
        job_id,
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status().as_u16();

        let labels = [
            ("method", method),
            ("route", route.to_string()),
            ("status", status.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        // Auth, validation and closed-job refusals as seen at the edge.
        if route == APPLY_ROUTE && status >= 400 {
            metrics::counter!("job_apply_rejections_total", "status" => status.to_string())
                .increment(1);
        }

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            event = "http_request_finished",
            duration_ms,
            status_code = status,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}
