use crate::infra::{evaluation_timestamp, AppState, SharedEngine};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use marking_engine::error::AppError;
use marking_engine::marking::report::views::MarkingSummary;
use marking_engine::marking::{
    export_file_name, Catalogue, ExportFormat, GradingPolicy, MarkingReport, MarkingRequest,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct EvaluationResponse {
    pub(crate) report: MarkingReport,
    pub(crate) summary: MarkingSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default = "default_export_format")]
    pub(crate) format: ExportFormat,
}

fn default_export_format() -> ExportFormat {
    ExportFormat::Csv
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogueResponse {
    pub(crate) policy: GradingPolicy,
    pub(crate) max_mark: f64,
    pub(crate) catalogue: Catalogue,
}

pub(crate) fn with_marking_routes(engine: SharedEngine) -> Router {
    Router::new()
        .route("/api/v1/evaluations", post(evaluation_endpoint))
        .route("/api/v1/evaluations/export", post(export_endpoint))
        .route("/api/v1/catalogue", get(catalogue_endpoint))
        .with_state(engine)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn evaluate(engine: &SharedEngine, request: &MarkingRequest) -> Result<MarkingReport, AppError> {
    engine.catalogue().validate_request(request)?;
    let report = engine.evaluate(request, evaluation_timestamp());
    info!(
        student = request.student_id.as_deref().unwrap_or("-"),
        total = report.total_mark,
        advisories = report.advisories.len(),
        "marking pass evaluated"
    );
    Ok(report)
}

pub(crate) async fn evaluation_endpoint(
    State(engine): State<SharedEngine>,
    Json(request): Json<MarkingRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let report = evaluate(&engine, &request)?;
    let summary = report.summary();
    Ok(Json(EvaluationResponse { report, summary }))
}

pub(crate) async fn export_endpoint(
    State(engine): State<SharedEngine>,
    Query(query): Query<ExportQuery>,
    Json(request): Json<MarkingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let report = evaluate(&engine, &request)?;
    let body = query.format.render(&report)?;
    let file_name = export_file_name(query.format, report.evaluated_at);
    let content_type = mime_guess::from_ext(query.format.extension()).first_or_octet_stream();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}

pub(crate) async fn catalogue_endpoint(
    State(engine): State<SharedEngine>,
) -> Json<CatalogueResponse> {
    let catalogue = engine.catalogue();
    Json(CatalogueResponse {
        policy: *engine.policy(),
        max_mark: catalogue.max_mark(),
        catalogue: catalogue.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::response::Response;
    use axum_prometheus::PrometheusMetricLayer;
    use marking_engine::marking::MarkingEngine;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, OnceLock};
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        static HANDLE: OnceLock<Arc<metrics_exporter_prometheus::PrometheusHandle>> =
            OnceLock::new();
        let metrics = HANDLE
            .get_or_init(|| {
                let (_, handle) = PrometheusMetricLayer::pair();
                Arc::new(handle)
            })
            .clone();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics,
        }
    }

    fn router(ready: bool) -> Router {
        let engine = Arc::new(MarkingEngine::standard(GradingPolicy::default()));
        with_marking_routes(engine).layer(Extension(state(ready)))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = router(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = router(true)
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn evaluation_returns_report_and_summary() {
        let response = router(true)
            .oneshot(post_json(
                "/api/v1/evaluations",
                json!({
                    "presentation": ["medium_font"],
                    "units": { "1": { "missing": ["Evidence of a working environment is missing"] } }
                }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["report"]["presentation"]["grade"], "medium");
        assert_eq!(body["report"]["units"][0]["grade"], "good");
        assert_eq!(body["summary"]["rows"][1]["grade_label"], "Good");
        assert_eq!(body["summary"]["rows"].as_array().map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn unknown_criteria_are_rejected_at_the_boundary() {
        let response = router(true)
            .oneshot(post_json(
                "/api/v1/evaluations",
                json!({ "presentation": ["medium_colours"] }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .contains("medium_colours"));
    }

    #[tokio::test]
    async fn export_sets_download_headers() {
        let response = router(true)
            .oneshot(post_json(
                "/api/v1/evaluations/export?format=json",
                json!({ "student_id": "s42" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        let disposition = headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .expect("disposition header")
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"marking_results_"));
        assert!(disposition.ends_with(".json\""));

        let body = body_json(response).await;
        assert_eq!(body["student_id"], "s42");
        assert_eq!(body["total_marks"], body["max_marks"]);
    }

    #[tokio::test]
    async fn export_defaults_to_csv() {
        let response = router(true)
            .oneshot(post_json("/api/v1/evaluations/export", json!({})))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let text = String::from_utf8(bytes.to_vec()).expect("utf8 csv");
        assert!(text.starts_with("Presentation_Grade,Presentation_Mark,"));
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn catalogue_lists_labs_and_policy() {
        let response = router(true)
            .oneshot(
                Request::get("/api/v1/catalogue")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["catalogue"]["units"].as_array().map(Vec::len), Some(9));
        assert_eq!(body["policy"]["empty_presentation"], "excellent");
        assert_eq!(body["catalogue"]["units"][7]["bad_threshold"], 21);
    }
}
