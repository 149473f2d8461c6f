use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::answers::AnswerValue;
use super::catalog::QuestionCatalog;
use super::export::ExportDocument;
use super::metadata::RespondentMetadata;
use super::report::ScoreReport;
use super::scoring::ScoringEngine;
use super::transfer::{ResultsQuery, RESULTS_PATH};
use crate::error::AppError;
use crate::summary::{CompletionGateway, SummaryRequest, SummaryService};

/// Shared, read-only state behind the assessment endpoints.
pub struct AssessmentState<G> {
    pub engine: ScoringEngine,
    pub summary: Arc<SummaryService<G>>,
}

impl<G> AssessmentState<G> {
    pub fn new(engine: ScoringEngine, summary: SummaryService<G>) -> Self {
        Self {
            engine,
            summary: Arc::new(summary),
        }
    }
}

impl<G> Clone for AssessmentState<G> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            summary: Arc::clone(&self.summary),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScoreSubmission {
    pub answers: Vec<AnswerValue>,
    #[serde(default)]
    pub meta: Option<RespondentMetadata>,
}

pub fn assessment_router<G>(state: AssessmentState<G>) -> Router
where
    G: CompletionGateway + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<G>))
        .route("/api/v1/assessments/score", post(score_handler::<G>))
        .route(RESULTS_PATH, get(results_handler::<G>))
        .route("/api/v1/assessments/export", post(export_handler::<G>))
        .route("/api/v1/assessments/summary", post(summary_handler::<G>))
        .with_state(state)
}

pub(crate) async fn catalog_handler<G>(
    State(state): State<AssessmentState<G>>,
) -> Json<QuestionCatalog>
where
    G: CompletionGateway + 'static,
{
    Json(state.engine.catalog().clone())
}

pub(crate) async fn score_handler<G>(
    State(state): State<AssessmentState<G>>,
    payload: Result<Json<ScoreSubmission>, JsonRejection>,
) -> Result<Json<ScoreReport>, AppError>
where
    G: CompletionGateway + 'static,
{
    let submission = request_body(payload)?;
    let report = score_submission(&state.engine, &submission.answers, submission.meta.as_ref())?;
    Ok(Json(report.rounded()))
}

pub(crate) async fn results_handler<G>(
    State(state): State<AssessmentState<G>>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<ScoreReport>, AppError>
where
    G: CompletionGateway + 'static,
{
    let (answers, meta) = query.decode()?;
    let report = score_submission(&state.engine, &answers, meta.as_ref())?;
    Ok(Json(report.rounded()))
}

pub(crate) async fn export_handler<G>(
    State(state): State<AssessmentState<G>>,
    payload: Result<Json<ScoreSubmission>, JsonRejection>,
) -> Result<Response, AppError>
where
    G: CompletionGateway + 'static,
{
    let submission = request_body(payload)?;
    let report = score_submission(&state.engine, &submission.answers, submission.meta.as_ref())?;
    let document = ExportDocument::new(&report, submission.meta, Utc::now());

    let disposition = format!("attachment; filename=\"{}\"", ExportDocument::FILE_NAME);
    Ok((
        StatusCode::OK,
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(document),
    )
        .into_response())
}

pub(crate) async fn summary_handler<G>(
    State(state): State<AssessmentState<G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    G: CompletionGateway + 'static,
{
    let request = match payload {
        Ok(Json(body)) => SummaryRequest::from_json(&body),
        Err(rejection) => {
            let payload = json!({
                "error": format!("Invalid payload: {}", rejection.body_text()),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let outcome = match request {
        Ok(request) => state.summary.summarize(&request).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => {
            let status = error.status_code();
            if status.is_server_error() {
                warn!(%error, "summary request failed");
            }
            let payload = json!({
                "error": error.to_string(),
            });
            (status, Json(payload)).into_response()
        }
    }
}

fn request_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Request(rejection.body_text()))
}

fn score_submission(
    engine: &ScoringEngine,
    answers: &[AnswerValue],
    meta: Option<&RespondentMetadata>,
) -> Result<ScoreReport, AppError> {
    if let Some(meta) = meta {
        meta.validate()?;
    }
    let report = engine.score(answers)?;
    info!(
        overall_pct = report.overall_pct,
        network = meta.and_then(RespondentMetadata::network_name).unwrap_or("-"),
        "assessment scored"
    );
    Ok(report)
}
