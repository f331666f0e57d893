use crate::error::ScheduleError;
use crate::schedule::service::ScheduleService;
use crate::state::app_settings::NotFoundPolicy;
use crate::state::sources::ScheduleSource;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub struct AppState<S> {
    service: Arc<ScheduleService<S>>,
    not_found: NotFoundPolicy,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self { service: Arc::clone(&self.service), not_found: self.not_found }
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleQuery {
    #[serde(rename = "teamId")]
    team_id: Option<String>,
    date: Option<String>,
}

/// Body of every non-200 schedule response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    timestamp: String,
}

pub fn router<S: ScheduleSource + 'static>(
    service: Arc<ScheduleService<S>>,
    not_found: NotFoundPolicy,
) -> Router {
    let api_routes = Router::new()
        .route("/schedule", get(get_schedule::<S>))
        .route("/liveness", get(liveness))
        .route("/readiness", get(readiness::<S>));

    Router::new()
        .nest("/api/v1", api_routes)
        .with_state(AppState { service, not_found })
}

/// GET /api/v1/schedule?teamId=<int>&date=<YYYY-MM-DD>
async fn get_schedule<S: ScheduleSource + 'static>(
    State(state): State<AppState<S>>,
    query: Result<Query<ScheduleQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            let err = ScheduleError::InvalidRequest(rejection.body_text());
            return error_response(&err, state.not_found);
        }
    };
    let team_id = query.team_id.unwrap_or_default();
    let date = query.date.unwrap_or_default();

    match state.service.get_schedule(&team_id, &date).await {
        Ok(day) => (StatusCode::OK, Json(day)).into_response(),
        Err(err) => {
            warn!("schedule request teamId={team_id:?} date={date:?} failed: {err}");
            error_response(&err, state.not_found)
        }
    }
}

/// GET /api/v1/liveness
async fn liveness() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// GET /api/v1/readiness: ready once the team directory has been filled.
async fn readiness<S: ScheduleSource + 'static>(State(state): State<AppState<S>>) -> Response {
    let summary = state.service.directory().summary().await;
    let (status, label) = if summary.generation > 0 {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "waiting for team directory")
    };
    let body = json!({
        "status": label,
        "directoryGeneration": summary.generation,
        "teams": summary.teams,
    });
    (status, Json(body)).into_response()
}

fn status_for(err: &ScheduleError, not_found: NotFoundPolicy) -> StatusCode {
    match err {
        ScheduleError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ScheduleError::TeamNotFound(_) => {
            StatusCode::from_u16(not_found.status_code()).unwrap_or(StatusCode::NOT_FOUND)
        }
        ScheduleError::UpstreamUnavailable(_)
        | ScheduleError::UpstreamContractViolation(_)
        | ScheduleError::NormalizationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &ScheduleError, not_found: NotFoundPolicy) -> Response {
    let body = ErrorBody {
        message: err.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    (status_for(err, not_found), Json(body)).into_response()
}
