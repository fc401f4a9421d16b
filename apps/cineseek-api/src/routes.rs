use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use cineseek_domain::ProjectedResult;
use cineseek_service::{Error as ServiceError, SearchRequest};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/api/health", get(health))
		.route("/api/search", post(search))
		.with_state(state)
}

#[derive(Debug, Serialize)]
struct Health {
	ok: bool,
}

async fn health() -> Json<Health> {
	Json(Health { ok: true })
}

async fn search(
	State(state): State<AppState>,
	payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<ProjectedResult>>, ApiError> {
	let Json(payload) = payload.map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "invalid_request", err.body_text())
	})?;
	let response = state.service.search(payload).await?;

	Ok(Json(response.results))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::Upstream { message } => {
				tracing::warn!(%message, "Upstream lookup failed.");

				json_error(StatusCode::BAD_GATEWAY, "upstream_error", message)
			},
			ServiceError::InvalidConfig { message } | ServiceError::ProviderSetup { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}
