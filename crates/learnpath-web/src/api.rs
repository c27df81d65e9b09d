//! `POST /generate-path` and its error responses.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use learnpath::{PathError, PathGenerator, RawPathRequest};
use tracing::info;

/// Response header naming the schema version of a returned document.
pub const SCHEMA_VERSION_HEADER: &str = "x-schema-version";

/// Error text for a body that is not a JSON request object.
pub const BODY_INVALID: &str = "Request body must be a JSON object with a \"goal\" field.";

/// Shared application state passed to handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<PathGenerator>,
}

/// A classified failure rendered as `{"error": message}`.
///
/// Only the category's user-facing message is sent; diagnostics stay in
/// the logs.
#[derive(Debug)]
pub struct ApiError(pub PathError);

impl From<PathError> for ApiError {
    fn from(err: PathError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::json!({ "error": self.0.user_message() });
        (status, Json(body)).into_response()
    }
}

/// POST /generate-path: generate a learning path.
///
/// Returns the document with an [`SCHEMA_VERSION_HEADER`] header, or an
/// [`ApiError`].
pub async fn generate_path(
    State(app): State<AppState>,
    body: Result<Json<RawPathRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(raw) = body.map_err(|rejection| {
        info!("rejected request body: {rejection}");
        PathError::InvalidRequest(BODY_INVALID.to_string())
    })?;

    let doc = app.generator.generate(raw).await?;
    let version = doc.schema_version().as_str();
    Ok(([(SCHEMA_VERSION_HEADER, version)], Json(doc)).into_response())
}
