//! Router construction.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use learnpath::{PathError, PathGenerator};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::error;

use crate::api::{self, ApiError, AppState};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Build the full axum router.
///
/// The router serves:
/// - `POST /generate-path`
/// - the entry page at `/`
/// - optional static files from `static_dir` for everything else
///
/// A panic while handling a request is answered with the internal-error
/// response instead of a dropped connection.
pub fn build_router(generator: Arc<PathGenerator>, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(index))
        .route("/generate-path", post(api::generate_path))
        .with_state(AppState { generator })
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

fn panic_response(payload: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!("request handler panicked: {detail}");
    ApiError(PathError::Internal(format!("handler panicked: {detail}"))).into_response()
}
