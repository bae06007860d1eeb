// Route exports
pub mod breeds;
pub mod matches;
pub mod stats;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::fmt;
use std::sync::Arc;

use crate::core::{Catalog, Matcher};
use crate::error::{EmptyCatalogError, InvalidPreferenceError, LookupError};
use crate::models::ErrorResponse;

/// Application state shared across all handlers
///
/// The catalog is shared read-only between workers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub matcher: Matcher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(breeds::configure)
            .configure(stats::configure),
    );
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: &str, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status_code: status.as_u16(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl error::ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<InvalidPreferenceError> for ErrorResponse {
    fn from(err: InvalidPreferenceError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_preference", err)
    }
}

impl From<LookupError> for ErrorResponse {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::UnknownBreed { .. } => Self::new(StatusCode::NOT_FOUND, "unknown_breed", err),
            LookupError::UnknownAttribute { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "unknown_attribute", err)
            }
            LookupError::UnknownGrouping { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "unknown_grouping", err)
            }
        }
    }
}

impl From<EmptyCatalogError> for ErrorResponse {
    fn from(err: EmptyCatalogError) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "empty_catalog", err)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid_query", format!("Invalid query: {}", err)).into()
}
