//! HTTP error mapping for the page handlers.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::domain::DomainError;

/// Error type for page handlers.
///
/// Wraps [`DomainError`] for business failures and template render
/// failures, and maps both onto an HTML error page.
#[derive(Debug)]
pub enum PageError {
    Domain(DomainError),
    Render(askama::Error),
}

/// Convenience type alias for handler return values.
pub type PageResult<T> = Result<T, PageError>;

impl From<DomainError> for PageError {
    fn from(e: DomainError) -> Self {
        PageError::Domain(e)
    }
}

impl From<askama::Error> for PageError {
    fn from(e: askama::Error) -> Self {
        PageError::Render(e)
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    status: u16,
    message: &'a str,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PageError::Domain(DomainError::NotFound) => {
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            PageError::Domain(DomainError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            PageError::Domain(DomainError::Database(msg)) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            PageError::Render(err) => {
                tracing::error!(error = %err, "Template render error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let page = ErrorPage {
            status: status.as_u16(),
            message: &message,
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}
