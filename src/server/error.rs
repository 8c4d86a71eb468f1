use crate::themes::ThemeError;
use serde::Serialize;
use std::convert::Infallible;
use tracing::{debug, error};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_items: Option<Vec<String>>,
}

/// A failed request: the error kind plus the generic message shown when the
/// failure is internal.
#[derive(Debug)]
pub struct ApiError {
    pub error: ThemeError,
    pub fallback: &'static str,
}

impl ApiError {
    pub fn new(error: ThemeError, fallback: &'static str) -> Self {
        Self { error, fallback }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl Reply for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            error!(
                kind = self.error.kind(),
                error = %error_chain(&self.error),
                "[HTTP] {}",
                self.fallback
            );
            ErrorBody {
                error: self.fallback.to_string(),
                invalid_items: None,
            }
        } else {
            debug!(kind = self.error.kind(), status = status.as_u16(), "[HTTP] {}", self.error);
            let invalid_items = match &self.error {
                ThemeError::InvalidCodes(items) => Some(items.clone()),
                _ => None,
            };
            ErrorBody {
                error: self.error.to_string(),
                invalid_items,
            }
        };
        json_response(&body, status)
    }
}

pub fn json_response<T: Serialize>(body: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

/// Render an error and all of its sources on one line.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Turn warp's own rejections (unmatched routes, unreadable bodies) into JSON errors.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if err
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        (StatusCode::BAD_REQUEST, "Invalid JSON body")
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected a JSON body")
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error!(rejection = ?err, "[HTTP] Unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    let body = ErrorBody {
        error: message.to_string(),
        invalid_items: None,
    };
    Ok(json_response(&body, status))
}
