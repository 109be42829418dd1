use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Validation(BTreeMap<String, Vec<String>>),
    NotFound(String),
    BadRequest(String),
    UnsupportedMediaType(String),
    PayloadTooLarge(String),
    Config(String),
    Storage(String),
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    status: bool,
    message: &'a str,
}

#[derive(Serialize)]
struct ValidationResponse<'a> {
    status: bool,
    errors: &'a BTreeMap<String, Vec<String>>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let fields = errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
                write!(f, "Validation failed: {}", fields)
            }
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::UnsupportedMediaType(msg) => write!(f, "Unsupported Media Type: {}", msg),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Storage(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Validation(errors) => response.json(ValidationResponse { status: false, errors }),
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::UnsupportedMediaType(msg)
            | AppError::PayloadTooLarge(msg) => response.json(ErrorResponse { status: false, message: msg }),
            // Storage and config details stay in the server log.
            AppError::Config(_) | AppError::Storage(_) | AppError::InternalServerError(_) => {
                log::error!("{}", self);
                response.json(ErrorResponse { status: false, message: "Internal Server Error" })
            }
        }
    }
}
