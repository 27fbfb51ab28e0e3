use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use std::fmt;

use crate::constants::{
    err_invalid_date_format, CODE_INTERNAL_ERROR, CODE_INVALID_DATE, CODE_INVALID_PAGE_KEY,
    CODE_INVALID_QUERY, CODE_PAYOUT_NOT_FOUND, ERR_INTERNAL_SERVER, ERR_INVALID_PAGE_KEY,
    ERR_INVALID_QUERY, ERR_PAYOUT_NOT_FOUND,
};
use crate::models::ErrorResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Unauthorized { code: String, message: String },
    NotFound { code: String, message: String },
    InternalServerError { code: String, message: String },
}

impl ApiError {
    /// A malformed `after`/`before` parameter. The message names the field.
    pub fn invalid_date(field: &str) -> Self {
        ApiError::BadRequest {
            code: CODE_INVALID_DATE.to_string(),
            message: err_invalid_date_format(field),
        }
    }

    /// A page key that failed to parse or verify. Never says which part was wrong.
    pub fn invalid_page_key() -> Self {
        ApiError::BadRequest {
            code: CODE_INVALID_PAGE_KEY.to_string(),
            message: ERR_INVALID_PAGE_KEY.to_string(),
        }
    }

    /// A query string that does not deserialize (e.g. a repeated parameter).
    pub fn invalid_query(detail: &str) -> Self {
        ApiError::BadRequest {
            code: CODE_INVALID_QUERY.to_string(),
            message: format!("{}: {}", ERR_INVALID_QUERY, detail),
        }
    }

    pub fn payout_not_found() -> Self {
        ApiError::NotFound {
            code: CODE_PAYOUT_NOT_FOUND.to_string(),
            message: ERR_PAYOUT_NOT_FOUND.to_string(),
        }
    }

    pub fn unauthorized(code: &str, message: &str) -> Self {
        ApiError::Unauthorized {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: message.into(),
        }
    }

    fn parts(&self) -> (&str, &str) {
        match self {
            ApiError::BadRequest { code, message }
            | ApiError::Unauthorized { code, message }
            | ApiError::NotFound { code, message }
            | ApiError::InternalServerError { code, message } => (code, message),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (code, message) = self.parts();
        match self {
            ApiError::BadRequest { .. } => write!(f, "Bad Request [{}]: {}", code, message),
            ApiError::Unauthorized { .. } => write!(f, "Unauthorized [{}]: {}", code, message),
            ApiError::NotFound { .. } => write!(f, "Not Found [{}]: {}", code, message),
            ApiError::InternalServerError { .. } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (code, message) = self.parts();
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            code: code.to_string(),
            message: message.to_string(),
        })
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        error!("Database error: {}", err);
        ApiError::internal(ERR_INTERNAL_SERVER)
    }
}

impl From<mongodb::bson::document::ValueAccessError> for ApiError {
    fn from(err: mongodb::bson::document::ValueAccessError) -> Self {
        error!("Malformed database document: {}", err);
        ApiError::internal(ERR_INTERNAL_SERVER)
    }
}
