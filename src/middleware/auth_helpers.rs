//! Authentication helper functions.
//!
//! These helpers reduce boilerplate in handlers by providing common patterns for:
//! - Extracting claims from authenticated requests
//! - Resolving the seller a request acts for

use actix_web::HttpRequest;
use log::warn;

use crate::constants::{CODE_AUTH_REQUIRED, CODE_INVALID_TOKEN, ERR_AUTH_REQUIRED, ERR_INVALID_TOKEN};
use crate::errors::ApiError;
use crate::models::Claims;
use crate::obfuscation::{IdCodec, TokenMode};
use crate::utils::mask_token;

use super::RequestExt;

/// Extract claims from request or return Unauthorized error.
///
/// # Example
/// ```ignore
/// let claims = require_auth(&req)?;
/// ```
pub fn require_auth(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.get_claims().ok_or_else(|| {
        warn!("Failed to get claims from request");
        ApiError::unauthorized(CODE_AUTH_REQUIRED, ERR_AUTH_REQUIRED)
    })
}

/// Resolve the internal id of the authenticated seller.
///
/// The token subject carries the seller's general token. A subject that does
/// not decode is treated like an invalid token.
///
/// # Example
/// ```ignore
/// let seller_id = require_seller(&req, payout_service.codec())?;
/// ```
pub fn require_seller(req: &HttpRequest, codec: &IdCodec) -> Result<u64, ApiError> {
    let claims = require_auth(req)?;
    codec
        .decode(&claims.sub, TokenMode::General)
        .map_err(|_| {
            warn!("Token subject {} is not a seller id", mask_token(&claims.sub));
            ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN)
        })
}
