//! JWT Authentication middleware for protected routes.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use jsonwebtoken::{decode, DecodingKey, Validation};
use log::debug;
use std::rc::Rc;

use crate::constants::{
    CODE_AUTH_REQUIRED, CODE_INVALID_TOKEN, ERR_INVALID_AUTH_HEADER, ERR_INVALID_TOKEN,
};
use crate::errors::ApiError;
use crate::models::Claims;

/// JWT Authentication middleware.
///
/// This middleware validates the bearer token from the Authorization header
/// and adds the decoded claims to the request extensions. Requests without a
/// valid token never reach the wrapped handlers.
#[derive(Clone)]
pub struct AuthMiddleware {
    decoding_key: DecodingKey,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware verifying HS256 tokens signed with `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
            decoding_key: self.decoding_key.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    decoding_key: DecodingKey,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let decoding_key = self.decoding_key.clone();

        Box::pin(async move {
            // Extract Authorization header
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok());

            let token = match auth_header.and_then(|header| header.strip_prefix("Bearer ")) {
                Some(token) if !token.is_empty() => token,
                _ => {
                    debug!("Rejected request to {} without bearer token", req.path());
                    return Err(
                        ApiError::unauthorized(CODE_AUTH_REQUIRED, ERR_INVALID_AUTH_HEADER).into(),
                    );
                }
            };

            // Validate JWT token
            let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
                .map_err(|err| {
                    debug!("Rejected bearer token: {}", err);
                    ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN)
                })?;

            // Add claims to request extensions for use in handlers
            req.extensions_mut().insert(token_data.claims);

            let res = service.call(req).await?;
            Ok(res)
        })
    }
}
