use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    ErrorResponse, HealthResponse, PayoutEnvelope, PayoutListResponse, PayoutResponse,
    PayoutState,
};

/// OpenAPI documentation for the Payouts API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payouts API",
        version = "2.0.0",
        description = "Read-only access to a seller's payouts, with opaque ids and keyset pagination.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Payouts", description = "Seller payout feed and lookup")
    ),
    paths(
        crate::handlers::list_payouts,
        crate::handlers::get_payout,
        crate::routes::health_check
    ),
    components(
        schemas(
            PayoutState,
            PayoutResponse,
            PayoutEnvelope,
            PayoutListResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security configuration for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "JWT whose subject is the seller's external id",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_declares_bearer_auth() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("PayoutListResponse"));
    }
}
