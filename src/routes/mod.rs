use actix_web::{web, HttpResponse};
use log::debug;
use utoipa::OpenApi;

use crate::constants::{MSG_SERVER_RUNNING, PAYOUTS_PATH};
use crate::errors::ApiError;
use crate::handlers;
use crate::middleware::AuthMiddleware;
use crate::models::HealthResponse;
use crate::openapi::ApiDoc;

pub fn configure_routes(cfg: &mut web::ServiceConfig, auth: AuthMiddleware) {
    cfg.app_data(query_config()).service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check)),
    )
    // Payout routes (protected)
    .service(
        web::scope(PAYOUTS_PATH)
            .wrap(auth)
            // Paginated payout feed
            .route("", web::get().to(handlers::list_payouts))
            // Get specific payout by external id
            .route("/{id}", web::get().to(handlers::get_payout)),
    )
    // OpenAPI document
    .route("/api-docs/openapi.json", web::get().to(openapi_spec));
}

/// Report query strings that fail to deserialize in the JSON error shape.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        debug!("Rejected query string for {}: {}", req.path(), err);
        ApiError::invalid_query(&err.to_string()).into()
    })
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: MSG_SERVER_RUNNING.to_string(),
    })
}

async fn openapi_spec() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check_is_public() {
        let app = test::init_service(
            App::new().configure(|cfg| configure_routes(cfg, AuthMiddleware::new("secret"))),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "OK");
        assert_eq!(body["message"], MSG_SERVER_RUNNING);
    }

    #[actix_web::test]
    async fn test_openapi_document_is_served() {
        let app = test::init_service(
            App::new().configure(|cfg| configure_routes(cfg, AuthMiddleware::new("secret"))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api-docs/openapi.json")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["paths"].get("/v2/payouts").is_some());
        assert!(body["paths"].get("/v2/payouts/{id}").is_some());
    }
}
