//! Payout handlers: the seller's payout feed and single-payout lookup.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;

use crate::errors::ApiError;
use crate::middleware::require_seller;
use crate::models::{PayoutEnvelope, PayoutListQuery};
use crate::services::PayoutService;

/// List the authenticated seller's payouts, newest first
#[utoipa::path(
    get,
    path = "/v2/payouts",
    tag = "Payouts",
    params(PayoutListQuery),
    responses(
        (status = 200, description = "One page of payouts", body = crate::models::PayoutListResponse),
        (status = 400, description = "Invalid date or page key", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_payouts(
    payout_service: web::Data<PayoutService>,
    query: web::Query<PayoutListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let seller_id = require_seller(&req, payout_service.codec())?;
    let response = payout_service.list_payouts(seller_id, &query).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Get one of the authenticated seller's payouts by its external id
#[utoipa::path(
    get,
    path = "/v2/payouts/{id}",
    tag = "Payouts",
    params(
        ("id" = String, Path, description = "External payout id")
    ),
    responses(
        (status = 200, description = "Payout found", body = crate::models::PayoutEnvelope),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Payout not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_payout(
    payout_service: web::Data<PayoutService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let seller_id = require_seller(&req, payout_service.codec())?;
    let external_id = path.into_inner();
    debug!("Fetching payout for seller {}", seller_id);

    let payout = payout_service.get_payout(seller_id, &external_id).await?;
    Ok(HttpResponse::Ok().json(PayoutEnvelope {
        success: true,
        payout,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::{Duration, TimeZone, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::Value;

    use super::*;
    use crate::middleware::AuthMiddleware;
    use crate::models::{Claims, NewPayout, PayoutState};
    use crate::obfuscation::{IdCodec, ObfuscationKeys, TokenMode};
    use crate::repositories::{InMemoryPayoutRepository, PayoutRepository};
    use crate::routes::configure_routes;

    const SECRET: &str = "handler-test-secret";
    const SELLER: u64 = 11;
    const OTHER_SELLER: u64 = 12;

    fn setup() -> (Arc<InMemoryPayoutRepository>, web::Data<PayoutService>) {
        let repo = Arc::new(InMemoryPayoutRepository::new());
        let codec = IdCodec::new(&ObfuscationKeys::new("handler-general", "31415")).unwrap();
        let service = PayoutService::new(repo.clone(), Arc::new(codec));
        (repo, web::Data::new(service))
    }

    fn bearer(service: &PayoutService, seller_id: u64, secret: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: service.codec().encode(seller_id, TokenMode::General),
            exp: (now + Duration::hours(1)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();
        format!("Bearer {}", token)
    }

    async fn seed(repo: &InMemoryPayoutRepository, seller_id: u64, count: i64) -> Vec<u64> {
        let base = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let mut ids = Vec::new();
        for minute in 0..count {
            let payout = repo
                .insert(NewPayout {
                    seller_id,
                    amount_cents: 2_550,
                    currency: "USD".to_string(),
                    state: PayoutState::Completed,
                    processor: "STRIPE".to_string(),
                    created_at: base - Duration::minutes(minute),
                })
                .await
                .unwrap();
            ids.push(payout.id);
        }
        ids
    }

    #[actix_web::test]
    async fn test_list_requires_bearer_token() {
        let (_repo, service) = setup();
        let app = test::init_service(
            App::new()
                .app_data(service.clone())
                .configure(|cfg| configure_routes(cfg, AuthMiddleware::new(SECRET))),
        )
        .await;

        let forged = bearer(&service, SELLER, "some-other-secret");
        for authorization in [None, Some("Token abc"), Some("Bearer "), Some(forged.as_str())] {
            let mut req = test::TestRequest::get().uri("/v2/payouts");
            if let Some(value) = authorization {
                req = req.insert_header(("Authorization", value));
            }
            let status = match test::try_call_service(&app, req.to_request()).await {
                Ok(resp) => resp.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        }
    }

    #[actix_web::test]
    async fn test_list_returns_first_page_with_next_key() {
        let (repo, service) = setup();
        seed(&repo, SELLER, 12).await;
        seed(&repo, OTHER_SELLER, 3).await;
        let app = test::init_service(
            App::new()
                .app_data(service.clone())
                .configure(|cfg| configure_routes(cfg, AuthMiddleware::new(SECRET))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v2/payouts")
            .insert_header(("Authorization", bearer(&service, SELLER, SECRET)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["payouts"].as_array().unwrap().len(), 10);
        assert_eq!(body["payouts"][0]["amount"], "25.50");
        assert_eq!(body["payouts"][0]["status"], "completed");
        assert_eq!(body["payouts"][0]["payment_processor"], "STRIPE");
        assert!(body["payouts"][0].get("seller_id").is_none());

        let next_key = body["next_page_key"].as_str().unwrap().to_string();
        let next_url = body["next_page_url"].as_str().unwrap().to_string();
        assert!(next_url.starts_with("/v2/payouts?page_key="));

        let req = test::TestRequest::get()
            .uri(&next_url)
            .insert_header(("Authorization", bearer(&service, SELLER, SECRET)))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["payouts"].as_array().unwrap().len(), 2);
        assert!(body.get("next_page_key").is_none());
        assert!(body.get("next_page_url").is_none());
        assert!(!next_key.is_empty());
    }

    #[actix_web::test]
    async fn test_list_rejects_bad_parameters() {
        let (_repo, service) = setup();
        let app = test::init_service(
            App::new()
                .app_data(service.clone())
                .configure(|cfg| configure_routes(cfg, AuthMiddleware::new(SECRET))),
        )
        .await;

        let cases = [
            (
                "/v2/payouts?after=394293",
                "INVALID_DATE",
                "Invalid date format provided in field 'after'. Dates must be in the format YYYY-MM-DD.",
            ),
            (
                "/v2/payouts?before=invalid-date",
                "INVALID_DATE",
                "Invalid date format provided in field 'before'. Dates must be in the format YYYY-MM-DD.",
            ),
            (
                "/v2/payouts?page_key=invalid-page-key",
                "INVALID_PAGE_KEY",
                "Invalid page_key.",
            ),
        ];

        for (uri, code, message) in cases {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(("Authorization", bearer(&service, SELLER, SECRET)))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["code"], code);
            assert_eq!(body["message"], message);
        }
    }

    #[actix_web::test]
    async fn test_list_reports_undeserializable_query_as_json() {
        let (_repo, service) = setup();
        let app = test::init_service(
            App::new()
                .app_data(service.clone())
                .configure(|cfg| configure_routes(cfg, AuthMiddleware::new(SECRET))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/v2/payouts?after=2024-01-01&after=2024-01-02")
            .insert_header(("Authorization", bearer(&service, SELLER, SECRET)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "INVALID_QUERY");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query parameters"));
    }

    #[actix_web::test]
    async fn test_get_payout_is_scoped_to_seller() {
        let (repo, service) = setup();
        let own = seed(&repo, SELLER, 1).await[0];
        let foreign = seed(&repo, OTHER_SELLER, 1).await[0];
        let app = test::init_service(
            App::new()
                .app_data(service.clone())
                .configure(|cfg| configure_routes(cfg, AuthMiddleware::new(SECRET))),
        )
        .await;

        let own_id = service.codec().encode(own, TokenMode::General);
        let req = test::TestRequest::get()
            .uri(&format!("/v2/payouts/{}", own_id))
            .insert_header(("Authorization", bearer(&service, SELLER, SECRET)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["payout"]["id"], own_id.as_str());

        let foreign_id = service.codec().encode(foreign, TokenMode::General);
        for id in [foreign_id.as_str(), "1", "garbage"] {
            let req = test::TestRequest::get()
                .uri(&format!("/v2/payouts/{}", id))
                .insert_header(("Authorization", bearer(&service, SELLER, SECRET)))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{id}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "The payout was not found.");
        }
    }
}
