use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse};
use crate::routes::AppState;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        breeds: state.catalog.len(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "adaptability": "3",
///   "allAroundFriendliness": "2",
///   "healthGrooming": "1",
///   "trainability": "0",
///   "exerciseNeeds": "2",
///   "lifespan": "1",
///   "size": "small|medium|big|all"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> Result<HttpResponse, ErrorResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: field_errors={:?}", errors);
        return Err(ErrorResponse::new(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            errors,
        ));
    }

    let preference = req.to_preference().map_err(|e| {
        tracing::info!("Rejected preference vector: {}", e);
        ErrorResponse::from(e)
    })?;

    let result = state.matcher.find_matches(&state.catalog, &preference);

    tracing::info!(
        "Returning {} matches (from {} candidates, size: {:?})",
        result.len(),
        result.total_candidates,
        preference.size
    );

    Ok(HttpResponse::Ok().json(FindMatchesResponse {
        breeds: result.breeds().into_iter().map(str::to_string).collect(),
        scores: result.scores(),
        total_candidates: result.total_candidates,
        matches: result.matches,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app_state, TEST_CATALOG};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.breeds, 3);
    }

    #[actix_web::test]
    async fn test_find_matches_small_only() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({
                "adaptability": "0",
                "allAroundFriendliness": "0",
                "healthGrooming": "0",
                "trainability": "0",
                "exerciseNeeds": "3",
                "lifespan": "0",
                "size": "small"
            }))
            .to_request();
        let resp: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.breeds, vec!["Pug"]);
        assert_eq!(resp.scores, vec![9.0]);
        assert_eq!(resp.total_candidates, 1);
    }

    #[actix_web::test]
    async fn test_find_matches_rejects_bad_weight() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({
                "adaptability": "4",
                "allAroundFriendliness": "1",
                "healthGrooming": "1",
                "trainability": "1",
                "exerciseNeeds": "1",
                "lifespan": "1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "invalid_preference");
    }

    #[actix_web::test]
    async fn test_find_matches_rejects_empty_weight() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/matches/find")
            .set_json(serde_json::json!({
                "adaptability": "",
                "allAroundFriendliness": "1",
                "healthGrooming": "1",
                "trainability": "1",
                "exerciseNeeds": "1",
                "lifespan": "1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "validation_failed");
        assert_eq!(body.status_code, 400);
    }
}
