use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::models::{BreedAttribute, BreedSummary, CompareBreedsQuery, ErrorResponse, ListBreedsQuery};
use crate::routes::AppState;

/// Configure breed listing and lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Fixed paths first so they are not captured by `{name}`
    cfg
        .route("/breeds", web::get().to(list_breeds))
        .route("/breeds/groups", web::get().to(list_groups))
        .route("/breeds/compare", web::get().to(compare_breeds))
        .route("/breeds/{name}", web::get().to(get_breed));
}

/// GET /api/v1/breeds?group={breedGroup}
async fn list_breeds(state: web::Data<AppState>, query: web::Query<ListBreedsQuery>) -> HttpResponse {
    let breeds: Vec<BreedSummary> = match query.group.as_deref() {
        Some(group) => state.catalog.in_group(group).map(BreedSummary::from).collect(),
        None => state.catalog.iter().map(BreedSummary::from).collect(),
    };

    HttpResponse::Ok().json(breeds)
}

/// GET /api/v1/breeds/groups
async fn list_groups(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.breed_groups())
}

/// GET /api/v1/breeds/{name}
///
/// Exact name match only.
async fn get_breed(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse, ErrorResponse> {
    let record = state.catalog.require(&name)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "breed": record,
        "traits": record.trait_profile(),
    })))
}

/// GET /api/v1/breeds/compare?first={breed}&second={breed}&attributes=a,b,c
async fn compare_breeds(
    state: web::Data<AppState>,
    query: web::Query<CompareBreedsQuery>,
) -> Result<HttpResponse, ErrorResponse> {
    if let Err(errors) = query.validate() {
        return Err(ErrorResponse::new(StatusCode::BAD_REQUEST, "validation_failed", errors));
    }

    let attributes = match query.attributes.as_deref() {
        Some(list) => list
            .split(',')
            .filter(|name| !name.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<BreedAttribute>, _>>()?,
        None => BreedAttribute::TRAITS.to_vec(),
    };

    let comparison = state.catalog.compare(&query.first, &query.second, &attributes)?;

    Ok(HttpResponse::Ok().json(comparison))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app_state, TEST_CATALOG};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_list_breeds_by_group() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/breeds?group=Hound%20Dogs")
            .to_request();
        let resp: Vec<BreedSummary> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.len(), 1);
        assert_eq!(resp[0].breed, "Beagle");

        let req = test::TestRequest::get().uri("/breeds").to_request();
        let resp: Vec<BreedSummary> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.len(), 3);
    }

    #[actix_web::test]
    async fn test_groups_route_is_not_a_breed_lookup() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/breeds/groups").to_request();
        let resp: Vec<String> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp, vec!["Companion Dogs", "Hound Dogs", "Herding Dogs"]);
    }

    #[actix_web::test]
    async fn test_get_breed() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/breeds/Border%20Collie").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["breed"]["breed"], "Border Collie");
        assert_eq!(resp["breed"]["size_category"], "medium");
        assert_eq!(resp["breed"]["average_lifespan"], 13.5);

        let req = test::TestRequest::get().uri("/breeds/Poodle").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_compare_breeds() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(TEST_CATALOG)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/breeds/compare?first=Pug&second=Beagle&attributes=adaptability,exercise_needs")
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["firstValues"], serde_json::json!([4.0, 3.0]));
        assert_eq!(resp["secondValues"], serde_json::json!([3.0, 4.0]));

        let req = test::TestRequest::get()
            .uri("/breeds/compare?first=Pug&second=Beagle&attributes=fluffiness")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/breeds/compare?first=&second=Beagle")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "validation_failed");
    }
}
