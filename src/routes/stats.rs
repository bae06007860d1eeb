use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Deserialize;
use std::num::NonZeroUsize;

use crate::core::{
    attribute_pairs, descriptive_lifespan, grouped_mean, histogram, lifespan_by_size,
    size_lifespan_correlation, MAX_HISTOGRAM_BINS,
};
use crate::models::{BreedAttribute, CorrelationResponse, ErrorResponse, ExploreResponse, GroupKey};
use crate::routes::AppState;

const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Configure catalog statistics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/stats/lifespan", web::get().to(lifespan_summary))
        .route("/stats/lifespan-by-size", web::get().to(lifespan_per_size))
        .route("/stats/size-lifespan-correlation", web::get().to(correlation))
        .route("/stats/histogram", web::get().to(attribute_histogram))
        .route("/stats/explore", web::get().to(explore));
}

#[derive(Debug, Deserialize)]
pub struct HistogramQuery {
    pub attribute: String,
    pub bins: Option<NonZeroUsize>,
    pub group: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExploreQuery {
    pub x: String,
    pub y: String,
    #[serde(rename = "groupBy", alias = "group_by")]
    pub group_by: Option<String>,
}

/// GET /api/v1/stats/lifespan
async fn lifespan_summary(state: web::Data<AppState>) -> Result<HttpResponse, ErrorResponse> {
    let summary = descriptive_lifespan(&state.catalog)?;
    Ok(HttpResponse::Ok().json(summary))
}

/// GET /api/v1/stats/lifespan-by-size
async fn lifespan_per_size(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(lifespan_by_size(&state.catalog))
}

/// GET /api/v1/stats/size-lifespan-correlation
async fn correlation(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(CorrelationResponse {
        correlation: size_lifespan_correlation(&state.catalog),
        breeds: state.catalog.len(),
    })
}

/// GET /api/v1/stats/histogram?attribute={column}&bins={n}&group={breedGroup}
async fn attribute_histogram(
    state: web::Data<AppState>,
    query: web::Query<HistogramQuery>,
) -> Result<HttpResponse, ErrorResponse> {
    let attribute: BreedAttribute = query.attribute.parse()?;
    let bins = query
        .bins
        .or_else(|| NonZeroUsize::new(DEFAULT_HISTOGRAM_BINS))
        .unwrap_or(NonZeroUsize::MIN);
    if bins.get() > MAX_HISTOGRAM_BINS {
        return Err(ErrorResponse::new(
            StatusCode::BAD_REQUEST,
            "invalid_bins",
            format!("bins must be between 1 and {}, got {}", MAX_HISTOGRAM_BINS, bins),
        ));
    }

    let result = match query.group.as_deref() {
        Some(group) => histogram(state.catalog.in_group(group), attribute, bins).map_err(|_| {
            ErrorResponse::new(
                StatusCode::NOT_FOUND,
                "unknown_group",
                format!("no breeds in group '{}'", group),
            )
        })?,
        None => histogram(state.catalog.iter(), attribute, bins)?,
    };

    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/v1/stats/explore?x={column}&y={column}&groupBy={breed_group|size_category}
async fn explore(
    state: web::Data<AppState>,
    query: web::Query<ExploreQuery>,
) -> Result<HttpResponse, ErrorResponse> {
    let x: BreedAttribute = query.x.parse()?;
    let y: BreedAttribute = query.y.parse()?;
    let group_by = query
        .group_by
        .as_deref()
        .map(str::parse::<GroupKey>)
        .transpose()?;

    tracing::debug!(%x, %y, group_by = group_by.map(GroupKey::column), "Exploring attribute pair");

    Ok(HttpResponse::Ok().json(ExploreResponse {
        x,
        y,
        points: attribute_pairs(&state.catalog, x, y),
        group_by,
        groups: group_by.map(|key| grouped_mean(&state.catalog, key, y)),
    }))
}
