use crate::{error::ApiError, services::RecommendationService};
use actix_web::{get, web, HttpResponse};

/// Category labels present in the active corpus, for the UI filter.
#[get("/categories")]
pub async fn get_categories(
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let categories = recommendation_service.categories()?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "categories": categories })))
}

/// Configured emotional tone labels, for the UI filter.
#[get("/tones")]
pub async fn get_tones(
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let tones = recommendation_service.tones();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "tones": tones })))
}
