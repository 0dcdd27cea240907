use crate::{
    error::ApiError,
    models::RecommendationRequest,
    services::RecommendationService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommendations").route(web::post().to(get_recommendations)));
}

/// Get book recommendations for a free-text query plus optional
/// category and tone filters. Similarity search is CPU-bound, so it
/// runs on the blocking pool instead of stalling a worker.
pub async fn get_recommendations(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let service = recommendation_service.clone();

    let response = web::block(move || service.recommend(&request))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(response))
}
