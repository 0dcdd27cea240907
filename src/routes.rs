use actix_web::{web, Scope};

use crate::handlers::{get_categories, get_tones, health_check, recommendations_config};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .service(health_check)
        .service(get_categories)
        .service(get_tones)
        .configure(recommendations_config)
}
