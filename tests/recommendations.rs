use actix_web::{test, web, App};
use book_recommender_api::{
    ml::HashingEmbedder,
    models::{BookRecord, RecommendationResponse},
    routes::api_routes,
    services::{RecommendationService, RecordStore, SearchSettings},
};
use std::sync::Arc;

fn record(id: &str, title: &str, category: &str, description: &str, sad: f32) -> BookRecord {
    BookRecord {
        id: id.to_string(),
        title: title.to_string(),
        authors: "A. Author".to_string(),
        description: description.to_string(),
        category: category.to_string(),
        thumbnail: None,
        joy: 0.0,
        sad,
        angry: 0.0,
        fear: 0.0,
        surprise: 0.0,
        neutral: 0.0,
    }
}

fn service() -> RecommendationService {
    let corpus = vec![
        record(
            "9780000000001",
            "The Hollow Valley",
            "Mystery",
            "a detective investigates a murder in a quiet village",
            0.8,
        ),
        record(
            "9780000000002",
            "Cold Evidence",
            "Mystery",
            "a detective follows cold evidence through the winter city",
            0.2,
        ),
        record(
            "9780000000003",
            "Sunrise Road",
            "Fiction",
            "a hopeful journey across the coast with old friends",
            0.0,
        ),
    ];
    let store = RecordStore::from_records(corpus).unwrap();
    let embedder = Arc::new(HashingEmbedder::new(128, 4096));
    RecommendationService::new(
        embedder,
        store,
        SearchSettings {
            initial_top_k: 50,
            final_top_k: 12,
            default_cover_url: "assets/missing_cover.png".to_string(),
        },
    )
    .unwrap()
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(service()))
                .service(api_routes()),
        )
        .await
    };
}

#[actix_web::test]
async fn recommendations_respect_the_category_filter() {
    let app = test_app!();

    let request = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(serde_json::json!({
            "query": "a detective investigates a murder",
            "category": "mystery",
            "top_k": 10
        }))
        .to_request();

    let response: RecommendationResponse = test::call_and_read_body_json(&app, request).await;
    assert_eq!(response.total_found, 2);
    assert!(response
        .recommendations
        .iter()
        .all(|r| r.book.category == "Mystery"));
}

#[actix_web::test]
async fn unknown_category_returns_empty_result_not_error() {
    let app = test_app!();

    let request = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(serde_json::json!({
            "query": "a detective investigates a murder",
            "category": "Poetry"
        }))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert!(response.status().is_success());
    let body: RecommendationResponse = test::read_body_json(response).await;
    assert!(body.recommendations.is_empty());
}

#[actix_web::test]
async fn empty_query_is_a_bad_request() {
    let app = test_app!();

    let request = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(serde_json::json!({ "query": "   " }))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn zero_top_k_is_a_bad_request() {
    let app = test_app!();

    let request = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(serde_json::json!({ "query": "detective", "top_k": 0 }))
        .to_request();

    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), 400);
}

#[actix_web::test]
async fn oversized_top_k_returns_all_survivors_without_padding() {
    let app = test_app!();

    let request = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(serde_json::json!({ "query": "detective murder", "top_k": 100 }))
        .to_request();

    let response: RecommendationResponse = test::call_and_read_body_json(&app, request).await;
    assert_eq!(response.recommendations.len(), 3);

    let mut ids: Vec<String> = response
        .recommendations
        .iter()
        .map(|r| r.book.id.clone())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[actix_web::test]
async fn sad_tone_puts_the_saddest_pool_member_first() {
    let app = test_app!();

    let request = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(serde_json::json!({
            "query": "a detective investigates a murder",
            "category": "Mystery",
            "tone": "Sad",
            "top_k": 2
        }))
        .to_request();

    let response: RecommendationResponse = test::call_and_read_body_json(&app, request).await;
    assert_eq!(response.recommendations.len(), 2);
    assert_eq!(response.recommendations[0].book.id, "9780000000001");
}

#[actix_web::test]
async fn repeated_requests_return_identical_orderings() {
    let app = test_app!();

    let body = serde_json::json!({ "query": "journey along the coast", "top_k": 3 });
    let ids = |response: &RecommendationResponse| -> Vec<String> {
        response
            .recommendations
            .iter()
            .map(|r| r.book.id.clone())
            .collect()
    };

    let first: RecommendationResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/recommendations")
            .set_json(&body)
            .to_request(),
    )
    .await;
    let second: RecommendationResponse = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/recommendations")
            .set_json(&body)
            .to_request(),
    )
    .await;

    assert_eq!(ids(&first), ids(&second));
    for pair in first.recommendations.windows(2) {
        assert!(pair[0].similarity_score >= pair[1].similarity_score);
    }
}

#[actix_web::test]
async fn vocabulary_endpoints_serve_the_ui_filters() {
    let app = test_app!();

    let categories = test::TestRequest::get()
        .uri("/api/categories")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, categories).await;
    assert_eq!(
        body["categories"],
        serde_json::json!(["All", "Fiction", "Mystery"])
    );

    let tones = test::TestRequest::get().uri("/api/tones").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, tones).await;
    assert_eq!(body["tones"][0], "All");
    assert_eq!(body["tones"].as_array().unwrap().len(), 7);
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let app = test_app!();

    let request = test::TestRequest::get().uri("/api/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(body["status"], "ok");
}
