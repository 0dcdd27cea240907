use crate::{
    config::Config,
    error::Result,
    ml::HashingEmbedder,
    routes::api_routes,
    services::{RecommendationService, RecordStore},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use std::net::TcpListener;
use std::path::Path;
use std::sync::Arc;

pub struct Application {
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("0.0.0.0:{}", self.config.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!(
            "Starting server at http://{}:{}",
            self.config.host, self.config.port
        );

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // The first index build is part of startup: the server refuses
        // to come up without a serving snapshot.
        let recommendation_service = web::Data::new(self.build_service()?);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }

    fn build_service(&self) -> Result<RecommendationService> {
        info!("Loading corpus from {}", self.config.books_file);
        let store = RecordStore::from_csv_path(Path::new(&self.config.books_file))?;

        let embedder = Arc::new(HashingEmbedder::new(
            self.config.embedding_dimension,
            self.config.max_query_chars,
        ));

        info!("Building vector index over {} descriptions", store.len());
        RecommendationService::new(embedder, store, self.config.search_settings())
    }
}
