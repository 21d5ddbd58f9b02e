//! WAF Decision Engine
//!
//! This is the main entry point for the WAF decision engine service.
//! It initializes the scoring engine and starts the analysis API server.

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use std::time::Duration;

use waf_decision_engine::api::{self, ApiState};
use waf_decision_engine::config::load_config;
use waf_decision_engine::core::ScoringEngine;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    info!("Starting WAF Decision Engine...");

    // Load configuration
    let config = load_config().expect("Failed to load configuration");
    let config = Arc::new(config);

    // Initialize the scoring engine
    let engine = ScoringEngine::new(config.waf.clone()).expect("Failed to build scoring engine");
    let engine = Arc::new(engine);

    // Install the Prometheus metrics recorder
    PrometheusBuilder::new()
        .install()
        .expect("Failed to install Prometheus metrics recorder");

    // Periodically drop sources with no in-window history
    if config.eviction.enabled {
        let sweep_engine = engine.clone();
        let interval_seconds = config.eviction.interval_seconds;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(u64::from(
                interval_seconds,
            )));
            loop {
                interval.tick().await;
                let evicted = sweep_engine.evict_idle();
                if evicted > 0 {
                    info!(
                        "Evicted {} idle sources, {} still tracked",
                        evicted,
                        sweep_engine.tracked_sources()
                    );
                }
            }
        });
    }

    // Create API state
    let state = web::Data::new(ApiState {
        engine,
        config: config.clone(),
    });

    // Start HTTP server
    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::config))
        .bind((config.server.host.as_str(), config.server.port))?
        .run()
        .await
}
