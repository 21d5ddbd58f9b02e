//! API endpoints for the WAF decision engine.
//!
//! This module provides the HTTP surface callers use to submit requests
//! for analysis and check service health. It constructs a `Request` from
//! the JSON body and hands it to the scoring engine.

use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::ScoringEngine;
use crate::models::{Config, Decision, Request};

pub struct ApiState {
    pub engine: Arc<ScoringEngine>,
    pub config: Arc<Config>,
}

/// API configuration function for Actix-web
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(web::resource("/health").route(web::get().to(health_check)))
            .service(web::resource("/analyze").route(web::post().to(analyze_request))),
    );
}

/// Health check endpoint response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Analysis endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Identifier assigned to this analysis for log correlation
    pub id: Uuid,
    /// When the analysis ran
    pub timestamp: DateTime<Utc>,
    pub decision: Decision,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Request analysis endpoint
pub async fn analyze_request(
    state: web::Data<ApiState>,
    req: web::Json<Request>,
) -> impl Responder {
    let verdict = state.engine.analyze(&req);
    metrics::counter!("waf_decisions_total", 1, "decision" => verdict.decision.to_string());

    if verdict.decision >= Decision::Log {
        warn!(
            "[{}] {} -> {} | score={} reasons={:?}",
            verdict.decision, req.source, req.endpoint, verdict.score, verdict.reasons
        );
    }

    HttpResponse::Ok().json(AnalyzeResponse {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        decision: verdict.decision,
        score: verdict.score,
        reasons: verdict.reasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WafConfig;
    use actix_web::{test, web, App};

    fn test_state() -> web::Data<ApiState> {
        let engine = ScoringEngine::new(WafConfig::default()).unwrap();
        web::Data::new(ApiState {
            engine: Arc::new(engine),
            config: Arc::new(Config::default()),
        })
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().app_data(test_state()).configure(config)).await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_analyze_blocks_oversized_admin_request() {
        let app = test::init_service(App::new().app_data(test_state()).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/analyze")
            .set_json(Request::new("1.1.1.1", "/admin", "X".repeat(600)))
            .to_request();

        let resp: AnalyzeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.decision, Decision::Block);
        assert_eq!(resp.score, 4);
        assert_eq!(
            resp.reasons,
            vec!["Large payload", "Sensitive endpoint access"]
        );
    }

    #[actix_web::test]
    async fn test_analyze_allows_benign_request() {
        let app = test::init_service(App::new().app_data(test_state()).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/analyze")
            .set_json(Request::new("2.2.2.2", "/home", ""))
            .to_request();

        let resp: AnalyzeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp.decision, Decision::Allow);
        assert_eq!(resp.score, 0);
        assert!(resp.reasons.is_empty());
    }
}
