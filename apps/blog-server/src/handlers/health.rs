//! Health check endpoint.

use actix_web::{HttpResponse, web};
use blog_core::ports::StoreStats;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub store: StoreStats,
}

/// Health check endpoint - server status plus store counters, so fail-soft
/// load recoveries and rejected writes are visible.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store = state.posts.store_stats();
    let status = if store.load_failures > 0 || store.write_failures > 0 {
        "degraded"
    } else {
        "ok"
    };

    HttpResponse::Ok().json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store,
    })
}
