//! Service banner and liveness probe.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inbound::http::state::HttpState;

/// Body returned by `GET /`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// Body returned by `GET /api/test`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestResponse {
    pub status: String,
    pub users: usize,
    pub criminals: usize,
    pub timestamp: DateTime<Utc>,
}

/// Service banner listing the available endpoints.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = BannerResponse)),
    tags = ["system"],
    operation_id = "banner",
    security([])
)]
#[get("/")]
pub async fn home() -> web::Json<BannerResponse> {
    web::Json(BannerResponse {
        message: "Criminal Investigation System API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        endpoints: [
            "/api/test - System test",
            "/api/login - User login",
            "/api/register - User registration",
            "/api/criminals - Criminal database",
            "/api/predict - Rule-based prediction",
            "/api/scan/face - Face scanning (simulated)",
            "/api/scan/fingerprint - Fingerprint scanning (simulated)",
            "/api/stats - Aggregate statistics",
        ]
        .map(str::to_owned)
        .to_vec(),
    })
}

/// Liveness probe with store counts.
#[utoipa::path(
    get,
    path = "/api/test",
    responses((status = 200, description = "Service is up", body = TestResponse)),
    tags = ["system"],
    operation_id = "testProbe",
    security([])
)]
#[get("/test")]
pub async fn test_probe(state: web::Data<HttpState>) -> web::Json<TestResponse> {
    web::Json(TestResponse {
        status: "Operational".to_owned(),
        users: state.credentials.len(),
        criminals: state.records.len(),
        timestamp: Utc::now(),
    })
}
