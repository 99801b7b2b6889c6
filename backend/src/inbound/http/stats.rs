//! Aggregate statistics handler.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Body returned by `GET /api/stats`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_criminals: usize,
    pub wanted: usize,
    pub arrested: usize,
    pub high_risk: usize,
    pub recently_added: usize,
    pub system_status: String,
}

/// Tally the stored records by status and danger level.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Aggregate counts", body = StatsResponse),
        (status = 401, description = "Missing bearer token")
    ),
    tags = ["stats"],
    operation_id = "getStats",
    security(("bearer" = []))
)]
#[get("/stats")]
pub async fn get_stats(
    _token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<StatsResponse>> {
    let tallies = state.records.stats();
    Ok(web::Json(StatsResponse {
        total_criminals: tallies.total,
        wanted: tallies.wanted,
        arrested: tallies.arrested,
        high_risk: tallies.high_risk,
        recently_added: tallies.total.min(5),
        system_status: "Operational".to_owned(),
    }))
}
