//! Ad-hoc prediction handlers.
//!
//! `POST /api/predict` runs the rule classifier over caller-supplied
//! features; `POST /api/train-models` acknowledges a training request that
//! trains nothing, because the "models" are fixed rule tables.

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::classifier;
use crate::domain::record::{CrimeSeverity, DangerLevel, PredictedCrime};
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Feature set accepted by the prediction endpoint; every field defaults.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior_convictions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crime_severity: Option<CrimeSeverity>,
}

/// Classifier output for an ad-hoc feature set.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub danger_level: DangerLevel,
    pub predicted_crime_type: PredictedCrime,
    pub recidivism_risk: DangerLevel,
    pub confidence: String,
    pub ai_models: Vec<String>,
    pub features_analyzed: Vec<String>,
}

/// Run the rule classifier over submitted features.
#[utoipa::path(
    post,
    path = "/api/predict",
    request_body = PredictRequest,
    responses(
        (status = 200, description = "Classifier output", body = PredictResponse),
        (status = 401, description = "Missing bearer token")
    ),
    tags = ["predict"],
    operation_id = "predict",
    security(("bearer" = []))
)]
#[post("/predict")]
pub async fn predict(
    _token: BearerToken,
    state: web::Data<HttpState>,
    payload: web::Json<PredictRequest>,
) -> ApiResult<web::Json<PredictResponse>> {
    let request = payload.into_inner();
    let age = request.age.unwrap_or(classifier::DEFAULT_AGE);
    let priors = request.prior_convictions.unwrap_or(0);
    let severity = request.crime_severity.unwrap_or_default();

    // Confidence is a record-count heuristic, not a statistical measure.
    let confidence = if state.records.len() > 10 { "High" } else { "Medium" };

    Ok(web::Json(PredictResponse {
        danger_level: classifier::risk_level(priors, severity),
        predicted_crime_type: classifier::predicted_crime_type(age),
        recidivism_risk: classifier::recidivism_risk(priors),
        confidence: confidence.to_owned(),
        ai_models: vec!["Decision Tree".to_owned(), "Naive Bayes".to_owned()],
        features_analyzed: vec![
            "age".to_owned(),
            "gender".to_owned(),
            "priorConvictions".to_owned(),
            "crimeSeverity".to_owned(),
        ],
    }))
}

/// Acknowledge a model-training request.
///
/// The predictors are rule tables; nothing is fitted and nothing changes.
#[utoipa::path(
    post,
    path = "/api/train-models",
    responses(
        (status = 200, description = "Canned training acknowledgement"),
        (status = 401, description = "Missing bearer token")
    ),
    tags = ["predict"],
    operation_id = "trainModels",
    security(("bearer" = []))
)]
#[post("/train-models")]
pub async fn train_models(
    _token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "models trained",
        "decisionTreeTrained": true,
        "naiveBayesTrained": true,
        "trainingDataSize": state.records.len(),
        "algorithms": ["Rule-based Decision Tree", "Rule-based Naive Bayes"],
        "accuracy": "85% (simulated)",
    })))
}
