//! Simulated biometric scan handlers.
//!
//! No image or fingerprint processing happens here. Face scans return the
//! photographed records among the first five stored, fingerprint scans the
//! first three outright, each with a fixed descending score ladder; empty
//! stores fall back to canned matches.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::record::RecordStatus;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

const FACE_CANDIDATE_LIMIT: usize = 5;
const FINGERPRINT_CANDIDATE_LIMIT: usize = 3;

/// One entry in a face-scan result.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaceMatch {
    pub criminal_id: u64,
    pub name: String,
    pub similarity: f64,
    pub crime_type: String,
    pub status: RecordStatus,
    pub match_quality: String,
}

/// Body returned by `POST /api/scan/face`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaceScanResponse {
    pub matches: Vec<FaceMatch>,
    pub scan_type: String,
    pub total_matches: usize,
}

/// One entry in a fingerprint-scan result.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintMatch {
    pub criminal_id: u64,
    pub name: String,
    pub match_score: f64,
    pub crime_type: String,
    pub fingerprint_quality: String,
}

/// Body returned by `POST /api/scan/fingerprint`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintScanResponse {
    pub matches: Vec<FingerprintMatch>,
    pub scan_type: String,
    pub total_matches: usize,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Simulated face recognition over the stored records.
#[utoipa::path(
    post,
    path = "/api/scan/face",
    responses(
        (status = 200, description = "Simulated matches", body = FaceScanResponse),
        (status = 401, description = "Missing bearer token")
    ),
    tags = ["scan"],
    operation_id = "scanFace",
    security(("bearer" = []))
)]
#[post("/scan/face")]
pub async fn scan_face(
    _token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<FaceScanResponse>> {
    let mut matches: Vec<FaceMatch> = state
        .records
        .head(FACE_CANDIDATE_LIMIT)
        .iter()
        .enumerate()
        .filter(|(_, record)| record.photo_path.is_some())
        .map(|(position, record)| {
            // Position in the candidate prefix drives the simulated score.
            let similarity = round2(0.7 + 0.05 * position as f64);
            FaceMatch {
                criminal_id: record.id,
                name: record.name.clone(),
                similarity,
                crime_type: record.crime_type.clone(),
                status: record.status,
                match_quality: if similarity > 0.8 { "High" } else { "Medium" }.to_owned(),
            }
        })
        .collect();

    if matches.is_empty() {
        matches = canned_face_matches();
    }

    let total_matches = matches.len();
    Ok(web::Json(FaceScanResponse {
        matches,
        scan_type: "Face Recognition".to_owned(),
        total_matches,
    }))
}

/// Simulated fingerprint matching over the stored records.
#[utoipa::path(
    post,
    path = "/api/scan/fingerprint",
    responses(
        (status = 200, description = "Simulated matches", body = FingerprintScanResponse),
        (status = 401, description = "Missing bearer token")
    ),
    tags = ["scan"],
    operation_id = "scanFingerprint",
    security(("bearer" = []))
)]
#[post("/scan/fingerprint")]
pub async fn scan_fingerprint(
    _token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<FingerprintScanResponse>> {
    let mut matches: Vec<FingerprintMatch> = state
        .records
        .head(FINGERPRINT_CANDIDATE_LIMIT)
        .iter()
        .enumerate()
        .map(|(position, record)| FingerprintMatch {
            criminal_id: record.id,
            name: record.name.clone(),
            match_score: round2(0.8 + 0.05 * position as f64),
            crime_type: record.crime_type.clone(),
            fingerprint_quality: "Good".to_owned(),
        })
        .collect();

    if matches.is_empty() {
        matches = canned_fingerprint_matches();
    }

    let total_matches = matches.len();
    Ok(web::Json(FingerprintScanResponse {
        matches,
        scan_type: "Fingerprint".to_owned(),
        total_matches,
    }))
}

fn canned_face_matches() -> Vec<FaceMatch> {
    vec![
        FaceMatch {
            criminal_id: 1,
            name: "John Doe".to_owned(),
            similarity: 0.85,
            crime_type: "Theft".to_owned(),
            status: RecordStatus::Wanted,
            match_quality: "High".to_owned(),
        },
        FaceMatch {
            criminal_id: 2,
            name: "Jane Smith".to_owned(),
            similarity: 0.72,
            crime_type: "Fraud".to_owned(),
            status: RecordStatus::Arrested,
            match_quality: "Medium".to_owned(),
        },
    ]
}

fn canned_fingerprint_matches() -> Vec<FingerprintMatch> {
    vec![FingerprintMatch {
        criminal_id: 1,
        name: "Test Criminal".to_owned(),
        match_score: 0.92,
        crime_type: "Theft".to_owned(),
        fingerprint_quality: "Excellent".to_owned(),
    }]
}
