//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and schema so Swagger UI
//! (served in debug builds) and external tooling see one specification.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::credentials::Role;
use crate::domain::error::{Error, ErrorCode};
use crate::domain::record::{
    CrimeSeverity, CriminalRecord, DangerLevel, PredictedCrime, RecordStatus, RecordSummary,
};
use crate::inbound::http::predict::{PredictRequest, PredictResponse};
use crate::inbound::http::records::CreateRecordResponse;
use crate::inbound::http::scan::{
    FaceMatch, FaceScanResponse, FingerprintMatch, FingerprintScanResponse,
};
use crate::inbound::http::stats::StatsResponse;
use crate::inbound::http::system::{BannerResponse, TestResponse};
use crate::inbound::http::users::{CredentialsRequest, LoginResponse, RegisterResponse};

/// Enrich the generated document with the bearer security scheme.
///
/// The scheme documents the wire format only; the gate never validates
/// token contents (see `inbound::http::auth`).
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::system::home,
        crate::inbound::http::system::test_probe,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::records::list_records,
        crate::inbound::http::records::get_record,
        crate::inbound::http::records::create_record,
        crate::inbound::http::records::delete_record,
        crate::inbound::http::scan::scan_face,
        crate::inbound::http::scan::scan_fingerprint,
        crate::inbound::http::predict::predict,
        crate::inbound::http::predict::train_models,
        crate::inbound::http::stats::get_stats,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        CrimeSeverity,
        RecordStatus,
        DangerLevel,
        PredictedCrime,
        CriminalRecord,
        RecordSummary,
        CreateRecordResponse,
        CredentialsRequest,
        RegisterResponse,
        LoginResponse,
        PredictRequest,
        PredictResponse,
        FaceMatch,
        FaceScanResponse,
        FingerprintMatch,
        FingerprintScanResponse,
        StatsResponse,
        BannerResponse,
        TestResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "system", description = "Banner and liveness"),
        (name = "auth", description = "Registration and login"),
        (name = "criminals", description = "Record management"),
        (name = "scan", description = "Simulated biometric scans"),
        (name = "predict", description = "Rule-based prediction"),
        (name = "stats", description = "Aggregate statistics"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_includes_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/api/test",
            "/api/register",
            "/api/login",
            "/api/criminals",
            "/api/criminals/{id}",
            "/api/scan/face",
            "/api/scan/fingerprint",
            "/api/predict",
            "/api/train-models",
            "/api/stats",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }
}
