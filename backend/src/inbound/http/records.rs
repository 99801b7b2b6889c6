//! Criminal record CRUD handlers.
//!
//! The listing endpoint deliberately returns a reduced summary while the
//! by-id endpoint exposes the full record; the divergence is part of the
//! API contract, not an access-control measure.

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::domain::record::{
    CrimeSeverity, CriminalRecord, DangerLevel, PredictedCrime, RecordDraft, RecordStatus,
    RecordSummary, RecordValidationError,
};
use crate::domain::Error;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::outbound::persistence::StoreError;

/// Multipart intake form for a new record. Only `name` is required.
#[derive(Debug, MultipartForm)]
pub struct CriminalForm {
    pub name: Option<Text<String>>,
    pub age: Option<Text<u32>>,
    pub gender: Option<Text<String>>,
    #[multipart(rename = "crimeType")]
    pub crime_type: Option<Text<String>>,
    #[multipart(rename = "crimeSeverity")]
    pub crime_severity: Option<Text<CrimeSeverity>>,
    #[multipart(rename = "priorConvictions")]
    pub prior_convictions: Option<Text<u32>>,
    #[multipart(rename = "lastKnownLocation")]
    pub last_known_location: Option<Text<String>>,
    pub status: Option<Text<RecordStatus>>,
    pub height: Option<Text<f64>>,
    pub weight: Option<Text<f64>>,
    #[multipart(rename = "eyeColor")]
    pub eye_color: Option<Text<String>>,
    #[multipart(rename = "hairColor")]
    pub hair_color: Option<Text<String>>,
    #[multipart(rename = "scarsMarks")]
    pub scars_marks: Option<Text<String>>,
    pub photo: Option<TempFile>,
}

/// Body returned after creating a record.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordResponse {
    pub id: u64,
    pub danger_level: DangerLevel,
    pub predicted_crime_type: PredictedCrime,
    pub recidivism_score: f64,
}

/// List stored records as summaries, in insertion order.
#[utoipa::path(
    get,
    path = "/api/criminals",
    responses(
        (status = 200, description = "Record summaries", body = [RecordSummary]),
        (status = 401, description = "Missing bearer token", body = Error)
    ),
    tags = ["criminals"],
    operation_id = "listCriminals",
    security(("bearer" = []))
)]
#[get("/criminals")]
pub async fn list_records(
    _token: BearerToken,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecordSummary>>> {
    Ok(web::Json(state.records.list()))
}

/// Fetch the full record for an id.
#[utoipa::path(
    get,
    path = "/api/criminals/{id}",
    params(("id" = u64, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Full record", body = CriminalRecord),
        (status = 401, description = "Missing bearer token", body = Error),
        (status = 404, description = "Unknown record id", body = Error)
    ),
    tags = ["criminals"],
    operation_id = "getCriminal",
    security(("bearer" = []))
)]
#[get("/criminals/{id}")]
pub async fn get_record(
    _token: BearerToken,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<CriminalRecord>> {
    let id = path.into_inner();
    state
        .records
        .get(id)
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("no criminal record with id {id}")))
}

/// Create a record from the multipart intake form.
///
/// Derived fields are computed here, once; an optional `photo` part is
/// written to the upload directory before the record is persisted.
#[utoipa::path(
    post,
    path = "/api/criminals",
    responses(
        (status = 201, description = "Record created", body = CreateRecordResponse),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "Missing bearer token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["criminals"],
    operation_id = "createCriminal",
    security(("bearer" = []))
)]
#[post("/criminals")]
pub async fn create_record(
    _token: BearerToken,
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<CriminalForm>,
) -> ApiResult<HttpResponse> {
    let name = form.name.map(Text::into_inner).unwrap_or_default();
    let mut draft = RecordDraft::new(&name).map_err(map_record_validation_error)?;

    draft.age = form.age.map(Text::into_inner);
    draft.gender = form.gender.map(Text::into_inner);
    draft.crime_type = form.crime_type.map(Text::into_inner);
    if let Some(severity) = form.crime_severity {
        draft.crime_severity = severity.into_inner();
    }
    draft.prior_convictions = form.prior_convictions.map(Text::into_inner).unwrap_or(0);
    draft.last_known_location = form.last_known_location.map(Text::into_inner);
    if let Some(status) = form.status {
        draft.status = status.into_inner();
    }
    draft.height = form.height.map(Text::into_inner);
    draft.weight = form.weight.map(Text::into_inner);
    draft.eye_color = form.eye_color.map(Text::into_inner);
    draft.hair_color = form.hair_color.map(Text::into_inner);
    draft.scars_marks = form.scars_marks.map(Text::into_inner);

    if let Some(photo) = form.photo {
        let bytes = std::fs::read(photo.file.path()).map_err(|err| {
            error!(error = %err, "failed to read uploaded photo");
            Error::internal("failed to read uploaded photo")
        })?;
        let stored = state.photos.store(draft.name(), &bytes).map_err(|err| {
            error!(error = %err, "failed to store uploaded photo");
            Error::internal("failed to store uploaded photo")
        })?;
        draft.photo_path = Some(stored);
    }

    let record = state.records.add(draft).map_err(map_store_error)?;
    info!(id = record.id, name = %record.name, "criminal record created");
    Ok(HttpResponse::Created().json(CreateRecordResponse {
        id: record.id,
        danger_level: record.danger_level,
        predicted_crime_type: record.predicted_crime_type,
        recidivism_score: record.recidivism_score,
    }))
}

/// Delete a record by id.
#[utoipa::path(
    delete,
    path = "/api/criminals/{id}",
    params(("id" = u64, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 401, description = "Missing bearer token", body = Error),
        (status = 404, description = "Unknown record id", body = Error)
    ),
    tags = ["criminals"],
    operation_id = "deleteCriminal",
    security(("bearer" = []))
)]
#[delete("/criminals/{id}")]
pub async fn delete_record(
    _token: BearerToken,
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    if state.records.delete(id).map_err(map_store_error)? {
        info!(id, "criminal record deleted");
        Ok(HttpResponse::Ok().json(json!({ "message": "criminal record deleted" })))
    } else {
        Err(Error::not_found(format!("no criminal record with id {id}")))
    }
}

fn map_record_validation_error(err: RecordValidationError) -> Error {
    match err {
        RecordValidationError::EmptyName => Error::invalid_request("name must not be empty")
            .with_details(json!({ "field": "name", "code": "empty_name" })),
    }
}

pub(crate) fn map_store_error(err: StoreError) -> Error {
    error!(error = %err, "record store operation failed");
    Error::internal("record store failure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{bearer, test_state, MultipartBuilder, TestContext};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use serde_json::Value;

    fn test_app(
        ctx: &TestContext,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new().app_data(ctx.state.clone()).service(
            web::scope("/api")
                .service(list_records)
                .service(get_record)
                .service(create_record)
                .service(delete_record),
        )
    }

    async fn create_subject(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        name: &str,
    ) -> Value {
        let (content_type, body) = MultipartBuilder::new()
            .text("name", name)
            .text("age", "28")
            .text("crimeSeverity", "High")
            .text("priorConvictions", "2")
            .text("lastKnownLocation", "Dockside")
            .finish();
        let res = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/criminals")
                .insert_header(bearer())
                .insert_header(("Content-Type", content_type))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        actix_test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn create_returns_derived_fields() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;
        let body = create_subject(&app, "John Doe").await;

        assert_eq!(body.get("id").and_then(Value::as_u64), Some(1));
        assert_eq!(body.get("dangerLevel").and_then(Value::as_str), Some("High"));
        assert_eq!(
            body.get("predictedCrimeType").and_then(Value::as_str),
            Some("Assault")
        );
        assert_eq!(
            body.get("recidivismScore").and_then(Value::as_f64),
            Some(0.4)
        );
    }

    #[actix_web::test]
    async fn created_record_is_fetchable_in_full() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;
        create_subject(&app, "John Doe").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/criminals/1")
                .insert_header(bearer())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body.get("name").and_then(Value::as_str), Some("John Doe"));
        assert_eq!(
            body.get("lastKnownLocation").and_then(Value::as_str),
            Some("Dockside")
        );
        assert_eq!(body.get("priorConvictions").and_then(Value::as_u64), Some(2));
        assert!(body.get("createdAt").is_some());
    }

    #[actix_web::test]
    async fn listing_returns_summaries_only() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;
        create_subject(&app, "John Doe").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/criminals")
                .insert_header(bearer())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        let first = &body.as_array().expect("array")[0];
        assert_eq!(first.get("dangerLevel").and_then(Value::as_str), Some("High"));
        // The summary hides the fields only the full record exposes.
        assert!(first.get("priorConvictions").is_none());
        assert!(first.get("lastKnownLocation").is_none());
    }

    #[actix_web::test]
    async fn photo_upload_is_stored_and_referenced() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;

        let (content_type, body) = MultipartBuilder::new()
            .text("name", "Jane Smith")
            .file("photo", "mugshot.jpg", "image/jpeg", b"fake-jpeg-bytes")
            .finish();
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/criminals")
                .insert_header(bearer())
                .insert_header(("Content-Type", content_type))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/criminals/1")
                .insert_header(bearer())
                .to_request(),
        )
        .await;
        let record: Value = actix_test::read_body_json(res).await;
        let photo_path = record
            .get("photoPath")
            .and_then(Value::as_str)
            .expect("photo path recorded");
        assert!(photo_path.ends_with(".jpg"));
        let stored = std::fs::read(photo_path).expect("stored photo readable");
        assert_eq!(stored, b"fake-jpeg-bytes");
    }

    #[actix_web::test]
    async fn missing_name_is_invalid_request() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;

        let (content_type, body) = MultipartBuilder::new().text("age", "30").finish();
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/criminals")
                .insert_header(bearer())
                .insert_header(("Content-Type", content_type))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            value
                .get("details")
                .and_then(|d| d.get("code"))
                .and_then(Value::as_str),
            Some("empty_name")
        );
    }

    #[actix_web::test]
    async fn delete_then_fetch_is_not_found() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;
        create_subject(&app, "John Doe").await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/criminals/1")
                .insert_header(bearer())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/criminals/1")
                .insert_header(bearer())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn deleting_unknown_id_is_not_found() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/criminals/99")
                .insert_header(bearer())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn endpoints_reject_missing_token() {
        let ctx = test_state();
        let app = actix_test::init_service(test_app(&ctx)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/criminals").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
