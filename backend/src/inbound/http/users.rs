//! Registration and login handlers.
//!
//! ```text
//! POST /api/register {"username":"investigator2","password":"pw"}
//! POST /api/login    {"username":"admin","password":"admin2024","specialCode":"CIS-ADMIN-2024"}
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::credentials::{CredentialsValidationError, Role, SubmittedCredentials};
use crate::domain::Error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::outbound::persistence::mint_access_token;

/// Request body shared by `POST /api/register` and `POST /api/login`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_code: Option<String>,
}

impl TryFrom<CredentialsRequest> for SubmittedCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: CredentialsRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.username,
            &value.password,
            value.special_code.as_deref(),
        )
    }
}

/// Body returned after a successful registration.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub username: String,
    pub role: Role,
}

/// Body returned after a successful login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub username: String,
    pub role: Role,
}

/// Create a new account.
///
/// Supplying a special code marks the account as admin; the code doubles as
/// a login check thereafter.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let submission =
        SubmittedCredentials::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let credential = state.credentials.register(submission)?;
    info!(username = %credential.username, role = ?credential.role, "account registered");
    Ok(HttpResponse::Created().json(RegisterResponse {
        username: credential.username,
        role: credential.role,
    }))
}

/// Authenticate and mint a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let submission =
        SubmittedCredentials::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let credential = state.credentials.verify(&submission)?;
    let access_token = mint_access_token(&credential.username);
    info!(username = %credential.username, "login succeeded");
    Ok(web::Json(LoginResponse {
        access_token,
        username: credential.username,
        role: credential.role,
    }))
}

fn map_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyUsername => {
            Error::invalid_request("username must not be empty")
                .with_details(json!({ "field": "username", "code": "empty_username" }))
        }
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}
