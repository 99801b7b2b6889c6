//! Bearer-token gate for protected endpoints.
//!
//! The gate checks that a non-empty token is present and nothing else: the
//! content is never compared against the tokens minted at login. It is a
//! placeholder, not a security boundary; real authentication needs a
//! validated session or signed token in its place.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use crate::domain::Error;

/// Extractor asserting a bearer token is present on the request.
///
/// A raw `Authorization` value without the `Bearer ` prefix also passes;
/// only presence is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// The presented token, with any `Bearer ` prefix removed.
    pub fn token(&self) -> &str {
        self.0.as_str()
    }

    fn from_headers(req: &HttpRequest) -> Result<Self, Error> {
        let Some(value) = req.headers().get(header::AUTHORIZATION) else {
            return Err(Error::unauthorized("missing bearer token"));
        };
        let value = value
            .to_str()
            .map_err(|_| Error::unauthorized("malformed authorization header"))?;
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
        if token.is_empty() {
            return Err(Error::unauthorized("missing bearer token"));
        }
        Ok(Self(token.to_owned()))
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    async fn gated(token: BearerToken) -> HttpResponse {
        HttpResponse::Ok().body(token.token().to_owned())
    }

    fn gated_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new().route("/gated", web::get().to(gated))
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorised() {
        let app = test::init_service(gated_app()).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/gated").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_token_is_unauthorised() {
        let app = test::init_service(gated_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/gated")
                .insert_header(("Authorization", "Bearer   "))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn any_nonempty_token_passes() {
        let app = test::init_service(gated_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/gated")
                .insert_header(("Authorization", "Bearer not-a-real-token"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "not-a-real-token");
    }

    #[actix_web::test]
    async fn prefixless_header_also_passes() {
        let app = test::init_service(gated_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/gated")
                .insert_header(("Authorization", "rawtoken"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
