//! Server construction and route wiring.

mod config;

pub use config::Cli;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer, Scope};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{predict, records, scan, stats, system, users};

/// Every `/api` endpoint mounted on one scope, in the order the banner
/// advertises them.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(system::test_probe)
        .service(users::register)
        .service(users::login)
        .service(records::list_records)
        .service(records::get_record)
        .service(records::create_record)
        .service(records::delete_record)
        .service(scan::scan_face)
        .service(scan::scan_fingerprint)
        .service(predict::predict)
        .service(predict::train_models)
        .service(stats::get_stats)
}

/// Assemble the application from shared state.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(state)
        .service(system::home)
        .service(api_scope());

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server on the given address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(bind_addr: SocketAddr, state: HttpState) -> std::io::Result<Server> {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || build_app(data.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
