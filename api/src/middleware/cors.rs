//! CORS configuration for the admin dashboard.
//!
//! Development allows any origin so a locally served dashboard can reach the
//! API. Other environments only accept origins listed in
//! `ServerConfig::allowed_origins`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use av_shared::{Environment, ServerConfig};

/// Preflight cache lifetime in seconds
const MAX_AGE: usize = 3600;

pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(MAX_AGE);

    if environment.is_development() {
        tracing::info!("Configuring permissive CORS for development");
        return cors.allow_any_origin();
    }

    server
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| {
            tracing::info!(origin = %origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}
