//! CORS middleware configuration for cross-origin requests.
//!
//! The configuration is environment-aware: development allows any origin
//! for easy local testing, production restricts origins to the list
//! configured through the environment.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

/// Creates a CORS middleware instance configured for the current environment.
///
/// # Environment Variables
/// - `ENVIRONMENT`: Set to "production" for production settings
/// - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (production only)
/// - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)
pub fn create_cors() -> Cors {
    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
    let max_age = env::var("CORS_MAX_AGE")
        .unwrap_or_else(|_| "3600".to_string())
        .parse::<usize>()
        .unwrap_or(3600);

    if environment == "production" {
        create_production_cors(max_age)
    } else {
        create_development_cors(max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
}

fn create_production_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age);

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(|s| s.trim()) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_development_cors() {
        env::set_var("ENVIRONMENT", "development");
        let _cors = create_cors();
        env::remove_var("ENVIRONMENT");
    }

    #[test]
    fn test_create_production_cors() {
        env::set_var("ENVIRONMENT", "production");
        env::set_var("ALLOWED_ORIGINS", "https://app.otprelay.dev");
        let _cors = create_cors();
        env::remove_var("ENVIRONMENT");
        env::remove_var("ALLOWED_ORIGINS");
    }

    #[test]
    fn test_cors_max_age_parsing() {
        env::set_var("CORS_MAX_AGE", "7200");
        let _cors = create_cors();
        env::remove_var("CORS_MAX_AGE");

        env::set_var("CORS_MAX_AGE", "invalid");
        let _cors = create_cors();
        env::remove_var("CORS_MAX_AGE");
    }
}
