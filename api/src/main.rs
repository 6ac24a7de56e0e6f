use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use otp_api::middleware;
use otp_api::routes;
use otp_api::routes::otp::AppState;

use otp_core::services::expiry::{ExpirySweeper, SweepConfig};
use otp_core::services::issuance::{IssuanceConfig, IssuanceService};
use otp_core::store::OtpStore;
use otp_infra::mail::{create_mail_service, MailerAdapter};
use otp_infra::sheet::{SheetClient, SheetSyncAdapter};
use otp_shared::config::{OtpConfig, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting OtpRelay API Server");

    // Load configuration
    let server_config = ServerConfig::from_env();
    let otp_config = OtpConfig::from_env();
    let infra_config = otp_infra::load_config();

    // Wire up services
    let store = Arc::new(OtpStore::new());

    let mail_service = create_mail_service(&infra_config.mail);
    let mailer = Arc::new(MailerAdapter::new(
        mail_service,
        infra_config.mail.subject.clone(),
    ));

    let sheet_client = SheetClient::new(infra_config.sheet.clone())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let external = Arc::new(SheetSyncAdapter::new(sheet_client));

    let issuance_service = Arc::new(IssuanceService::new(
        mailer,
        external.clone(),
        store.clone(),
        IssuanceConfig {
            validity_minutes: otp_config.validity_minutes,
            key_mapping: otp_config.key_mapping,
        },
    ));

    // Background expiry sweep
    let sweeper = ExpirySweeper::new(
        store,
        external,
        SweepConfig {
            interval_seconds: otp_config.sweep_interval_seconds,
            enabled: otp_config.sweep_enabled,
        },
        otp_config.validity_minutes,
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    Arc::new(sweeper).start_background_task();

    let app_state = web::Data::new(AppState {
        issuance_service,
    });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || {
        let cors = middleware::cors::create_cors();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(app_state.clone())
            // Health check endpoint
            .route("/health", web::get().to(health_check))
            // API v1 routes
            .service(
                web::scope("/api/v1")
                    .service(web::scope("/otp").route(
                        "/send-code",
                        web::post().to(routes::otp::send_code::<MailerAdapter, SheetSyncAdapter>),
                    ))
                    .route("/", web::get().to(api_info)),
            )
            // Default 404 handler
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "not_found",
                    "message": "The requested resource was not found"
                }))
            }))
    })
    .bind(&bind_address)?
    .run()
    .await
}

async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "OtpRelay API v1",
        "endpoints": {
            "health": "/health",
            "otp": {
                "send_code": {
                    "path": "/api/v1/otp/send-code",
                    "method": "POST",
                    "description": "Send a verification code by email and mirror it to the sheet store",
                    "request_body": {
                        "email": "string (valid email address)"
                    },
                    "responses": {
                        "200": "Code sent (status 'partial' when the mirror is stale)",
                        "400": "Invalid email address",
                        "503": "Mail delivery unavailable"
                    }
                }
            }
        }
    }))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "otp-relay-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
