use actix_web::{web, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::otp::{SendCodeRequest, SendCodeResponse};

use otp_core::errors::DomainError;
use otp_core::services::issuance::{
    ExternalStoreTrait, IssuanceService, IssueOutcome, MailerTrait,
};
use otp_shared::types::response::{DetailedResponse, ErrorDetail, ResponseMeta, ResponseStatus};
use otp_shared::utils::mask_email;

/// Application state that holds shared services
pub struct AppState<M, X>
where
    M: MailerTrait,
    X: ExternalStoreTrait,
{
    pub issuance_service: Arc<IssuanceService<M, X>>,
}

/// Handler for POST /api/v1/otp/send-code
///
/// Issues a verification code for the given email address: the code is
/// mailed to the address, recorded locally, and mirrored into the
/// external sheet.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "success",
///     "data": {
///         "message": "Verification code sent successfully. Please check your email.",
///         "expires_at": "2025-08-14T10:03:00Z"
///     },
///     "meta": {
///         "timestamp": "2025-08-14T10:00:00Z",
///         "version": "v1",
///         "request_id": "550e8400-e29b-41d4-a716-446655440000"
///     }
/// }
/// ```
///
/// A stale external mirror is reported as `"status": "partial"` with the
/// same data payload; the delivered code is still valid.
pub async fn send_code<M, X>(
    state: web::Data<AppState<M, X>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    M: MailerTrait + 'static,
    X: ExternalStoreTrait + 'static,
{
    let request_id = Uuid::new_v4().to_string();
    let start_time = std::time::Instant::now();

    log::info!(
        "[{}] Processing send_code request for email: {}",
        request_id,
        mask_email(&request.email)
    );

    // Validate request data
    if let Err(validation_errors) = request.0.validate() {
        let mut field_errors = HashMap::new();
        for (field, errors) in validation_errors.field_errors() {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            field_errors.insert(field.to_string(), messages);
        }

        log::warn!(
            "[{}] Validation failed for send_code request: {:?}",
            request_id,
            field_errors
        );

        let mut meta = ResponseMeta::new(request_id);
        meta.response_time_ms = Some(start_time.elapsed().as_millis() as u64);

        return HttpResponse::BadRequest().json(DetailedResponse {
            status: ResponseStatus::Error,
            data: None::<()>,
            meta,
            error: Some(ErrorDetail {
                code: "INVALID_IDENTITY".to_string(),
                message: "Invalid request data. Please check the email address.".to_string(),
                fields: Some(field_errors),
                context: None,
            }),
        });
    }

    match state.issuance_service.issue_code(&request.email).await {
        Ok(outcome) => {
            let receipt = outcome.receipt();

            log::info!(
                "[{}] Verification code sent to: {}, message_id: {}, mirrored: {}",
                request_id,
                mask_email(&request.email),
                receipt.message_id,
                outcome.is_mirrored()
            );

            let data = SendCodeResponse {
                message: "Verification code sent successfully. Please check your email."
                    .to_string(),
                expires_at: receipt.expires_at,
            };

            let mut meta = ResponseMeta::new(request_id);
            meta.response_time_ms = Some(start_time.elapsed().as_millis() as u64);
            meta.extra.insert(
                "message_id".to_string(),
                serde_json::json!(receipt.message_id),
            );

            match outcome {
                IssueOutcome::Acknowledged(_) => HttpResponse::Ok().json(DetailedResponse {
                    status: ResponseStatus::Success,
                    data: Some(data),
                    meta,
                    error: None,
                }),
                // Delivered and recorded; only the mirror is stale. The
                // caller gets the code either way, so this is not an error
                // status.
                IssueOutcome::MirrorFailed { failure, .. } => {
                    HttpResponse::Ok().json(DetailedResponse {
                        status: ResponseStatus::Partial,
                        data: Some(data),
                        meta,
                        error: Some(ErrorDetail {
                            code: "SYNC_ERROR".to_string(),
                            message: failure.to_string(),
                            fields: None,
                            context: None,
                        }),
                    })
                }
            }
        }
        Err(error) => {
            log::error!(
                "[{}] Failed to send verification code to: {}, error: {:?}",
                request_id,
                mask_email(&request.email),
                error
            );

            let mut meta = ResponseMeta::new(request_id);
            meta.response_time_ms = Some(start_time.elapsed().as_millis() as u64);

            let response = DetailedResponse {
                status: ResponseStatus::Error,
                data: None::<()>,
                meta,
                error: Some(ErrorDetail {
                    code: error.error_code().to_string(),
                    message: error.to_string(),
                    fields: None,
                    context: None,
                }),
            };

            match error {
                DomainError::Validation(_) => HttpResponse::BadRequest().json(response),
                DomainError::Delivery { .. } => HttpResponse::ServiceUnavailable().json(response),
                DomainError::Sync(_) | DomainError::Internal { .. } => {
                    HttpResponse::InternalServerError().json(response)
                }
            }
        }
    }
}
