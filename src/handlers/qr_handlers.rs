use actix_web::{HttpResponse, Responder, Result, error, web};
use log::info;
use validator::Validate;

use crate::generation::engine::{CONTENT_REQUIRED, SIZE_REQUIRED};
use crate::models::qr_code::{QrCodeRecord, RecordMetadata};
use crate::state::app_state::AppState;
use crate::structs::qr_request::{ContentInput, CreateQrRequest, CreateQrResponse};

/// Validate user input without generating anything
pub async fn validate_content(web::Json(input): web::Json<ContentInput>) -> impl Responder {
    HttpResponse::Ok().json(input.validate())
}

/// Validate, encode and render a QR code, optionally saving it to history
pub async fn generate_qr(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<CreateQrRequest>,
) -> Result<impl Responder> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let validation = req.input.validate();
    if !validation.valid {
        return Ok(HttpResponse::BadRequest().json(validation));
    }

    let content = validation.sanitized.clone().unwrap_or_default();
    let request = req.generation_request(content);
    let result = app_state.engine.generate(&request).await;

    if !result.success {
        let rejected = matches!(
            result.error.as_deref(),
            Some(CONTENT_REQUIRED | SIZE_REQUIRED)
        );
        let mut status = if rejected {
            HttpResponse::BadRequest()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        return Ok(status.json(CreateQrResponse {
            result,
            validation,
            record: None,
        }));
    }

    let mut record = None;
    if req.save {
        let mut metadata = RecordMetadata::new(request.size, request.error_correction_level);
        metadata.name = req.name.clone();
        metadata.tags = req.tags.clone();
        metadata.favorite = req.favorite;

        let new_record = QrCodeRecord::new(
            request.content.clone(),
            request.content_type,
            result.data_url.clone().unwrap_or_default(),
            metadata,
        );
        app_state
            .storage
            .save(&new_record)
            .await
            .map_err(|e| error::ErrorInternalServerError(format!("Database error: {}", e)))?;
        info!("Saved QR code {}", new_record.id);
        record = Some(new_record);
    }

    let response = CreateQrResponse {
        result,
        validation,
        record,
    };
    if response.record.is_some() {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

/// Registered generation strategies in the order they are tried
pub async fn list_strategies(app_state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(app_state.engine.strategies())
}
