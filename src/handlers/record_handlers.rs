use actix_web::{HttpResponse, Responder, Result, error, web};

use crate::models::qr_code::{QrCodeRecord, RecordPatch};
use crate::state::app_state::AppState;
use crate::storage::StorageError;
use crate::structs::record_request::ListQuery;

fn storage_error(e: StorageError) -> error::Error {
    match e {
        StorageError::NotFound(_) => error::ErrorNotFound(e.to_string()),
        _ => error::ErrorInternalServerError(format!("Storage error: {}", e)),
    }
}

pub async fn list_codes(
    app_state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<impl Responder> {
    let records = app_state
        .storage
        .list(&query.into_inner().into())
        .await
        .map_err(storage_error)?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn get_code(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let id = path.into_inner();
    match app_state.storage.get(&id).await.map_err(storage_error)? {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Record not found"
        }))),
    }
}

pub async fn update_code(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
    web::Json(patch): web::Json<RecordPatch>,
) -> Result<impl Responder> {
    let id = path.into_inner();
    let record = app_state
        .storage
        .update(&id, patch)
        .await
        .map_err(storage_error)?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn delete_code(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let id = path.into_inner();
    app_state.storage.delete(&id).await.map_err(storage_error)?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn clear_codes(app_state: web::Data<AppState>) -> Result<impl Responder> {
    app_state.storage.clear().await.map_err(storage_error)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Full snapshot, suitable for `import_codes`
pub async fn export_codes(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let records = app_state.storage.export().await.map_err(storage_error)?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn import_codes(
    app_state: web::Data<AppState>,
    web::Json(records): web::Json<Vec<QrCodeRecord>>,
) -> Result<impl Responder> {
    let imported = app_state
        .storage
        .import(&records)
        .await
        .map_err(storage_error)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "imported": imported })))
}

pub async fn code_stats(app_state: web::Data<AppState>) -> Result<impl Responder> {
    let stats = app_state.storage.get_stats().await.map_err(storage_error)?;
    Ok(HttpResponse::Ok().json(stats))
}
