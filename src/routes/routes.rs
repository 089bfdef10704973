use actix_web::web;

use crate::handlers::health_handlers::health_check;
use crate::handlers::qr_handlers::{generate_qr, list_strategies, validate_content};
use crate::handlers::record_handlers::{
    clear_codes, code_stats, delete_code, export_codes, get_code, import_codes, list_codes,
    update_code,
};

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health/check", web::get().to(health_check))
            .route("/validate", web::post().to(validate_content))
            .route("/qr", web::post().to(generate_qr))
            .route("/strategies", web::get().to(list_strategies))
            // Static segments are registered before "/codes/{id}"
            .service(
                web::scope("/codes")
                    .route("", web::get().to(list_codes))
                    .route("", web::delete().to(clear_codes))
                    .route("/export", web::get().to(export_codes))
                    .route("/import", web::post().to(import_codes))
                    .route("/stats", web::get().to(code_stats))
                    .route("/{id}", web::get().to(get_code))
                    .route("/{id}", web::put().to(update_code))
                    .route("/{id}", web::delete().to(delete_code)),
            ),
    );
}
