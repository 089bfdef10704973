pub mod qr_request;
pub mod record_request;
