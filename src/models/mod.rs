pub mod contact;
pub mod content;
pub mod generation;
pub mod qr_code;
pub mod validation;
