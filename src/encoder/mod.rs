//! Builders for canonical QR content: the exact string that gets encoded.

pub mod url;
pub mod vcard;
pub mod wifi;

pub use self::url::normalize_url;
pub use self::vcard::generate_vcard;
pub use self::wifi::{WifiConfig, WifiSecurity, encode_sms, encode_wifi};
