//! Helpers shared by the strategies: colours, QR matrices and data URIs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;

use crate::generation::error::GenerationError;
use crate::models::generation::GenerationRequest;

/// Quiet zone in modules when the request does not set a margin.
pub const DEFAULT_MARGIN: u32 = 4;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];

/// Parse "#rrggbb" or "#rgb" (leading '#' optional).
pub fn parse_hex_color(value: &str) -> Result<Rgb, GenerationError> {
    let invalid = || GenerationError::InvalidColor(value.to_string());
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

pub fn hex(color: Rgb) -> String {
    format!("{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// Foreground and background for the request, black on white by default.
pub fn colors(request: &GenerationRequest) -> Result<(Rgb, Rgb), GenerationError> {
    let Some(colors) = request.colors() else {
        return Ok((BLACK, WHITE));
    };
    let dark = match colors.foreground.as_deref() {
        Some(value) => parse_hex_color(value)?,
        None => BLACK,
    };
    let light = match colors.background.as_deref() {
        Some(value) => parse_hex_color(value)?,
        None => WHITE,
    };
    Ok((dark, light))
}

pub fn encode(request: &GenerationRequest) -> Result<QrCode, GenerationError> {
    Ok(QrCode::with_error_correction_level(
        request.content.as_bytes(),
        request.error_correction_level.into(),
    )?)
}

pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Decode a base64 data URI, or bare base64, into raw bytes.
pub fn decode_data_url(value: &str) -> Result<Vec<u8>, GenerationError> {
    let payload = match value.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => {
            if !header.ends_with(";base64") {
                return Err(GenerationError::InvalidLogo(
                    "only base64 data URIs are supported".into(),
                ));
            }
            payload
        }
        _ => value,
    };
    STANDARD
        .decode(payload.trim())
        .map_err(|e| GenerationError::InvalidLogo(e.to_string()))
}
