//! Public QR rendering services. The image is the service URL itself, so
//! nothing is fetched here; the browser or client loads it when displayed.

use async_trait::async_trait;

use crate::generation::error::GenerationError;
use crate::generation::render::{self, DEFAULT_MARGIN};
use crate::generation::strategy::GenerationStrategy;
use crate::models::generation::{GenerationRequest, GenerationResult};
use crate::state::environment::Environment;

/// Longest request URL the services reliably accept.
pub const MAX_REQUEST_URL_LENGTH: usize = 4096;

pub const QR_SERVER_NAME: &str = "qr-server";
pub const GOOGLE_CHARTS_NAME: &str = "google-charts";

const QR_SERVER_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const GOOGLE_CHARTS_ENDPOINT: &str = "https://chart.googleapis.com/chart";

fn check_length(url: String) -> Result<String, GenerationError> {
    if url.len() > MAX_REQUEST_URL_LENGTH {
        return Err(GenerationError::UrlTooLong(url.len()));
    }
    Ok(url)
}

pub fn qr_server_url(request: &GenerationRequest) -> Result<String, GenerationError> {
    let (dark, light) = render::colors(request)?;
    check_length(format!(
        "{}?size={size}x{size}&data={}&ecc={}&margin={}&color={}&bgcolor={}&format=png",
        QR_SERVER_ENDPOINT,
        urlencoding::encode(&request.content),
        request.error_correction_level,
        request.margin.unwrap_or(DEFAULT_MARGIN),
        render::hex(dark),
        render::hex(light),
        size = request.size,
    ))
}

/// Google Charts has no colour parameters, so branding is ignored.
pub fn google_charts_url(request: &GenerationRequest) -> Result<String, GenerationError> {
    check_length(format!(
        "{}?cht=qr&chs={size}x{size}&chl={}&chld={}%7C{}&choe=UTF-8",
        GOOGLE_CHARTS_ENDPOINT,
        urlencoding::encode(&request.content),
        request.error_correction_level,
        request.margin.unwrap_or(DEFAULT_MARGIN),
        size = request.size,
    ))
}

/// A strategy backed by one URL-building function.
pub struct RemoteStrategy {
    name: &'static str,
    priority: i32,
    environment: Environment,
    build_url: fn(&GenerationRequest) -> Result<String, GenerationError>,
}

impl RemoteStrategy {
    pub fn qr_server(environment: Environment) -> Self {
        Self {
            name: QR_SERVER_NAME,
            priority: 3,
            environment,
            build_url: qr_server_url,
        }
    }

    pub fn google_charts(environment: Environment) -> Self {
        Self {
            name: GOOGLE_CHARTS_NAME,
            priority: 4,
            environment,
            build_url: google_charts_url,
        }
    }
}

#[async_trait]
impl GenerationStrategy for RemoteStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn is_available(&self) -> bool {
        self.environment.network_available
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        match (self.build_url)(request) {
            Ok(url) => GenerationResult::success(self.name, url.clone(), Some(url), request),
            Err(e) => GenerationResult::strategy_failure(self.name, e.to_string()),
        }
    }
}
