use async_trait::async_trait;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use log::warn;
use std::io::Cursor;
use tokio::sync::OnceCell;

use crate::generation::error::GenerationError;
use crate::generation::render::{self, DEFAULT_MARGIN, Rgb};
use crate::generation::strategy::GenerationStrategy;
use crate::models::content::ContentType;
use crate::models::generation::{GenerationRequest, GenerationResult};
use crate::state::environment::Environment;

pub const NAME: &str = "local-png";

/// Share of the image side a logo may cover.
const LOGO_RATIO: u32 = 5;

/// In-process raster renderer producing a PNG data URI.
pub struct LocalPngStrategy {
    environment: Environment,
    ready: OnceCell<bool>,
}

impl LocalPngStrategy {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ready: OnceCell::new(),
        }
    }
}

fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

fn overlay_logo(canvas: &mut RgbaImage, logo: &str) -> Result<(), GenerationError> {
    let bytes = render::decode_data_url(logo)?;
    let logo = image::load_from_memory(&bytes)
        .map_err(|e| GenerationError::InvalidLogo(e.to_string()))?;
    let bound = (canvas.width() / LOGO_RATIO).max(1);
    let logo = logo.resize(bound, bound, FilterType::Lanczos3).to_rgba8();
    let x = (canvas.width() - logo.width()) / 2;
    let y = (canvas.height() - logo.height()) / 2;
    imageops::overlay(canvas, &logo, x as i64, y as i64);
    Ok(())
}

/// Render the request to PNG bytes. CPU bound, run off the async workers.
pub fn render_png(request: &GenerationRequest) -> Result<Vec<u8>, GenerationError> {
    let code = render::encode(request)?;
    let (dark, light) = render::colors(request)?;
    let margin = request.margin.unwrap_or(DEFAULT_MARGIN);

    let modules = code.width() as u32 + 2 * margin;
    let module_px = (request.size / modules).max(1);
    let matrix = code
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_px, module_px)
        .dark_color(rgba(dark))
        .light_color(rgba(light))
        .build();

    let side = modules * module_px;
    let mut canvas = RgbaImage::from_pixel(side, side, rgba(light));
    let offset = (margin * module_px) as i64;
    imageops::overlay(&mut canvas, &matrix, offset, offset);

    if let Some(logo) = request.logo() {
        overlay_logo(&mut canvas, logo)?;
    }

    let canvas = if side == request.size {
        canvas
    } else {
        imageops::resize(&canvas, request.size, request.size, FilterType::Nearest)
    };

    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

async fn render_off_thread(request: &GenerationRequest) -> Result<Vec<u8>, GenerationError> {
    let request = request.clone();
    tokio::task::spawn_blocking(move || render_png(&request))
        .await
        .map_err(|_| GenerationError::Unavailable)?
}

#[async_trait]
impl GenerationStrategy for LocalPngStrategy {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        1
    }

    async fn is_available(&self) -> bool {
        if !self.environment.local_rendering_available {
            return false;
        }
        *self
            .ready
            .get_or_init(|| async {
                let probe = GenerationRequest::new("warm-up", ContentType::Text).with_size(64);
                match render_off_thread(&probe).await {
                    Ok(_) => true,
                    Err(e) => {
                        warn!("Local PNG renderer failed its warm-up render: {}", e);
                        false
                    }
                }
            })
            .await
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        match render_off_thread(request).await {
            Ok(bytes) => GenerationResult::success(
                NAME,
                render::to_data_url("image/png", &bytes),
                None,
                request,
            ),
            Err(e) => GenerationResult::strategy_failure(NAME, e.to_string()),
        }
    }
}
