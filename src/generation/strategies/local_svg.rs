use async_trait::async_trait;
use qrcode::render::svg;

use crate::generation::error::GenerationError;
use crate::generation::render;
use crate::generation::strategy::GenerationStrategy;
use crate::models::generation::{GenerationRequest, GenerationResult};

pub const NAME: &str = "local-svg";

/// Vector renderer. Needs nothing from the host, so it is always available.
/// Margins are on or off: any non-zero margin gives the standard quiet zone.
pub struct LocalSvgStrategy;

pub fn render_svg(request: &GenerationRequest) -> Result<String, GenerationError> {
    let code = render::encode(request)?;
    let (dark, light) = render::colors(request)?;
    let dark = format!("#{}", render::hex(dark));
    let light = format!("#{}", render::hex(light));

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(request.size, request.size)
        .quiet_zone(request.margin != Some(0))
        .dark_color(svg::Color(&dark))
        .light_color(svg::Color(&light))
        .build())
}

#[async_trait]
impl GenerationStrategy for LocalSvgStrategy {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        2
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        match render_svg(request) {
            Ok(svg) => GenerationResult::success(
                NAME,
                render::to_data_url("image/svg+xml", svg.as_bytes()),
                Some(svg),
                request,
            ),
            Err(e) => GenerationResult::strategy_failure(NAME, e.to_string()),
        }
    }
}
