pub mod local_png;
pub mod local_svg;
pub mod remote;

use std::sync::Arc;

use crate::generation::strategy::GenerationStrategy;
use crate::state::environment::Environment;

pub use local_png::LocalPngStrategy;
pub use local_svg::LocalSvgStrategy;
pub use remote::RemoteStrategy;

/// Built-in strategies: local renderers first, remote services as fallback.
pub fn defaults(environment: Environment) -> Vec<Arc<dyn GenerationStrategy>> {
    vec![
        Arc::new(LocalPngStrategy::new(environment)),
        Arc::new(LocalSvgStrategy),
        Arc::new(RemoteStrategy::qr_server(environment)),
        Arc::new(RemoteStrategy::google_charts(environment)),
    ]
}
