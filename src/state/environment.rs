use crate::config::AppConfig;

/// Host capabilities, resolved once at startup and handed to whatever needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    /// Remote rendering services can be reached.
    pub network_available: bool,
    /// The in-process raster renderer may be used.
    pub local_rendering_available: bool,
    /// A structured store is configured and worth probing.
    pub structured_store_available: bool,
}

impl Environment {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            network_available: !config.offline,
            local_rendering_available: config.local_rendering,
            structured_store_available: config.mongodb_uri.is_some(),
        }
    }

    /// Everything available except the structured store.
    pub fn standalone() -> Self {
        Self {
            network_available: true,
            local_rendering_available: true,
            structured_store_available: false,
        }
    }
}
