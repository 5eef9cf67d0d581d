use super::http::HttpDriverConfig;
use super::Drivers;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriversConfig {
    pub enabled: Cow<'static, [Drivers]>,

    pub http_driver_config: HttpDriverConfig,
}

impl Default for DriversConfig {
    fn default() -> Self {
        Self {
            enabled: Cow::Borrowed(&[Drivers::Http]),

            http_driver_config: HttpDriverConfig::default(),
        }
    }
}
