use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::drivers::DriversConfig;
use crate::monitor::MonitorConfig;
use crate::storage::file::{Config, FileIoWithBackup};

/// Immutable through the full lifetime of the app, unless restart app.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub monitor: MonitorConfig,
    pub drivers: DriversConfig,
}

impl FileIoWithBackup for AppConfig {}

impl Config for AppConfig {
    type ConfigType = AppConfig;
}

impl AppConfig {
    fn load() -> AppConfig {
        Self::load_config_or_default("config.json", Self::default).unwrap()
    }
}

static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::load);

impl AppConfig {
    pub fn get() -> &'static AppConfig {
        &APP_CONFIG
    }
}
