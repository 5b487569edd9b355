use std::collections::HashMap;

use config::{Environment, File, FileFormat};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;

#[derive(Deserialize)]
pub struct Config {
    pub logging: Logging,
    pub application: Application,
    pub validation: Validation,
}

#[derive(Deserialize)]
pub struct Application {
    pub name: String,
}

#[derive(Deserialize)]
pub struct Logging {
    level: String,
    crates: HashMap<String, String>,
}

impl Logging {
    pub fn levels(&self) -> String {
        let crate_levels = self.crates.iter().map(|(lib, loglevel)| format!("{lib}={loglevel}"))
            .collect::<Vec<_>>()
            .join(",");
        format!("{},{crate_levels}", self.level)
    }
}

/// Bounds the backend leaves undocumented.
#[serde_inline_default]
#[derive(Deserialize)]
pub struct Validation {
    pub confidence_min: Option<f64>,
    pub confidence_max: Option<f64>,
    #[serde_inline_default(false)]
    pub require_signal_family: bool,
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::load);

impl Config {
    fn load() -> Self {
        Self::builder(include_str!("../config.yml"))
            .expect("Error during config creation")
            .try_deserialize()
            .expect("Error during config deserialization")
    }

    fn builder(yaml: &str) -> Result<config::Config, config::ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .add_source(Environment::with_prefix("APP")
                .try_parsing(true)
                .prefix_separator("_")
                .separator("__"))
            .add_source(Environment::with_prefix("CHART")
                .try_parsing(true)
                .prefix_separator("_")
                .separator("__"))
            .build()
    }
}
