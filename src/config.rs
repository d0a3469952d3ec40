use crate::error::{AppError, Result};

pub const CLASSIFIER_PATH: &str = "rf_pipeline.json";
pub const REGRESSOR_PATH: &str = "best_model_reg.json";

/// Default HTTP port; matches the port the form has historically been served on.
pub const HTTP_PORT: u16 = 8501;

pub const PAGE_TITLE: &str = "Predicción % de Aforo y Taquilla";

/// Name of the categorical column whose trained vocabulary feeds the concert-type select.
pub const CONCERT_TYPE_COLUMN: &str = "TipoConcierto";

/// Form defaults for a fresh page.
pub mod defaults {
    pub const CAPACITY: u32 = 1000;
    pub const MONTH: u8 = 1;
    pub const TIME_OF_DAY: &str = "19:30:00";
}

#[derive(Debug, Clone)]
pub struct Config {
    pub classifier_path: String,
    pub regressor_path: String,
    pub log_level: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            classifier_path: std::env::var("CLASSIFIER_PATH")
                .unwrap_or_else(|_| CLASSIFIER_PATH.to_string()),
            regressor_path: std::env::var("REGRESSOR_PATH")
                .unwrap_or_else(|_| REGRESSOR_PATH.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            http_port: std::env::var("HTTP_PORT")
                .unwrap_or_else(|_| HTTP_PORT.to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("HTTP_PORT must be a valid port number".to_string()))?,
        })
    }
}
