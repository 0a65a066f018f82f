//! Application configuration from the environment.
//!
//! `.env` is loaded by `main` through dotenvy; everything here just reads
//! variables, so tests can feed a plain map instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::pricing::locations::{Area, LocationCatalog};
use crate::pricing::rates::{IdentityModifier, RateModifier, WeekdayModifiers};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CURRENCY: &str = "THB";
const DEFAULT_CURRENCY_SYMBOL: &str = "฿";
const DEFAULT_INSURANCE_DAILY_RATE: Decimal = dec!(400);
const DEFAULT_CHILD_SEAT_DAILY_RATE: Decimal = dec!(100);
const DEFAULT_QUOTE_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Pricing constants shared by every quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingConfig {
    pub currency: String,
    pub currency_symbol: String,
    pub insurance_daily_rate: Decimal,
    pub child_seat_daily_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            insurance_daily_rate: DEFAULT_INSURANCE_DAILY_RATE,
            child_seat_daily_rate: DEFAULT_CHILD_SEAT_DAILY_RATE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub pricing: PricingConfig,
    pub areas_file: Option<PathBuf>,
    pub rate_modifiers_file: Option<PathBuf>,
    pub quote_cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            pricing: PricingConfig::default(),
            areas_file: None,
            rate_modifiers_file: None,
            quote_cache_ttl: Duration::from_secs(DEFAULT_QUOTE_CACHE_TTL_SECS),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let insurance_daily_rate = match get("INSURANCE_DAILY_RATE") {
            Some(raw) => parse_rate("INSURANCE_DAILY_RATE", &raw)?,
            None => defaults.pricing.insurance_daily_rate,
        };
        let child_seat_daily_rate = match get("CHILD_SEAT_DAILY_RATE") {
            Some(raw) => parse_rate("CHILD_SEAT_DAILY_RATE", &raw)?,
            None => defaults.pricing.child_seat_daily_rate,
        };
        let quote_cache_ttl = match get("QUOTE_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: "QUOTE_CACHE_TTL_SECS".to_string(),
                    message: e.to_string(),
                }
            })?),
            None => defaults.quote_cache_ttl,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            pricing: PricingConfig {
                currency: get("CURRENCY").unwrap_or(defaults.pricing.currency),
                currency_symbol: get("CURRENCY_SYMBOL").unwrap_or(defaults.pricing.currency_symbol),
                insurance_daily_rate,
                child_seat_daily_rate,
            },
            areas_file: get("AREAS_FILE").map(PathBuf::from),
            rate_modifiers_file: get("RATE_MODIFIERS_FILE").map(PathBuf::from),
            quote_cache_ttl,
        })
    }

    /// Area table from `AREAS_FILE`, or the built-in one
    pub fn load_catalog(&self) -> Result<LocationCatalog, ConfigError> {
        match &self.areas_file {
            Some(path) => {
                let areas: Vec<Area> = read_json(path)?;
                if let Some(bad) = areas.iter().find(|a| a.delivery_surcharge < Decimal::ZERO) {
                    return Err(ConfigError::InvalidValue {
                        key: "AREAS_FILE".to_string(),
                        message: format!("area {} has a negative delivery surcharge", bad.id),
                    });
                }
                tracing::info!("Loaded {} areas from {}", areas.len(), path.display());
                Ok(LocationCatalog::new(areas))
            }
            None => Ok(LocationCatalog::builtin()),
        }
    }

    /// Rate modifier from `RATE_MODIFIERS_FILE`, or identity
    pub fn load_rate_modifier(&self) -> Result<Arc<dyn RateModifier>, ConfigError> {
        match &self.rate_modifiers_file {
            Some(path) => {
                let table: WeekdayModifiers = read_json(path)?;
                tracing::info!("Loaded weekday rate modifiers from {}", path.display());
                Ok(Arc::new(table))
            }
            None => Ok(Arc::new(IdentityModifier)),
        }
    }
}

fn parse_rate(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let rate = raw.parse::<Decimal>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    if rate < Decimal::ZERO {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(rate)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
