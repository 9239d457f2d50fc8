use std::env;
use std::str::FromStr;

use crate::analysis::ScoringConfig;

/// Distinguishes runtime behavior for different stages of the embedding service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEnvironment {
    Development,
    Test,
    Production,
}

impl EngineEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the analysis engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub environment: EngineEnvironment,
    pub scoring: ScoringConfig,
    pub telemetry: TelemetryConfig,
}

impl EngineConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = EngineEnvironment::from_str(
            &env::var("AUCTION_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("AUCTION_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            strong_buy_decline_pct: parse_finite_or(
                "AUCTION_STRONG_BUY_DECLINE_PCT",
                defaults.strong_buy_decline_pct,
            )?,
            strong_buy_discount_pct: parse_finite_or(
                "AUCTION_STRONG_BUY_DISCOUNT_PCT",
                defaults.strong_buy_discount_pct,
            )?,
            consider_discount_pct: parse_finite_or(
                "AUCTION_CONSIDER_DISCOUNT_PCT",
                defaults.consider_discount_pct,
            )?,
            base_bid_premium: parse_finite_or(
                "AUCTION_BASE_BID_PREMIUM",
                defaults.base_bid_premium,
            )?,
            max_bid_premium: parse_finite_or("AUCTION_MAX_BID_PREMIUM", defaults.max_bid_premium)?,
            premium_saturation_round: parse_or(
                "AUCTION_PREMIUM_SATURATION_ROUND",
                defaults.premium_saturation_round,
            )?,
        };

        if scoring.base_bid_premium < 0.0 || scoring.max_bid_premium < scoring.base_bid_premium {
            return Err(ConfigError::InvalidPremiumBounds {
                base: scoring.base_bid_premium,
                max: scoring.max_bid_premium,
            });
        }

        Ok(Self {
            environment,
            scoring,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected} (found '{value}')")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("bid premium bounds invalid: base {base} must be >= 0 and <= max {max}")]
    InvalidPremiumBounds { base: f64, max: f64 },
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue {
                key,
                value: raw,
                expected: std::any::type_name::<T>(),
            }),
        Err(_) => Ok(default),
    }
}

/// NaN and infinities parse as `f64` but would poison every threshold comparison.
fn parse_finite_or(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let value = parse_or(key, default)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected: "finite f64",
        })
    }
}
