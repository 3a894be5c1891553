//! Portal configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use cropguard_quote::QuoteConfig;
use serde::{Deserialize, Serialize};

/// Portal service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Quote configuration
    pub quote: QuoteConfig,
    /// Sign-in settings
    pub session: SessionSettings,
    /// Checkout settings
    pub checkout: CheckoutSettings,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            quote: QuoteConfig::default(),
            session: SessionSettings::default(),
            checkout: CheckoutSettings::default(),
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        // Platform PORT first, CROPGUARD_PORT overrides it
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        if let Ok(host) = std::env::var("CROPGUARD_HOST") {
            cfg.host = host;
        }
        if let Ok(port) = std::env::var("CROPGUARD_PORT") {
            cfg.port = port.parse()?;
        }

        if let Ok(path) = std::env::var("CROPGUARD_TARIFF_PATH") {
            if !path.trim().is_empty() {
                cfg.quote.tariff_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(val) = std::env::var("CROPGUARD_OTP_DELAY_MS") {
            cfg.session.otp_delay_ms = val.parse()?;
        }
        if let Ok(val) = std::env::var("CROPGUARD_OTP_VALIDITY_SECS") {
            cfg.session.otp_validity_secs = val.parse()?;
        }
        if let Ok(val) = std::env::var("CROPGUARD_PAYMENT_DELAY_MS") {
            cfg.checkout.processing_delay_ms = val.parse()?;
        }

        Ok(cfg)
    }
}

/// Sign-in settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Simulated OTP delivery delay
    pub otp_delay_ms: u64,
    /// How long an issued OTP can be used
    pub otp_validity_secs: u64,
}

impl SessionSettings {
    pub fn otp_delay(&self) -> Duration {
        Duration::from_millis(self.otp_delay_ms)
    }

    pub fn otp_validity(&self) -> Duration {
        Duration::from_secs(self.otp_validity_secs)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            otp_delay_ms: crate::DEFAULT_OTP_DELAY_MS,
            otp_validity_secs: crate::DEFAULT_OTP_VALIDITY_SECS,
        }
    }
}

/// Checkout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Simulated payment processing delay
    pub processing_delay_ms: u64,
}

impl CheckoutSettings {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            processing_delay_ms: crate::DEFAULT_PAYMENT_DELAY_MS,
        }
    }
}
