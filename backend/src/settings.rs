//! Marketplace configuration loaded via OrthoConfig.
//!
//! Values are layered from command-line arguments, `RIDESHARE_*` environment
//! variables, and configuration files.

use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_MAX_SEATS, DecisionPolicy};

/// Output format for tracing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Error returned for an unrecognised log format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("log format must be json or pretty, got {0}")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_owned())),
        }
    }
}

/// Configuration values for the marketplace services.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RIDESHARE")]
pub struct MarketplaceSettings {
    /// Upper bound on seats a ride may offer when posted.
    pub max_seats: Option<u32>,
    /// Reject decisions on seat requests that are no longer pending.
    #[ortho_config(default = false)]
    pub lock_decided_requests: bool,
    /// Tracing output format: `json` or `pretty`.
    pub log_format: Option<String>,
}

impl Default for MarketplaceSettings {
    fn default() -> Self {
        Self {
            max_seats: None,
            lock_decided_requests: false,
            log_format: None,
        }
    }
}

impl MarketplaceSettings {
    /// Return the configured seat limit, falling back to the default.
    pub fn max_seats(&self) -> u32 {
        self.max_seats.unwrap_or(DEFAULT_MAX_SEATS)
    }

    /// Policy for deciding seat requests that were already decided.
    pub fn decision_policy(&self) -> DecisionPolicy {
        if self.lock_decided_requests {
            DecisionPolicy::PendingOnly
        } else {
            DecisionPolicy::Permissive
        }
    }

    /// Return the configured log format, falling back to JSON.
    pub fn log_format(&self) -> Result<LogFormat, UnknownLogFormat> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), LogFormat::from_str)
    }
}
