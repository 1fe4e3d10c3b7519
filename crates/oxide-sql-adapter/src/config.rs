//! Adapter configuration.
//!
//! The dialect is chosen by an explicit configuration value rather than by
//! probing the connection.
//!
//! ```rust
//! use oxide_sql_adapter::config::{AdapterConfig, DialectKind, TimezonePolicy};
//!
//! let config = AdapterConfig::from_json(
//!     r#"{ "dialect": "derby", "timezone": { "fixed_offset": 3600 } }"#,
//! )
//! .unwrap();
//! assert_eq!(config.dialect, DialectKind::Derby);
//! assert_eq!(config.timezone, TimezonePolicy::FixedOffset(3600));
//! ```

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, Result};

/// Database engines with a dialect adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DialectKind {
    /// Apache Derby and its derivatives.
    Derby,
}

impl DialectKind {
    /// Returns the dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Derby => "derby",
        }
    }
}

/// Time zone used to interpret driver timestamps that carry no offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezonePolicy {
    /// Coordinated Universal Time.
    #[default]
    Utc,
    /// The host's local time zone.
    Local,
    /// A fixed offset, in seconds east of UTC.
    FixedOffset(i32),
}

impl TimezonePolicy {
    /// Attaches this policy's offset to a wall-clock time.
    ///
    /// Returns `None` when the time does not exist in the zone or the offset
    /// is out of range. Ambiguous local times resolve to the earlier instant.
    #[must_use]
    pub fn localize(self, naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Utc => Some(naive.and_utc().fixed_offset()),
            Self::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|t| t.fixed_offset()),
            Self::FixedOffset(seconds) => FixedOffset::east_opt(seconds)?
                .from_local_datetime(&naive)
                .single(),
        }
    }
}

/// Configuration for a dialect adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Which dialect adapter to build.
    pub dialect: DialectKind,
    /// Time zone policy for temporal casts.
    #[serde(default)]
    pub timezone: TimezonePolicy,
}

impl AdapterConfig {
    /// Creates a configuration for the given dialect with UTC timestamps.
    #[must_use]
    pub fn new(dialect: DialectKind) -> Self {
        Self {
            dialect,
            timezone: TimezonePolicy::default(),
        }
    }

    /// Sets the time zone policy.
    #[must_use]
    pub const fn timezone(mut self, timezone: TimezonePolicy) -> Self {
        self.timezone = timezone;
        self
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Checks the configuration for values no adapter can honour.
    pub fn validate(&self) -> Result<()> {
        if let TimezonePolicy::FixedOffset(seconds) = self.timezone {
            if FixedOffset::east_opt(seconds).is_none() {
                return Err(AdapterError::Config(format!(
                    "fixed offset {seconds}s is outside +/-24h"
                )));
            }
        }
        Ok(())
    }
}
