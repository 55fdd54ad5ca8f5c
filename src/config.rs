//! Global configuration parsing and validation.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. Grid dimensions are compile-time constants and are not
//! configurable.

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::board::grid::{COLS, ROWS};
use crate::{AppError, Result};

const ALPHABET_LEN: usize = 26;

/// Round timing and population settings.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct RoundConfig {
    /// Length of the running phase.
    #[serde(default = "default_round_seconds")]
    pub round_seconds: u64,
    /// Length of the break between rounds.
    #[serde(default = "default_break_seconds")]
    pub break_seconds: u64,
    /// Distinct letters placed at the start of each round.
    #[serde(default = "default_initial_letters")]
    pub initial_letters: usize,
    /// Interval between countdown ticks, in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_seconds: default_round_seconds(),
            break_seconds: default_break_seconds(),
            initial_letters: default_initial_letters(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl RoundConfig {
    /// Tick cadence as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

fn default_round_seconds() -> u64 {
    600
}

fn default_break_seconds() -> u64 {
    60
}

fn default_initial_letters() -> usize {
    12
}

fn default_tick_millis() -> u64 {
    1000
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_http_port() -> u16 {
    3000
}

fn default_event_buffer() -> usize {
    256
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Interface the HTTP and line listeners bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// HTTP port serving `/ws`, `/state`, and `/health`.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// TCP port for the newline-delimited JSON protocol; disabled when absent.
    #[serde(default)]
    pub lines_port: Option<u16>,
    /// Capacity of the broadcast channel feeding connected clients.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
    /// Fixed RNG seed for reproducible boards; random when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    /// Round timing.
    #[serde(default)]
    pub round: RoundConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            lines_port: None,
            event_buffer: default_event_buffer(),
            rng_seed: None,
            round: RoundConfig::default(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Socket address for the HTTP listener.
    #[must_use]
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    /// Socket address for the line-protocol listener, if enabled.
    #[must_use]
    pub fn lines_addr(&self) -> Option<SocketAddr> {
        self.lines_port.map(|port| SocketAddr::new(self.host, port))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.event_buffer == 0 {
            return Err(AppError::Config(
                "event_buffer must be greater than zero".into(),
            ));
        }

        if self.round.round_seconds == 0 {
            return Err(AppError::Config(
                "round.round_seconds must be greater than zero".into(),
            ));
        }

        if self.round.break_seconds == 0 {
            return Err(AppError::Config(
                "round.break_seconds must be greater than zero".into(),
            ));
        }

        if self.round.tick_millis == 0 {
            return Err(AppError::Config(
                "round.tick_millis must be greater than zero".into(),
            ));
        }

        let max_letters = ALPHABET_LEN.min(ROWS * COLS);
        if self.round.initial_letters == 0 || self.round.initial_letters > max_letters {
            return Err(AppError::Config(format!(
                "round.initial_letters must be between 1 and {max_letters}"
            )));
        }

        // Port 0 asks the OS for an ephemeral port, so a clash is only
        // possible between fixed ports.
        if self.http_port != 0 && self.lines_port == Some(self.http_port) {
            return Err(AppError::Config(
                "lines_port must differ from http_port".into(),
            ));
        }

        Ok(())
    }
}
