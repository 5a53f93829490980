// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Covey responder.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use covey_core::CoveyError;
use serde::{Deserialize, Serialize};

/// Top-level Covey configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoveyConfig {
    /// Responder identity and registry settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Media attachment storage settings.
    #[serde(default)]
    pub media: MediaConfig,

    /// Transport authentication persistence settings.
    #[serde(default)]
    pub transport: TransportConfig,

    /// Human-behavior simulation profile.
    #[serde(default)]
    pub behavior: BehaviorConfig,

    /// Canned reply pool overrides. Empty pools fall back to built-ins.
    #[serde(default)]
    pub replies: ReplyConfig,
}

impl CoveyConfig {
    /// Post-deserialization range validation.
    pub fn validate(&self) -> Result<(), CoveyError> {
        self.behavior.validate()?;
        if self.agent.qr_wait_timeout_secs == 0 {
            return Err(CoveyError::Config(
                "agent.qr_wait_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Responder identity and registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the responder.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Bounded wait for the add-session QR-or-ready resolution, in seconds.
    #[serde(default = "default_qr_wait_timeout_secs")]
    pub qr_wait_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            qr_wait_timeout_secs: default_qr_wait_timeout_secs(),
        }
    }
}

fn default_agent_name() -> String {
    "covey".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_qr_wait_timeout_secs() -> u64 {
    60
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "covey.db".to_string()
}

/// Media attachment storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Flat directory where attachments are written. Created on demand.
    #[serde(default = "default_media_root")]
    pub root_dir: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root_dir: default_media_root(),
        }
    }
}

fn default_media_root() -> String {
    "media".to_string()
}

/// Transport authentication persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Directory where the transport persists per-identity auth state.
    #[serde(default = "default_auth_dir")]
    pub auth_dir: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            auth_dir: default_auth_dir(),
        }
    }
}

fn default_auth_dir() -> String {
    "sessions".to_string()
}

/// Human-behavior simulation profile.
///
/// All interval pairs are half-open ranges in milliseconds: `[min, max)`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Whether the human profile occasionally skips replying entirely.
    #[serde(default = "default_true")]
    pub enable_random_ignore: bool,

    /// Probability of skipping a reply when random ignore is enabled.
    #[serde(default = "default_ignore_probability")]
    pub ignore_probability: f64,

    /// Base pre-reply delay range.
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,

    /// Probability of drawing from the long (distracted) delay range instead.
    #[serde(default = "default_long_delay_probability")]
    pub long_delay_probability: f64,
    #[serde(default = "default_long_delay_min_ms")]
    pub long_delay_min_ms: u64,
    #[serde(default = "default_long_delay_max_ms")]
    pub long_delay_max_ms: u64,

    /// Typing indicator base duration range; per-character time is added.
    #[serde(default = "default_typing_min_ms")]
    pub typing_min_ms: u64,
    #[serde(default = "default_typing_max_ms")]
    pub typing_max_ms: u64,
    #[serde(default = "default_typing_per_char_ms")]
    pub typing_per_char_ms: u64,

    /// Post-reply cooldown range held before the peer guard is released.
    #[serde(default = "default_cooldown_min_ms")]
    pub cooldown_min_ms: u64,
    #[serde(default = "default_cooldown_max_ms")]
    pub cooldown_max_ms: u64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_random_ignore: default_true(),
            ignore_probability: default_ignore_probability(),
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            long_delay_probability: default_long_delay_probability(),
            long_delay_min_ms: default_long_delay_min_ms(),
            long_delay_max_ms: default_long_delay_max_ms(),
            typing_min_ms: default_typing_min_ms(),
            typing_max_ms: default_typing_max_ms(),
            typing_per_char_ms: default_typing_per_char_ms(),
            cooldown_min_ms: default_cooldown_min_ms(),
            cooldown_max_ms: default_cooldown_max_ms(),
        }
    }
}

impl BehaviorConfig {
    /// Reject probabilities outside [0, 1] and empty delay ranges.
    pub fn validate(&self) -> Result<(), CoveyError> {
        for (key, p) in [
            ("behavior.ignore_probability", self.ignore_probability),
            ("behavior.long_delay_probability", self.long_delay_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoveyError::Config(format!(
                    "{key} must be within [0, 1], got {p}"
                )));
            }
        }
        for (key, min, max) in [
            ("behavior.reply_delay", self.reply_delay_min_ms, self.reply_delay_max_ms),
            ("behavior.long_delay", self.long_delay_min_ms, self.long_delay_max_ms),
            ("behavior.typing", self.typing_min_ms, self.typing_max_ms),
            ("behavior.cooldown", self.cooldown_min_ms, self.cooldown_max_ms),
        ] {
            if min >= max {
                return Err(CoveyError::Config(format!(
                    "{key}_min_ms ({min}) must be less than {key}_max_ms ({max})"
                )));
            }
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_ignore_probability() -> f64 {
    0.30
}

fn default_reply_delay_min_ms() -> u64 {
    1500
}

fn default_reply_delay_max_ms() -> u64 {
    5000
}

fn default_long_delay_probability() -> f64 {
    0.15
}

fn default_long_delay_min_ms() -> u64 {
    8000
}

fn default_long_delay_max_ms() -> u64 {
    20000
}

fn default_typing_min_ms() -> u64 {
    1500
}

fn default_typing_max_ms() -> u64 {
    4000
}

fn default_typing_per_char_ms() -> u64 {
    40
}

fn default_cooldown_min_ms() -> u64 {
    2000
}

fn default_cooldown_max_ms() -> u64 {
    5000
}

/// Canned reply pool overrides, one list per category.
///
/// An empty list keeps the built-in pool for that category.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReplyConfig {
    #[serde(default)]
    pub text: Vec<String>,
    #[serde(default)]
    pub image: Vec<String>,
    #[serde(default)]
    pub audio: Vec<String>,
    #[serde(default)]
    pub document: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_human_profile() {
        let config = CoveyConfig::default();
        assert!(config.behavior.enable_random_ignore);
        assert_eq!(config.behavior.ignore_probability, 0.30);
        assert_eq!(config.behavior.reply_delay_min_ms, 1500);
        assert_eq!(config.behavior.reply_delay_max_ms, 5000);
        assert_eq!(config.behavior.long_delay_probability, 0.15);
        assert_eq!(config.behavior.long_delay_min_ms, 8000);
        assert_eq!(config.behavior.long_delay_max_ms, 20000);
        assert_eq!(config.behavior.typing_per_char_ms, 40);
        assert_eq!(config.behavior.cooldown_min_ms, 2000);
        assert_eq!(config.behavior.cooldown_max_ms, 5000);
        assert_eq!(config.agent.qr_wait_timeout_secs, 60);
        config.validate().expect("defaults must validate");
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let mut config = CoveyConfig::default();
        config.behavior.ignore_probability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_delay_range() {
        let mut config = CoveyConfig::default();
        config.behavior.cooldown_min_ms = 5000;
        config.behavior.cooldown_max_ms = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_qr_wait() {
        let mut config = CoveyConfig::default();
        config.agent.qr_wait_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
