// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./covey.toml` > `~/.config/covey/covey.toml` >
//! `/etc/covey/covey.toml` with environment variable overrides via the
//! `COVEY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CoveyConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/covey/covey.toml` (system-wide)
/// 3. `~/.config/covey/covey.toml` (user XDG config)
/// 4. `./covey.toml` (local directory)
/// 5. `COVEY_*` environment variables
pub fn load_config() -> Result<CoveyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CoveyConfig::default()))
        .merge(Toml::file("/etc/covey/covey.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("covey/covey.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("covey.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for callers that already hold the config text.
pub fn load_config_from_str(toml_content: &str) -> Result<CoveyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CoveyConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CoveyConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CoveyConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `COVEY_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("COVEY_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: COVEY_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("media_", "media.", 1)
            .replacen("transport_", "transport.", 1)
            .replacen("behavior_", "behavior.", 1)
            .replacen("replies_", "replies.", 1);
        mapped.into()
    })
}
