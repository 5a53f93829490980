// SPDX-FileCopyrightText: 2026 Covey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Covey responder.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and post-deserialization range checks.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{BehaviorConfig, CoveyConfig, ReplyConfig};

use covey_core::CoveyError;

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<CoveyConfig, CoveyError> {
    let config = loader::load_config().map_err(|e| CoveyError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
