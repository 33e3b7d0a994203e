// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bridge configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. built-in defaults
//! 2. a TOML document
//! 3. the `CLARITY_LOG_LEVEL` environment variable
//!
//! ```toml
//! [vendor]
//! log_level = "verbose"
//! ```

use std::path::Path;

use clarity_bridge_core::VendorLogLevel;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BridgeError, Result};

/// Environment variable overriding the vendor log level.
pub const LOG_LEVEL_ENV: &str = "CLARITY_LOG_LEVEL";

/// Runtime settings for a gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
	/// Verbosity passed to the vendor SDK on initialize.
	pub vendor_log_level: VendorLogLevel,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
	#[serde(default)]
	vendor: VendorSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct VendorSection {
	log_level: Option<VendorLogLevel>,
}

impl BridgeConfig {
	/// Parses a TOML document on top of the defaults.
	pub fn from_toml_str(raw: &str) -> Result<Self> {
		let file: ConfigFile = toml::from_str(raw)
			.map_err(|e| BridgeError::Configuration(format!("invalid bridge config: {e}")))?;

		let mut config = Self::default();
		if let Some(level) = file.vendor.log_level {
			config.vendor_log_level = level;
		}
		Ok(config)
	}

	/// Reads and parses a TOML file.
	pub fn from_file(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path).map_err(|e| {
			BridgeError::Configuration(format!("failed to read {}: {e}", path.display()))
		})?;
		debug!(path = %path.display(), "Loaded bridge config file");
		Self::from_toml_str(&raw)
	}

	/// Applies overrides from `lookup`, which maps a variable name to its value.
	pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(raw) = lookup(LOG_LEVEL_ENV) {
			self.vendor_log_level = raw
				.parse()
				.map_err(|e| BridgeError::Configuration(format!("{LOG_LEVEL_ENV}: {e}")))?;
		}
		Ok(self)
	}

	/// Loads defaults, then `path` if given, then process environment overrides.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		Self::load_with(path, |name| std::env::var(name).ok())
	}

	/// Like [`BridgeConfig::load`], with overrides read through `lookup`.
	pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let config = match path {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		config.with_overrides_from(lookup)
	}
}
