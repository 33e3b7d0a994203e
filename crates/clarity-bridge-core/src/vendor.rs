// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Types exchanged with the vendor analytics SDK.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProjectId;

/// Diagnostic verbosity of the vendor SDK itself.
///
/// Mirrors the vendor's log-level enumeration. Defaults to [`VendorLogLevel::None`]
/// so release builds stay quiet unless configured otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorLogLevel {
	Verbose,
	Debug,
	Info,
	Warning,
	Error,
	#[default]
	None,
}

impl VendorLogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			VendorLogLevel::Verbose => "verbose",
			VendorLogLevel::Debug => "debug",
			VendorLogLevel::Info => "info",
			VendorLogLevel::Warning => "warning",
			VendorLogLevel::Error => "error",
			VendorLogLevel::None => "none",
		}
	}
}

impl std::fmt::Display for VendorLogLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for VendorLogLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"verbose" => Ok(VendorLogLevel::Verbose),
			"debug" => Ok(VendorLogLevel::Debug),
			"info" => Ok(VendorLogLevel::Info),
			"warning" | "warn" => Ok(VendorLogLevel::Warning),
			"error" => Ok(VendorLogLevel::Error),
			"none" | "off" => Ok(VendorLogLevel::None),
			_ => Err(format!("invalid vendor log level: {}", s)),
		}
	}
}

/// Configuration handed to the vendor SDK's initialize entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorConfig {
	pub project_id: ProjectId,
	pub log_level: VendorLogLevel,
}

impl VendorConfig {
	/// Creates a config for `project_id` with the vendor's logging disabled.
	pub fn new(project_id: ProjectId) -> Self {
		Self {
			project_id,
			log_level: VendorLogLevel::default(),
		}
	}

	/// Sets the vendor log level (builder pattern).
	pub fn with_log_level(mut self, log_level: VendorLogLevel) -> Self {
		self.log_level = log_level;
		self
	}
}

/// A failure reported by the vendor SDK.
///
/// The vendor is opaque, so only its message survives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct VendorError {
	message: String,
}

impl VendorError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn log_level_defaults_to_none() {
		assert_eq!(VendorLogLevel::default(), VendorLogLevel::None);
		let config = VendorConfig::new(ProjectId::parse("abcdefgh").unwrap());
		assert_eq!(config.log_level, VendorLogLevel::None);
	}

	#[test]
	fn log_level_parses_case_insensitively() {
		assert_eq!(
			"Verbose".parse::<VendorLogLevel>().unwrap(),
			VendorLogLevel::Verbose
		);
		assert_eq!(
			" WARN ".parse::<VendorLogLevel>().unwrap(),
			VendorLogLevel::Warning
		);
		assert_eq!("off".parse::<VendorLogLevel>().unwrap(), VendorLogLevel::None);
		assert!("loud".parse::<VendorLogLevel>().is_err());
	}

	#[test]
	fn log_level_serde_uses_lowercase() {
		let json = serde_json::to_string(&VendorLogLevel::Warning).unwrap();
		assert_eq!(json, "\"warning\"");
		let parsed: VendorLogLevel = serde_json::from_str("\"verbose\"").unwrap();
		assert_eq!(parsed, VendorLogLevel::Verbose);
	}

	#[test]
	fn config_serializes_for_diagnostics() {
		let config =
			VendorConfig::new(ProjectId::parse("abcd1234efgh").unwrap()).with_log_level(VendorLogLevel::Info);
		let value = serde_json::to_value(&config).unwrap();
		assert_eq!(value["projectId"], "abcd1234efgh");
		assert_eq!(value["logLevel"], "info");
	}

	#[test]
	fn vendor_error_keeps_message() {
		let err = VendorError::new("sdk exploded");
		assert_eq!(err.message(), "sdk exploded");
		assert_eq!(err.to_string(), "sdk exploded");
	}
}
