// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The five operations exposed to the host application.

/// Name under which the operations are registered with the host bridge.
pub const PLUGIN_NAME: &str = "Clarity";

/// An operation exposed by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	Initialize,
	SetCustomTag,
	LogEvent,
	GetCurrentSessionId,
	GetCurrentSessionUrl,
}

impl Operation {
	/// Every operation, in registration order.
	pub const ALL: [Operation; 5] = [
		Operation::Initialize,
		Operation::SetCustomTag,
		Operation::LogEvent,
		Operation::GetCurrentSessionId,
		Operation::GetCurrentSessionUrl,
	];

	/// Returns the method name the host uses to invoke this operation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Operation::Initialize => "initialize",
			Operation::SetCustomTag => "setCustomTag",
			Operation::LogEvent => "logEvent",
			Operation::GetCurrentSessionId => "getCurrentSessionId",
			Operation::GetCurrentSessionUrl => "getCurrentSessionUrl",
		}
	}

	/// Phrase used in "Failed to ..." rejection messages.
	pub fn failure_label(&self) -> &'static str {
		match self {
			Operation::Initialize => "initialize Clarity",
			Operation::SetCustomTag => "set custom tag",
			Operation::LogEvent => "log event",
			Operation::GetCurrentSessionId => "get session ID",
			Operation::GetCurrentSessionUrl => "get session URL",
		}
	}

	/// Returns `true` for operations that require a prior successful initialize.
	pub fn requires_initialization(&self) -> bool {
		!matches!(self, Operation::Initialize)
	}
}

impl std::fmt::Display for Operation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for Operation {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Operation::ALL
			.into_iter()
			.find(|op| op.as_str() == s)
			.ok_or_else(|| format!("unknown operation: {}", s))
	}
}
