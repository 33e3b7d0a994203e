// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Clarity bridge.

use thiserror::Error;

use crate::operation::Operation;
use crate::vendor::VendorError;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Caller-supplied input named by [`BridgeError::InvalidInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
	ProjectId,
	TagKey,
	TagValue,
	EventName,
	/// The call payload as a whole (not a JSON object, or a field of the wrong type).
	Payload,
}

impl InputField {
	/// Returns the payload field name as the host sends it.
	pub fn as_str(&self) -> &'static str {
		match self {
			InputField::ProjectId => "projectId",
			InputField::TagKey => "key",
			InputField::TagValue => "value",
			InputField::EventName => "eventName",
			InputField::Payload => "payload",
		}
	}

	fn required_message(&self) -> &'static str {
		match self {
			InputField::ProjectId => "Project ID is required",
			InputField::TagKey => "Tag key is required",
			InputField::TagValue => "Tag value is required",
			InputField::EventName => "Event name is required",
			InputField::Payload => "Call payload is required",
		}
	}

	fn invalid_message(&self) -> &'static str {
		match self {
			InputField::ProjectId => {
				"Invalid project ID format. Must be 8-16 alphanumeric characters (letters, numbers, hyphens)."
			}
			InputField::TagKey => {
				"Invalid tag key format. Must start with a letter and contain only alphanumeric characters and underscores (1-64 chars)."
			}
			InputField::TagValue => "Invalid tag value. Must not exceed 1024 characters.",
			InputField::EventName => {
				"Invalid event name format. Must start with a letter and contain only alphanumeric characters and underscores (1-64 chars)."
			}
			InputField::Payload => "Invalid call payload.",
		}
	}
}

impl std::fmt::Display for InputField {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Errors surfaced to the caller of a bridge operation.
#[derive(Debug, Error)]
pub enum BridgeError {
	/// A caller-supplied string is missing or fails format validation.
	#[error("{message}")]
	InvalidInput { field: InputField, message: String },

	/// An operation other than initialize ran before a successful initialize.
	#[error("Clarity not initialized. Call initialize() first.")]
	NotInitialized,

	/// The vendor SDK rejected initialization.
	#[error("Failed to initialize Clarity: {0}")]
	InitializationFailure(#[source] VendorError),

	/// The vendor SDK failed during a post-initialization operation.
	#[error("Failed to {}: {source}", .operation.failure_label())]
	DelegateFailure {
		operation: Operation,
		#[source]
		source: VendorError,
	},

	/// The host invoked a plugin or method this bridge does not register.
	#[error("\"{plugin}.{method}()\" is not implemented")]
	UnknownMethod { plugin: String, method: String },

	/// Bridge configuration could not be loaded or is incomplete.
	#[error("configuration error: {0}")]
	Configuration(String),
}

impl BridgeError {
	/// Builds the "... is required" rejection for an absent input.
	pub fn required(field: InputField) -> Self {
		BridgeError::InvalidInput {
			field,
			message: field.required_message().to_string(),
		}
	}

	/// Builds the format rejection for an input that failed validation.
	pub fn invalid(field: InputField) -> Self {
		BridgeError::InvalidInput {
			field,
			message: field.invalid_message().to_string(),
		}
	}

	/// Builds a payload-level rejection with a decoder message.
	pub fn malformed_payload(operation: Operation, detail: impl std::fmt::Display) -> Self {
		BridgeError::InvalidInput {
			field: InputField::Payload,
			message: format!("Invalid payload for {operation}: {detail}"),
		}
	}

	/// Returns the stable code reported to the host with a rejection.
	pub fn code(&self) -> &'static str {
		match self {
			BridgeError::InvalidInput { .. } => "INVALID_INPUT",
			BridgeError::NotInitialized => "NOT_INITIALIZED",
			BridgeError::InitializationFailure(_) => "INITIALIZATION_FAILURE",
			BridgeError::DelegateFailure { .. } => "DELEGATE_FAILURE",
			BridgeError::UnknownMethod { .. } => "UNIMPLEMENTED",
			BridgeError::Configuration(_) => "CONFIGURATION",
		}
	}

	/// Returns the offending field for [`BridgeError::InvalidInput`].
	pub fn field(&self) -> Option<InputField> {
		match self {
			BridgeError::InvalidInput { field, .. } => Some(*field),
			_ => None,
		}
	}
}
