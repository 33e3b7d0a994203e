// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request and response payloads exchanged with the host bridge.
//!
//! Field names follow the host's camelCase convention. Every request field is
//! optional at this layer so that an absent field surfaces as a
//! "... is required" rejection instead of a decoding error.

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, InputField, Result};
use crate::types::{CustomTag, Event, EventName, ProjectId, TagKey, TagValue};

/// Payload for `initialize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeOptions {
	#[serde(default)]
	pub project_id: Option<String>,
}

impl InitializeOptions {
	pub fn new(project_id: impl Into<String>) -> Self {
		Self {
			project_id: Some(project_id.into()),
		}
	}

	/// Validates the payload into a [`ProjectId`].
	pub fn validate(&self) -> Result<ProjectId> {
		ProjectId::from_input(self.project_id.as_deref())
	}
}

/// Payload for `setCustomTag`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTagOptions {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub value: Option<String>,
}

impl CustomTagOptions {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: Some(key.into()),
			value: Some(value.into()),
		}
	}

	/// Validates the payload into a [`CustomTag`].
	///
	/// Presence of both fields is checked before either format, so a missing
	/// value is reported even when the key is also malformed.
	pub fn validate(&self) -> Result<CustomTag> {
		let key = self.key.as_deref();
		let value = self.value.as_deref();
		if key.map_or(true, str::is_empty) {
			return Err(BridgeError::required(InputField::TagKey));
		}
		if value.is_none() {
			return Err(BridgeError::required(InputField::TagValue));
		}
		Ok(CustomTag::new(
			TagKey::from_input(key)?,
			TagValue::from_input(value)?,
		))
	}
}

/// Payload for `logEvent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEventOptions {
	#[serde(default)]
	pub event_name: Option<String>,
}

impl LogEventOptions {
	pub fn new(event_name: impl Into<String>) -> Self {
		Self {
			event_name: Some(event_name.into()),
		}
	}

	/// Validates the payload into an [`Event`].
	pub fn validate(&self) -> Result<Event> {
		EventName::from_input(self.event_name.as_deref()).map(Event::new)
	}
}

/// Result of `getCurrentSessionId`. Serializes an absent id as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdResult {
	pub session_id: Option<String>,
}

/// Result of `getCurrentSessionUrl`. Serializes an absent url as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUrlResult {
	pub url: Option<String>,
}

/// Collapses the vendor's "empty string" answer into an explicit absence.
pub fn normalize_session_value(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.is_empty())
}
