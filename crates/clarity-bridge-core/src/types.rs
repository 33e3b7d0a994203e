// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Validated identifiers and the tag/event data model.
//!
//! Values of these types can only be built through the predicates in
//! [`crate::validation`], so holding one is proof the input was accepted.
//! Ids and keys keep their trimmed form; tag values are kept verbatim.

use serde::Serialize;

use crate::error::{BridgeError, InputField, Result};
use crate::validation::{
	is_valid_event_name, is_valid_project_id, is_valid_tag_key, is_valid_tag_value, trim_input,
};

/// Value recorded for every event. Events are tags whose value is this literal.
pub const EVENT_TAG_VALUE: &str = "true";

/// Rejects absent or empty input with the field's "required" message.
fn require(field: InputField, raw: Option<&str>) -> Result<&str> {
	match raw {
		Some(raw) if !raw.is_empty() => Ok(raw),
		_ => Err(BridgeError::required(field)),
	}
}

/// A vendor project identifier (8-16 letters, digits or hyphens).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
	/// Validates and trims a project id.
	pub fn parse(raw: &str) -> Result<Self> {
		if !is_valid_project_id(raw) {
			return Err(BridgeError::invalid(InputField::ProjectId));
		}
		Ok(Self(trim_input(raw).to_string()))
	}

	/// Like [`ProjectId::parse`], but first rejects absent or empty input.
	pub fn from_input(raw: Option<&str>) -> Result<Self> {
		Self::parse(require(InputField::ProjectId, raw)?)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// A tag key: starts with a letter, then letters, digits or underscores, at most 64 chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagKey(String);

impl TagKey {
	pub fn parse(raw: &str) -> Result<Self> {
		if !is_valid_tag_key(raw) {
			return Err(BridgeError::invalid(InputField::TagKey));
		}
		Ok(Self(trim_input(raw).to_string()))
	}

	pub fn from_input(raw: Option<&str>) -> Result<Self> {
		Self::parse(require(InputField::TagKey, raw)?)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// A free-form tag value of at most 1024 UTF-16 code units. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagValue(String);

impl TagValue {
	pub fn parse(raw: &str) -> Result<Self> {
		if !is_valid_tag_value(raw) {
			return Err(BridgeError::invalid(InputField::TagValue));
		}
		Ok(Self(raw.to_string()))
	}

	/// Rejects only absence; an empty value is a valid tag value.
	pub fn from_input(raw: Option<&str>) -> Result<Self> {
		match raw {
			Some(raw) => Self::parse(raw),
			None => Err(BridgeError::required(InputField::TagValue)),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// An event name. Same format as a [`TagKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
	pub fn parse(raw: &str) -> Result<Self> {
		if !is_valid_event_name(raw) {
			return Err(BridgeError::invalid(InputField::EventName));
		}
		Ok(Self(trim_input(raw).to_string()))
	}

	pub fn from_input(raw: Option<&str>) -> Result<Self> {
		Self::parse(require(InputField::EventName, raw)?)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

macro_rules! impl_str_newtype {
	($($ty:ident),*) => {
		$(
			impl std::fmt::Display for $ty {
				fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
					f.write_str(&self.0)
				}
			}

			impl AsRef<str> for $ty {
				fn as_ref(&self) -> &str {
					&self.0
				}
			}

			impl std::str::FromStr for $ty {
				type Err = BridgeError;

				fn from_str(s: &str) -> Result<Self> {
					Self::parse(s)
				}
			}
		)*
	};
}

impl_str_newtype!(ProjectId, TagKey, TagValue, EventName);

/// A key/value pair attached to the current vendor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomTag {
	pub key: TagKey,
	pub value: TagValue,
}

impl CustomTag {
	pub fn new(key: TagKey, value: TagValue) -> Self {
		Self { key, value }
	}
}

/// A named occurrence in the session.
///
/// The vendor has no event primitive at this layer, so an event is recorded
/// as the tag `name = "true"`. Sessions already recorded this way depend on
/// the encoding staying exactly as it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
	pub name: EventName,
}

impl Event {
	pub fn new(name: EventName) -> Self {
		Self { name }
	}

	/// Returns the tag this event is recorded as.
	pub fn into_tag(self) -> CustomTag {
		CustomTag {
			key: TagKey(self.name.0),
			value: TagValue(EVENT_TAG_VALUE.to_string()),
		}
	}
}
