// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Clarity session analytics bridge.
//!
//! This crate holds everything the platform adapters share and that carries no
//! runtime behaviour of its own:
//!
//! - [`validation`]: format predicates for project ids, tag keys, tag values
//!   and event names
//! - [`types`]: validated identifiers ([`ProjectId`], [`TagKey`], ...) and the
//!   event-as-tag encoding
//! - [`payload`]: host-facing request and response shapes
//! - [`vendor`]: the configuration handed to the vendor SDK and its error type
//! - [`error`]: the error taxonomy surfaced to callers

pub mod error;
pub mod operation;
pub mod payload;
pub mod types;
pub mod validation;
pub mod vendor;

pub use error::{BridgeError, InputField, Result};
pub use operation::{Operation, PLUGIN_NAME};
pub use payload::{
	normalize_session_value, CustomTagOptions, InitializeOptions, LogEventOptions, SessionIdResult,
	SessionUrlResult,
};
pub use types::{CustomTag, Event, EventName, ProjectId, TagKey, TagValue, EVENT_TAG_VALUE};
pub use validation::{
	is_valid_event_name, is_valid_project_id, is_valid_tag_key, is_valid_tag_value, trim_input,
	PROJECT_ID_MAX_LEN, PROJECT_ID_MIN_LEN, TAG_KEY_MAX_LEN, TAG_VALUE_MAX_LEN,
};
pub use vendor::{VendorConfig, VendorError, VendorLogLevel};
