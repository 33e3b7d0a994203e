// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! An in-memory vendor SDK that records every call.
//!
//! Only built for tests and under the `test-utils` feature. Clones share the
//! same recording.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use std::time::Duration;

use clarity_bridge_core::{VendorConfig, VendorError, VendorLogLevel};

use crate::vendor::VendorSdk;

/// A call observed by [`RecordingVendorSdk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorCall {
	Initialize {
		project_id: String,
		log_level: VendorLogLevel,
	},
	SetCustomTag {
		key: String,
		value: String,
	},
	CurrentSessionId,
	CurrentSessionUrl,
}

#[derive(Debug, Default)]
struct Recording {
	calls: Vec<VendorCall>,
	threads: Vec<ThreadId>,
	session_id: Option<String>,
	session_url: Option<String>,
	initialize_failure: Option<String>,
	tag_failure: Option<String>,
	query_failure: Option<String>,
	initialize_delay: Option<Duration>,
}

/// Vendor SDK double with scripted answers and failures.
#[derive(Debug, Clone, Default)]
pub struct RecordingVendorSdk {
	inner: Arc<Mutex<Recording>>,
}

impl RecordingVendorSdk {
	pub fn new() -> Self {
		Self::default()
	}

	fn lock(&self) -> MutexGuard<'_, Recording> {
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Sets the session id the SDK reports.
	pub fn with_session_id(self, session_id: impl Into<String>) -> Self {
		self.lock().session_id = Some(session_id.into());
		self
	}

	/// Sets the session URL the SDK reports.
	pub fn with_session_url(self, url: impl Into<String>) -> Self {
		self.lock().session_url = Some(url.into());
		self
	}

	/// Makes every initialize call fail with `message` until cleared.
	pub fn fail_initialize(&self, message: impl Into<String>) {
		self.lock().initialize_failure = Some(message.into());
	}

	/// Makes every tag call fail with `message` until cleared.
	pub fn fail_tags(&self, message: impl Into<String>) {
		self.lock().tag_failure = Some(message.into());
	}

	/// Makes every session query fail with `message` until cleared.
	pub fn fail_queries(&self, message: impl Into<String>) {
		self.lock().query_failure = Some(message.into());
	}

	/// Clears all scripted failures.
	pub fn clear_failures(&self) {
		let mut recording = self.lock();
		recording.initialize_failure = None;
		recording.tag_failure = None;
		recording.query_failure = None;
	}

	/// Blocks inside initialize for `delay`, widening race windows in tests.
	pub fn with_initialize_delay(self, delay: Duration) -> Self {
		self.lock().initialize_delay = Some(delay);
		self
	}

	/// Returns every call so far, in order.
	pub fn calls(&self) -> Vec<VendorCall> {
		self.lock().calls.clone()
	}

	/// Returns the thread each call ran on, in call order.
	pub fn call_threads(&self) -> Vec<ThreadId> {
		self.lock().threads.clone()
	}

	pub fn call_count(&self) -> usize {
		self.lock().calls.len()
	}

	pub fn initialize_count(&self) -> usize {
		self.lock()
			.calls
			.iter()
			.filter(|call| matches!(call, VendorCall::Initialize { .. }))
			.count()
	}

	/// Returns the `(key, value)` pairs passed to `set_custom_tag`.
	pub fn tags(&self) -> Vec<(String, String)> {
		self.lock()
			.calls
			.iter()
			.filter_map(|call| match call {
				VendorCall::SetCustomTag { key, value } => Some((key.clone(), value.clone())),
				_ => None,
			})
			.collect()
	}

	fn record(&self, call: VendorCall) -> MutexGuard<'_, Recording> {
		let mut recording = self.lock();
		recording.calls.push(call);
		recording.threads.push(thread::current().id());
		recording
	}
}

impl VendorSdk for RecordingVendorSdk {
	fn initialize(&self, config: &VendorConfig) -> Result<(), VendorError> {
		let (delay, failure) = {
			let recording = self.record(VendorCall::Initialize {
				project_id: config.project_id.as_str().to_string(),
				log_level: config.log_level,
			});
			(recording.initialize_delay, recording.initialize_failure.clone())
		};
		if let Some(delay) = delay {
			thread::sleep(delay);
		}
		match failure {
			Some(message) => Err(VendorError::new(message)),
			None => Ok(()),
		}
	}

	fn set_custom_tag(&self, key: &str, value: &str) -> Result<(), VendorError> {
		let recording = self.record(VendorCall::SetCustomTag {
			key: key.to_string(),
			value: value.to_string(),
		});
		match &recording.tag_failure {
			Some(message) => Err(VendorError::new(message.clone())),
			None => Ok(()),
		}
	}

	fn current_session_id(&self) -> Result<Option<String>, VendorError> {
		let recording = self.record(VendorCall::CurrentSessionId);
		match &recording.query_failure {
			Some(message) => Err(VendorError::new(message.clone())),
			None => Ok(recording.session_id.clone()),
		}
	}

	fn current_session_url(&self) -> Result<Option<String>, VendorError> {
		let recording = self.record(VendorCall::CurrentSessionUrl);
		match &recording.query_failure {
			Some(message) => Err(VendorError::new(message.clone())),
			None => Ok(recording.session_url.clone()),
		}
	}
}
