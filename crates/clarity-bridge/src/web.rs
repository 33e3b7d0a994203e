// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Web platform adapter.
//!
//! There is no vendor SDK to drive on the web; sites embed the Clarity
//! tracking tag instead. Every operation logs a warning and succeeds with an
//! empty result.

use async_trait::async_trait;
use clarity_bridge_core::{
	CustomTagOptions, InitializeOptions, LogEventOptions, Operation, SessionIdResult,
	SessionUrlResult,
};
use tracing::warn;

use crate::adapter::{ClarityPlugin, Platform};
use crate::error::Result;

/// Where web integrations should go instead.
pub const WEB_TAG_URL: &str = "https://clarity.microsoft.com";

/// Adapter used when no native vendor SDK is available. Never tracks anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebAdapter;

impl WebAdapter {
	pub fn new() -> Self {
		Self
	}

	fn unsupported(&self, operation: Operation) {
		warn!(
			operation = %operation,
			"Clarity {operation}() is not supported on web; add the Clarity tracking tag from {WEB_TAG_URL} instead"
		);
	}
}

#[async_trait]
impl ClarityPlugin for WebAdapter {
	fn platform(&self) -> Platform {
		Platform::Web
	}

	async fn initialize(&self, _options: InitializeOptions) -> Result<()> {
		self.unsupported(Operation::Initialize);
		Ok(())
	}

	async fn set_custom_tag(&self, _options: CustomTagOptions) -> Result<()> {
		self.unsupported(Operation::SetCustomTag);
		Ok(())
	}

	async fn log_event(&self, _options: LogEventOptions) -> Result<()> {
		self.unsupported(Operation::LogEvent);
		Ok(())
	}

	async fn get_current_session_id(&self) -> Result<SessionIdResult> {
		self.unsupported(Operation::GetCurrentSessionId);
		Ok(SessionIdResult::default())
	}

	async fn get_current_session_url(&self) -> Result<SessionUrlResult> {
		self.unsupported(Operation::GetCurrentSessionUrl);
		Ok(SessionUrlResult::default())
	}
}
