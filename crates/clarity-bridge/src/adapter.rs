// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The plugin surface and platform selection.
//!
//! [`ClarityPlugin`] is the five-operation contract every platform adapter
//! honours. [`PlatformAdapter`] picks the native gateway when a vendor SDK is
//! available and falls back to [`WebAdapter`] otherwise.

use std::fmt;

use async_trait::async_trait;
use clarity_bridge_core::{
	CustomTagOptions, InitializeOptions, LogEventOptions, SessionIdResult, SessionUrlResult,
};

use crate::error::Result;
use crate::gateway::ClarityGateway;
use crate::web::WebAdapter;

/// Platform an adapter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
	Native,
	Web,
}

impl Platform {
	pub fn as_str(&self) -> &'static str {
		match self {
			Platform::Native => "native",
			Platform::Web => "web",
		}
	}
}

impl fmt::Display for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// The operations a host application can call.
#[async_trait]
pub trait ClarityPlugin: Send + Sync {
	fn platform(&self) -> Platform;

	async fn initialize(&self, options: InitializeOptions) -> Result<()>;

	async fn set_custom_tag(&self, options: CustomTagOptions) -> Result<()>;

	async fn log_event(&self, options: LogEventOptions) -> Result<()>;

	async fn get_current_session_id(&self) -> Result<SessionIdResult>;

	async fn get_current_session_url(&self) -> Result<SessionUrlResult>;
}

#[async_trait]
impl ClarityPlugin for ClarityGateway {
	fn platform(&self) -> Platform {
		Platform::Native
	}

	async fn initialize(&self, options: InitializeOptions) -> Result<()> {
		ClarityGateway::initialize(self, &options).await
	}

	async fn set_custom_tag(&self, options: CustomTagOptions) -> Result<()> {
		ClarityGateway::set_custom_tag(self, &options).await
	}

	async fn log_event(&self, options: LogEventOptions) -> Result<()> {
		ClarityGateway::log_event(self, &options).await
	}

	async fn get_current_session_id(&self) -> Result<SessionIdResult> {
		self.current_session_id().await
	}

	async fn get_current_session_url(&self) -> Result<SessionUrlResult> {
		self.current_session_url().await
	}
}

/// Adapter enum that erases the concrete platform behind [`ClarityPlugin`].
#[derive(Clone)]
pub enum PlatformAdapter {
	/// Vendor SDK gateway.
	Native(ClarityGateway),
	/// Diagnostic-only fallback.
	Web(WebAdapter),
}

impl PlatformAdapter {
	/// Uses `native` when present, the web adapter otherwise.
	pub fn select(native: Option<ClarityGateway>) -> Self {
		match native {
			Some(gateway) => PlatformAdapter::Native(gateway),
			None => PlatformAdapter::Web(WebAdapter::new()),
		}
	}

	fn inner(&self) -> &dyn ClarityPlugin {
		match self {
			PlatformAdapter::Native(gateway) => gateway,
			PlatformAdapter::Web(web) => web,
		}
	}
}

impl fmt::Debug for PlatformAdapter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("PlatformAdapter")
			.field(&self.platform())
			.finish()
	}
}

#[async_trait]
impl ClarityPlugin for PlatformAdapter {
	fn platform(&self) -> Platform {
		self.inner().platform()
	}

	async fn initialize(&self, options: InitializeOptions) -> Result<()> {
		self.inner().initialize(options).await
	}

	async fn set_custom_tag(&self, options: CustomTagOptions) -> Result<()> {
		self.inner().set_custom_tag(options).await
	}

	async fn log_event(&self, options: LogEventOptions) -> Result<()> {
		self.inner().log_event(options).await
	}

	async fn get_current_session_id(&self) -> Result<SessionIdResult> {
		self.inner().get_current_session_id().await
	}

	async fn get_current_session_url(&self) -> Result<SessionUrlResult> {
		self.inner().get_current_session_url().await
	}
}
