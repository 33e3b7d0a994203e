// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The vendor analytics SDK, seen from the bridge.

use std::sync::Arc;

use clarity_bridge_core::{VendorConfig, VendorError};

/// The vendor analytics SDK for one native platform.
///
/// Implementations wrap the platform's SDK entry points one-to-one. They are
/// always invoked through a [`Dispatcher`](crate::Dispatcher), so they may
/// assume they run on the execution context the SDK requires. Methods are
/// synchronous because the SDK calls they wrap are.
pub trait VendorSdk: Send + Sync + 'static {
	/// Starts the vendor SDK for a project.
	fn initialize(&self, config: &VendorConfig) -> Result<(), VendorError>;

	/// Attaches a key/value tag to the current session.
	fn set_custom_tag(&self, key: &str, value: &str) -> Result<(), VendorError>;

	/// Returns the current session id, if the SDK has one.
	fn current_session_id(&self) -> Result<Option<String>, VendorError>;

	/// Returns the dashboard URL of the current session, if the SDK has one.
	fn current_session_url(&self) -> Result<Option<String>, VendorError>;
}

/// Type alias for a shared vendor SDK.
pub type SharedVendorSdk = Arc<dyn VendorSdk>;
