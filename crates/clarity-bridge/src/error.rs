// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the bridge runtime.

use clarity_bridge_core::VendorError;
use thiserror::Error;

pub use clarity_bridge_core::{BridgeError, Result};

/// Failures of the execution context vendor calls are dispatched onto.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
	/// The execution context no longer accepts work.
	#[error("execution context has been shut down")]
	ContextClosed,

	/// The task was accepted but never reported completion (it panicked or was dropped).
	#[error("dispatched task did not report completion")]
	TaskDropped,
}

impl From<DispatchError> for VendorError {
	fn from(err: DispatchError) -> Self {
		VendorError::new(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dispatch_errors_become_vendor_errors() {
		let err: VendorError = DispatchError::ContextClosed.into();
		assert_eq!(err.message(), "execution context has been shut down");

		let err: VendorError = DispatchError::TaskDropped.into();
		assert_eq!(err.message(), "dispatched task did not report completion");
	}
}
