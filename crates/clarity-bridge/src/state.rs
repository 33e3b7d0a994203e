// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Initialization state of a gateway.
//!
//! Two states, Uninitialized and Initialized, with a single one-way
//! transition. Reads are lock-free; the transition itself is serialized so
//! concurrent initialize calls invoke the vendor at most once.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use clarity_bridge_core::Operation;
use tokio::sync::Mutex;

use crate::error::{BridgeError, Result};

/// What an initialize attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
	/// This call performed the transition.
	Initialized,
	/// An earlier call already had; nothing was done.
	AlreadyInitialized,
}

/// Initialization flag owned by one gateway.
#[derive(Debug, Default)]
pub struct SessionState {
	initialized: AtomicBool,
	transition: Mutex<()>,
}

impl SessionState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_initialized(&self) -> bool {
		self.initialized.load(Ordering::Acquire)
	}

	/// Fails with [`BridgeError::NotInitialized`] unless initialized.
	pub fn ensure_initialized(&self) -> Result<()> {
		if self.is_initialized() {
			Ok(())
		} else {
			Err(BridgeError::NotInitialized)
		}
	}

	/// Gates `operation`: everything but initialize needs the Initialized state.
	pub fn ensure_ready_for(&self, operation: Operation) -> Result<()> {
		if operation.requires_initialization() {
			self.ensure_initialized()
		} else {
			Ok(())
		}
	}

	/// Records the transition directly.
	///
	/// For callers whose `init` work can outlive the future that started it.
	pub fn mark_initialized(&self) {
		self.initialized.store(true, Ordering::Release);
	}

	/// Runs `init` and flips to Initialized if it succeeds.
	///
	/// `init` is not called at all when already initialized. When it fails the
	/// state stays Uninitialized so a later attempt can retry.
	///
	/// If the returned future is dropped while `init` is pending, nothing is
	/// recorded here even though the work `init` started may still complete.
	/// Work that runs detached from the caller (a dispatched vendor call)
	/// should call [`SessionState::mark_initialized`] itself on success and
	/// check [`SessionState::is_initialized`] before starting.
	pub async fn initialize_with<F, Fut>(&self, init: F) -> Result<InitOutcome>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<()>>,
	{
		if self.is_initialized() {
			return Ok(InitOutcome::AlreadyInitialized);
		}

		let _guard = self.transition.lock().await;
		if self.is_initialized() {
			return Ok(InitOutcome::AlreadyInitialized);
		}

		init().await?;
		self.mark_initialized();
		Ok(InitOutcome::Initialized)
	}
}
