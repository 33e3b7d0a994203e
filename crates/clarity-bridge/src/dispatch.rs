// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Execution contexts for vendor SDK calls.
//!
//! Vendor SDKs document that they must be driven from the platform's main/UI
//! thread. The gateway never touches a threading primitive directly: it hands
//! a closure to a [`Dispatcher`], which runs it on the required context and
//! reports the result back through a oneshot channel (see [`run_on`]).

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle, ThreadId};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use crate::error::DispatchError;

/// A unit of work scheduled onto an execution context.
pub type DispatchTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs closures on the execution context the vendor SDK requires.
pub trait Dispatcher: Send + Sync {
	/// Schedules `task`. Returning `Ok` means the task was accepted, not that it ran.
	fn dispatch(&self, task: DispatchTask) -> Result<(), DispatchError>;
}

/// Runs `f` through `dispatcher` and waits for its result.
pub async fn run_on<D, F, T>(dispatcher: &D, f: F) -> Result<T, DispatchError>
where
	D: Dispatcher + ?Sized,
	F: FnOnce() -> T + Send + 'static,
	T: Send + 'static,
{
	let (tx, rx) = oneshot::channel();
	dispatcher.dispatch(Box::new(move || {
		// The caller may have given up waiting; nothing to report to then.
		let _ = tx.send(f());
	}))?;
	rx.await.map_err(|_| DispatchError::TaskDropped)
}

/// Runs every task immediately on the calling thread.
///
/// For hosts that already invoke the bridge from their UI thread. A panicking
/// task is contained here, so its waiter sees [`DispatchError::TaskDropped`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
	fn dispatch(&self, task: DispatchTask) -> Result<(), DispatchError> {
		if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
			error!("Dispatched task panicked on calling thread");
		}
		Ok(())
	}
}

/// A dedicated, named thread that executes tasks one at a time, in order.
///
/// Stands in for a platform UI loop: every vendor call made through it runs on
/// the same thread.
#[derive(Debug)]
pub struct MainThreadDispatcher {
	sender: Mutex<Option<mpsc::UnboundedSender<DispatchTask>>>,
	handle: Mutex<Option<JoinHandle<()>>>,
	thread_id: ThreadId,
}

impl MainThreadDispatcher {
	/// Spawns the execution thread.
	pub fn spawn(name: impl Into<String>) -> std::io::Result<Self> {
		let (tx, mut rx) = mpsc::unbounded_channel::<DispatchTask>();
		let handle = thread::Builder::new().name(name.into()).spawn(move || {
			while let Some(task) = rx.blocking_recv() {
				if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
					error!("Dispatched task panicked on main execution context");
				}
			}
			debug!("Main execution context stopped");
		})?;
		let thread_id = handle.thread().id();

		Ok(Self {
			sender: Mutex::new(Some(tx)),
			handle: Mutex::new(Some(handle)),
			thread_id,
		})
	}

	/// Returns the id of the execution thread.
	pub fn thread_id(&self) -> ThreadId {
		self.thread_id
	}

	/// Returns `true` when called from the execution thread.
	pub fn is_current(&self) -> bool {
		thread::current().id() == self.thread_id
	}

	/// Stops accepting tasks, lets queued tasks finish and joins the thread.
	///
	/// Safe to call more than once. When called from the execution thread
	/// itself the thread is left to exit on its own.
	pub fn shutdown(&self) {
		self.sender
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.take();

		if self.is_current() {
			return;
		}

		let handle = self
			.handle
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.take();
		if let Some(handle) = handle {
			if handle.join().is_err() {
				error!("Main execution context thread panicked");
			}
		}
	}
}

impl Dispatcher for MainThreadDispatcher {
	fn dispatch(&self, task: DispatchTask) -> Result<(), DispatchError> {
		let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
		match sender.as_ref() {
			Some(sender) => sender.send(task).map_err(|_| DispatchError::ContextClosed),
			None => Err(DispatchError::ContextClosed),
		}
	}
}

impl Drop for MainThreadDispatcher {
	fn drop(&mut self) {
		// Closing the channel is enough for the thread to exit.
		self.sender
			.get_mut()
			.unwrap_or_else(PoisonError::into_inner)
			.take();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

	#[tokio::test]
	async fn inline_dispatcher_runs_on_caller_thread() {
		let caller = thread::current().id();
		let ran_on = run_on(&InlineDispatcher, || thread::current().id())
			.await
			.unwrap();
		assert_eq!(ran_on, caller);
	}

	#[tokio::test]
	async fn main_thread_dispatcher_runs_on_its_thread() {
		let dispatcher = MainThreadDispatcher::spawn("clarity-main").unwrap();
		let ran_on = run_on(&dispatcher, || thread::current().id())
			.await
			.unwrap();
		assert_eq!(ran_on, dispatcher.thread_id());
		assert_ne!(ran_on, thread::current().id());
		assert!(!dispatcher.is_current());
		dispatcher.shutdown();
	}

	#[tokio::test]
	async fn main_thread_dispatcher_preserves_order() {
		let dispatcher = MainThreadDispatcher::spawn("clarity-main").unwrap();
		let seen = Arc::new(Mutex::new(Vec::new()));
		for i in 0..5 {
			let seen = Arc::clone(&seen);
			dispatcher
				.dispatch(Box::new(move || seen.lock().unwrap().push(i)))
				.unwrap();
		}
		let done = run_on(&dispatcher, || ()).await;
		assert!(done.is_ok());
		assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
		dispatcher.shutdown();
	}

	#[tokio::test]
	async fn shutdown_rejects_new_work() {
		let dispatcher = MainThreadDispatcher::spawn("clarity-main").unwrap();
		dispatcher.shutdown();
		dispatcher.shutdown();

		let err = run_on(&dispatcher, || 1).await.unwrap_err();
		assert_eq!(err, DispatchError::ContextClosed);
	}

	#[tokio::test]
	async fn panicking_task_reports_dropped_and_context_survives() {
		let dispatcher = MainThreadDispatcher::spawn("clarity-main").unwrap();
		let err = run_on(&dispatcher, || -> u32 { panic!("vendor blew up") })
			.await
			.unwrap_err();
		assert_eq!(err, DispatchError::TaskDropped);

		let counter = Arc::new(AtomicUsize::new(0));
		let c = Arc::clone(&counter);
		run_on(&dispatcher, move || c.fetch_add(1, Ordering::SeqCst))
			.await
			.unwrap();
		assert_eq!(counter.load(Ordering::SeqCst), 1);
		dispatcher.shutdown();
	}

	#[tokio::test]
	async fn inline_dispatcher_contains_panics() {
		let err = run_on(&InlineDispatcher, || -> u32 { panic!("vendor blew up") })
			.await
			.unwrap_err();
		assert_eq!(err, DispatchError::TaskDropped);

		let value = run_on(&InlineDispatcher, || 7).await.unwrap();
		assert_eq!(value, 7);
	}

	#[test]
	fn run_on_works_outside_a_runtime() {
		let value = tokio_test::block_on(run_on(&InlineDispatcher, || 42));
		assert_eq!(value, Ok(42));
	}
}
