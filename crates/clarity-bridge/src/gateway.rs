// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The native operation gateway.
//!
//! Every operation follows the same shape: gate on initialization, validate
//! input, dispatch the vendor call onto the required execution context, map
//! the outcome. The four post-initialize operations check initialization
//! *before* validating input, so a call made too early is always reported as
//! [`BridgeError::NotInitialized`] regardless of its payload.

use std::sync::Arc;

use clarity_bridge_core::{
	normalize_session_value, CustomTag, CustomTagOptions, InitializeOptions, LogEventOptions,
	Operation, SessionIdResult, SessionUrlResult, VendorConfig, VendorError, VendorLogLevel,
};
use tracing::{debug, error, info, warn};

use crate::config::BridgeConfig;
use crate::dispatch::{run_on, Dispatcher, InlineDispatcher};
use crate::error::{BridgeError, Result};
use crate::state::{InitOutcome, SessionState};
use crate::vendor::{SharedVendorSdk, VendorSdk};

/// Builder for constructing a [`ClarityGateway`].
pub struct ClarityGatewayBuilder {
	vendor: Option<SharedVendorSdk>,
	dispatcher: Option<Arc<dyn Dispatcher>>,
	config: BridgeConfig,
}

impl ClarityGatewayBuilder {
	pub fn new() -> Self {
		Self {
			vendor: None,
			dispatcher: None,
			config: BridgeConfig::default(),
		}
	}

	/// Sets the vendor SDK the gateway delegates to. Required.
	pub fn vendor(self, vendor: impl VendorSdk) -> Self {
		self.shared_vendor(Arc::new(vendor))
	}

	/// Sets an already-shared vendor SDK.
	pub fn shared_vendor(mut self, vendor: SharedVendorSdk) -> Self {
		self.vendor = Some(vendor);
		self
	}

	/// Sets the execution context for vendor calls.
	///
	/// Defaults to [`InlineDispatcher`].
	pub fn dispatcher(self, dispatcher: impl Dispatcher + 'static) -> Self {
		self.shared_dispatcher(Arc::new(dispatcher))
	}

	pub fn shared_dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
		self.dispatcher = Some(dispatcher);
		self
	}

	pub fn config(mut self, config: BridgeConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the vendor SDK's own log level.
	pub fn vendor_log_level(mut self, level: VendorLogLevel) -> Self {
		self.config.vendor_log_level = level;
		self
	}

	pub fn build(self) -> Result<ClarityGateway> {
		let vendor = self
			.vendor
			.ok_or_else(|| BridgeError::Configuration("a vendor SDK is required".to_string()))?;
		let dispatcher = self
			.dispatcher
			.unwrap_or_else(|| Arc::new(InlineDispatcher));

		Ok(ClarityGateway {
			inner: Arc::new(GatewayInner {
				vendor,
				dispatcher,
				state: SessionState::new(),
				config: self.config,
			}),
		})
	}
}

impl Default for ClarityGatewayBuilder {
	fn default() -> Self {
		Self::new()
	}
}

struct GatewayInner {
	vendor: SharedVendorSdk,
	dispatcher: Arc<dyn Dispatcher>,
	state: SessionState,
	config: BridgeConfig,
}

/// Validates, gates and forwards the five operations to a native vendor SDK.
///
/// Clones share the same session state.
///
/// # Example
///
/// ```ignore
/// let gateway = ClarityGateway::builder()
///     .vendor(platform_sdk)
///     .dispatcher(MainThreadDispatcher::spawn("clarity-main")?)
///     .build()?;
///
/// gateway.initialize(&InitializeOptions::new("abcd1234efgh")).await?;
/// gateway.log_event(&LogEventOptions::new("purchase")).await?;
/// let url = gateway.current_session_url().await?.url;
/// ```
#[derive(Clone)]
pub struct ClarityGateway {
	inner: Arc<GatewayInner>,
}

impl ClarityGateway {
	pub fn builder() -> ClarityGatewayBuilder {
		ClarityGatewayBuilder::new()
	}

	pub fn is_initialized(&self) -> bool {
		self.inner.state.is_initialized()
	}

	/// Starts the vendor SDK for a project. Idempotent once it has succeeded.
	///
	/// The transition is recorded by the dispatched task itself, so dropping
	/// this future after dispatch neither loses a successful vendor initialize
	/// nor lets a retry initialize the vendor twice.
	pub async fn initialize(&self, options: &InitializeOptions) -> Result<()> {
		let project_id = options.validate()?;
		let config = VendorConfig::new(project_id.clone())
			.with_log_level(self.inner.config.vendor_log_level);
		let inner = Arc::clone(&self.inner);

		let outcome = self
			.inner
			.state
			.initialize_with(|| async move {
				self.call_vendor(move |vendor| {
					if inner.state.is_initialized() {
						return Ok(());
					}
					vendor.initialize(&config)?;
					inner.state.mark_initialized();
					Ok(())
				})
				.await
				.map_err(|e| {
					error!(error = %e, "Failed to initialize Clarity");
					BridgeError::InitializationFailure(e)
				})
			})
			.await?;

		match outcome {
			InitOutcome::Initialized => {
				info!(project_id = %project_id, "Clarity initialized successfully");
			}
			InitOutcome::AlreadyInitialized => warn!("Clarity already initialized"),
		}
		Ok(())
	}

	/// Attaches a key/value tag to the current session.
	pub async fn set_custom_tag(&self, options: &CustomTagOptions) -> Result<()> {
		self.inner.state.ensure_ready_for(Operation::SetCustomTag)?;
		let tag = options.validate()?;
		let key = tag.key.clone();

		self.forward_tag(tag, Operation::SetCustomTag).await?;
		debug!(key = %key, "Custom tag set");
		Ok(())
	}

	/// Records an event as the tag `event_name = "true"`.
	pub async fn log_event(&self, options: &LogEventOptions) -> Result<()> {
		self.inner.state.ensure_ready_for(Operation::LogEvent)?;
		let event = options.validate()?;
		let name = event.name.clone();

		self.forward_tag(event.into_tag(), Operation::LogEvent)
			.await?;
		debug!(event_name = %name, "Event logged");
		Ok(())
	}

	/// Queries the vendor for the current session id.
	pub async fn current_session_id(&self) -> Result<SessionIdResult> {
		self.inner.state.ensure_ready_for(Operation::GetCurrentSessionId)?;
		let session_id = self
			.query(Operation::GetCurrentSessionId, |vendor| {
				vendor.current_session_id()
			})
			.await?;
		Ok(SessionIdResult { session_id })
	}

	/// Queries the vendor for the current session's dashboard URL.
	pub async fn current_session_url(&self) -> Result<SessionUrlResult> {
		self.inner.state.ensure_ready_for(Operation::GetCurrentSessionUrl)?;
		let url = self
			.query(Operation::GetCurrentSessionUrl, |vendor| {
				vendor.current_session_url()
			})
			.await?;
		Ok(SessionUrlResult { url })
	}

	async fn forward_tag(&self, tag: CustomTag, operation: Operation) -> Result<()> {
		self.call_vendor(move |vendor| vendor.set_custom_tag(tag.key.as_str(), tag.value.as_str()))
			.await
			.map_err(|source| delegate_failure(operation, source))
	}

	async fn query<F>(&self, operation: Operation, f: F) -> Result<Option<String>>
	where
		F: FnOnce(&dyn VendorSdk) -> std::result::Result<Option<String>, VendorError>
			+ Send
			+ 'static,
	{
		self.call_vendor(f)
			.await
			.map(normalize_session_value)
			.map_err(|source| delegate_failure(operation, source))
	}

	/// Runs `f` against the vendor on the dispatcher's execution context.
	async fn call_vendor<T, F>(&self, f: F) -> std::result::Result<T, VendorError>
	where
		F: FnOnce(&dyn VendorSdk) -> std::result::Result<T, VendorError> + Send + 'static,
		T: Send + 'static,
	{
		let vendor = Arc::clone(&self.inner.vendor);
		run_on(self.inner.dispatcher.as_ref(), move || f(vendor.as_ref())).await?
	}
}

fn delegate_failure(operation: Operation, source: VendorError) -> BridgeError {
	error!(operation = %operation, error = %source, "Vendor SDK call failed");
	BridgeError::DelegateFailure { operation, source }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dispatch::MainThreadDispatcher;
	use crate::recording::{RecordingVendorSdk, VendorCall};
	use clarity_bridge_core::InputField;
	use std::time::Duration;

	fn gateway(vendor: &RecordingVendorSdk) -> ClarityGateway {
		ClarityGateway::builder()
			.vendor(vendor.clone())
			.build()
			.unwrap()
	}

	async fn initialized(vendor: &RecordingVendorSdk) -> ClarityGateway {
		let gateway = gateway(vendor);
		gateway
			.initialize(&InitializeOptions::new("abcd1234efgh"))
			.await
			.unwrap();
		gateway
	}

	#[test]
	fn build_requires_vendor() {
		let err = ClarityGateway::builder().build().err().unwrap();
		assert!(matches!(err, BridgeError::Configuration(_)));
	}

	#[tokio::test]
	async fn initialize_rejects_short_project_id() {
		let vendor = RecordingVendorSdk::new();
		let gateway = gateway(&vendor);

		let err = gateway
			.initialize(&InitializeOptions::new("short"))
			.await
			.unwrap_err();
		assert_eq!(err.field(), Some(InputField::ProjectId));
		assert!(!gateway.is_initialized());
		assert_eq!(vendor.call_count(), 0);
	}

	#[tokio::test]
	async fn initialize_rejects_missing_project_id() {
		let vendor = RecordingVendorSdk::new();
		let err = gateway(&vendor)
			.initialize(&InitializeOptions::default())
			.await
			.unwrap_err();
		assert_eq!(err.to_string(), "Project ID is required");
	}

	#[tokio::test]
	async fn initialize_passes_trimmed_id_and_log_level() {
		let vendor = RecordingVendorSdk::new();
		let gateway = ClarityGateway::builder()
			.vendor(vendor.clone())
			.vendor_log_level(VendorLogLevel::Verbose)
			.build()
			.unwrap();

		gateway
			.initialize(&InitializeOptions::new(" abcd1234efgh "))
			.await
			.unwrap();

		assert!(gateway.is_initialized());
		assert_eq!(
			vendor.calls(),
			vec![VendorCall::Initialize {
				project_id: "abcd1234efgh".to_string(),
				log_level: VendorLogLevel::Verbose,
			}]
		);
	}

	#[tokio::test]
	async fn initialize_is_idempotent() {
		let vendor = RecordingVendorSdk::new();
		let gateway = gateway(&vendor);
		gateway
			.initialize(&InitializeOptions::new("abcdefgh"))
			.await
			.unwrap();
		gateway
			.initialize(&InitializeOptions::new("abcdefgh"))
			.await
			.unwrap();
		assert_eq!(vendor.initialize_count(), 1);
	}

	#[tokio::test]
	async fn initialize_still_validates_when_initialized() {
		let vendor = RecordingVendorSdk::new();
		let gateway = initialized(&vendor).await;
		let err = gateway
			.initialize(&InitializeOptions::new("bad id!"))
			.await
			.unwrap_err();
		assert_eq!(err.code(), "INVALID_INPUT");
		assert!(gateway.is_initialized());
	}

	#[tokio::test]
	async fn vendor_init_failure_leaves_gateway_retryable() {
		let vendor = RecordingVendorSdk::new();
		vendor.fail_initialize("activity unavailable");
		let gateway = gateway(&vendor);

		let err = gateway
			.initialize(&InitializeOptions::new("abcdefgh"))
			.await
			.unwrap_err();
		assert_eq!(
			err.to_string(),
			"Failed to initialize Clarity: activity unavailable"
		);
		assert!(!gateway.is_initialized());

		vendor.clear_failures();
		gateway
			.initialize(&InitializeOptions::new("abcdefgh"))
			.await
			.unwrap();
		assert!(gateway.is_initialized());
		assert_eq!(vendor.initialize_count(), 2);
	}

	#[tokio::test]
	async fn gated_operations_fail_before_initialize_without_vendor_calls() {
		let vendor = RecordingVendorSdk::new();
		let gateway = gateway(&vendor);

		let results = [
			gateway
				.set_custom_tag(&CustomTagOptions::new("plan", "pro"))
				.await
				.unwrap_err(),
			gateway
				.log_event(&LogEventOptions::new("purchase"))
				.await
				.unwrap_err(),
			gateway.current_session_id().await.unwrap_err(),
			gateway.current_session_url().await.unwrap_err(),
		];
		for err in results {
			assert!(matches!(err, BridgeError::NotInitialized), "got {err:?}");
		}
		assert_eq!(vendor.call_count(), 0);
	}

	#[tokio::test]
	async fn initialization_is_checked_before_validation() {
		let vendor = RecordingVendorSdk::new();
		let gateway = gateway(&vendor);

		let err = gateway
			.set_custom_tag(&CustomTagOptions::new("1type", "x"))
			.await
			.unwrap_err();
		assert!(matches!(err, BridgeError::NotInitialized));

		let err = gateway
			.log_event(&LogEventOptions::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BridgeError::NotInitialized));
	}

	#[tokio::test]
	async fn set_custom_tag_rejects_bad_key_after_init() {
		let vendor = RecordingVendorSdk::new();
		let gateway = initialized(&vendor).await;

		let err = gateway
			.set_custom_tag(&CustomTagOptions::new("1type", "x"))
			.await
			.unwrap_err();
		assert_eq!(err.field(), Some(InputField::TagKey));
		assert!(vendor.tags().is_empty());
	}

	#[tokio::test]
	async fn set_custom_tag_forwards_key_and_value() {
		let vendor = RecordingVendorSdk::new();
		let gateway = initialized(&vendor).await;

		gateway
			.set_custom_tag(&CustomTagOptions::new(" plan ", " pro "))
			.await
			.unwrap();
		assert_eq!(vendor.tags(), vec![("plan".to_string(), " pro ".to_string())]);
	}

	#[tokio::test]
	async fn log_event_is_a_true_tag() {
		let event_vendor = RecordingVendorSdk::new();
		let event_gateway = initialized(&event_vendor).await;
		event_gateway
			.log_event(&LogEventOptions::new("purchase"))
			.await
			.unwrap();

		let tag_vendor = RecordingVendorSdk::new();
		let tag_gateway = initialized(&tag_vendor).await;
		tag_gateway
			.set_custom_tag(&CustomTagOptions::new("purchase", "true"))
			.await
			.unwrap();

		assert_eq!(event_vendor.calls(), tag_vendor.calls());
	}

	#[tokio::test]
	async fn delegate_failures_carry_operation_and_cause() {
		let vendor = RecordingVendorSdk::new();
		let gateway = initialized(&vendor).await;
		vendor.fail_tags("quota exceeded");
		vendor.fail_queries("no session");

		let err = gateway
			.set_custom_tag(&CustomTagOptions::new("plan", "pro"))
			.await
			.unwrap_err();
		assert_eq!(err.to_string(), "Failed to set custom tag: quota exceeded");

		let err = gateway
			.log_event(&LogEventOptions::new("purchase"))
			.await
			.unwrap_err();
		assert_eq!(err.to_string(), "Failed to log event: quota exceeded");

		let err = gateway.current_session_id().await.unwrap_err();
		assert_eq!(err.to_string(), "Failed to get session ID: no session");

		let err = gateway.current_session_url().await.unwrap_err();
		assert!(matches!(
			err,
			BridgeError::DelegateFailure {
				operation: Operation::GetCurrentSessionUrl,
				..
			}
		));
		assert!(gateway.is_initialized());
	}

	#[tokio::test]
	async fn session_queries_normalize_absent_values() {
		let vendor = RecordingVendorSdk::new().with_session_id("");
		let gateway = initialized(&vendor).await;

		assert_eq!(gateway.current_session_id().await.unwrap().session_id, None);
		assert_eq!(gateway.current_session_url().await.unwrap().url, None);
	}

	#[tokio::test]
	async fn session_queries_are_live() {
		let vendor = RecordingVendorSdk::new()
			.with_session_id("sess-1")
			.with_session_url("https://clarity.microsoft.com/player/p/sess-1");
		let gateway = initialized(&vendor).await;

		assert_eq!(
			gateway.current_session_id().await.unwrap().session_id.as_deref(),
			Some("sess-1")
		);
		gateway.current_session_id().await.unwrap();
		assert_eq!(
			gateway.current_session_url().await.unwrap().url.as_deref(),
			Some("https://clarity.microsoft.com/player/p/sess-1")
		);
		let queries = vendor
			.calls()
			.into_iter()
			.filter(|c| matches!(c, VendorCall::CurrentSessionId))
			.count();
		assert_eq!(queries, 2);
	}

	#[tokio::test]
	async fn vendor_calls_run_on_main_thread_dispatcher() {
		let dispatcher = Arc::new(MainThreadDispatcher::spawn("clarity-main").unwrap());
		let vendor = RecordingVendorSdk::new().with_session_id("sess-1");
		let gateway = ClarityGateway::builder()
			.vendor(vendor.clone())
			.shared_dispatcher(dispatcher.clone())
			.build()
			.unwrap();

		gateway
			.initialize(&InitializeOptions::new("abcdefgh"))
			.await
			.unwrap();
		gateway
			.log_event(&LogEventOptions::new("purchase"))
			.await
			.unwrap();
		gateway.current_session_id().await.unwrap();

		let threads = vendor.call_threads();
		assert_eq!(threads.len(), 3);
		assert!(threads.iter().all(|t| *t == dispatcher.thread_id()));
		dispatcher.shutdown();
	}

	#[tokio::test]
	async fn closed_context_surfaces_as_vendor_failure() {
		let dispatcher = Arc::new(MainThreadDispatcher::spawn("clarity-main").unwrap());
		dispatcher.shutdown();
		let vendor = RecordingVendorSdk::new();
		let gateway = ClarityGateway::builder()
			.vendor(vendor.clone())
			.shared_dispatcher(dispatcher)
			.build()
			.unwrap();

		let err = gateway
			.initialize(&InitializeOptions::new("abcdefgh"))
			.await
			.unwrap_err();
		assert!(matches!(err, BridgeError::InitializationFailure(_)));
		assert_eq!(vendor.call_count(), 0);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_initialize_calls_vendor_once() {
		let vendor = RecordingVendorSdk::new().with_initialize_delay(Duration::from_millis(25));
		let gateway = gateway(&vendor);

		let mut handles = Vec::new();
		for _ in 0..6 {
			let gateway = gateway.clone();
			handles.push(tokio::spawn(async move {
				gateway
					.initialize(&InitializeOptions::new("abcdefgh"))
					.await
			}));
		}
		for handle in handles {
			handle.await.unwrap().unwrap();
		}
		assert_eq!(vendor.initialize_count(), 1);
	}

	struct PanickingVendor;

	impl VendorSdk for PanickingVendor {
		fn initialize(&self, _config: &VendorConfig) -> std::result::Result<(), VendorError> {
			Ok(())
		}

		fn set_custom_tag(&self, _key: &str, _value: &str) -> std::result::Result<(), VendorError> {
			panic!("sdk threw");
		}

		fn current_session_id(&self) -> std::result::Result<Option<String>, VendorError> {
			panic!("sdk threw");
		}

		fn current_session_url(&self) -> std::result::Result<Option<String>, VendorError> {
			Ok(None)
		}
	}

	#[tokio::test]
	async fn vendor_panic_on_default_dispatcher_is_delegate_failure() {
		let gateway = ClarityGateway::builder()
			.vendor(PanickingVendor)
			.build()
			.unwrap();
		gateway
			.initialize(&InitializeOptions::new("abcdefgh"))
			.await
			.unwrap();

		let err = gateway
			.set_custom_tag(&CustomTagOptions::new("plan", "pro"))
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			BridgeError::DelegateFailure {
				operation: Operation::SetCustomTag,
				..
			}
		));
		assert_eq!(
			err.to_string(),
			"Failed to set custom tag: dispatched task did not report completion"
		);

		let err = gateway.current_session_id().await.unwrap_err();
		assert_eq!(err.code(), "DELEGATE_FAILURE");
		assert!(gateway.is_initialized());
		assert_eq!(gateway.current_session_url().await.unwrap().url, None);
	}

	#[tokio::test]
	async fn dropped_initialize_still_records_vendor_success() {
		let dispatcher = Arc::new(MainThreadDispatcher::spawn("clarity-main").unwrap());
		let vendor = RecordingVendorSdk::new().with_initialize_delay(Duration::from_millis(50));
		let gateway = ClarityGateway::builder()
			.vendor(vendor.clone())
			.shared_dispatcher(dispatcher.clone())
			.build()
			.unwrap();

		let options = InitializeOptions::new("abcdefgh");
		let timed_out =
			tokio::time::timeout(Duration::from_millis(5), gateway.initialize(&options)).await;
		assert!(timed_out.is_err());

		// The retry queues behind the abandoned task and must not re-run the vendor.
		gateway.initialize(&options).await.unwrap();
		assert!(gateway.is_initialized());
		assert_eq!(vendor.initialize_count(), 1);
		dispatcher.shutdown();
	}
}
