// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host bridge for Clarity session analytics.
//!
//! This crate exposes five operations (initialize, set custom tag, log event,
//! get session id, get session URL) to a hybrid app shell and forwards them to
//! the platform's vendor analytics SDK. Input is validated before anything
//! reaches the vendor, and nothing but `initialize` reaches it until
//! initialization has succeeded.
//!
//! # Quick Start
//!
//! ```ignore
//! use clarity_bridge::{ClarityGateway, InitializeOptions, LogEventOptions, MainThreadDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = ClarityGateway::builder()
//!         .vendor(platform_sdk)
//!         .dispatcher(MainThreadDispatcher::spawn("clarity-main")?)
//!         .config(BridgeConfig::load(None)?)
//!         .build()?;
//!
//!     gateway.initialize(&InitializeOptions::new("abcd1234efgh")).await?;
//!     gateway.log_event(&LogEventOptions::new("purchase")).await?;
//!
//!     if let Some(url) = gateway.current_session_url().await?.url {
//!         println!("watch this session at {url}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Hosting
//!
//! [`ClarityPluginHost`] accepts calls as `(plugin, method, data)` with a JSON
//! payload, the way a hybrid shell delivers them:
//!
//! ```ignore
//! let host = ClarityPluginHost::with_gateway(Some(gateway));
//! let result = host
//!     .invoke("Clarity", "setCustomTag", json!({ "key": "plan", "value": "pro" }))
//!     .await?;
//! assert_eq!(result, json!({}));
//! ```
//!
//! Without a native gateway the host falls back to [`WebAdapter`], which logs a
//! warning for every call and tracks nothing.
//!
//! # Execution context
//!
//! Vendor SDKs must be driven from the platform's main thread. Every vendor
//! call goes through a [`Dispatcher`]; use [`MainThreadDispatcher`] to get a
//! dedicated thread, or [`InlineDispatcher`] when the caller already is on it.

mod adapter;
mod config;
mod dispatch;
mod error;
mod gateway;
mod host;
#[cfg(any(test, feature = "test-utils"))]
mod recording;
mod state;
mod vendor;
mod web;

pub use adapter::{ClarityPlugin, Platform, PlatformAdapter};
pub use config::{BridgeConfig, LOG_LEVEL_ENV};
pub use dispatch::{run_on, DispatchTask, Dispatcher, InlineDispatcher, MainThreadDispatcher};
pub use error::{BridgeError, DispatchError, Result};
pub use gateway::{ClarityGateway, ClarityGatewayBuilder};
pub use host::{payload, CallRejection, ClarityPluginHost, PluginCall};
#[cfg(any(test, feature = "test-utils"))]
pub use recording::{RecordingVendorSdk, VendorCall};
pub use state::{InitOutcome, SessionState};
pub use vendor::{SharedVendorSdk, VendorSdk};
pub use web::{WebAdapter, WEB_TAG_URL};

pub use clarity_bridge_core::{
	CustomTag, CustomTagOptions, Event, EventName, InitializeOptions, InputField, LogEventOptions,
	Operation, ProjectId, SessionIdResult, SessionUrlResult, TagKey, TagValue, VendorConfig,
	VendorError, VendorLogLevel, PLUGIN_NAME,
};
