// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host-side routing of JSON plugin calls.
//!
//! A hybrid app shell delivers calls as `(plugin, method, data)` with a JSON
//! object payload and expects either a JSON object back or a rejection
//! carrying `{ message, code }`. [`ClarityPluginHost`] decodes the payload,
//! routes it to the selected [`PlatformAdapter`] and encodes the outcome.

use clarity_bridge_core::{
	CustomTagOptions, InitializeOptions, LogEventOptions, Operation, PLUGIN_NAME,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::adapter::{ClarityPlugin, Platform, PlatformAdapter};
use crate::error::{BridgeError, Result};
use crate::gateway::ClarityGateway;

/// A call as delivered by the host shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginCall {
	pub plugin: String,
	pub method: String,
	#[serde(default)]
	pub data: Value,
}

impl PluginCall {
	pub fn new(method: impl Into<String>, data: Value) -> Self {
		Self {
			plugin: PLUGIN_NAME.to_string(),
			method: method.into(),
			data,
		}
	}
}

/// The rejection handed back to the host shell for a failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRejection {
	pub message: String,
	pub code: String,
}

impl From<&BridgeError> for CallRejection {
	fn from(err: &BridgeError) -> Self {
		Self {
			message: err.to_string(),
			code: err.code().to_string(),
		}
	}
}

impl From<BridgeError> for CallRejection {
	fn from(err: BridgeError) -> Self {
		Self::from(&err)
	}
}

/// Registers the Clarity operations and routes calls to them.
#[derive(Debug, Clone)]
pub struct ClarityPluginHost {
	adapter: PlatformAdapter,
}

impl ClarityPluginHost {
	pub fn new(adapter: PlatformAdapter) -> Self {
		Self { adapter }
	}

	/// Uses the native gateway when one is supplied, the web adapter otherwise.
	pub fn with_gateway(gateway: Option<ClarityGateway>) -> Self {
		Self::new(PlatformAdapter::select(gateway))
	}

	/// The name calls must address.
	pub fn name(&self) -> &'static str {
		PLUGIN_NAME
	}

	pub fn platform(&self) -> Platform {
		self.adapter.platform()
	}

	pub fn adapter(&self) -> &PlatformAdapter {
		&self.adapter
	}

	/// Registered method names.
	pub fn methods(&self) -> impl Iterator<Item = &'static str> {
		Operation::ALL.into_iter().map(|operation| operation.as_str())
	}

	/// Routes one call and returns its JSON result.
	#[instrument(skip(self, data), fields(platform = %self.adapter.platform()))]
	pub async fn invoke(&self, plugin: &str, method: &str, data: Value) -> Result<Value> {
		let operation = resolve(plugin, method)?;
		debug!(operation = %operation, "Routing plugin call");

		match operation {
			Operation::Initialize => {
				let options: InitializeOptions = decode(operation, data)?;
				self.adapter.initialize(options).await?;
				Ok(empty_object())
			}
			Operation::SetCustomTag => {
				let options: CustomTagOptions = decode(operation, data)?;
				self.adapter.set_custom_tag(options).await?;
				Ok(empty_object())
			}
			Operation::LogEvent => {
				let options: LogEventOptions = decode(operation, data)?;
				self.adapter.log_event(options).await?;
				Ok(empty_object())
			}
			Operation::GetCurrentSessionId => {
				encode(operation, self.adapter.get_current_session_id().await?)
			}
			Operation::GetCurrentSessionUrl => {
				encode(operation, self.adapter.get_current_session_url().await?)
			}
		}
	}

	/// Routes a [`PluginCall`], converting failures into a [`CallRejection`].
	pub async fn handle(&self, call: PluginCall) -> std::result::Result<Value, CallRejection> {
		self.invoke(&call.plugin, &call.method, call.data)
			.await
			.map_err(CallRejection::from)
	}
}

fn resolve(plugin: &str, method: &str) -> Result<Operation> {
	let unknown = || BridgeError::UnknownMethod {
		plugin: plugin.to_string(),
		method: method.to_string(),
	};
	if plugin != PLUGIN_NAME {
		return Err(unknown());
	}
	method.parse().map_err(|_| unknown())
}

/// Decodes a call payload. A missing payload reads as an empty object.
fn decode<T>(operation: Operation, data: Value) -> Result<T>
where
	T: DeserializeOwned + Default,
{
	match data {
		Value::Null => Ok(T::default()),
		Value::Object(_) => serde_json::from_value(data)
			.map_err(|e| BridgeError::malformed_payload(operation, e)),
		other => Err(BridgeError::malformed_payload(
			operation,
			format!("expected a JSON object, got {}", kind(&other)),
		)),
	}
}

fn encode<T: Serialize>(operation: Operation, value: T) -> Result<Value> {
	serde_json::to_value(value).map_err(|e| BridgeError::malformed_payload(operation, e))
}

fn empty_object() -> Value {
	Value::Object(Map::new())
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

/// Convenience for building call payloads in hosts and tests.
pub fn payload(fields: &[(&str, &str)]) -> Value {
	let mut map = Map::new();
	for (key, value) in fields {
		map.insert((*key).to_string(), json!(value));
	}
	Value::Object(map)
}
