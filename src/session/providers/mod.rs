// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Provider abstraction layer for the hosted and local backends

use crate::config::Config;
use crate::session::{BackendDescriptor, Message, ProviderKind};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod ollama;
pub mod openai;

// Re-export provider implementations
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Result of the last availability probe for a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
	#[default]
	Unknown,
	Available,
	Unavailable,
}

impl Availability {
	pub fn marker(&self) -> &'static str {
		match self {
			Availability::Unknown => "❔",
			Availability::Available => "✅",
			Availability::Unavailable => "❌",
		}
	}
}

impl fmt::Display for Availability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Availability::Unknown => write!(f, "unknown"),
			Availability::Available => write!(f, "available"),
			Availability::Unavailable => write!(f, "unavailable"),
		}
	}
}

/// Failures of a completion request, one variant per actionable cause
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
	#[error("Backend unreachable: {0}")]
	Unreachable(String),
	#[error("Authentication failed: {0}")]
	AuthFailure(String),
	#[error("Model not found: {0}")]
	ModelNotFound(String),
	#[error("Request timed out after {}ms", .0.as_millis())]
	Timeout(Duration),
	#[error("Malformed response: {0}")]
	MalformedResponse(String),
}

impl BackendError {
	pub fn kind(&self) -> &'static str {
		match self {
			BackendError::Unreachable(_) => "unreachable",
			BackendError::AuthFailure(_) => "auth-failure",
			BackendError::ModelNotFound(_) => "model-not-found",
			BackendError::Timeout(_) => "timeout",
			BackendError::MalformedResponse(_) => "malformed-response",
		}
	}

	/// What the user can do about it
	pub fn hint(&self) -> &'static str {
		match self {
			BackendError::Unreachable(_) => {
				"Check your network connection, or start the local server with `ollama serve`."
			}
			BackendError::AuthFailure(_) => {
				"Set OPENAI_API_KEY (or providers.openai.api_key) to a valid key."
			}
			BackendError::ModelNotFound(_) => {
				"Pull the model first (e.g. `ollama pull llama3.2`) or fix the model id in [[backends]]."
			}
			BackendError::Timeout(_) => {
				"The backend took too long. Try again, or raise request_timeout_secs."
			}
			BackendError::MalformedResponse(_) => {
				"The backend answered with something unexpected. Try again or switch with !model."
			}
		}
	}

	/// Failures that suggest the cached availability is stale
	pub fn should_reprobe(&self) -> bool {
		matches!(
			self,
			BackendError::Unreachable(_) | BackendError::Timeout(_) | BackendError::ModelNotFound(_)
		)
	}
}

/// Per-request knobs shared by all providers
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
	pub temperature: f32,
	pub max_tokens: u32,
	pub timeout: Duration,
}

impl RequestOptions {
	pub fn from_config(config: &Config) -> Self {
		Self {
			temperature: config.temperature,
			max_tokens: config.max_tokens,
			timeout: config.request_timeout(),
		}
	}
}

impl Default for RequestOptions {
	fn default() -> Self {
		Self::from_config(&Config::default())
	}
}

/// Capability set every provider kind implements
#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
	/// Get the provider name (e.g., "openai", "ollama")
	fn name(&self) -> &str;

	/// Cheap reachability check. Expected failures map to `Unavailable`, never to an error.
	async fn probe(&self, backend: &BackendDescriptor, timeout: Duration) -> Availability;

	/// Send the role-tagged transcript and return the generated text
	async fn complete(
		&self,
		backend: &BackendDescriptor,
		messages: &[Message],
		options: &RequestOptions,
	) -> Result<String, BackendError>;
}

/// Provider dispatch table keyed by provider kind
pub type ClientTable = HashMap<ProviderKind, Arc<dyn BackendClient>>;

/// Provider factory to create the client for each provider kind
pub struct ProviderFactory;

impl ProviderFactory {
	pub fn create_client(kind: ProviderKind, config: &Config) -> Arc<dyn BackendClient> {
		match kind {
			ProviderKind::Hosted => Arc::new(OpenAiProvider::new(&config.providers.openai)),
			ProviderKind::LocalServed => Arc::new(OllamaProvider::new(&config.providers.ollama)),
		}
	}

	pub fn client_table(config: &Config) -> ClientTable {
		[ProviderKind::Hosted, ProviderKind::LocalServed]
			.into_iter()
			.map(|kind| (kind, Self::create_client(kind, config)))
			.collect()
	}
}

/// Map a reqwest transport failure to the matching backend error
pub(crate) fn transport_error(err: &reqwest::Error, endpoint: &str, timeout: Duration) -> BackendError {
	if err.is_timeout() {
		BackendError::Timeout(timeout)
	} else if err.is_decode() {
		BackendError::MalformedResponse(err.to_string())
	} else {
		BackendError::Unreachable(format!("{} ({})", endpoint, err))
	}
}

/// Map a non-success HTTP status to the matching backend error
pub(crate) fn status_error(status: StatusCode, model: &str, detail: Option<String>) -> BackendError {
	let detail = detail
		.filter(|d| !d.trim().is_empty())
		.unwrap_or_else(|| status.to_string());

	match status {
		StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::AuthFailure(detail),
		StatusCode::NOT_FOUND => BackendError::ModelNotFound(format!("{} ({})", model, detail)),
		s if s.is_server_error() => BackendError::Unreachable(format!("HTTP {} | {}", status, detail)),
		_ => BackendError::MalformedResponse(format!("HTTP {} | {}", status, detail)),
	}
}

/// Pull `error.message` (OpenAI) or `error` (Ollama) out of an error body
pub(crate) fn error_detail(body: &str) -> Option<String> {
	let json: serde_json::Value = serde_json::from_str(body).ok()?;
	let error = json.get("error")?;
	error
		.get("message")
		.and_then(|m| m.as_str())
		.or_else(|| error.as_str())
		.map(|s| s.to_string())
}

#[cfg(test)]
pub(crate) mod test_server {
	// Minimal one-shot HTTP server for exercising the real clients

	use tokio::io::{AsyncReadExt, AsyncWriteExt};
	use tokio::net::TcpListener;
	use tokio::task::JoinHandle;

	/// Serve one canned response; the handle yields the raw request text
	pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let body = body.to_string();

		let handle = tokio::spawn(async move {
			let (mut socket, _) = listener.accept().await.unwrap();
			let request = read_request(&mut socket).await;
			let response = format!(
				"HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
				status,
				body.len(),
				body
			);
			socket.write_all(response.as_bytes()).await.unwrap();
			socket.shutdown().await.ok();
			request
		});

		(format!("http://{}", addr), handle)
	}

	async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
		let mut buf = Vec::new();
		let mut chunk = [0u8; 4096];
		loop {
			let n = socket.read(&mut chunk).await.unwrap();
			if n == 0 {
				break;
			}
			buf.extend_from_slice(&chunk[..n]);
			let text = String::from_utf8_lossy(&buf);
			if let Some(header_end) = text.find("\r\n\r\n") {
				let content_length = text[..header_end]
					.lines()
					.find_map(|line| {
						let lower = line.to_lowercase();
						lower
							.strip_prefix("content-length:")
							.and_then(|v| v.trim().parse::<usize>().ok())
					})
					.unwrap_or(0);
				if buf.len() >= header_end + 4 + content_length {
					break;
				}
			}
		}
		String::from_utf8_lossy(&buf).to_string()
	}

	/// Accept one request and never answer it
	pub async fn serve_silently() -> (String, JoinHandle<()>) {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();

		let handle = tokio::spawn(async move {
			let (mut socket, _) = listener.accept().await.unwrap();
			read_request(&mut socket).await;
			tokio::time::sleep(std::time::Duration::from_secs(30)).await;
		});

		(format!("http://{}", addr), handle)
	}

	/// Base URL of a port nothing listens on
	pub async fn closed_port_url() -> String {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		drop(listener);
		format!("http://{}", addr)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_mapping() {
		assert!(matches!(
			status_error(StatusCode::UNAUTHORIZED, "gpt-4o-mini", None),
			BackendError::AuthFailure(_)
		));
		assert!(matches!(
			status_error(StatusCode::FORBIDDEN, "gpt-4o-mini", None),
			BackendError::AuthFailure(_)
		));
		match status_error(
			StatusCode::NOT_FOUND,
			"llama3.2",
			Some("model 'llama3.2' not found".to_string()),
		) {
			BackendError::ModelNotFound(msg) => assert!(msg.contains("llama3.2")),
			other => panic!("unexpected {:?}", other),
		}
		assert!(matches!(
			status_error(StatusCode::SERVICE_UNAVAILABLE, "m", None),
			BackendError::Unreachable(_)
		));
		match status_error(StatusCode::BAD_REQUEST, "m", Some("bad temperature".to_string())) {
			BackendError::MalformedResponse(msg) => {
				assert!(msg.contains("400"));
				assert!(msg.contains("bad temperature"));
			}
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn test_error_detail() {
		assert_eq!(
			error_detail(r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#),
			Some("Incorrect API key provided".to_string())
		);
		assert_eq!(
			error_detail(r#"{"error":"model \"llama3.2\" not found, try pulling it first"}"#),
			Some("model \"llama3.2\" not found, try pulling it first".to_string())
		);
		assert_eq!(error_detail("<html>bad gateway</html>"), None);
	}

	#[test]
	fn test_timeout_message_keeps_sub_second_precision() {
		let err = BackendError::Timeout(Duration::from_millis(250));
		assert_eq!(err.to_string(), "Request timed out after 250ms");
		assert_eq!(
			BackendError::Timeout(Duration::from_secs(120)).to_string(),
			"Request timed out after 120000ms"
		);
	}

	#[test]
	fn test_reprobe_policy() {
		assert!(BackendError::Unreachable("x".to_string()).should_reprobe());
		assert!(BackendError::Timeout(Duration::from_secs(5)).should_reprobe());
		assert!(BackendError::ModelNotFound("x".to_string()).should_reprobe());
		assert!(!BackendError::AuthFailure("x".to_string()).should_reprobe());
		assert!(!BackendError::MalformedResponse("x".to_string()).should_reprobe());
	}

	#[test]
	fn test_client_table_covers_every_kind() {
		let table = ProviderFactory::client_table(&Config::default());
		assert_eq!(table.len(), 2);
		assert_eq!(table[&ProviderKind::Hosted].name(), "openai");
		assert_eq!(table[&ProviderKind::LocalServed].name(), "ollama");
	}

	#[test]
	fn test_availability_display() {
		assert_eq!(Availability::default(), Availability::Unknown);
		assert_eq!(Availability::Available.to_string(), "available");
		assert_eq!(Availability::Unavailable.marker(), "❌");
	}
}
