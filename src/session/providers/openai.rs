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

// OpenAI provider implementation (hosted backends)

use super::{
	error_detail, status_error, transport_error, Availability, BackendClient, BackendError,
	RequestOptions,
};
use crate::config::providers::{OpenAiConfig, OPENAI_API_KEY_ENV};
use crate::session::{BackendDescriptor, Message};
use crate::{log_debug, log_info};
use reqwest::Client;
use std::time::Duration;

/// Check if a model supports the temperature parameter
/// O-series reasoning models reject it
fn supports_temperature(model: &str) -> bool {
	!model.starts_with("o1")
		&& !model.starts_with("o3")
		&& !model.starts_with("o4")
}

/// OpenAI provider implementation
pub struct OpenAiProvider {
	api_key: Option<String>,
	base_url: String,
	client: Client,
}

impl OpenAiProvider {
	pub fn new(config: &OpenAiConfig) -> Self {
		Self {
			api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
			base_url: config.base_url.trim_end_matches('/').to_string(),
			client: Client::new(),
		}
	}

	fn completions_url(&self) -> String {
		format!("{}/chat/completions", self.base_url)
	}

	fn models_url(&self) -> String {
		format!("{}/models", self.base_url)
	}

	fn build_request_body(
		backend: &BackendDescriptor,
		messages: &[Message],
		options: &RequestOptions,
	) -> serde_json::Value {
		let mut request_body = serde_json::json!({
			"model": backend.model_id,
			"messages": messages,
			"max_tokens": options.max_tokens,
		});

		// Only add temperature for models that support it
		if supports_temperature(&backend.model_id) {
			request_body["temperature"] = serde_json::json!(options.temperature);
		}

		request_body
	}
}

/// Extract the assistant text from a chat completion body
fn extract_content(response_json: &serde_json::Value) -> Result<String, BackendError> {
	// Check for errors in response body even with HTTP 200
	if let Some(error_obj) = response_json.get("error") {
		let msg = error_obj
			.get("message")
			.and_then(|m| m.as_str())
			.unwrap_or("unknown error");
		return Err(BackendError::MalformedResponse(format!(
			"HTTP 200 but error in response | Message: {}",
			msg
		)));
	}

	let message = response_json
		.get("choices")
		.and_then(|choices| choices.get(0))
		.and_then(|choice| choice.get("message"))
		.ok_or_else(|| BackendError::MalformedResponse("no choices in response".to_string()))?;

	match message.get("content").and_then(|c| c.as_str()) {
		Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
		_ => Err(BackendError::MalformedResponse(
			"response contained no message content".to_string(),
		)),
	}
}

#[async_trait::async_trait]
impl BackendClient for OpenAiProvider {
	fn name(&self) -> &str {
		"openai"
	}

	async fn probe(&self, backend: &BackendDescriptor, timeout: Duration) -> Availability {
		let Some(api_key) = &self.api_key else {
			log_debug!("{}: no API key, marking unavailable", backend.key);
			return Availability::Unavailable;
		};

		let result = self
			.client
			.get(self.models_url())
			.bearer_auth(api_key)
			.timeout(timeout)
			.send()
			.await;

		match result {
			Ok(response) if response.status().is_success() => Availability::Available,
			Ok(response) => {
				log_debug!("{}: probe returned HTTP {}", backend.key, response.status());
				Availability::Unavailable
			}
			Err(e) => {
				log_debug!("{}: probe failed: {}", backend.key, e);
				Availability::Unavailable
			}
		}
	}

	async fn complete(
		&self,
		backend: &BackendDescriptor,
		messages: &[Message],
		options: &RequestOptions,
	) -> Result<String, BackendError> {
		let api_key = self.api_key.as_ref().ok_or_else(|| {
			BackendError::AuthFailure(format!(
				"OpenAI API key not found in environment variable: {}",
				OPENAI_API_KEY_ENV
			))
		})?;

		let request_body = Self::build_request_body(backend, messages, options);
		let url = self.completions_url();

		// Track API request time
		let api_start = std::time::Instant::now();

		let response = self
			.client
			.post(&url)
			.bearer_auth(api_key)
			.timeout(options.timeout)
			.json(&request_body)
			.send()
			.await
			.map_err(|e| transport_error(&e, &url, options.timeout))?;

		let status = response.status();
		let response_text = response
			.text()
			.await
			.map_err(|e| transport_error(&e, &url, options.timeout))?;

		log_info!(
			"{} ({}) answered HTTP {} in {} ms",
			backend.key,
			backend.model_id,
			status.as_u16(),
			api_start.elapsed().as_millis()
		);

		if !status.is_success() {
			return Err(status_error(
				status,
				&backend.model_id,
				error_detail(&response_text),
			));
		}

		let response_json: serde_json::Value = serde_json::from_str(&response_text).map_err(|e| {
			BackendError::MalformedResponse(format!("Failed to parse response JSON: {}", e))
		})?;

		if let Some(reason) = response_json
			.get("choices")
			.and_then(|choices| choices.get(0))
			.and_then(|choice| choice.get("finish_reason"))
			.and_then(|fr| fr.as_str())
		{
			log_debug!("Finish reason: {}", reason);
		}

		extract_content(&response_json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::providers::test_server::{closed_port_url, serve_once, serve_silently};
	use crate::session::ProviderKind;

	fn gpt() -> BackendDescriptor {
		BackendDescriptor::new("gpt", "OpenAI GPT-4o Mini", ProviderKind::Hosted, "gpt-4o-mini")
	}

	fn provider(base_url: &str, api_key: Option<&str>) -> OpenAiProvider {
		OpenAiProvider::new(&OpenAiConfig {
			api_key: api_key.map(|k| k.to_string()),
			base_url: base_url.to_string(),
		})
	}

	fn transcript() -> Vec<Message> {
		vec![
			Message::system("You are a tutor."),
			Message::user("What is a closure?"),
		]
	}

	#[test]
	fn test_supports_temperature() {
		assert!(supports_temperature("gpt-4o-mini"));
		assert!(supports_temperature("gpt-3.5-turbo"));
		assert!(!supports_temperature("o1-mini"));
		assert!(!supports_temperature("o3"));
	}

	#[test]
	fn test_request_body() {
		let options = RequestOptions::default();
		let body = OpenAiProvider::build_request_body(&gpt(), &transcript(), &options);
		assert_eq!(body["model"], "gpt-4o-mini");
		assert_eq!(body["max_tokens"], 2000);
		assert_eq!(body["messages"][0]["role"], "system");
		assert_eq!(body["messages"][1]["content"], "What is a closure?");
		assert!(body.get("temperature").is_some());
	}

	#[test]
	fn test_extract_content() {
		let ok = serde_json::json!({
			"choices": [{"message": {"role": "assistant", "content": "A closure captures its environment."}, "finish_reason": "stop"}]
		});
		assert_eq!(
			extract_content(&ok).unwrap(),
			"A closure captures its environment."
		);

		let empty = serde_json::json!({"choices": [{"message": {"content": ""}}]});
		assert!(matches!(
			extract_content(&empty),
			Err(BackendError::MalformedResponse(_))
		));

		let error = serde_json::json!({"error": {"message": "overloaded"}});
		assert!(matches!(
			extract_content(&error),
			Err(BackendError::MalformedResponse(_))
		));
	}

	#[tokio::test]
	async fn test_missing_key_is_auth_failure_and_unavailable() {
		let provider = provider("http://127.0.0.1:9", None);
		let err = provider
			.complete(&gpt(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::AuthFailure(_)));

		let status = provider.probe(&gpt(), Duration::from_millis(200)).await;
		assert_eq!(status, Availability::Unavailable);
	}

	#[tokio::test]
	async fn test_complete_success() {
		let (base_url, server) = serve_once(
			200,
			r#"{"choices":[{"message":{"role":"assistant","content":"Ownership explained."},"finish_reason":"stop"}]}"#,
		)
		.await;

		let answer = provider(&base_url, Some("sk-test"))
			.complete(&gpt(), &transcript(), &RequestOptions::default())
			.await
			.unwrap();
		assert_eq!(answer, "Ownership explained.");

		let request = server.await.unwrap();
		assert!(request.starts_with("POST /chat/completions"));
		assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
		assert!(request.contains("\"model\":\"gpt-4o-mini\""));
	}

	#[tokio::test]
	async fn test_complete_maps_http_errors() {
		let (base_url, _server) = serve_once(
			401,
			r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#,
		)
		.await;
		let err = provider(&base_url, Some("sk-bad"))
			.complete(&gpt(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		assert_eq!(
			err,
			BackendError::AuthFailure("Incorrect API key provided".to_string())
		);

		let (base_url, _server) = serve_once(
			404,
			r#"{"error":{"message":"The model `gpt-9` does not exist"}}"#,
		)
		.await;
		let err = provider(&base_url, Some("sk-test"))
			.complete(&gpt(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::ModelNotFound(_)));
	}

	#[tokio::test]
	async fn test_complete_rejects_non_json_body() {
		let (base_url, _server) = serve_once(200, "not json at all").await;
		let err = provider(&base_url, Some("sk-test"))
			.complete(&gpt(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::MalformedResponse(_)));
	}

	#[tokio::test]
	async fn test_unreachable_server() {
		let base_url = closed_port_url().await;
		let err = provider(&base_url, Some("sk-test"))
			.complete(&gpt(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::Unreachable(_)));
	}

	#[tokio::test]
	async fn test_slow_server_times_out_with_millisecond_detail() {
		let (base_url, server) = serve_silently().await;
		let options = RequestOptions {
			timeout: Duration::from_millis(200),
			..RequestOptions::default()
		};
		let err = provider(&base_url, Some("sk-test"))
			.complete(&gpt(), &transcript(), &options)
			.await
			.unwrap_err();
		server.abort();

		assert_eq!(err, BackendError::Timeout(Duration::from_millis(200)));
		assert!(err.to_string().contains("200ms"));
	}

	#[tokio::test]
	async fn test_probe_with_key() {
		let (base_url, server) = serve_once(200, r#"{"object":"list","data":[]}"#).await;
		let status = provider(&base_url, Some("sk-test"))
			.probe(&gpt(), Duration::from_secs(2))
			.await;
		assert_eq!(status, Availability::Available);
		assert!(server.await.unwrap().starts_with("GET /models"));
	}
}
