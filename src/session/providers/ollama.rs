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

// Ollama provider implementation (locally served models)

use super::{
	error_detail, status_error, transport_error, Availability, BackendClient, BackendError,
	RequestOptions,
};
use crate::config::providers::OllamaConfig;
use crate::session::{BackendDescriptor, Message};
use crate::{log_debug, log_info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
	model: &'a str,
	messages: &'a [Message],
	stream: bool,
	options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
	temperature: f32,
	num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
	message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
	#[serde(default)]
	content: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
	#[serde(default)]
	models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
	name: String,
}

pub struct OllamaProvider {
	base_url: String,
	client: Client,
}

impl OllamaProvider {
	pub fn new(config: &OllamaConfig) -> Self {
		Self {
			base_url: config.base_url.trim_end_matches('/').to_string(),
			client: Client::new(),
		}
	}

	fn chat_url(&self) -> String {
		format!("{}/api/chat", self.base_url)
	}

	fn tags_url(&self) -> String {
		format!("{}/api/tags", self.base_url)
	}
}

/// `llama3.2` is served as `llama3.2:latest`, so a containment match is enough
fn model_is_pulled(tags: &TagsResponse, model_id: &str) -> bool {
	tags.models.iter().any(|m| m.name.contains(model_id))
}

#[async_trait::async_trait]
impl BackendClient for OllamaProvider {
	fn name(&self) -> &str {
		"ollama"
	}

	async fn probe(&self, backend: &BackendDescriptor, timeout: Duration) -> Availability {
		let response = match self.client.get(self.tags_url()).timeout(timeout).send().await {
			Ok(response) if response.status().is_success() => response,
			Ok(response) => {
				log_debug!("{}: probe returned HTTP {}", backend.key, response.status());
				return Availability::Unavailable;
			}
			Err(e) => {
				log_debug!("{}: local server not reachable: {}", backend.key, e);
				return Availability::Unavailable;
			}
		};

		match response.json::<TagsResponse>().await {
			Ok(tags) if model_is_pulled(&tags, &backend.model_id) => Availability::Available,
			Ok(_) => {
				log_debug!("{}: model {} is not pulled", backend.key, backend.model_id);
				Availability::Unavailable
			}
			Err(e) => {
				log_debug!("{}: unreadable model list: {}", backend.key, e);
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
		let url = self.chat_url();
		let request = ChatRequest {
			model: &backend.model_id,
			messages,
			stream: false,
			options: ChatOptions {
				temperature: options.temperature,
				num_predict: options.max_tokens,
			},
		};

		let api_start = std::time::Instant::now();

		let response = self
			.client
			.post(&url)
			.timeout(options.timeout)
			.json(&request)
			.send()
			.await
			.map_err(|e| transport_error(&e, &url, options.timeout))?;

		let status = response.status();
		let body = response
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
			return Err(status_error(status, &backend.model_id, error_detail(&body)));
		}

		let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
			BackendError::MalformedResponse(format!("Failed to parse response JSON: {}", e))
		})?;

		match parsed.message {
			Some(message) if !message.content.trim().is_empty() => Ok(message.content),
			_ => Err(BackendError::MalformedResponse(
				"response contained no message content".to_string(),
			)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::providers::test_server::{closed_port_url, serve_once};
	use crate::session::ProviderKind;

	fn llama() -> BackendDescriptor {
		BackendDescriptor::new("llama", "Llama 3.2 (Local)", ProviderKind::LocalServed, "llama3.2")
	}

	fn provider(base_url: &str) -> OllamaProvider {
		OllamaProvider::new(&OllamaConfig {
			base_url: base_url.to_string(),
		})
	}

	fn transcript() -> Vec<Message> {
		vec![
			Message::system("You are a tutor."),
			Message::user("Explain list comprehensions"),
			Message::assistant("They build lists from iterables."),
			Message::user("Show an example"),
		]
	}

	#[test]
	fn test_model_is_pulled() {
		let tags: TagsResponse = serde_json::from_str(
			r#"{"models":[{"name":"llama3.2:latest","size":2019393189},{"name":"mistral:7b"}]}"#,
		)
		.unwrap();
		assert!(model_is_pulled(&tags, "llama3.2"));
		assert!(model_is_pulled(&tags, "mistral"));
		assert!(!model_is_pulled(&tags, "phi3"));
	}

	#[tokio::test]
	async fn test_complete_success() {
		let (base_url, server) = serve_once(
			200,
			r#"{"model":"llama3.2","message":{"role":"assistant","content":"[x * 2 for x in xs]"},"done":true}"#,
		)
		.await;

		let answer = provider(&base_url)
			.complete(&llama(), &transcript(), &RequestOptions::default())
			.await
			.unwrap();
		assert_eq!(answer, "[x * 2 for x in xs]");

		let request = server.await.unwrap();
		assert!(request.starts_with("POST /api/chat"));
		assert!(request.contains("\"stream\":false"));
		// Prior turns travel in order
		let first = request.find("Explain list comprehensions").unwrap();
		let second = request.find("Show an example").unwrap();
		assert!(first < second);
	}

	#[tokio::test]
	async fn test_missing_model_is_model_not_found() {
		let (base_url, _server) = serve_once(
			404,
			r#"{"error":"model \"llama3.2\" not found, try pulling it first"}"#,
		)
		.await;
		let err = provider(&base_url)
			.complete(&llama(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		match err {
			BackendError::ModelNotFound(msg) => assert!(msg.contains("try pulling it first")),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_empty_message_is_malformed() {
		let (base_url, _server) = serve_once(200, r#"{"done":true}"#).await;
		let err = provider(&base_url)
			.complete(&llama(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::MalformedResponse(_)));
	}

	#[tokio::test]
	async fn test_server_down() {
		let base_url = closed_port_url().await;
		let provider = provider(&base_url);

		let err = provider
			.complete(&llama(), &transcript(), &RequestOptions::default())
			.await
			.unwrap_err();
		assert!(matches!(err, BackendError::Unreachable(_)));

		let status = provider.probe(&llama(), Duration::from_millis(300)).await;
		assert_eq!(status, Availability::Unavailable);
	}

	#[tokio::test]
	async fn test_probe_checks_model_list() {
		let (base_url, _server) =
			serve_once(200, r#"{"models":[{"name":"llama3.2:latest"}]}"#).await;
		assert_eq!(
			provider(&base_url).probe(&llama(), Duration::from_secs(2)).await,
			Availability::Available
		);

		let (base_url, _server) = serve_once(200, r#"{"models":[{"name":"mistral:7b"}]}"#).await;
		assert_eq!(
			provider(&base_url).probe(&llama(), Duration::from_secs(2)).await,
			Availability::Unavailable
		);
	}
}
