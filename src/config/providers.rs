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

use serde::{Deserialize, Serialize};

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

fn default_openai_base_url() -> String {
	DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_ollama_base_url() -> String {
	DEFAULT_OLLAMA_BASE_URL.to_string()
}

// Hosted provider settings - the API key is usually injected from the environment
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAiConfig {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	#[serde(default = "default_openai_base_url")]
	pub base_url: String,
}

impl Default for OpenAiConfig {
	fn default() -> Self {
		Self {
			api_key: None,
			base_url: default_openai_base_url(),
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OllamaConfig {
	#[serde(default = "default_ollama_base_url")]
	pub base_url: String,
}

impl Default for OllamaConfig {
	fn default() -> Self {
		Self {
			base_url: default_ollama_base_url(),
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProvidersConfig {
	#[serde(default)]
	pub openai: OpenAiConfig,
	#[serde(default)]
	pub ollama: OllamaConfig,
}

/// `OLLAMA_HOST` is commonly given as `host:port` without a scheme
pub fn normalize_base_url(raw: &str) -> String {
	let trimmed = raw.trim().trim_end_matches('/');
	if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
		trimmed.to_string()
	} else {
		format!("http://{}", trimmed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalize_base_url() {
		assert_eq!(normalize_base_url("127.0.0.1:11434"), "http://127.0.0.1:11434");
		assert_eq!(
			normalize_base_url("https://llm.internal/"),
			"https://llm.internal"
		);
		assert_eq!(
			normalize_base_url(" http://localhost:11434 "),
			"http://localhost:11434"
		);
	}

	#[test]
	fn test_partial_provider_sections() {
		let config: ProvidersConfig = toml::from_str(
			r#"
			[openai]
			api_key = "sk-test"
		"#,
		)
		.unwrap();
		assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
		assert_eq!(config.openai.base_url, DEFAULT_OPENAI_BASE_URL);
		assert_eq!(config.ollama.base_url, DEFAULT_OLLAMA_BASE_URL);
	}
}
