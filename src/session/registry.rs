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

// Backend registry - read-only after construction

use crate::config::BackendConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How a backend is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
	/// OpenAI-compatible hosted chat completions API
	#[serde(rename = "hosted", alias = "openai")]
	Hosted,
	/// Ollama-compatible server on the local machine
	#[serde(rename = "local", alias = "ollama")]
	LocalServed,
}

impl fmt::Display for ProviderKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProviderKind::Hosted => write!(f, "hosted"),
			ProviderKind::LocalServed => write!(f, "local"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDescriptor {
	pub key: String,
	pub display_name: String,
	pub provider_kind: ProviderKind,
	pub model_id: String,
}

impl BackendDescriptor {
	pub fn new(key: &str, display_name: &str, provider_kind: ProviderKind, model_id: &str) -> Self {
		Self {
			key: key.trim().to_lowercase(),
			display_name: display_name.to_string(),
			provider_kind,
			model_id: model_id.to_string(),
		}
	}
}

impl From<&BackendConfig> for BackendDescriptor {
	fn from(config: &BackendConfig) -> Self {
		let display_name = if config.name.trim().is_empty() {
			config.key.clone()
		} else {
			config.name.clone()
		};
		Self::new(&config.key, &display_name, config.provider, &config.model)
	}
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
	#[error("Unknown backend '{0}'")]
	NotFound(String),
	#[error("Duplicate backend key '{0}'")]
	DuplicateKey(String),
	#[error("Invalid backend entry: {0}")]
	InvalidEntry(String),
}

/// Catalog of known backends in declaration order
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
	backends: Vec<BackendDescriptor>,
}

impl BackendRegistry {
	pub fn new(backends: Vec<BackendDescriptor>) -> Result<Self, RegistryError> {
		let mut registry = Self {
			backends: Vec::with_capacity(backends.len()),
		};
		for backend in backends {
			if backend.key.is_empty() {
				return Err(RegistryError::InvalidEntry("empty key".to_string()));
			}
			if backend.model_id.trim().is_empty() {
				return Err(RegistryError::InvalidEntry(format!(
					"backend '{}' has no model id",
					backend.key
				)));
			}
			if registry.lookup(&backend.key).is_ok() {
				return Err(RegistryError::DuplicateKey(backend.key));
			}
			registry.backends.push(backend);
		}
		Ok(registry)
	}

	pub fn from_config(entries: &[BackendConfig]) -> Result<Self, RegistryError> {
		Self::new(entries.iter().map(BackendDescriptor::from).collect())
	}

	/// Case-insensitive exact lookup
	pub fn lookup(&self, key: &str) -> Result<&BackendDescriptor, RegistryError> {
		let wanted = key.trim().to_lowercase();
		self.backends
			.iter()
			.find(|b| b.key == wanted)
			.ok_or_else(|| RegistryError::NotFound(key.trim().to_string()))
	}

	pub fn list(&self) -> impl Iterator<Item = &BackendDescriptor> {
		self.backends.iter()
	}

	pub fn keys(&self) -> Vec<&str> {
		self.backends.iter().map(|b| b.key.as_str()).collect()
	}

	pub fn first(&self) -> Option<&BackendDescriptor> {
		self.backends.first()
	}

	pub fn len(&self) -> usize {
		self.backends.len()
	}

	pub fn is_empty(&self) -> bool {
		self.backends.is_empty()
	}
}
