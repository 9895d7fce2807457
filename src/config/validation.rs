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

use anyhow::{anyhow, Result};
use std::collections::HashSet;

use super::{Config, QUESTION_PLACEHOLDER};

impl Config {
	/// Validate the configuration for common issues
	pub fn validate(&self) -> Result<()> {
		self.validate_thresholds()?;
		self.validate_backends()?;
		self.validate_question_template()?;
		Ok(())
	}

	pub fn validate_thresholds(&self) -> Result<()> {
		if !(0.0..=2.0).contains(&self.temperature) {
			return Err(anyhow!(
				"Temperature must be between 0.0 and 2.0, got {}",
				self.temperature
			));
		}

		if self.max_tokens == 0 {
			return Err(anyhow!("max_tokens must be a positive number"));
		}

		if self.request_timeout_secs == 0 {
			return Err(anyhow!(
				"request_timeout_secs cannot be 0. Slow local models need a positive timeout."
			));
		}

		// Probes must stay cheap but a zero timeout would mark everything unavailable
		if self.probe_timeout_ms == 0 || self.probe_timeout_ms > 60_000 {
			return Err(anyhow!(
				"probe_timeout_ms must be between 1 and 60000, got {}",
				self.probe_timeout_ms
			));
		}

		Ok(())
	}

	/// An empty list is allowed here; the session refuses to start without backends
	pub fn validate_backends(&self) -> Result<()> {
		let mut seen = HashSet::new();
		for backend in &self.backends {
			let key = backend.key.trim().to_lowercase();
			if key.is_empty() {
				return Err(anyhow!("Backend entries need a non-empty key"));
			}
			if key.chars().any(char::is_whitespace) {
				return Err(anyhow!(
					"Backend key '{}' must be a single word",
					backend.key
				));
			}
			if backend.model.trim().is_empty() {
				return Err(anyhow!("Backend '{}' has an empty model", backend.key));
			}
			if !seen.insert(key) {
				return Err(anyhow!("Duplicate backend key: '{}'", backend.key));
			}
		}
		Ok(())
	}

	pub fn validate_question_template(&self) -> Result<()> {
		if !self.question_template.contains(QUESTION_PLACEHOLDER) {
			return Err(anyhow!(
				"question_template must contain the {} placeholder",
				QUESTION_PLACEHOLDER
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use crate::config::{BackendConfig, Config};
	use crate::session::ProviderKind;

	#[test]
	fn test_default_config_is_valid() {
		assert!(Config::default().validate().is_ok());
	}

	#[test]
	fn test_threshold_validation() {
		let config = Config {
			temperature: 2.5,
			..Default::default()
		};
		assert!(config.validate_thresholds().is_err());

		let config = Config {
			probe_timeout_ms: 0,
			..Default::default()
		};
		assert!(config.validate_thresholds().is_err());

		let config = Config {
			max_tokens: 0,
			..Default::default()
		};
		assert!(config.validate_thresholds().is_err());
	}

	#[test]
	fn test_duplicate_backend_keys_are_rejected() {
		let mut config = Config::default();
		config.backends.push(BackendConfig::new(
			"GPT",
			"Another GPT",
			ProviderKind::Hosted,
			"gpt-4o",
		));
		let err = config.validate_backends().unwrap_err();
		assert!(err.to_string().contains("Duplicate backend key"));
	}

	#[test]
	fn test_backend_key_shape() {
		let config = Config {
			backends: vec![BackendConfig::new(
				"two words",
				"Broken",
				ProviderKind::LocalServed,
				"llama3.2",
			)],
			..Default::default()
		};
		assert!(config.validate_backends().is_err());

		let config = Config {
			backends: vec![BackendConfig::new("x", "No model", ProviderKind::Hosted, " ")],
			..Default::default()
		};
		assert!(config.validate_backends().is_err());
	}

	#[test]
	fn test_question_template_needs_placeholder() {
		let config = Config {
			question_template: "Explain it".to_string(),
			..Default::default()
		};
		assert!(config.validate_question_template().is_err());
	}
}
