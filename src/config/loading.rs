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

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::providers::{
	normalize_base_url, OLLAMA_HOST_ENV, OPENAI_API_KEY_ENV, OPENAI_BASE_URL_ENV,
};
use super::Config;

/// Overrides the configured default backend key
pub const DEFAULT_BACKEND_ENV: &str = "TECHTUTOR_MODEL";

impl Config {
	/// Load configuration from the system-wide config file
	pub fn load() -> Result<Self> {
		let config_path = crate::directories::get_config_file_path()?;
		Self::load_from(&config_path)
	}

	/// Load configuration from a specific file, falling back to defaults when it does not exist.
	/// Environment variables take precedence over config file values.
	pub fn load_from(config_path: &Path) -> Result<Self> {
		let mut config = if config_path.exists() {
			let config_str = fs::read_to_string(config_path).context(format!(
				"Failed to read config from {}",
				config_path.display()
			))?;
			toml::from_str::<Config>(&config_str).context(format!(
				"Failed to parse TOML configuration in {}",
				config_path.display()
			))?
		} else {
			Config::default()
		};

		// Store the config path for future saves
		config.config_path = Some(config_path.to_path_buf());

		config.apply_overrides(|name| std::env::var(name).ok());

		config
			.validate()
			.context(format!("Invalid configuration in {}", config_path.display()))?;

		Ok(config)
	}

	/// Apply environment overrides through a lookup function so tests don't touch the process env
	pub fn apply_overrides<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(key) = lookup(OPENAI_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
			self.providers.openai.api_key = Some(key);
		}
		if let Some(url) = lookup(OPENAI_BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
			self.providers.openai.base_url = normalize_base_url(&url);
		}
		if let Some(host) = lookup(OLLAMA_HOST_ENV).filter(|h| !h.trim().is_empty()) {
			self.providers.ollama.base_url = normalize_base_url(&host);
		}
		if let Some(model) = lookup(DEFAULT_BACKEND_ENV).filter(|m| !m.trim().is_empty()) {
			self.default_backend = model.trim().to_lowercase();
		}
	}

	/// Save configuration to a specific file path
	pub fn save_to_path(&self, path: &Path) -> Result<()> {
		// Ensure the parent directory exists
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).context(format!(
				"Failed to create config directory: {}",
				parent.display()
			))?;
		}

		let clean_config = self.create_clean_copy_for_saving();
		let config_str = toml::to_string_pretty(&clean_config)
			.context("Failed to serialize configuration to TOML")?;

		fs::write(path, config_str)
			.context(format!("Failed to write config to {}", path.display()))?;

		Ok(())
	}

	/// Create a clean copy of the config for saving (API keys stay in the environment)
	pub fn create_clean_copy_for_saving(&self) -> Self {
		let mut clean_config = self.clone();
		clean_config.providers.openai.api_key = None;
		clean_config
	}

	/// Write the default configuration unless a file already exists at `path`
	pub fn create_default_config_at(path: &Path) -> Result<bool> {
		if path.exists() {
			return Ok(false);
		}
		Config::default().save_to_path(path)?;
		Ok(true)
	}
}
