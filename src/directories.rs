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

// Directory utilities for cross-platform data directory management

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "techtutor";

/// Resolve the data directory below a home directory without touching the filesystem
///
/// - macOS / Linux: ~/.local/share/techtutor (following XDG Base Directory layout)
/// - Windows: %LOCALAPPDATA%/techtutor
pub fn data_dir_for_home(home: &Path) -> PathBuf {
	#[cfg(target_os = "windows")]
	let path = match dirs::data_local_dir() {
		Some(dir) => dir.join(APP_DIR_NAME),
		None => home.join("AppData").join("Local").join(APP_DIR_NAME),
	};

	#[cfg(not(target_os = "windows"))]
	let path = home.join(".local").join("share").join(APP_DIR_NAME);

	path
}

/// Get the system-wide data directory for techtutor, creating it when missing
pub fn get_techtutor_data_dir() -> Result<PathBuf> {
	let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
	let data_dir = data_dir_for_home(&home);

	if !data_dir.exists() {
		fs::create_dir_all(&data_dir).context(format!(
			"Failed to create techtutor data directory: {}",
			data_dir.display()
		))?;
	}

	Ok(data_dir)
}

/// Get the configuration directory path
pub fn get_config_dir() -> Result<PathBuf> {
	let config_dir = get_techtutor_data_dir()?.join("config");

	if !config_dir.exists() {
		fs::create_dir_all(&config_dir)?;
	}

	Ok(config_dir)
}

/// Get the default configuration file path
pub fn get_config_file_path() -> Result<PathBuf> {
	Ok(get_config_dir()?.join("config.toml"))
}
