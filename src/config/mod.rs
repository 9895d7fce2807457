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
use std::cell::Cell;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// Re-export all modules
pub mod backends;
pub mod loading;
pub mod providers;
pub mod validation;

pub use backends::*;
pub use providers::*;

/// Persona used when the config does not override `system_prompt`
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful technical tutor who specializes in explaining:
- Python code and programming concepts
- Software engineering principles and best practices
- Data science techniques and methodologies
- Large Language Models (LLMs) and AI concepts
- Machine learning algorithms and implementations

Your explanations should be clear and detailed without being verbose, include practical examples \
when they help, explain both the \"what\" and the \"why\", suit someone with basic programming \
knowledge, and be well structured with proper formatting.

If code is provided, explain it step by step and mention best practices or possible improvements.";

/// Placeholder replaced by the user's question in `question_template`
pub const QUESTION_PLACEHOLDER: &str = "{question}";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	#[serde(rename = "none")]
	#[default]
	None,
	#[serde(rename = "info")]
	Info,
	#[serde(rename = "debug")]
	Debug,
}

impl LogLevel {
	/// Check if info logging is enabled
	pub fn is_info_enabled(&self) -> bool {
		matches!(self, LogLevel::Info | LogLevel::Debug)
	}

	/// Check if debug logging is enabled
	pub fn is_debug_enabled(&self) -> bool {
		matches!(self, LogLevel::Debug)
	}
}

impl FromStr for LogLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"none" => Ok(LogLevel::None),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			other => Err(format!(
				"Invalid log level '{}'. Use one of: none, info, debug",
				other
			)),
		}
	}
}

// Default functions
fn default_backend_key() -> String {
	"llama".to_string() // Local model first, like the tutor always did
}

fn default_temperature() -> f32 {
	0.7
}

fn default_max_tokens() -> u32 {
	2000
}

fn default_request_timeout_secs() -> u64 {
	120
}

fn default_probe_timeout_ms() -> u64 {
	1500
}

fn default_transcript_dir() -> PathBuf {
	PathBuf::from(".")
}

fn default_enable_markdown_rendering() -> bool {
	true
}

fn default_question_template() -> String {
	format!(
		"Please give a detailed explanation to the following question: {}",
		QUESTION_PLACEHOLDER
	)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
	#[serde(default)]
	pub log_level: LogLevel,

	// Key of the backend selected when the session starts
	#[serde(default = "default_backend_key")]
	pub default_backend: String,

	#[serde(default = "default_temperature")]
	pub temperature: f32,
	#[serde(default = "default_max_tokens")]
	pub max_tokens: u32,
	#[serde(default = "default_request_timeout_secs")]
	pub request_timeout_secs: u64,
	#[serde(default = "default_probe_timeout_ms")]
	pub probe_timeout_ms: u64,

	// Where `!save` writes markdown transcripts
	#[serde(default = "default_transcript_dir")]
	pub transcript_dir: PathBuf,
	#[serde(default)]
	pub save_on_exit: bool,

	#[serde(default = "default_enable_markdown_rendering")]
	pub enable_markdown_rendering: bool,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub system_prompt: Option<String>,
	#[serde(default = "default_question_template")]
	pub question_template: String,

	#[serde(default)]
	pub providers: ProvidersConfig,

	#[serde(default = "default_backends")]
	pub backends: Vec<BackendConfig>,

	#[serde(skip)]
	config_path: Option<PathBuf>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			log_level: LogLevel::default(),
			default_backend: default_backend_key(),
			temperature: default_temperature(),
			max_tokens: default_max_tokens(),
			request_timeout_secs: default_request_timeout_secs(),
			probe_timeout_ms: default_probe_timeout_ms(),
			transcript_dir: default_transcript_dir(),
			save_on_exit: false,
			enable_markdown_rendering: default_enable_markdown_rendering(),
			system_prompt: None,
			question_template: default_question_template(),
			providers: ProvidersConfig::default(),
			backends: default_backends(),
			config_path: None,
		}
	}
}

impl Config {
	/// Get the global log level (system-wide setting)
	pub fn get_log_level(&self) -> LogLevel {
		self.log_level
	}

	/// System persona sent as the first message of every request
	pub fn get_system_prompt(&self) -> &str {
		match &self.system_prompt {
			Some(prompt) if !prompt.trim().is_empty() => prompt,
			_ => DEFAULT_SYSTEM_PROMPT,
		}
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	pub fn probe_timeout(&self) -> Duration {
		Duration::from_millis(self.probe_timeout_ms)
	}

	pub fn config_path(&self) -> Option<&PathBuf> {
		self.config_path.as_ref()
	}
}

// Logging macros for different log levels
// These macros automatically check the current log level and only print if appropriate

thread_local! {
	static CURRENT_LOG_LEVEL: Cell<Option<LogLevel>> = const { Cell::new(None) };
}

/// Set the log level for the thread (to be used by logging macros)
pub fn set_thread_config(config: &Config) {
	set_thread_log_level(config.get_log_level());
}

pub fn set_thread_log_level(level: LogLevel) {
	CURRENT_LOG_LEVEL.with(|c| c.set(Some(level)));
}

/// Get the log level for the thread, if one was set
pub fn with_thread_log_level<F, R>(f: F) -> Option<R>
where
	F: FnOnce(LogLevel) -> R,
{
	CURRENT_LOG_LEVEL.with(|c| c.get().map(f))
}

/// Info logging macro with automatic cyan coloring
/// Shows info messages when log level is Info OR Debug
#[macro_export]
macro_rules! log_info {
	($fmt:expr) => {
		if let Some(true) = $crate::config::with_thread_log_level(|level| level.is_info_enabled()) {
			use colored::Colorize;
			println!("{}", $fmt.cyan());
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(true) = $crate::config::with_thread_log_level(|level| level.is_info_enabled()) {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).cyan());
		}
	};
}

/// Debug logging macro with automatic bright blue coloring
#[macro_export]
macro_rules! log_debug {
	($fmt:expr) => {
		if let Some(true) = $crate::config::with_thread_log_level(|level| level.is_debug_enabled()) {
			use colored::Colorize;
			println!("{}", $fmt.bright_blue());
		}
	};
	($fmt:expr, $($arg:expr),*) => {
		if let Some(true) = $crate::config::with_thread_log_level(|level| level.is_debug_enabled()) {
			use colored::Colorize;
			println!("{}", format!($fmt, $($arg),*).bright_blue());
		}
	};
}

/// Error logging macro with automatic bright red coloring
/// Always visible regardless of log level (errors should always be shown)
#[macro_export]
macro_rules! log_error {
	($fmt:expr) => {{
		use colored::Colorize;
		eprintln!("{}", $fmt.bright_red());
	}};
	($fmt:expr, $($arg:expr),*) => {{
		use colored::Colorize;
		eprintln!("{}", format!($fmt, $($arg),*).bright_red());
	}};
}
