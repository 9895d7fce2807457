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

use clap::Args;

use techtutor::config::{Config, LogLevel};

#[derive(Args, Debug, Default)]
pub struct SessionArgs {
	/// Backend to start with instead of the configured default (e.g. gpt, llama)
	#[arg(long, short)]
	pub model: Option<String>,

	/// Temperature for the AI response
	#[arg(long)]
	pub temperature: Option<f32>,

	/// Log level for this run (none, info, debug)
	#[arg(long)]
	pub log_level: Option<LogLevel>,
}

impl SessionArgs {
	/// Runtime-only overrides; nothing is written back to the config file
	pub fn apply(&self, config: &mut Config) -> Result<(), anyhow::Error> {
		if let Some(temperature) = self.temperature {
			config.temperature = temperature;
		}
		if let Some(level) = self.log_level {
			config.log_level = level;
		}
		config.validate()
	}
}
