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

// Backend catalog entries as they appear in `[[backends]]`

use crate::session::ProviderKind;
use serde::{Deserialize, Serialize};

pub const MODEL_GPT: &str = "gpt-4o-mini";
pub const MODEL_LLAMA: &str = "llama3.2";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackendConfig {
	/// Short key typed after `!model`
	pub key: String,
	/// Human readable name shown in confirmations
	pub name: String,
	pub provider: ProviderKind,
	/// Model identifier passed to the provider
	pub model: String,
}

impl BackendConfig {
	pub fn new(key: &str, name: &str, provider: ProviderKind, model: &str) -> Self {
		Self {
			key: key.to_string(),
			name: name.to_string(),
			provider,
			model: model.to_string(),
		}
	}
}

pub fn default_backends() -> Vec<BackendConfig> {
	vec![
		BackendConfig::new("gpt", "OpenAI GPT-4o Mini", ProviderKind::Hosted, MODEL_GPT),
		BackendConfig::new(
			"llama",
			"Llama 3.2 (Local)",
			ProviderKind::LocalServed,
			MODEL_LLAMA,
		),
	]
}
