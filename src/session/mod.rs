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

// Session module for handling interactive tutoring sessions

pub mod chat; // Chat session logic
mod chat_helper; // Chat command completion
pub mod errors; // Error taxonomy surfaced by a turn
pub mod providers; // Provider abstraction layer
pub mod registry; // Static catalog of backends

pub use errors::SessionError;
pub use providers::{
	Availability, BackendClient, BackendError, ClientTable, ProviderFactory, RequestOptions,
};
pub use registry::{BackendDescriptor, BackendRegistry, ProviderKind, RegistryError};

use serde::{Deserialize, Serialize};

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// Role-tagged message in the shape both provider APIs accept
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
	pub role: String,
	pub content: String,
}

impl Message {
	pub fn new(role: &str, content: &str) -> Self {
		Self {
			role: role.to_string(),
			content: content.to_string(),
		}
	}

	pub fn system(content: &str) -> Self {
		Self::new(ROLE_SYSTEM, content)
	}

	pub fn user(content: &str) -> Self {
		Self::new(ROLE_USER, content)
	}

	pub fn assistant(content: &str) -> Self {
		Self::new(ROLE_ASSISTANT, content)
	}
}
