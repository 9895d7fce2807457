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

// Errors a single turn can produce

use super::chat::transcript::PersistenceError;
use super::providers::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
	#[error("Unknown command: {0}. Type !help for available commands.")]
	UnknownCommand(String),

	#[error("Unknown backend '{key}'. Available: {available}")]
	UnknownBackend { key: String, available: String },

	#[error("Please enter a question or command.")]
	EmptyPrompt,

	#[error(transparent)]
	Backend(#[from] BackendError),

	#[error(transparent)]
	Persistence(#[from] PersistenceError),

	/// Nothing usable to start a session with; the only fatal kind
	#[error("Cannot start session: {0}")]
	StartupFault(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl SessionError {
	/// Short tag shown in front of the message
	pub fn kind(&self) -> &'static str {
		match self {
			SessionError::UnknownCommand(_) => "unknown-command",
			SessionError::UnknownBackend { .. } => "unknown-backend",
			SessionError::EmptyPrompt => "empty-prompt",
			SessionError::Backend(e) => e.kind(),
			SessionError::Persistence(_) => "persistence",
			SessionError::StartupFault(_) => "startup",
			SessionError::Internal(_) => "internal",
		}
	}

	pub fn is_fatal(&self) -> bool {
		matches!(self, SessionError::StartupFault(_))
	}
}
