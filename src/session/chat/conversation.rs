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

// Conversation state: the transcript plus the active backend

use super::transcript::{render_exchange, render_header};
use crate::session::{BackendDescriptor, BackendRegistry, Message, SessionError};
use chrono::{DateTime, Local};

/// One completed question/answer round
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
	pub timestamp: DateTime<Local>,
	pub question: String,
	pub answer: String,
	pub backend_key: String,
}

impl Exchange {
	pub fn new(question: &str, answer: &str, backend_key: &str) -> Self {
		Self {
			timestamp: Local::now(),
			question: question.to_string(),
			answer: answer.to_string(),
			backend_key: backend_key.to_string(),
		}
	}
}

/// Append-only transcript (until cleared) and the backend new prompts go to.
/// The active backend is always an entry of the registry it was created from.
#[derive(Debug, Clone)]
pub struct ConversationState {
	transcript: Vec<Exchange>,
	active_backend: BackendDescriptor,
}

impl ConversationState {
	pub fn new(active_backend: BackendDescriptor) -> Self {
		Self {
			transcript: Vec::new(),
			active_backend,
		}
	}

	pub fn active_backend(&self) -> &BackendDescriptor {
		&self.active_backend
	}

	/// Only called once a backend produced an answer
	pub fn append_exchange(&mut self, exchange: Exchange) {
		self.transcript.push(exchange);
	}

	/// Switch to `key`. On an unknown key the state is left untouched.
	pub fn switch_backend(
		&mut self,
		registry: &BackendRegistry,
		key: &str,
	) -> Result<&BackendDescriptor, SessionError> {
		let backend = registry
			.lookup(key)
			.map_err(|_| SessionError::UnknownBackend {
				key: key.to_string(),
				available: registry.keys().join(", "),
			})?;
		self.active_backend = backend.clone();
		Ok(&self.active_backend)
	}

	/// Exchanges in insertion order
	pub fn history(&self) -> std::slice::Iter<'_, Exchange> {
		self.transcript.iter()
	}

	pub fn len(&self) -> usize {
		self.transcript.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transcript.is_empty()
	}

	/// Drop every exchange, keep the active backend. Returns how many were dropped.
	pub fn clear(&mut self) -> usize {
		let dropped = self.transcript.len();
		self.transcript.clear();
		dropped
	}

	/// Role-tagged context for the next request: system prompt, every prior
	/// exchange as a user/assistant pair, then the new question
	pub fn build_context(&self, system_prompt: &str, question: &str) -> Vec<Message> {
		let mut messages = Vec::with_capacity(self.transcript.len() * 2 + 2);
		messages.push(Message::system(system_prompt));
		for exchange in &self.transcript {
			messages.push(Message::user(&exchange.question));
			messages.push(Message::assistant(&exchange.answer));
		}
		messages.push(Message::user(question));
		messages
	}

	/// Markdown document for the whole transcript. Pure; nothing is mutated.
	pub fn export_markdown(&self, timestamp: &DateTime<Local>) -> String {
		let mut document = render_header(timestamp);
		for (i, exchange) in self.transcript.iter().enumerate() {
			document.push_str(&render_exchange(
				i + 1,
				&exchange.question,
				&exchange.answer,
				&exchange.backend_key,
			));
		}
		document
	}
}
