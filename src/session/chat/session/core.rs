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

// Chat session implementation

use super::output::TurnOutput;
use crate::config::{Config, QUESTION_PLACEHOLDER};
use crate::session::chat::conversation::{ConversationState, Exchange};
use crate::session::chat::dispatcher::{classify, Input};
use crate::session::chat::transcript::{file_name_for, FileSink, TranscriptSink};
use crate::session::{
	Availability, BackendClient, BackendRegistry, ClientTable, ProviderFactory, ProviderKind,
	RequestOptions, SessionError,
};
use crate::{log_debug, log_error, log_info};
use chrono::Local;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Per-session knobs resolved once from the configuration
#[derive(Debug, Clone)]
pub struct SessionSettings {
	pub system_prompt: String,
	pub question_template: String,
	pub request: RequestOptions,
	pub probe_timeout: Duration,
	pub save_on_exit: bool,
	pub render_markdown: bool,
	/// Spinner while waiting for an answer
	pub show_progress: bool,
}

impl SessionSettings {
	pub fn from_config(config: &Config) -> Self {
		Self {
			system_prompt: config.get_system_prompt().to_string(),
			question_template: config.question_template.clone(),
			request: RequestOptions::from_config(config),
			probe_timeout: config.probe_timeout(),
			save_on_exit: config.save_on_exit,
			render_markdown: config.enable_markdown_rendering,
			show_progress: true,
		}
	}

	pub fn format_question(&self, question: &str) -> String {
		self.question_template.replace(QUESTION_PLACEHOLDER, question)
	}
}

// Chat session manager for interactive tutoring sessions
pub struct ChatSession {
	pub(super) registry: BackendRegistry,
	pub(super) conversation: ConversationState,
	pub(super) clients: ClientTable,
	pub(super) availability: HashMap<String, Availability>,
	pub(super) sink: Box<dyn TranscriptSink>,
	pub(super) settings: SessionSettings,
}

impl ChatSession {
	/// The first registered backend starts out active
	pub fn new(
		registry: BackendRegistry,
		clients: ClientTable,
		sink: Box<dyn TranscriptSink>,
		settings: SessionSettings,
	) -> Result<Self, SessionError> {
		let first = registry
			.first()
			.cloned()
			.ok_or_else(|| SessionError::StartupFault("no backends are registered".to_string()))?;

		Ok(Self {
			registry,
			conversation: ConversationState::new(first),
			clients,
			availability: HashMap::new(),
			sink,
			settings,
		})
	}

	pub fn from_config(config: &Config) -> Result<Self, SessionError> {
		let registry = BackendRegistry::from_config(&config.backends)
			.map_err(|e| SessionError::StartupFault(e.to_string()))?;

		Self::new(
			registry,
			ProviderFactory::client_table(config),
			Box::new(FileSink::new(config.transcript_dir.clone())),
			SessionSettings::from_config(config),
		)
	}

	pub fn registry(&self) -> &BackendRegistry {
		&self.registry
	}

	pub fn conversation(&self) -> &ConversationState {
		&self.conversation
	}

	pub fn settings(&self) -> &SessionSettings {
		&self.settings
	}

	pub fn settings_mut(&mut self) -> &mut SessionSettings {
		&mut self.settings
	}

	/// Cached probe result, `Unknown` until probed
	pub fn availability_of(&self, key: &str) -> Availability {
		self.availability.get(key).copied().unwrap_or_default()
	}

	fn client_for(&self, kind: ProviderKind) -> Result<Arc<dyn BackendClient>, SessionError> {
		self.clients
			.get(&kind)
			.cloned()
			.ok_or_else(|| SessionError::Internal(format!("no client registered for {}", kind)))
	}

	/// Time-boxed probe of one backend; the result is cached
	pub async fn probe_backend(&mut self, key: &str) -> Availability {
		let Ok(backend) = self.registry.lookup(key).cloned() else {
			return Availability::Unknown;
		};

		let timeout = self.settings.probe_timeout;
		let status = match self.client_for(backend.provider_kind) {
			Ok(client) => {
				match tokio::time::timeout(timeout, client.probe(&backend, timeout)).await {
					Ok(status) => status,
					Err(_) => {
						log_debug!("{}: probe timed out after {} ms", backend.key, timeout.as_millis());
						Availability::Unavailable
					}
				}
			}
			Err(e) => {
				log_error!("{}: {}", backend.key, e);
				Availability::Unavailable
			}
		};

		log_debug!("{}: {}", backend.key, status);
		self.availability.insert(backend.key, status);
		status
	}

	pub async fn probe_all(&mut self) {
		let keys: Vec<String> = self.registry.keys().iter().map(|k| k.to_string()).collect();
		for key in keys {
			self.probe_backend(&key).await;
		}
	}

	/// Probe everything and settle on the starting backend.
	/// Unknown preferred key: first registered. Preferred unavailable while
	/// another is available: first available. Nothing available: keep preferred.
	pub async fn start(&mut self, preferred: &str) -> TurnOutput {
		let mut output = TurnOutput::new();

		if self.conversation.switch_backend(&self.registry, preferred).is_err() {
			output.warning(format!(
				"Default backend '{}' is not registered; using '{}' instead.",
				preferred,
				self.conversation.active_backend().key
			));
		}

		self.probe_all().await;

		let active = self.conversation.active_backend().clone();
		if self.availability_of(&active.key) == Availability::Unavailable {
			let fallback = self
				.registry
				.list()
				.find(|b| self.availability_of(&b.key) == Availability::Available)
				.map(|b| b.key.clone());

			match fallback {
				Some(key) => {
					if let Ok(backend) = self.conversation.switch_backend(&self.registry, &key) {
						output.warning(format!(
							"{} is unavailable; switched to {}.",
							active.display_name, backend.display_name
						));
					}
				}
				None => output.warning(
					"No backend is reachable right now. Questions will fail until one comes up.",
				),
			}
		}

		let active = self.conversation.active_backend();
		log_info!("Starting session with backend {} ({})", active.key, active.model_id);
		output.success(format!("Using {}", active.display_name));
		output
	}

	/// Send one question to the active backend. Only a successful answer
	/// is appended to the transcript.
	pub async fn ask(&mut self, question: &str) -> Result<String, SessionError> {
		let question = question.trim();
		if question.is_empty() {
			return Err(SessionError::EmptyPrompt);
		}

		let backend = self.conversation.active_backend().clone();
		let client = self.client_for(backend.provider_kind)?;
		let messages = self.conversation.build_context(
			&self.settings.system_prompt,
			&self.settings.format_question(question),
		);
		log_debug!("Sending {} messages to {}", messages.len(), backend.key);

		match client.complete(&backend, &messages, &self.settings.request).await {
			Ok(answer) => {
				self.availability.insert(backend.key.clone(), Availability::Available);
				self.conversation
					.append_exchange(Exchange::new(question, &answer, &backend.key));
				Ok(answer)
			}
			Err(e) => {
				if e.should_reprobe() {
					self.probe_backend(&backend.key).await;
				}
				Err(e.into())
			}
		}
	}

	pub async fn execute(&mut self, input: Input) -> TurnOutput {
		match input {
			Input::Prompt(question) => match self.ask(&question).await {
				Ok(answer) => TurnOutput::answer(answer),
				Err(e) => {
					if matches!(e, SessionError::Internal(_)) {
						log_error!("Turn failed: {}", e);
					}
					TurnOutput::from_error(&e)
				}
			},
			Input::Command(command) => super::commands::process_command(self, command).await,
		}
	}

	/// Classify and run a single line
	pub async fn handle_line(&mut self, line: &str) -> TurnOutput {
		match classify(line) {
			Ok(input) => self.execute(input).await,
			Err(e) => TurnOutput::from_error(&e),
		}
	}

	/// Export the transcript through the sink. `None` when there is nothing to save.
	pub fn save_transcript(&self) -> Result<Option<PathBuf>, SessionError> {
		if self.conversation.is_empty() {
			return Ok(None);
		}

		let now = Local::now();
		let path = self
			.sink
			.write(&file_name_for(&now), &self.conversation.export_markdown(&now))?;
		log_info!("Transcript written to {}", path.display());
		Ok(Some(path))
	}

	/// End-of-session work
	pub fn finish(&self) -> TurnOutput {
		let mut output = TurnOutput::new();
		if !self.settings.save_on_exit {
			return output;
		}

		match self.save_transcript() {
			Ok(Some(path)) => output.success(format!("Conversation saved to {}", path.display())),
			Ok(None) => {}
			Err(e) => output.extend(TurnOutput::from_error(&e)),
		}
		output
	}
}
