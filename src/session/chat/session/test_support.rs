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

// Scripted backend and session builders shared by the session tests

pub use crate::session::chat::transcript::memory::MemorySink;

use super::core::{ChatSession, SessionSettings};
use crate::config::{default_backends, Config};
use crate::session::{
	Availability, BackendClient, BackendDescriptor, BackendError, BackendRegistry, ClientTable,
	Message, ProviderKind, RequestOptions,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Backend that replays canned replies and records what it was sent
pub struct ScriptedClient {
	replies: Mutex<VecDeque<Result<String, BackendError>>>,
	availability: Availability,
	hang: bool,
	calls: AtomicUsize,
	probes: AtomicUsize,
	requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
	pub fn new(replies: Vec<Result<String, BackendError>>) -> Arc<Self> {
		Self::with_availability(replies, Availability::Available)
	}

	pub fn with_availability(
		replies: Vec<Result<String, BackendError>>,
		availability: Availability,
	) -> Arc<Self> {
		Arc::new(Self {
			replies: Mutex::new(replies.into()),
			availability,
			hang: false,
			calls: AtomicUsize::new(0),
			probes: AtomicUsize::new(0),
			requests: Mutex::new(Vec::new()),
		})
	}

	/// Never answers a probe or a completion
	pub fn hanging() -> Arc<Self> {
		Arc::new(Self {
			replies: Mutex::new(VecDeque::new()),
			availability: Availability::Available,
			hang: true,
			calls: AtomicUsize::new(0),
			probes: AtomicUsize::new(0),
			requests: Mutex::new(Vec::new()),
		})
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn probes(&self) -> usize {
		self.probes.load(Ordering::SeqCst)
	}

	pub fn last_request(&self) -> Vec<Message> {
		self.requests.lock().unwrap().last().cloned().unwrap_or_default()
	}
}

#[async_trait::async_trait]
impl BackendClient for ScriptedClient {
	fn name(&self) -> &str {
		"scripted"
	}

	async fn probe(&self, _backend: &BackendDescriptor, _timeout: Duration) -> Availability {
		self.probes.fetch_add(1, Ordering::SeqCst);
		if self.hang {
			tokio::time::sleep(Duration::from_secs(3600)).await;
		}
		self.availability
	}

	async fn complete(
		&self,
		_backend: &BackendDescriptor,
		messages: &[Message],
		_options: &RequestOptions,
	) -> Result<String, BackendError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		self.requests.lock().unwrap().push(messages.to_vec());
		if self.hang {
			tokio::time::sleep(Duration::from_secs(3600)).await;
		}
		self.replies
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| Err(BackendError::MalformedResponse("no scripted reply".to_string())))
	}
}

pub fn test_settings() -> SessionSettings {
	let mut settings = SessionSettings::from_config(&Config::default());
	settings.show_progress = false;
	settings.render_markdown = false;
	settings
}

pub fn session_from_parts(
	registry: BackendRegistry,
	hosted: Arc<ScriptedClient>,
	local: Arc<ScriptedClient>,
	sink: MemorySink,
) -> ChatSession {
	let mut clients = ClientTable::new();
	clients.insert(ProviderKind::Hosted, hosted as Arc<dyn BackendClient>);
	clients.insert(ProviderKind::LocalServed, local as Arc<dyn BackendClient>);
	ChatSession::new(registry, clients, Box::new(sink), test_settings()).unwrap()
}

/// Default gpt/llama registry with one client serving both kinds
pub fn session_with_client(client: Arc<ScriptedClient>) -> (ChatSession, Arc<ScriptedClient>, MemorySink) {
	let registry = BackendRegistry::from_config(&default_backends()).unwrap();
	let sink = MemorySink::default();
	let session = session_from_parts(registry, client.clone(), client.clone(), sink.clone());
	(session, client, sink)
}

pub fn session_with(
	replies: Vec<Result<String, BackendError>>,
) -> (ChatSession, Arc<ScriptedClient>, MemorySink) {
	session_with_client(ScriptedClient::new(replies))
}
