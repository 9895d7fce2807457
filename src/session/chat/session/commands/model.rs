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

// Model command handler

use super::super::core::ChatSession;
use super::super::output::TurnOutput;
use crate::log_info;
use crate::session::Availability;

pub fn handle_show_model(session: &ChatSession) -> TurnOutput {
	let mut output = TurnOutput::new();
	let active = session.conversation.active_backend();
	let status = session.availability_of(&active.key);

	output.info(format!(
		"Current backend: {} ({}, model {}) {} {}",
		active.display_name,
		active.key,
		active.model_id,
		status.marker(),
		status
	));
	output.line(format!(
		"Available backends: {}. Switch with !model <name>.",
		session.registry.keys().join(", ")
	));
	output
}

/// Switching always succeeds for a registered key; the re-probe only adds a warning
pub async fn handle_model(session: &mut ChatSession, key: &str) -> TurnOutput {
	let backend = match session
		.conversation
		.switch_backend(&session.registry, key)
	{
		Ok(backend) => backend.clone(),
		Err(e) => return TurnOutput::from_error(&e),
	};

	log_info!("Switched active backend to {} ({})", backend.key, backend.model_id);

	let mut output = TurnOutput::new();
	output.success(format!("Switched to {}", backend.display_name));

	if session.probe_backend(&backend.key).await == Availability::Unavailable {
		output.warning(format!(
			"{} is currently unavailable. Questions will fail until it is reachable.",
			backend.display_name
		));
	}

	output
}
