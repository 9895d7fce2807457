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

// Interactive session runner

use super::core::ChatSession;
use super::output::TurnOutput;
use crate::config::Config;
use crate::session::chat::animation::show_loading_animation;
use crate::session::chat::dispatcher::{classify, Input};
use crate::session::chat::input::{InputEvent, LineSource, TerminalInput};
use crate::{log_debug, log_error, log_info};
use anyhow::Result;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Run an interactive session on the terminal
pub async fn run_interactive_session(config: &Config, preferred_backend: Option<&str>) -> Result<()> {
	// Set the thread-local config for logging macros
	crate::config::set_thread_config(config);

	let mut session = ChatSession::from_config(config)?;
	let mut input = TerminalInput::new()?;
	let preferred = preferred_backend.unwrap_or(&config.default_backend).to_string();
	let render_markdown = session.settings().render_markdown;

	run_session(&mut session, &mut input, &preferred, |output| {
		output.print(render_markdown)
	})
	.await
}

/// The read → dispatch → display loop over any line source.
/// Ends on a quit command, end of input or an interrupt.
pub async fn run_session<S, D>(
	session: &mut ChatSession,
	input: &mut S,
	preferred_backend: &str,
	mut display: D,
) -> Result<()>
where
	S: LineSource,
	D: FnMut(&TurnOutput),
{
	display(&session.start(preferred_backend).await);
	display(&session.welcome());

	loop {
		let prompt = format!("[{}] > ", session.conversation().active_backend().key);

		let line = match input.read_line(&prompt) {
			Ok(InputEvent::Line(line)) => line,
			Ok(InputEvent::Interrupted) => {
				log_info!("Interrupted, ending session");
				display(&TurnOutput::goodbye());
				break;
			}
			Ok(InputEvent::Eof) => {
				display(&TurnOutput::goodbye());
				break;
			}
			Err(e) => {
				log_error!("Failed to read input: {}", e);
				break;
			}
		};

		let parsed = match classify(&line) {
			Ok(parsed) => parsed,
			Err(e) => {
				log_debug!("Rejected input: {}", e.kind());
				display(&TurnOutput::from_error(&e));
				continue;
			}
		};

		let output = match parsed {
			Input::Prompt(question) if session.settings().show_progress => {
				execute_with_progress(session, Input::Prompt(question)).await
			}
			other => session.execute(other).await,
		};

		display(&output);
		if output.exit {
			break;
		}
	}

	display(&session.finish());
	Ok(())
}

// Show the spinner while a prompt is in flight
async fn execute_with_progress(session: &mut ChatSession, input: Input) -> TurnOutput {
	println!(
		"{}",
		format!(
			"🤖 Thinking... (using {})",
			session.conversation().active_backend().display_name
		)
		.bright_blue()
	);

	let animation_cancel = Arc::new(AtomicBool::new(false));
	let animation_task = tokio::spawn(show_loading_animation(
		animation_cancel.clone(),
		"Generating response...".to_string(),
	));

	let output = session.execute(input).await;

	animation_cancel.store(true, Ordering::SeqCst);
	match animation_task.await {
		Ok(Err(e)) => {
			log_debug!("Spinner failed: {}", e);
		}
		Err(e) => {
			log_debug!("Spinner task failed: {}", e);
		}
		Ok(Ok(())) => {}
	}

	output
}
