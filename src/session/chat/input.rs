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

// User input handling module

use crate::session::chat_helper::CommandHelper;
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config as RustylineConfig, EditMode, Editor};

/// What a single read produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
	Line(String),
	/// Ctrl+C
	Interrupted,
	/// Ctrl+D or closed input
	Eof,
}

/// Source of input lines for the session loop
pub trait LineSource {
	fn read_line(&mut self, prompt: &str) -> Result<InputEvent>;
}

/// Interactive terminal input with history and command completion
pub struct TerminalInput {
	editor: Editor<CommandHelper, DefaultHistory>,
}

impl TerminalInput {
	pub fn new() -> Result<Self> {
		// Configure rustyline
		let config = RustylineConfig::builder()
			.completion_type(CompletionType::List)
			.edit_mode(EditMode::Emacs)
			.auto_add_history(true) // Automatically add lines to history
			.bell_style(rustyline::config::BellStyle::None) // No bell
			.build();

		let mut editor = Editor::with_config(config)?;
		editor.set_helper(Some(CommandHelper::new()));

		Ok(Self { editor })
	}
}

impl LineSource for TerminalInput {
	fn read_line(&mut self, prompt: &str) -> Result<InputEvent> {
		match self.editor.readline(&prompt.bright_blue().to_string()) {
			Ok(line) => Ok(InputEvent::Line(line)),
			Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
			Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
			Err(err) => Err(err.into()),
		}
	}
}

/// Pre-recorded lines; runs out into `Eof`
#[derive(Debug, Default)]
pub struct ScriptedInput {
	lines: std::collections::VecDeque<InputEvent>,
}

impl ScriptedInput {
	pub fn new<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			lines: lines.into_iter().map(|l| InputEvent::Line(l.into())).collect(),
		}
	}

	pub fn push_event(&mut self, event: InputEvent) {
		self.lines.push_back(event);
	}
}

impl LineSource for ScriptedInput {
	fn read_line(&mut self, _prompt: &str) -> Result<InputEvent> {
		Ok(self.lines.pop_front().unwrap_or(InputEvent::Eof))
	}
}
