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

// What a turn produced, kept separate from how it is printed

use crate::session::SessionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
	Success(String),
	Info(String),
	Warning(String),
	Error(String),
	Heading(String),
	Line(String),
	Answer(String),
}

impl Notice {
	pub fn text(&self) -> &str {
		match self {
			Notice::Success(t)
			| Notice::Info(t)
			| Notice::Warning(t)
			| Notice::Error(t)
			| Notice::Heading(t)
			| Notice::Line(t)
			| Notice::Answer(t) => t,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutput {
	pub notices: Vec<Notice>,
	/// Set when the session should end after this turn
	pub exit: bool,
}

impl TurnOutput {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn answer(text: String) -> Self {
		let mut output = Self::new();
		output.notices.push(Notice::Answer(text));
		output
	}

	pub fn goodbye() -> Self {
		let mut output = Self::new();
		output.success("Goodbye! Happy learning!");
		output.exit = true;
		output
	}

	/// Kind-tagged report of a recoverable error
	pub fn from_error(error: &SessionError) -> Self {
		let mut output = Self::new();
		match error {
			SessionError::EmptyPrompt => output.info(error.to_string()),
			SessionError::UnknownCommand(_) | SessionError::UnknownBackend { .. } => {
				output.warning(error.to_string())
			}
			SessionError::Backend(backend_error) => {
				output.error(format!("[{}] {}", backend_error.kind(), backend_error));
				output.info(backend_error.hint());
			}
			_ => output.error(format!("[{}] {}", error.kind(), error)),
		}
		output
	}

	pub fn success(&mut self, text: impl Into<String>) {
		self.notices.push(Notice::Success(text.into()));
	}

	pub fn info(&mut self, text: impl Into<String>) {
		self.notices.push(Notice::Info(text.into()));
	}

	pub fn warning(&mut self, text: impl Into<String>) {
		self.notices.push(Notice::Warning(text.into()));
	}

	pub fn error(&mut self, text: impl Into<String>) {
		self.notices.push(Notice::Error(text.into()));
	}

	pub fn heading(&mut self, text: impl Into<String>) {
		self.notices.push(Notice::Heading(text.into()));
	}

	pub fn line(&mut self, text: impl Into<String>) {
		self.notices.push(Notice::Line(text.into()));
	}

	pub fn extend(&mut self, other: TurnOutput) {
		self.notices.extend(other.notices);
		self.exit |= other.exit;
	}

	pub fn is_empty(&self) -> bool {
		self.notices.is_empty()
	}

	pub fn has_error(&self) -> bool {
		self.notices.iter().any(|n| matches!(n, Notice::Error(_)))
	}

	pub fn has_warning(&self) -> bool {
		self.notices.iter().any(|n| matches!(n, Notice::Warning(_)))
	}

	/// True when any notice mentions `needle`
	pub fn mentions(&self, needle: &str) -> bool {
		self.notices.iter().any(|n| n.text().contains(needle))
	}
}
