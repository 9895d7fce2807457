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

// Classifies each input line as a command or a prompt

use super::commands::*;
use crate::session::SessionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// `!model` with an optional backend key
	Model(Option<String>),
	History,
	Clear,
	Save,
	Help,
	Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
	Command(Command),
	Prompt(String),
}

/// Single transition per line: a command, a prompt, or a local error.
/// Never touches a backend.
pub fn classify(line: &str) -> Result<Input, SessionError> {
	let trimmed = line.trim();

	if !trimmed.starts_with(COMMAND_PREFIX) {
		if trimmed.is_empty() {
			return Err(SessionError::EmptyPrompt);
		}
		return Ok(Input::Prompt(trimmed.to_string()));
	}

	// Extract command and potential parameters
	let mut parts = trimmed.split_whitespace();
	let command = parts.next().unwrap_or_default().to_lowercase();
	let param = parts.next().map(|p| p.to_string());

	let parsed = match command.as_str() {
		MODEL_COMMAND => Command::Model(param),
		HISTORY_COMMAND => Command::History,
		CLEAR_COMMAND => Command::Clear,
		SAVE_COMMAND => Command::Save,
		HELP_COMMAND => Command::Help,
		QUIT_COMMAND | EXIT_COMMAND => Command::Quit,
		_ => return Err(SessionError::UnknownCommand(command)),
	};

	Ok(Input::Command(parsed))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_prompts() {
		assert_eq!(
			classify("What is a decorator?").unwrap(),
			Input::Prompt("What is a decorator?".to_string())
		);
		// Prefix must come first to count as a command
		assert_eq!(
			classify("why does x != y?").unwrap(),
			Input::Prompt("why does x != y?".to_string())
		);
		assert_eq!(
			classify("  padded question \n").unwrap(),
			Input::Prompt("padded question".to_string())
		);
	}

	#[test]
	fn test_blank_input_is_empty_prompt() {
		assert!(matches!(classify(""), Err(SessionError::EmptyPrompt)));
		assert!(matches!(classify("   \t "), Err(SessionError::EmptyPrompt)));
	}

	#[test]
	fn test_commands() {
		assert_eq!(
			classify("!model llama").unwrap(),
			Input::Command(Command::Model(Some("llama".to_string())))
		);
		assert_eq!(classify("!model").unwrap(), Input::Command(Command::Model(None)));
		assert_eq!(classify("!history").unwrap(), Input::Command(Command::History));
		assert_eq!(classify("!clear").unwrap(), Input::Command(Command::Clear));
		assert_eq!(classify("!save").unwrap(), Input::Command(Command::Save));
		assert_eq!(classify("!help").unwrap(), Input::Command(Command::Help));
		assert_eq!(classify("!quit").unwrap(), Input::Command(Command::Quit));
		assert_eq!(classify("!exit").unwrap(), Input::Command(Command::Quit));
	}

	#[test]
	fn test_command_names_are_case_insensitive() {
		assert_eq!(classify("!HISTORY").unwrap(), Input::Command(Command::History));
		assert_eq!(
			classify("  !Model GPT ").unwrap(),
			Input::Command(Command::Model(Some("GPT".to_string())))
		);
	}

	#[test]
	fn test_unknown_commands() {
		match classify("!hist") {
			Err(SessionError::UnknownCommand(name)) => assert_eq!(name, "!hist"),
			other => panic!("unexpected {:?}", other),
		}
		assert!(matches!(classify("!"), Err(SessionError::UnknownCommand(_))));
		assert!(matches!(classify("!foo bar"), Err(SessionError::UnknownCommand(_))));
	}

	#[test]
	fn test_every_listed_command_classifies() {
		for command in COMMANDS {
			assert!(
				matches!(classify(command), Ok(Input::Command(_))),
				"{} should be a command",
				command
			);
		}
	}
}
