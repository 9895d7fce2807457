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

// Command completion and hinting for the tutor prompt

use crate::session::chat::commands::{COMMANDS, COMMAND_PREFIX};
use colored::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::Validator;
use rustyline::Helper;
use std::borrow::Cow::{self, Borrowed, Owned};

/// Commands matching a typed prefix, in table order
fn matching_commands(line: &str) -> impl Iterator<Item = &'static str> + '_ {
	let typed = line.to_lowercase();
	COMMANDS.into_iter().filter(move |cmd| cmd.starts_with(&typed))
}

pub struct CommandHelper {
	hinter: HistoryHinter,
}

impl CommandHelper {
	pub fn new() -> Self {
		Self {
			hinter: HistoryHinter {},
		}
	}
}

impl Default for CommandHelper {
	fn default() -> Self {
		Self::new()
	}
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
	type Candidate = Pair;

	fn complete(
		&self,
		line: &str,
		_pos: usize,
		_ctx: &rustyline::Context<'_>,
	) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
		// Only the command word is completed
		if !line.starts_with(COMMAND_PREFIX) || line.contains(' ') {
			return Ok((0, vec![]));
		}

		let candidates = matching_commands(line)
			.map(|cmd| Pair {
				display: cmd.to_string(),
				replacement: cmd.to_string(),
			})
			.collect();

		Ok((0, candidates))
	}
}

impl Hinter for CommandHelper {
	type Hint = String;

	fn hint(&self, line: &str, pos: usize, ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
		if line.starts_with(COMMAND_PREFIX) {
			if line.len() < 2 || line.contains(' ') {
				return None;
			}
			matching_commands(line)
				.next()
				.map(|cmd| cmd[line.len()..].to_string())
		} else {
			self.hinter.hint(line, pos, ctx)
		}
	}
}

impl Highlighter for CommandHelper {
	fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
		if !line.starts_with(COMMAND_PREFIX) {
			return Borrowed(line);
		}

		let word = line.split_whitespace().next().unwrap_or_default();
		if matching_commands(word).next().is_some() {
			Owned(line.green().to_string())
		} else {
			Borrowed(line)
		}
	}

	fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
		false
	}

	fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
		// Dim gray, like shell autocomplete
		Owned(hint.bright_black().to_string())
	}
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_matching_commands() {
		let matches: Vec<&str> = matching_commands("!h").collect();
		assert_eq!(matches, vec!["!history", "!help"]);

		let matches: Vec<&str> = matching_commands("!E").collect();
		assert_eq!(matches, vec!["!exit"]);

		assert_eq!(matching_commands("!").count(), COMMANDS.len());
		assert_eq!(matching_commands("!zzz").count(), 0);
	}
}
