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

// Help command handler

use super::super::output::TurnOutput;
use crate::session::chat::commands::COMMAND_SPECS;

pub fn handle_help() -> TurnOutput {
	let mut output = TurnOutput::new();
	output.heading("Available commands:");
	for spec in COMMAND_SPECS {
		output.line(format!("{:<16} - {}", spec.usage, spec.summary));
	}
	output.info("Anything else is sent to the active backend as a question.");
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::chat::commands::COMMANDS;

	#[test]
	fn test_help_lists_every_command() {
		let output = handle_help();
		for command in COMMANDS {
			assert!(output.mentions(command), "help is missing {}", command);
		}
	}
}
