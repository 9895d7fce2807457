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

// Chat commands module

pub const COMMAND_PREFIX: char = '!';

// Chat commands
pub const MODEL_COMMAND: &str = "!model";
pub const HISTORY_COMMAND: &str = "!history";
pub const CLEAR_COMMAND: &str = "!clear";
pub const SAVE_COMMAND: &str = "!save";
pub const HELP_COMMAND: &str = "!help";
pub const QUIT_COMMAND: &str = "!quit";
pub const EXIT_COMMAND: &str = "!exit";

// List of all available commands for autocomplete
pub const COMMANDS: [&str; 7] = [
	MODEL_COMMAND,
	HISTORY_COMMAND,
	CLEAR_COMMAND,
	SAVE_COMMAND,
	HELP_COMMAND,
	QUIT_COMMAND,
	EXIT_COMMAND,
];

/// One row of the fixed command surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
	pub usage: &'static str,
	pub summary: &'static str,
}

pub const COMMAND_SPECS: [CommandSpec; 6] = [
	CommandSpec {
		usage: "!model <name>",
		summary: "Switch between models (gpt/llama); without a name shows the current one",
	},
	CommandSpec {
		usage: "!history",
		summary: "Show conversation history",
	},
	CommandSpec {
		usage: "!clear",
		summary: "Clear conversation history",
	},
	CommandSpec {
		usage: "!save",
		summary: "Save conversation to a markdown file",
	},
	CommandSpec {
		usage: "!help",
		summary: "Show this help message",
	},
	CommandSpec {
		usage: "!quit or !exit",
		summary: "Exit the tutor",
	},
];
