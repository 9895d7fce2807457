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

// Session command processing, one handler module per command

mod clear;
mod exit;
mod help;
mod history;
mod model;
mod save;

use super::core::ChatSession;
use super::output::TurnOutput;
use crate::session::chat::dispatcher::Command;

// Process user commands. None of these call a backend for a completion.
pub async fn process_command(session: &mut ChatSession, command: Command) -> TurnOutput {
	match command {
		Command::Model(None) => model::handle_show_model(session),
		Command::Model(Some(key)) => model::handle_model(session, &key).await,
		Command::History => history::handle_history(session),
		Command::Clear => clear::handle_clear(session),
		Command::Save => save::handle_save(session),
		Command::Help => help::handle_help(),
		Command::Quit => exit::handle_exit(),
	}
}
