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

// Save command handler

use super::super::core::ChatSession;
use super::super::output::TurnOutput;

pub fn handle_save(session: &ChatSession) -> TurnOutput {
	let mut output = TurnOutput::new();
	match session.save_transcript() {
		Ok(Some(path)) => output.success(format!("Conversation saved to {}", path.display())),
		Ok(None) => output.info("No conversation to save."),
		Err(e) => return TurnOutput::from_error(&e),
	}
	output
}
