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

// History command handler

use super::super::core::ChatSession;
use super::super::output::TurnOutput;

const PREVIEW_CHARS: usize = 100;

/// Cut at a char boundary and mark the cut
fn preview(question: &str) -> String {
	if question.chars().count() > PREVIEW_CHARS {
		let cut: String = question.chars().take(PREVIEW_CHARS).collect();
		format!("{}...", cut)
	} else {
		question.to_string()
	}
}

pub fn handle_history(session: &ChatSession) -> TurnOutput {
	let mut output = TurnOutput::new();

	if session.conversation.is_empty() {
		output.info("No conversation history yet.");
		return output;
	}

	output.heading("Conversation History:");
	for (i, exchange) in session.conversation.history().enumerate() {
		output.line(format!("{}. {}", i + 1, preview(&exchange.question)));
	}
	output
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::chat::session::test_support::session_with;

	#[test]
	fn test_preview_truncates_long_questions() {
		let long = "x".repeat(150);
		let shown = preview(&long);
		assert_eq!(shown.len(), PREVIEW_CHARS + 3);
		assert!(shown.ends_with("..."));

		let exact = "y".repeat(PREVIEW_CHARS);
		assert_eq!(preview(&exact), exact);

		// Multi-byte text is cut on char boundaries
		let wide = "é".repeat(120);
		assert_eq!(preview(&wide).chars().count(), PREVIEW_CHARS + 3);
	}

	#[test]
	fn test_empty_history() {
		let (session, _client, _sink) = session_with(vec![]);
		let output = handle_history(&session);
		assert!(output.mentions("No conversation history yet."));
	}
}
