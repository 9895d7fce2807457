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

// Clear command handler

use super::super::core::ChatSession;
use super::super::output::TurnOutput;
use crate::log_debug;

pub fn handle_clear(session: &mut ChatSession) -> TurnOutput {
	let dropped = session.conversation.clear();
	log_debug!("Cleared {} exchanges", dropped);

	let mut output = TurnOutput::new();
	output.success("Conversation history cleared.");
	output
}

#[cfg(test)]
mod tests {
	use crate::session::chat::session::test_support::session_with;

	#[tokio::test]
	async fn test_clear_keeps_active_backend() {
		let (mut session, _client, _sink) =
			session_with(vec![Ok("a".to_string()), Ok("b".to_string())]);
		session.handle_line("!model llama").await;
		session.handle_line("q1").await;
		session.handle_line("q2").await;

		let output = session.handle_line("!clear").await;
		assert!(output.mentions("cleared"));
		assert!(session.conversation().is_empty());
		assert_eq!(session.conversation().active_backend().key, "llama");

		// Clearing again is harmless
		session.handle_line("!clear").await;
		assert!(session.conversation().is_empty());
		assert!(session.handle_line("!history").await.mentions("No conversation history yet."));
	}
}
