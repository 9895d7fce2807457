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

// Chat session module
mod animation;
mod assistant_output;
pub mod commands;
pub mod conversation;
pub mod dispatcher;
pub mod input;
mod markdown;
mod session;
pub mod transcript;

// Re-export main structures and functions
pub use commands::{COMMANDS, COMMAND_PREFIX};
pub use conversation::{ConversationState, Exchange};
pub use dispatcher::{classify, Command, Input};
pub use input::{InputEvent, LineSource, ScriptedInput, TerminalInput};
pub use session::{
	run_interactive_session, run_session, ChatSession, Notice, SessionSettings, TurnOutput,
};
pub use transcript::{FileSink, PersistenceError, TranscriptSink};
