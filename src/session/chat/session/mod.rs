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

// Session module implementation
mod commands;
mod core;
mod display;
mod output;
mod runner;
#[cfg(test)]
mod test_support;

pub use self::core::{ChatSession, SessionSettings};
pub use output::{Notice, TurnOutput};
pub use runner::{run_interactive_session, run_session};
