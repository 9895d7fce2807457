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

// Session display functionality

use super::core::ChatSession;
use super::output::{Notice, TurnOutput};
use crate::session::chat::assistant_output::print_assistant_response;
use crate::session::chat::commands::HELP_COMMAND;
use colored::*;

impl TurnOutput {
	pub fn print(&self, render_markdown: bool) {
		for notice in &self.notices {
			match notice {
				Notice::Success(text) => println!("{}", format!("✅ {}", text).bright_green()),
				Notice::Info(text) => println!("{}", text.bright_cyan()),
				Notice::Warning(text) => println!("{}", format!("⚠️  {}", text).bright_yellow()),
				Notice::Error(text) => println!("{}", format!("❌ {}", text).bright_red()),
				Notice::Heading(text) => println!("\n{}", text.bright_cyan().bold()),
				Notice::Line(text) => println!("  {}", text),
				Notice::Answer(text) => {
					println!();
					print_assistant_response(text, render_markdown);
					println!();
				}
			}
		}
	}
}

impl ChatSession {
	/// One line per registered backend with its cached availability
	pub fn backend_lines(&self) -> Vec<String> {
		let active = &self.conversation.active_backend().key;
		self.registry
			.list()
			.map(|backend| {
				let status = self.availability_of(&backend.key);
				let pointer = if &backend.key == active { "▶" } else { " " };
				format!(
					"{} {} {:<8} {} [{}, {}]",
					pointer,
					status.marker(),
					backend.key,
					backend.display_name,
					backend.provider_kind,
					backend.model_id
				)
			})
			.collect()
	}

	/// Startup selection notices followed by the status of every backend
	pub async fn backend_report(&mut self, preferred: &str) -> TurnOutput {
		let mut output = self.start(preferred).await;
		output.heading("Registered backends:");
		for line in self.backend_lines() {
			output.line(line);
		}
		output
	}

	pub fn welcome(&self) -> TurnOutput {
		let mut output = TurnOutput::new();
		output.heading("───────────── 🎓 AI Tutor ─────────────");
		output.line("Ask any programming question and get a detailed explanation.");
		output.heading("Backends:");
		for line in self.backend_lines() {
			output.line(line);
		}
		output.info(format!(
			"Type {} for available commands. Use ↑/↓ arrows or Ctrl+R for history search.",
			HELP_COMMAND
		));
		output
	}
}
