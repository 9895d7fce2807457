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

// Assistant response output and formatting

use crate::log_debug;
use crate::session::chat::markdown::{is_markdown_content, MarkdownRenderer};
use colored::Colorize;

// Print an answer with optional markdown rendering
pub fn print_assistant_response(content: &str, render_markdown: bool) {
	if render_markdown && is_markdown_content(content) {
		let renderer = MarkdownRenderer::new();
		if let Err(e) = renderer.render_and_print(content) {
			// Fallback to plain text if markdown rendering fails
			log_debug!("Markdown rendering failed: {}", e);
			println!("{}", content.bright_green());
		}
	} else {
		println!("{}", content.bright_green());
	}
}
