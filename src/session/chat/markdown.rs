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

// Markdown rendering module

use anyhow::Result;
use regex::Regex;
use termimad::MadSkin;

const CODE_BLOCK_PATTERN: &str = r"```(\w+)?\n([\s\S]*?)\n```";

pub struct MarkdownRenderer {
	skin: MadSkin,
}

impl MarkdownRenderer {
	pub fn new() -> Self {
		let mut skin = MadSkin::default();

		use termimad::crossterm::style::Attribute;
		use termimad::crossterm::style::Color;

		skin.headers[0].set_fg(Color::Yellow);
		skin.headers[0].add_attr(Attribute::Bold);
		skin.headers[1].set_fg(Color::Blue);
		skin.headers[1].add_attr(Attribute::Bold);
		skin.headers[2].set_fg(Color::Cyan);
		skin.headers[2].add_attr(Attribute::Bold);

		skin.code_block.set_bg(Color::Rgb { r: 40, g: 40, b: 40 });
		skin.code_block.set_fg(Color::White);

		skin.inline_code.set_bg(Color::Rgb { r: 60, g: 60, b: 60 });
		skin.inline_code.set_fg(Color::Yellow);

		skin.italic.set_fg(Color::Cyan);
		skin.bold.set_fg(Color::White);
		skin.bold.add_attr(Attribute::Bold);
		skin.quote_mark.set_fg(Color::Blue);
		skin.bullet.set_fg(Color::Green);

		Self { skin }
	}

	/// Print an answer, framing fenced code blocks with their language
	pub fn render_and_print(&self, markdown: &str) -> Result<()> {
		let code_block_regex = Regex::new(CODE_BLOCK_PATTERN)?;
		let mut last_end = 0;

		for cap in code_block_regex.captures_iter(markdown) {
			let (Some(whole), Some(code)) = (cap.get(0), cap.get(2)) else {
				continue;
			};

			let before_content = &markdown[last_end..whole.start()];
			if !before_content.trim().is_empty() {
				self.skin.print_text(before_content);
			}

			let language = cap.get(1).map(|m| m.as_str()).unwrap_or("text");
			println!();
			println!("┌─ {} ─", language);
			println!("{}", code.as_str());
			println!("└─────");
			println!();

			last_end = whole.end();
		}

		let remaining_content = &markdown[last_end..];
		if !remaining_content.trim().is_empty() {
			self.skin.print_text(remaining_content);
		}

		Ok(())
	}
}

impl Default for MarkdownRenderer {
	fn default() -> Self {
		Self::new()
	}
}

// Helper function to check if content looks like markdown
pub fn is_markdown_content(content: &str) -> bool {
	content.contains("```")
		|| content.contains("# ")
		|| content.contains("**")
		|| content.contains("* ")
		|| content.contains("- ")
		|| content.contains("](")
		|| content.contains("> ")
		|| (content.contains('`') && content.matches('`').count() >= 2)
}
