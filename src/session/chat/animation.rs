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

// Animation module for the waiting indicator

use anyhow::Result;
use colored::*;
use crossterm::{cursor, execute};
use std::io::{stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Animation frames for loading indicator
const LOADING_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

// Show loading animation until the flag is raised
pub async fn show_loading_animation(cancel_flag: Arc<AtomicBool>, label: String) -> Result<()> {
	let mut stdout = stdout();
	let mut frame_idx = 0;

	execute!(stdout, cursor::SavePosition)?;

	while !cancel_flag.load(Ordering::SeqCst) {
		execute!(stdout, cursor::RestorePosition)?;

		print!(" {} {}", LOADING_FRAMES[frame_idx].cyan(), label.bright_blue());
		stdout.flush()?;

		frame_idx = (frame_idx + 1) % LOADING_FRAMES.len();

		tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
	}

	// Wipe the indicator line
	execute!(stdout, cursor::RestorePosition)?;
	print!("{}", " ".repeat(label.chars().count() + 4));
	execute!(stdout, cursor::RestorePosition)?;
	stdout.flush()?;

	Ok(())
}
