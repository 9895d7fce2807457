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

// Markdown transcript export and the sinks that persist it

use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const TRANSCRIPT_TITLE: &str = "AI Tutor Conversation";
pub const TRANSCRIPT_FILE_PREFIX: &str = "tutor_conversation_";

#[derive(Debug, Error)]
pub enum PersistenceError {
	#[error("Failed to create directory {}: {source}", path.display())]
	CreateDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write transcript {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// `tutor_conversation_20250101_120000.md`
pub fn file_name_for(timestamp: &DateTime<Local>) -> String {
	format!(
		"{}{}.md",
		TRANSCRIPT_FILE_PREFIX,
		timestamp.format("%Y%m%d_%H%M%S")
	)
}

pub fn render_header(timestamp: &DateTime<Local>) -> String {
	format!(
		"# {} - {}\n\n",
		TRANSCRIPT_TITLE,
		timestamp.format("%Y-%m-%d %H:%M:%S")
	)
}

/// One numbered question/answer section
pub fn render_exchange(index: usize, question: &str, answer: &str, backend_key: &str) -> String {
	format!(
		"## Question {index}\n\n{question}\n\n## Answer {index}\n\n{answer}\n\n_Backend: {backend_key}_\n\n---\n\n"
	)
}

/// Where exported transcripts end up
pub trait TranscriptSink: Send {
	/// Persist `document` under `file_name`, returning where it landed
	fn write(&self, file_name: &str, document: &str) -> Result<PathBuf, PersistenceError>;
}

/// Writes transcripts as files into a directory
pub struct FileSink {
	dir: PathBuf,
}

impl FileSink {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}
}

impl TranscriptSink for FileSink {
	fn write(&self, file_name: &str, document: &str) -> Result<PathBuf, PersistenceError> {
		if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
			fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::CreateDir {
				path: self.dir.clone(),
				source,
			})?;
		}

		let path = self.dir.join(file_name);
		fs::write(&path, document).map_err(|source| PersistenceError::Write {
			path: path.clone(),
			source,
		})?;
		Ok(path)
	}
}
