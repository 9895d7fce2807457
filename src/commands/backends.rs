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

use colored::*;

use techtutor::config::Config;
use techtutor::session::chat::ChatSession;

// Probe every registered backend and print the result
pub async fn execute(config: &Config) -> Result<(), anyhow::Error> {
	techtutor::config::set_thread_config(config);

	let mut session = ChatSession::from_config(config)?;
	println!("{}", "Probing backends...".bright_blue());
	session.backend_report(&config.default_backend).await.print(false);
	Ok(())
}
