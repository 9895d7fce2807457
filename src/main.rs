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

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use techtutor::config::Config;

#[derive(Parser)]
#[command(name = "techtutor")]
#[command(version)]
#[command(about = "Interactive AI tutor for programming questions, backed by hosted or local models")]
struct TechtutorArgs {
	#[command(subcommand)]
	command: Option<Commands>,

	#[command(flatten)]
	session: commands::SessionArgs,

	/// Path to the configuration file
	#[arg(long, global = true)]
	config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Generate a default configuration file
	Config(commands::ConfigArgs),

	/// Probe and list the registered backends
	Backends,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
	let args = TechtutorArgs::parse();

	// Handle the config command separately, it must work with a broken config file
	if let Some(Commands::Config(config_args)) = &args.command {
		return commands::config::execute(config_args, args.config.as_deref());
	}

	let mut config = match &args.config {
		Some(path) => Config::load_from(path)?,
		None => Config::load()?,
	};

	match &args.command {
		Some(Commands::Backends) => commands::backends::execute(&config).await,
		_ => {
			args.session.apply(&mut config)?;
			techtutor::session::chat::run_interactive_session(&config, args.session.model.as_deref())
				.await
		}
	}
}
