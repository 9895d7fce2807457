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

use clap::Args;
use std::path::Path;

use techtutor::config::Config;
use techtutor::directories;

#[derive(Args, Debug)]
pub struct ConfigArgs {
	/// Show current configuration values with defaults
	#[arg(long)]
	pub show: bool,

	/// Validate configuration without making changes
	#[arg(long)]
	pub validate: bool,
}

// Handle the configuration command
pub fn execute(args: &ConfigArgs, config_path: Option<&Path>) -> Result<(), anyhow::Error> {
	let path = match config_path {
		Some(path) => path.to_path_buf(),
		None => directories::get_config_file_path()?,
	};

	if args.validate {
		return match Config::load_from(&path) {
			Ok(_) => {
				println!("✅ Configuration is valid!");
				Ok(())
			}
			Err(e) => {
				eprintln!("❌ Configuration validation failed: {:#}", e);
				Err(e)
			}
		};
	}

	if args.show {
		let config = Config::load_from(&path)?;
		let rendered = toml::to_string_pretty(&config.create_clean_copy_for_saving())?;
		println!("# {}", path.display());
		println!("{}", rendered);
		return Ok(());
	}

	if Config::create_default_config_at(&path)? {
		println!("Created default configuration file at: {}", path.display());
	} else {
		println!("Configuration file already exists at: {}", path.display());
	}
	Ok(())
}
