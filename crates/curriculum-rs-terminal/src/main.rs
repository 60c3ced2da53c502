use std::process::ExitCode;

use curriculum_rs::persistence::JsonFileStore;
use curriculum_rs::{CurriculumFile, Gateway};

mod frontend;
use frontend::{StdinConfirmation, TerminalRenderer};

const USAGE: &str = "Usage: curriculum-rs-terminal [options] <command> [args]

Commands:
    status              Show every course and its state
    approve <id>...     Approve courses in the given order
    unapprove <id>      Un-approve a course and every course depending on it
    reset               Clear all progress";

fn main() -> ExitCode {
	env_logger::init();

	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",       "Show help");
		opts.optopt(  "c", "curriculum", "Curriculum definition file", "PATH");
		opts.optopt(  "d", "data-dir",   "Where progress is saved", "DIR");
		opts.optflag( "y", "yes",        "Answer yes to every confirmation");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return ExitCode::FAILURE }
		};

		if parsed_options.opt_present("h") || parsed_options.free.is_empty() {
			eprintln!("{}", opts.usage(USAGE));
			return ExitCode::SUCCESS;
		}

		parsed_options
	};

	let mut config = curriculum_rs::Config::load_from_disk().unwrap_or_else(|e| {
		log::warn!("Failed to read config file: {}", e);
		log::warn!("Using default config.");
		curriculum_rs::Config::default()
	});

	if let Some(path) = parsed_options.opt_str("c") {
		if !config.set_curriculum_path(path.clone().into()) {
			log::error!("Curriculum file {} does not exist.", path);
			return ExitCode::FAILURE;
		}
	}
	if let Some(dir) = parsed_options.opt_str("d") {
		if let Err(e) = std::fs::create_dir_all(&dir) {
			log::error!("Unable to create data directory {}: {}", dir, e);
			return ExitCode::FAILURE;
		}
		config.set_data_dir(dir.into());
	}

	match run(&config, &parsed_options.free, parsed_options.opt_present("y")) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{}", e);
			ExitCode::FAILURE
		},
	}
}

fn run(config: &curriculum_rs::Config, free: &[String], assume_yes: bool) -> Result<(), Error> {
	let registry = CurriculumFile::load_from_config(config)?.into_registry()?;

	let command = free[0].as_str();
	let renderer = TerminalRenderer::new(command == "status");
	let mut gateway = Gateway::new(registry, renderer, JsonFileStore::from_config(config));
	let mut confirmation = StdinConfirmation::new(assume_yes);

	match command {
		"status" => Ok(()),
		"approve" => {
			if free.len() < 2 {
				return Err(Error::MissingArgument);
			}
			for id in &free[1..] {
				gateway.request_approve(id).map_err(curriculum_rs::Error::from)?;
			}
			Ok(())
		},
		"unapprove" => {
			let id = free.get(1).ok_or(Error::MissingArgument)?;
			let pending = gateway.request_unapprove(id).map_err(curriculum_rs::Error::from)?;
			match pending.confirm_with(&mut confirmation) {
				Some(_) => Ok(()),
				None => Err(Error::UserCancelled),
			}
		},
		"reset" => {
			match gateway.reset_with(&mut confirmation) {
				Some(_) => {
					println!("Progress reset.");
					Ok(())
				},
				None => Err(Error::UserCancelled),
			}
		},
		other => Err(Error::UnknownCommand(other.to_string())),
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("curriculum-rs error: {0}")]
	CurriculumRs(#[from] curriculum_rs::Error),
	#[error("Missing argument")]
	MissingArgument,
	#[error("Unknown command `{0}`")]
	UnknownCommand(String),
	#[error("User cancelled an action")]
	UserCancelled,
}
