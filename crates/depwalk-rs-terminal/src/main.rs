use depwalk_rs::{FrameworkMoniker, ResolutionBuilder};

const DEFAULT_FRAMEWORK: &str = "dnx451";

fn main() {
	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",                 "Show help");
		opts.optflag( "v", "verbose",              "Increased vebosity");
		opts.optopt(  "f", "framework",            "Framework to resolve for", "FRAMEWORK");
		opts.optflag( "",  "skip-lock-validation", "Use the lock file even when it no longer matches the project");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); std::process::exit(2) }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: depwalk-rs-terminal [options] <project-dir>"));
			return;
		}

		parsed_options
	};

	let mut logger = env_logger::Builder::from_default_env();
	if parsed_options.opt_present("v") {
		logger.filter_level(log::LevelFilter::Debug);
	}
	logger.init();

	match run(&parsed_options) {
		Ok(true) => {},
		Ok(false) => std::process::exit(1),
		Err(e) => {
			log::error!("{}", e);
			eprintln!("{}", e);
			std::process::exit(2);
		},
	}
}

/// Returns `false` when the resolution has errors.
fn run(parsed_options: &getopts::Matches) -> Result<bool, Error> {
	let project_dir = parsed_options.free.get(0).ok_or(Error::MissingArgument)?;

	let framework = parsed_options.opt_str("f").unwrap_or_else(|| DEFAULT_FRAMEWORK.to_string());
	let framework = FrameworkMoniker::parse(&framework)?;

	let project = depwalk_rs::resolution::load_project(std::path::Path::new(project_dir))?;
	log::trace!("Resolving {} for {}", project.name(), framework);

	let resolution = ResolutionBuilder::new(project, framework)
		.skip_lock_file_validation(parsed_options.opt_present("skip-lock-validation"))
		.build()?;
	let manager = resolution.library_manager();

	println!("Libraries for {}:", manager.framework());
	for library in manager.dependency_order() {
		let version = library.identity.version().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
		println!("\t{} {} {}", library.name(), version, library.identity.library_type());
	}

	let diagnostics = manager.get_all_diagnostics();
	if !diagnostics.is_empty() {
		println!("Diagnostics:");
		for diagnostic in &diagnostics {
			println!("\t{}", diagnostic);
		}
	}

	Ok(!depwalk_rs::diagnostics::has_errors(&diagnostics))
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("depwalk-rs error: {0}")]
	Depwalk(#[from] depwalk_rs::Error),
	#[error("Missing argument: project directory")]
	MissingArgument,
}
