use palc::Parser;
use tracing_subscriber::EnvFilter;
use zstack::{DEFAULT_STACK_SIZE, Stacker, cli::*};

fn init_tracing() {
	let filter = EnvFilter::try_from_env("ZSTACK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() {
	init_tracing();

	let cli = Cli::parse();
	let mut stacker = Stacker::new(cli.stack_size.unwrap_or(DEFAULT_STACK_SIZE));

	match cli.mode {
		Mode::File { path } => {
			if let Err(e) = stacker.run_file(&path) {
				eprintln!("Failed run file: {e}");
				std::process::exit(1);
			}
		}
		Mode::Repl => stacker.run_prompt(),
	}
}
