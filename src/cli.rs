use std::path::PathBuf;

use palc::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zstack", after_long_help = "A small concatenative language running on a dual-stack machine.")]
pub struct Cli {
	/// Capacity of the data stack and the return stack
	#[arg(long)]
	pub stack_size: Option<usize>,
	#[command(subcommand)]
	pub mode:       Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a script file
	File { path: PathBuf },
	/// Start an interactive prompt
	Repl,
}
