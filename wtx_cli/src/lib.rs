use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render wikitext review templates and splice them into wiki articles.",
	long_about = "wtx renders moderator-authored review templates against per-review data and \
	              splices the generated wikitext into wiki articles through a marker-delimited \
	              managed region.\n\nQuick start:\n  wtx render --data reviews.toml  Print the \
	              rendered wikitext for each review\n  wtx sync --data reviews.toml    Update \
	              every article file in place"
)]
pub struct WtxCli {
	#[command(subcommand)]
	pub command: Commands,

	/// Enable verbose tracing output on stderr (also honours RUST_LOG).
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render the review template for pending reviews and print the result.
	///
	/// Evaluates the template once per review in the review set, each with a
	/// fresh context, and prints the generated wikitext to stdout. Nothing
	/// is written to disk.
	Render {
		/// Path to the review-set TOML file.
		#[arg(long, short)]
		data: PathBuf,

		/// Render a single review by id instead of the whole set.
		#[arg(long)]
		review: Option<i64>,
	},
	/// Render every pending review and splice it into its article file.
	///
	/// Reads each review's article file, replaces the bot-managed region
	/// with the freshly rendered wikitext (healing duplicated or dangling
	/// markers along the way) and writes the article back. Article paths
	/// are resolved relative to the review-set file.
	Sync {
		/// Path to the review-set TOML file.
		#[arg(long, short)]
		data: PathBuf,

		/// Preview changes without writing files.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Show a unified diff for each article that would change.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for the sync summary. Use `text` for
		/// human-readable output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
	Text,
	Json,
}
