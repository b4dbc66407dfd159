use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use wtx_cli::Commands;
use wtx_cli::OutputFormat;
use wtx_cli::WtxCli;
use wtx_core::AnyEmptyResult;
use wtx_core::ReviewEntry;
use wtx_core::ReviewSet;
use wtx_core::default_lexicon;
use wtx_core::evaluate;
use wtx_core::splice;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = WtxCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	if args.verbose {
		let filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.init();
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Commands::Render { data, review } => run_render(&data, review),
		Commands::Sync {
			data,
			dry_run,
			diff,
			format,
		} => run_sync(&data, dry_run, diff, format),
	};

	if let Err(e) = result {
		// Render through miette when possible for help text and error
		// codes.
		match e.downcast::<wtx_core::WtxError>() {
			Ok(wtx_err) => {
				let report: miette::Report = (*wtx_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn run_render(data: &Path, review_id: Option<i64>) -> AnyEmptyResult {
	let review_set = ReviewSet::load(data)?;
	let lexicon = default_lexicon()?;
	let store = review_set.store();

	let reviews: Vec<&ReviewEntry> = match review_id {
		Some(id) => vec![review_set.review(id)?],
		None => review_set.reviews.iter().collect(),
	};

	for (index, review) in reviews.iter().enumerate() {
		if index > 0 {
			println!();
		}

		let mut context = review.context(&store);
		let rendered = evaluate(&review_set.template, &lexicon, &mut context);
		println!("{rendered}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct SyncOutcome {
	review: i64,
	article: PathBuf,
	changed: bool,
}

fn run_sync(data: &Path, dry_run: bool, diff: bool, format: OutputFormat) -> AnyEmptyResult {
	let review_set = ReviewSet::load(data)?;
	let lexicon = default_lexicon()?;
	let store = review_set.store();

	// Article paths are resolved relative to the review-set file.
	let base = data.parent().unwrap_or_else(|| Path::new("."));
	let mut outcomes: Vec<SyncOutcome> = vec![];

	// A failing article read or write aborts the remaining batch; earlier
	// articles stay written.
	for review in &review_set.reviews {
		let mut context = review.context(&store);
		let rendered = evaluate(&review_set.template, &lexicon, &mut context);

		let article_path = if review.article.is_absolute() {
			review.article.clone()
		} else {
			base.join(&review.article)
		};

		let article = std::fs::read_to_string(&article_path)?;
		let updated = splice(&article, &rendered);
		let changed = updated != article;

		if diff && changed && format == OutputFormat::Text {
			print_diff(&article_path, &article, &updated);
		}

		if changed && !dry_run {
			std::fs::write(&article_path, &updated)?;
		}

		outcomes.push(SyncOutcome {
			review: review.id,
			article: article_path,
			changed,
		});
	}

	match format {
		OutputFormat::Text => {
			let changed = outcomes.iter().filter(|outcome| outcome.changed).count();
			let verb = if dry_run { "would update" } else { "updated" };
			println!(
				"{} {verb} {changed} of {} article(s)",
				colored!("sync:", bold),
				outcomes.len()
			);
		}
		OutputFormat::Json => {
			let summary = serde_json::json!({
				"dry_run": dry_run,
				"articles": outcomes,
			});
			println!("{}", serde_json::to_string_pretty(&summary)?);
		}
	}

	Ok(())
}

fn print_diff(path: &Path, original: &str, updated: &str) {
	println!("{}", colored!(path.display().to_string(), bold));

	let diff = TextDiff::from_lines(original, updated);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => print!("{}", colored!(format!("-{change}"), red)),
			ChangeTag::Insert => print!("{}", colored!(format!("+{change}"), green)),
			ChangeTag::Equal => print!(" {change}"),
		}
	}
}
