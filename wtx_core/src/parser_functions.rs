use std::collections::HashMap;

use crate::context::Context;
use crate::subst::Substitution;
use crate::subst::TEXT_PLACEHOLDER;
use crate::subst::expand_snippet;

/// Separator used when the caller leaves the separator argument absent or
/// empty.
const DEFAULT_SEPARATOR: &str = "<br>\n";

/// `{{#reviewsections: separator | condition | text | ... }}`
///
/// Emits the text of every (condition, text) pair whose condition holds for
/// the review's cleanup proposal, joined by the separator. Conditions:
/// `UNANIMOUSACTION`, `MULTIPLEACTIONS`, `UNCONDITIONAL`.
pub(crate) fn review_sections(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if args.len() < 3 {
		return Some(String::new());
	}

	let args: Vec<&str> = args.iter().map(|arg| arg.trim()).collect();
	let separator = separator_or_default(&args, 0);

	let mut sections: Vec<&str> = vec![];

	for pair in args[1..].chunks(2) {
		// A trailing condition with no text is dropped.
		let &[condition, text] = pair else { break };
		if text.is_empty() {
			continue;
		}

		let emit = match condition {
			"UNANIMOUSACTION" => unanimous_actions(context),
			"MULTIPLEACTIONS" => multiple_actions(context),
			"UNCONDITIONAL" => true,
			_ => false,
		};

		if emit {
			sections.push(text);
		}
	}

	Some(sections.join(separator))
}

/// `{{#individualactions: snippet | separator? }}`
///
/// Renders the snippet once per revision review. `%%TEXT%%` resolves to the
/// action's "individual" boilerplate, then the per-revision placeholders
/// `%%REVISIONTIMESTAMP%%`, `%%ACTIONNAME%%`, `%%REASONNAME%%`,
/// `%%ACTIONDESCRIPTION%%` and `%%REASONDESCRIPTION%%` are substituted.
pub(crate) fn individual_actions(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if args.is_empty() {
		return Some(String::new());
	}

	let args: Vec<&str> = args.iter().map(|arg| arg.trim()).collect();
	let separator = separator_or_default(&args, 1);
	let snippet = args[0];

	let reviews = context.cleanup_proposal().to_vec();
	let mut result: Vec<String> = vec![];

	for review in &reviews {
		let boilerplate = snippet
			.contains(TEXT_PLACEHOLDER)
			.then(|| context.action_wikitext(&review.action).individual.clone());

		let keywords = HashMap::from([
			(
				"REVISIONTIMESTAMP",
				Substitution::Literal(review.timestamp.clone()),
			),
			("ACTIONNAME", Substitution::Literal(review.action.clone())),
			("REASONNAME", Substitution::Literal(review.reason.clone())),
			(
				"ACTIONDESCRIPTION",
				Substitution::Lazy(Box::new(|| context.action_description(&review.action))),
			),
			(
				"REASONDESCRIPTION",
				Substitution::Lazy(Box::new(|| context.reason_description(&review.reason))),
			),
		]);

		result.push(expand_snippet(snippet, boilerplate.as_deref(), &keywords));
	}

	Some(result.join(separator))
}

/// `{{#distinctactions: snippet | separator? }}`
///
/// Like `individualactions`, but renders each distinct action once in
/// first-seen order, with `%%TEXT%%` resolving to the "distinct"
/// boilerplate.
pub(crate) fn distinct_actions(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if args.is_empty() {
		return Some(String::new());
	}

	let args: Vec<&str> = args.iter().map(|arg| arg.trim()).collect();
	let separator = separator_or_default(&args, 1);
	let snippet = args[0];

	let actions = unique(context.cleanup_proposal().iter().map(|review| review.action.clone()));
	let mut result: Vec<String> = vec![];

	for action in &actions {
		let boilerplate = snippet
			.contains(TEXT_PLACEHOLDER)
			.then(|| context.action_wikitext(action).distinct.clone());

		let keywords = HashMap::from([
			("ACTIONNAME", Substitution::Literal(action.clone())),
			(
				"ACTIONDESCRIPTION",
				Substitution::Lazy(Box::new(|| context.action_description(action))),
			),
		]);

		result.push(expand_snippet(snippet, boilerplate.as_deref(), &keywords));
	}

	Some(result.join(separator))
}

/// `{{#unanimousaction: snippet }}`
///
/// Emits only when every revision in the proposal shares one action.
/// `%%TEXT%%` resolves to the action's "unanimous" boilerplate and
/// `%%REASONNAMES%%` to the deduplicated reasons joined with `", "`.
pub(crate) fn unanimous_action(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if args.is_empty() {
		return Some(String::new());
	}

	if !unanimous_actions(context) {
		return Some(String::new());
	}

	// The unanimity check guarantees a non-empty proposal; with exactly one
	// revision its action is the trivially unanimous value.
	let Some(first) = context.cleanup_proposal().first().cloned() else {
		return Some(String::new());
	};
	let action = first.action;

	let reasons =
		unique(context.cleanup_proposal().iter().map(|review| review.reason.clone())).join(", ");

	let snippet = args[0].trim();
	let boilerplate = snippet
		.contains(TEXT_PLACEHOLDER)
		.then(|| context.action_wikitext(&action).unanimous.clone());

	let keywords = HashMap::from([
		("ACTIONNAME", Substitution::Literal(action.clone())),
		(
			"ACTIONDESCRIPTION",
			Substitution::Lazy(Box::new(|| context.action_description(&action))),
		),
		("REASONNAMES", Substitution::Literal(reasons)),
	]);

	Some(expand_snippet(snippet, boilerplate.as_deref(), &keywords))
}

/// `{{#distinctreasons: snippet | separator? }}`
///
/// Renders each distinct reason once in first-seen order, with `%%TEXT%%`
/// resolving to the reason's boilerplate and `%%REASONNAME%%` /
/// `%%REASONDESCRIPTION%%` substituted per reason.
pub(crate) fn distinct_reasons(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if args.is_empty() {
		return Some(String::new());
	}

	let args: Vec<&str> = args.iter().map(|arg| arg.trim()).collect();
	let separator = separator_or_default(&args, 1);
	let snippet = args[0];

	let reasons = unique(context.cleanup_proposal().iter().map(|review| review.reason.clone()));
	let mut result: Vec<String> = vec![];

	for reason in &reasons {
		let boilerplate = snippet
			.contains(TEXT_PLACEHOLDER)
			.then(|| context.reason_wikitext(reason).to_string());

		let keywords = HashMap::from([
			("REASONNAME", Substitution::Literal(reason.clone())),
			(
				"REASONDESCRIPTION",
				Substitution::Lazy(Box::new(|| context.reason_description(reason))),
			),
		]);

		result.push(expand_snippet(snippet, boilerplate.as_deref(), &keywords));
	}

	Some(result.join(separator))
}

/// The separator at `index` when present and non-empty, the default
/// otherwise.
fn separator_or_default<'a>(args: &[&'a str], index: usize) -> &'a str {
	match args.get(index) {
		Some(separator) if !separator.is_empty() => separator,
		_ => DEFAULT_SEPARATOR,
	}
}

/// Deduplicate while keeping first-seen order.
fn unique(values: impl Iterator<Item = String>) -> Vec<String> {
	let mut seen: Vec<String> = vec![];

	for value in values {
		if !seen.contains(&value) {
			seen.push(value);
		}
	}

	seen
}

/// Whether every revision in the proposal selects the same action. False
/// for an empty proposal.
fn unanimous_actions(context: &mut Context<'_>) -> bool {
	match context.cleanup_proposal().split_first() {
		Some((first, rest)) => rest.iter().all(|review| review.action == first.action),
		None => false,
	}
}

/// Whether the proposal selects more than one distinct action. False with
/// fewer than two revisions.
fn multiple_actions(context: &mut Context<'_>) -> bool {
	match context.cleanup_proposal().split_first() {
		Some((first, rest)) if !rest.is_empty() => {
			rest.iter().any(|review| review.action != first.action)
		}
		_ => false,
	}
}
