use crate::context::Context;

// The scalar magic words take no arguments; being handed any means the
// directive was malformed, so they decline and let it re-emit verbatim.

/// `{{REVIEWCOMMENTS}}` — text content from the review comments.
pub(crate) fn review_comments(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if !args.is_empty() {
		return None;
	}

	Some(context.comments.clone())
}

/// `{{REVIEWTIMESTAMP}}` — ISO 8601 review timestamp.
pub(crate) fn review_timestamp(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if !args.is_empty() {
		return None;
	}

	Some(context.timestamp.clone())
}

/// `{{REVIEWAUTHOR}}` — local account name of the review author.
pub(crate) fn review_author(context: &mut Context<'_>, args: &[String]) -> Option<String> {
	if !args.is_empty() {
		return None;
	}

	Some(context.author.clone())
}
