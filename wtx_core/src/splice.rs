use tracing::debug;

/// Marks the beginning of the bot-managed region inside an article.
pub const START_MARKER: &str = "<!-- Start: CleanupAssistantBot -->";

/// Marks the end of the bot-managed region inside an article.
pub const END_MARKER: &str = "<!-- End: CleanupAssistantBot -->";

/// Replace the bot-managed region of `article` with `region`, healing any
/// duplicated or dangling markers left behind by earlier edits.
///
/// The new region lands at the position of the last region it replaced, so
/// a region that was moved around the article by hand keeps its place
/// across updates. When the article has no markers at all the region is
/// appended. Total: succeeds for any input pair, and at most one managed
/// region survives the call.
pub fn splice(article: &str, region: &str) -> String {
	// First deletion step: remove every matched marker pair span. A span
	// runs from a start marker to the next end marker, so consecutive start
	// markers are grouped into one deletion.
	let (cleaned, insert_pos) = remove_matched_spans(article);

	// Second deletion step: remove dangling markers of either kind, only
	// adjusting the insertion position for removals at or before it.
	let (cleaned, removed_start) = remove_dangling(&cleaned, START_MARKER, insert_pos);
	let (cleaned, removed_end) = remove_dangling(&cleaned, END_MARKER, insert_pos);

	let insert_pos = match insert_pos {
		Some(position) => {
			position
				.saturating_sub(removed_start + removed_end)
				.min(cleaned.len())
		}
		// No deletion happened anywhere, so append instead.
		None => cleaned.len(),
	};

	let (left, right) = cleaned.split_at(insert_pos);
	let mut result = String::with_capacity(
		left.len() + right.len() + region.len() + START_MARKER.len() + END_MARKER.len() + 6,
	);

	result.push_str(left);

	if !left.is_empty() && !left.ends_with('\n') {
		// Left portion doesn't end with a line break, append two.
		result.push_str("\n\n");
	} else if left.len() >= 2 && left.as_bytes()[left.len() - 2] != b'\n' {
		// Left portion doesn't end with a double line break, append one.
		result.push('\n');
	}

	result.push_str(START_MARKER);
	result.push('\n');
	result.push_str(region);
	result.push('\n');
	result.push_str(END_MARKER);

	if !right.is_empty() && !right.starts_with('\n') {
		// Right portion doesn't start with a line break, prepend two.
		result.push_str("\n\n");
	} else if right.len() >= 2 && right.as_bytes()[1] != b'\n' {
		// Right portion doesn't start with a double line break, prepend one.
		result.push('\n');
	}

	result.push_str(right);
	result
}

/// Delete every matched start/end marker span, plus up to two newlines
/// trailing each span. Returns the cleaned text and the position (in
/// cleaned-text coordinates) just after the last deletion, when any
/// deletion occurred.
fn remove_matched_spans(article: &str) -> (String, Option<usize>) {
	let mut cleaned = String::with_capacity(article.len());
	let mut insert_pos = None;
	let mut spans = 0;
	let mut pos = 0;

	while let Some(found) = article[pos..].find(START_MARKER) {
		let start = pos + found;
		let content_from = start + START_MARKER.len();

		let Some(end_found) = article[content_from..].find(END_MARKER) else {
			// A dangling start marker; the second deletion step handles it.
			break;
		};

		let end = consume_newlines(article, content_from + end_found + END_MARKER.len());
		cleaned.push_str(&article[pos..start]);
		insert_pos = Some(cleaned.len());
		spans += 1;
		pos = end;
	}

	cleaned.push_str(&article[pos..]);

	if spans > 0 {
		debug!("removed {spans} managed region span(s) from the article");
	}

	(cleaned, insert_pos)
}

/// Delete every occurrence of `marker`, plus up to two trailing newlines.
/// Returns the cleaned text and the number of characters removed at or
/// before `insert_pos`.
fn remove_dangling(text: &str, marker: &str, insert_pos: Option<usize>) -> (String, usize) {
	let mut result = String::with_capacity(text.len());
	let mut removed_before_insert = 0;
	let mut dangling = 0;
	let mut pos = 0;

	while let Some(found) = text[pos..].find(marker) {
		let start = pos + found;
		let end = consume_newlines(text, start + marker.len());

		result.push_str(&text[pos..start]);

		if insert_pos.is_some_and(|insert| end <= insert) {
			removed_before_insert += end - start;
		}

		dangling += 1;
		pos = end;
	}

	result.push_str(&text[pos..]);

	if dangling > 0 {
		debug!("removed {dangling} dangling `{marker}` marker(s) from the article");
	}

	(result, removed_before_insert)
}

/// Advance past up to two newline characters.
fn consume_newlines(text: &str, mut pos: usize) -> usize {
	for _ in 0..2 {
		if text[pos..].starts_with('\n') {
			pos += 1;
		}
	}

	pos
}
