use tracing::trace;
use tracing::warn;

use crate::context::Context;
use crate::lexicon::Lexicon;
use crate::parser::Block;
use crate::parser::Node;
use crate::parser::parse;

/// How deep directive expansion may recurse before giving up.
pub const RECURSION_LIMIT: usize = 32;

/// Substituted in place of any expansion exceeding [`RECURSION_LIMIT`].
pub const RECURSION_SENTINEL: &str = "Recursion limit reached";

/// Expand every directive in `wikitext` against the lexicon and context.
///
/// Unknown directives and handlers that decline are re-emitted verbatim, so
/// evaluation never fails; the worst outcome for adversarial input is the
/// [`RECURSION_SENTINEL`] appearing in the output.
pub fn evaluate(wikitext: &str, lexicon: &Lexicon, context: &mut Context<'_>) -> String {
	evaluate_at_depth(wikitext, lexicon, context, 0)
}

fn evaluate_at_depth(
	wikitext: &str,
	lexicon: &Lexicon,
	context: &mut Context<'_>,
	depth: usize,
) -> String {
	if depth > RECURSION_LIMIT {
		warn!("directive expansion exceeded the recursion limit of {RECURSION_LIMIT}");
		return RECURSION_SENTINEL.to_string();
	}

	let mut result = String::new();

	for node in parse(wikitext).iter() {
		match node {
			Node::Text(text) => result.push_str(text),
			Node::Pipe => result.push('|'),
			Node::Block(block) => result.push_str(&evaluate_block(block, lexicon, context, depth)),
		}
	}

	result
}

fn evaluate_block(
	block: &Block,
	lexicon: &Lexicon,
	context: &mut Context<'_>,
	depth: usize,
) -> String {
	// Fold the block body into a head plus pipe-separated parameters,
	// evaluating nested blocks first so every part is a plain string.
	let mut parts: Vec<String> = vec![];
	let mut current = String::new();

	for node in block.body.iter() {
		match node {
			Node::Pipe => parts.push(std::mem::take(&mut current)),
			Node::Text(text) => current.push_str(text),
			Node::Block(nested) => {
				current.push_str(&evaluate_block(nested, lexicon, context, depth));
			}
		}
	}
	parts.push(current);

	let mut parts = parts.into_iter();
	let head = parts.next().unwrap_or_default();
	let params: Vec<String> = parts.collect();

	// A head of the form `#name:first-argument` is a parser-function call.
	// The name is taken verbatim between the hash and the first colon.
	let stripped = head.trim_start();
	if let Some(rest) = stripped.strip_prefix('#') {
		if let Some((name, first_arg)) = rest.split_once(':') {
			if let Some(handler) = lexicon.parser_function(name) {
				trace!("dispatching parser function `{name}` at depth {depth}");
				let mut args = Vec::with_capacity(params.len() + 1);
				args.push(first_arg.to_string());
				args.extend(params.iter().cloned());

				if let Some(result) = handler(context, &args) {
					return evaluate_at_depth(&result, lexicon, context, depth + 1);
				}
			}
		}
	}

	// A fully trimmed head may be a magic word.
	let name = stripped.trim_end();
	if let Some(handler) = lexicon.magic_word(name) {
		trace!("dispatching magic word `{name}` at depth {depth}");
		if let Some(result) = handler(context, &params) {
			return evaluate_at_depth(&result, lexicon, context, depth + 1);
		}
	}

	// No handler claimed the block: re-emit it verbatim, with any nested
	// expansions applied.
	let mut verbatim = "{".repeat(block.braces);
	verbatim.push_str(&head);
	for param in &params {
		verbatim.push('|');
		verbatim.push_str(param);
	}
	verbatim.push_str(&"}".repeat(block.braces));
	verbatim
}
