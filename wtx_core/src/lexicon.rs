use std::collections::HashMap;

use crate::context::Context;
use crate::error::WtxError;
use crate::error::WtxResult;
use crate::magic_words;
use crate::parser_functions;

/// A named directive callback. Handlers receive the per-run context and the
/// directive's arguments; returning `None` declines the call, which
/// re-emits the directive verbatim.
pub type Handler = Box<dyn Fn(&mut Context<'_>, &[String]) -> Option<String> + Send + Sync>;

/// The immutable registry of magic words and parser functions available to
/// one evaluation. Built once at startup and shared by reference across
/// every run; never consulted through ambient globals.
#[derive(Default)]
pub struct Lexicon {
	magic_words: HashMap<String, Handler>,
	parser_functions: HashMap<String, Handler>,
}

impl Lexicon {
	pub fn builder() -> LexiconBuilder {
		LexiconBuilder::default()
	}

	pub fn magic_word(&self, name: &str) -> Option<&Handler> {
		self.magic_words.get(name)
	}

	pub fn parser_function(&self, name: &str) -> Option<&Handler> {
		self.parser_functions.get(name)
	}
}

/// Builder for [`Lexicon`]. Registration is exclusive: a duplicate name
/// within either map is a configuration error surfaced before any
/// evaluation runs.
#[derive(Default)]
pub struct LexiconBuilder {
	lexicon: Lexicon,
}

impl LexiconBuilder {
	pub fn magic_word(
		mut self,
		name: impl Into<String>,
		handler: impl Fn(&mut Context<'_>, &[String]) -> Option<String> + Send + Sync + 'static,
	) -> WtxResult<Self> {
		let name = name.into();

		if self.lexicon.magic_words.contains_key(&name) {
			return Err(WtxError::DuplicateMagicWord(name));
		}

		self.lexicon.magic_words.insert(name, Box::new(handler));
		Ok(self)
	}

	pub fn parser_function(
		mut self,
		name: impl Into<String>,
		handler: impl Fn(&mut Context<'_>, &[String]) -> Option<String> + Send + Sync + 'static,
	) -> WtxResult<Self> {
		let name = name.into();

		if self.lexicon.parser_functions.contains_key(&name) {
			return Err(WtxError::DuplicateParserFunction(name));
		}

		self.lexicon.parser_functions.insert(name, Box::new(handler));
		Ok(self)
	}

	pub fn build(self) -> Lexicon {
		self.lexicon
	}
}

/// The lexicon of built-in directives: the review scalar magic words plus
/// the cleanup-proposal parser functions.
pub fn default_lexicon() -> WtxResult<Lexicon> {
	let lexicon = Lexicon::builder()
		.magic_word("REVIEWCOMMENTS", magic_words::review_comments)?
		.magic_word("REVIEWTIMESTAMP", magic_words::review_timestamp)?
		.magic_word("REVIEWAUTHOR", magic_words::review_author)?
		.parser_function("reviewsections", parser_functions::review_sections)?
		.parser_function("individualactions", parser_functions::individual_actions)?
		.parser_function("distinctactions", parser_functions::distinct_actions)?
		.parser_function("unanimousaction", parser_functions::unanimous_action)?
		.parser_function("distinctreasons", parser_functions::distinct_reasons)?
		.build();

	Ok(lexicon)
}
