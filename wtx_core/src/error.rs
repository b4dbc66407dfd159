use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WtxError {
	#[error(transparent)]
	#[diagnostic(code(wtx::io_error))]
	Io(#[from] std::io::Error),

	#[error("duplicate magic word: `{0}`")]
	#[diagnostic(
		code(wtx::duplicate_magic_word),
		help("each magic word name may be registered once per lexicon")
	)]
	DuplicateMagicWord(String),

	#[error("duplicate parser function: `{0}`")]
	#[diagnostic(
		code(wtx::duplicate_parser_function),
		help("each parser function name may be registered once per lexicon")
	)]
	DuplicateParserFunction(String),

	#[error("failed to parse review-set file: {0}")]
	#[diagnostic(
		code(wtx::config_parse),
		help(
			"check that the review set is valid TOML with a `template` key and [[actions]], \
			 [[reasons]] and [[reviews]] tables"
		)
	)]
	ConfigParse(String),

	#[error("no review with id {0} in the review set")]
	#[diagnostic(code(wtx::unknown_review))]
	UnknownReview(i64),
}

pub type WtxResult<T> = Result<T, WtxError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
