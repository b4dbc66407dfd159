//! `wtx_core` is the core library for the wtx review-template engine. It
//! turns moderator-authored wikitext templates containing brace-delimited
//! directives into rendered review reports, and splices those reports into
//! wiki articles through a marker-delimited managed region.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Review template
//!   → Lexer (text runs, pipes, brace runs)
//!   → Parser (nested brace blocks, unmatched braces degrade to text)
//!   → Evaluator (magic words + parser functions from a Lexicon,
//!     bounded recursive expansion, fail-soft verbatim fallback)
//!   → Splicer (replaces the managed article region, healing corruption)
//! ```
//!
//! ## Directive Syntax
//!
//! - `{{REVIEWAUTHOR}}` — a magic word: a zero-argument named directive
//!   expanded into contextual text.
//! - `{{#reviewsections: sep | COND | text}}` — a parser function: a named
//!   variadic directive with a colon-delimited name and pipe-delimited
//!   arguments.
//!
//! Braces nest up to three per level. Directives with no registered
//! handler are emitted verbatim rather than erroring, so evaluation is
//! total for any input.
//!
//! ## Key Types
//!
//! - [`Lexicon`] — the immutable registry of magic words and parser
//!   functions, built once at startup through [`LexiconBuilder`].
//! - [`Context`] — the per-run record of review scalars and memoized
//!   lookups; create a fresh one for every evaluation.
//! - [`ReviewStore`] — the seam to the data layer supplying cleanup
//!   proposals and boilerplate wikitext; [`MemoryStore`] is the in-memory
//!   implementation.
//! - [`ReviewSet`] — a TOML review-set file binding template, actions,
//!   reasons and pending reviews together.
//!
//! ## Quick Start
//!
//! ```rust
//! use wtx_core::ReviewSet;
//! use wtx_core::default_lexicon;
//! use wtx_core::evaluate;
//! use wtx_core::splice;
//!
//! let review_set = ReviewSet::parse(
//! 	"template = \"{{REVIEWAUTHOR}}: {{REVIEWCOMMENTS}}\"\n\n\
//! 	 [[reviews]]\n\
//! 	 id = 1\n\
//! 	 author = \"Moderator\"\n\
//! 	 comments = \"blurry upload\"\n",
//! )
//! .unwrap();
//!
//! let lexicon = default_lexicon().unwrap();
//! let store = review_set.store();
//! let review = review_set.review(1).unwrap();
//!
//! let mut context = review.context(&store);
//! let rendered = evaluate(&review_set.template, &lexicon, &mut context);
//! assert_eq!(rendered, "Moderator: blurry upload");
//!
//! let article = splice("Some article text.", &rendered);
//! assert!(article.contains(&rendered));
//! ```

pub use config::*;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use lexicon::*;
pub use parser::*;
pub use splice::*;

pub mod config;
mod context;
mod engine;
mod error;
pub(crate) mod lexer;
mod lexicon;
mod magic_words;
mod parser;
mod parser_functions;
mod splice;
pub(crate) mod subst;
pub(crate) mod tokens;

#[cfg(test)]
mod __fixtures;
