use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::context::ActionWikitext;
use crate::context::Context;
use crate::context::MemoryStore;
use crate::context::ReviewStore;
use crate::context::RevisionReview;
use crate::error::WtxError;
use crate::error::WtxResult;

/// A review set loaded from a TOML file: the moderator-authored template
/// plus everything the data layer would otherwise supply, so a batch of
/// reviews can be rendered end to end from one document.
///
/// ```toml
/// template = "{{REVIEWAUTHOR}} proposes: {{#distinctactions: %%ACTIONNAME%%}}"
///
/// [[actions]]
/// name = "delete"
/// description = "Remove the revision entirely"
/// unanimous = "All revisions of this file are proposed for deletion."
///
/// [[reviews]]
/// id = 1
/// timestamp = "2024-05-01T12:00:00Z"
/// author = "Moderator"
/// article = "File_Example.wiki"
///
/// [[reviews.revisions]]
/// timestamp = "2024-04-30T09:00:00Z"
/// action = "delete"
/// reason = "copyright"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSet {
	/// The moderator-authored review template.
	#[serde(default)]
	pub template: String,
	#[serde(default)]
	pub actions: Vec<ActionEntry>,
	#[serde(default)]
	pub reasons: Vec<ReasonEntry>,
	#[serde(default)]
	pub reviews: Vec<ReviewEntry>,
}

/// One cleanup action: its description plus the boilerplate wikitext of
/// each rendering mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub individual: String,
	#[serde(default)]
	pub distinct: String,
	#[serde(default)]
	pub unanimous: String,
}

/// One cleanup reason: its description plus its boilerplate wikitext.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasonEntry {
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub text: String,
}

/// One pending review together with the article file its rendered wikitext
/// is spliced into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
	pub id: i64,
	#[serde(default)]
	pub timestamp: String,
	#[serde(default)]
	pub comments: String,
	#[serde(default)]
	pub author: String,
	/// Path of the article file, resolved relative to the review-set file.
	#[serde(default)]
	pub article: PathBuf,
	#[serde(default)]
	pub revisions: Vec<RevisionReview>,
}

impl ReviewSet {
	/// Parse a review set from TOML text.
	pub fn parse(content: &str) -> WtxResult<Self> {
		toml::from_str(content).map_err(|error| WtxError::ConfigParse(error.to_string()))
	}

	/// Load a review set from a TOML file.
	pub fn load(path: impl AsRef<Path>) -> WtxResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::parse(&content)
	}

	/// An in-memory store view over the action, reason and review tables.
	pub fn store(&self) -> MemoryStore {
		let mut store = MemoryStore::default();

		for action in &self.actions {
			store.insert_action(&action.name, &action.description, ActionWikitext {
				individual: action.individual.clone(),
				distinct: action.distinct.clone(),
				unanimous: action.unanimous.clone(),
			});
		}

		for reason in &self.reasons {
			store.insert_reason(&reason.name, &reason.description, &reason.text);
		}

		for review in &self.reviews {
			store.insert_proposal(review.id, review.revisions.clone());
		}

		store
	}

	/// The review with the given id.
	pub fn review(&self, id: i64) -> WtxResult<&ReviewEntry> {
		self
			.reviews
			.iter()
			.find(|review| review.id == id)
			.ok_or(WtxError::UnknownReview(id))
	}
}

impl ReviewEntry {
	/// A fresh evaluation context for this review. Every evaluation run
	/// must use its own context so memoized lookups never leak between
	/// reviews.
	pub fn context<'a>(&self, store: &'a dyn ReviewStore) -> Context<'a> {
		Context::new(
			store,
			self.id,
			self.timestamp.as_str(),
			self.comments.as_str(),
			self.author.as_str(),
		)
	}
}
