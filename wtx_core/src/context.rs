use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

/// One revision's reviewed outcome inside a cleanup proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionReview {
	/// ISO 8601 timestamp of the reviewed revision.
	pub timestamp: String,
	/// Name of the cleanup action chosen for this revision.
	pub action: String,
	/// Name of the cleanup reason chosen for this revision.
	pub reason: String,
}

/// The boilerplate wikitext of one cleanup action, one variant per
/// rendering mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionWikitext {
	/// Used when rendering the action once per revision.
	pub individual: String,
	/// Used when rendering each distinct action once.
	pub distinct: String,
	/// Used when every revision shares the action.
	pub unanimous: String,
}

/// Read-only access to the review data layer.
///
/// The engine only ever reads through this seam; where the data actually
/// lives is the caller's concern. Unknown names resolve to empty values so
/// evaluation stays total.
pub trait ReviewStore {
	/// Every revision review belonging to one image review, in revision
	/// order.
	fn cleanup_proposal(&self, review_id: i64) -> Vec<RevisionReview>;
	/// The boilerplate wikitext variants of a cleanup action.
	fn action_wikitext(&self, name: &str) -> ActionWikitext;
	/// The boilerplate wikitext of a cleanup reason.
	fn reason_wikitext(&self, name: &str) -> String;
	fn action_description(&self, name: &str) -> String;
	fn reason_description(&self, name: &str) -> String;
}

/// The per-evaluation-run record handlers read from.
///
/// Carries the scalar fields of one review plus lazily-filled caches over
/// the store. A context must be created fresh for every run so cached data
/// never leaks between reviews.
pub struct Context<'a> {
	pub review_id: i64,
	pub timestamp: String,
	pub comments: String,
	pub author: String,
	store: &'a dyn ReviewStore,
	proposal: Option<Vec<RevisionReview>>,
	action_cache: HashMap<String, ActionWikitext>,
	reason_cache: HashMap<String, String>,
}

impl<'a> Context<'a> {
	pub fn new(
		store: &'a dyn ReviewStore,
		review_id: i64,
		timestamp: impl Into<String>,
		comments: impl Into<String>,
		author: impl Into<String>,
	) -> Self {
		Self {
			review_id,
			timestamp: timestamp.into(),
			comments: comments.into(),
			author: author.into(),
			store,
			proposal: None,
			action_cache: HashMap::new(),
			reason_cache: HashMap::new(),
		}
	}

	/// The cleanup proposal of this review, fetched once and cached.
	pub fn cleanup_proposal(&mut self) -> &[RevisionReview] {
		let store = self.store;
		let review_id = self.review_id;

		self
			.proposal
			.get_or_insert_with(|| {
				debug!("fetching cleanup proposal for review {review_id}");
				store.cleanup_proposal(review_id)
			})
			.as_slice()
	}

	/// The boilerplate wikitext of a cleanup action, fetched once per name
	/// and cached.
	pub fn action_wikitext(&mut self, name: &str) -> &ActionWikitext {
		let store = self.store;

		self
			.action_cache
			.entry(name.to_string())
			.or_insert_with(|| {
				debug!("fetching action wikitext for `{name}`");
				store.action_wikitext(name)
			})
	}

	/// The boilerplate wikitext of a cleanup reason, fetched once per name
	/// and cached.
	pub fn reason_wikitext(&mut self, name: &str) -> &str {
		let store = self.store;

		self
			.reason_cache
			.entry(name.to_string())
			.or_insert_with(|| {
				debug!("fetching reason wikitext for `{name}`");
				store.reason_wikitext(name)
			})
	}

	pub fn action_description(&self, name: &str) -> String {
		self.store.action_description(name)
	}

	pub fn reason_description(&self, name: &str) -> String {
		self.store.reason_description(name)
	}
}

/// An in-memory [`ReviewStore`] backed by plain maps, used by the CLI
/// (loaded from a review-set file) and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	proposals: HashMap<i64, Vec<RevisionReview>>,
	actions: HashMap<String, ActionRecord>,
	reasons: HashMap<String, ReasonRecord>,
}

#[derive(Debug, Clone, Default)]
struct ActionRecord {
	description: String,
	wikitext: ActionWikitext,
}

#[derive(Debug, Clone, Default)]
struct ReasonRecord {
	description: String,
	text: String,
}

impl MemoryStore {
	pub fn insert_proposal(&mut self, review_id: i64, revisions: Vec<RevisionReview>) {
		self.proposals.insert(review_id, revisions);
	}

	pub fn insert_action(
		&mut self,
		name: impl Into<String>,
		description: impl Into<String>,
		wikitext: ActionWikitext,
	) {
		self.actions.insert(name.into(), ActionRecord {
			description: description.into(),
			wikitext,
		});
	}

	pub fn insert_reason(
		&mut self,
		name: impl Into<String>,
		description: impl Into<String>,
		text: impl Into<String>,
	) {
		self.reasons.insert(name.into(), ReasonRecord {
			description: description.into(),
			text: text.into(),
		});
	}
}

impl ReviewStore for MemoryStore {
	fn cleanup_proposal(&self, review_id: i64) -> Vec<RevisionReview> {
		self.proposals.get(&review_id).cloned().unwrap_or_default()
	}

	fn action_wikitext(&self, name: &str) -> ActionWikitext {
		self
			.actions
			.get(name)
			.map(|record| record.wikitext.clone())
			.unwrap_or_default()
	}

	fn reason_wikitext(&self, name: &str) -> String {
		self
			.reasons
			.get(name)
			.map(|record| record.text.clone())
			.unwrap_or_default()
	}

	fn action_description(&self, name: &str) -> String {
		self
			.actions
			.get(name)
			.map(|record| record.description.clone())
			.unwrap_or_default()
	}

	fn reason_description(&self, name: &str) -> String {
		self
			.reasons
			.get(name)
			.map(|record| record.description.clone())
			.unwrap_or_default()
	}
}
