use std::cell::Cell;

use crate::context::ActionWikitext;
use crate::context::Context;
use crate::context::MemoryStore;
use crate::context::ReviewStore;
use crate::context::RevisionReview;

pub(crate) const UNANIMOUS_REVIEW: i64 = 1;
pub(crate) const MIXED_REVIEW: i64 = 2;
pub(crate) const SINGLE_REVISION_REVIEW: i64 = 3;

pub(crate) fn revision(timestamp: &str, action: &str, reason: &str) -> RevisionReview {
	RevisionReview {
		timestamp: timestamp.into(),
		action: action.into(),
		reason: reason.into(),
	}
}

/// A store with two actions, two reasons and three proposals: one unanimous
/// over two revisions, one mixed, one with a single revision.
pub(crate) fn sample_store() -> MemoryStore {
	let mut store = MemoryStore::default();

	store.insert_action("delete", "Remove the revision entirely", ActionWikitext {
		individual: "Delete the revision uploaded at %%REVISIONTIMESTAMP%%.".into(),
		distinct: "Some revisions are proposed for deletion.".into(),
		unanimous: "Every revision should be deleted (%%REASONNAMES%%).".into(),
	});
	store.insert_action("keep", "Keep the revision as uploaded", ActionWikitext {
		individual: "Keep the revision uploaded at %%REVISIONTIMESTAMP%%.".into(),
		distinct: "Some revisions should be kept.".into(),
		unanimous: "Every revision should be kept.".into(),
	});

	store.insert_reason(
		"copyright",
		"Possible copyright violation",
		"This file may violate copyright.",
	);
	store.insert_reason(
		"quality",
		"Low image quality",
		"The image quality is too low.",
	);

	store.insert_proposal(UNANIMOUS_REVIEW, vec![
		revision("2024-04-01T08:00:00Z", "delete", "copyright"),
		revision("2024-04-02T09:30:00Z", "delete", "quality"),
	]);
	store.insert_proposal(MIXED_REVIEW, vec![
		revision("2024-04-01T08:00:00Z", "delete", "copyright"),
		revision("2024-04-02T09:30:00Z", "keep", "quality"),
	]);
	store.insert_proposal(SINGLE_REVISION_REVIEW, vec![revision(
		"2024-04-03T10:00:00Z",
		"keep",
		"quality",
	)]);

	store
}

/// A fresh evaluation context over `store` for the given review.
pub(crate) fn sample_context(store: &dyn ReviewStore, review_id: i64) -> Context<'_> {
	Context::new(
		store,
		review_id,
		"2024-05-01T12:00:00Z",
		"blurry upload",
		"Moderator",
	)
}

/// A [`ReviewStore`] wrapper that counts lookups, for memoization
/// assertions.
pub(crate) struct CountingStore {
	inner: MemoryStore,
	pub(crate) proposal_lookups: Cell<usize>,
	pub(crate) action_lookups: Cell<usize>,
	pub(crate) reason_lookups: Cell<usize>,
}

impl CountingStore {
	pub(crate) fn new(inner: MemoryStore) -> Self {
		Self {
			inner,
			proposal_lookups: Cell::new(0),
			action_lookups: Cell::new(0),
			reason_lookups: Cell::new(0),
		}
	}
}

impl ReviewStore for CountingStore {
	fn cleanup_proposal(&self, review_id: i64) -> Vec<RevisionReview> {
		self.proposal_lookups.set(self.proposal_lookups.get() + 1);
		self.inner.cleanup_proposal(review_id)
	}

	fn action_wikitext(&self, name: &str) -> ActionWikitext {
		self.action_lookups.set(self.action_lookups.get() + 1);
		self.inner.action_wikitext(name)
	}

	fn reason_wikitext(&self, name: &str) -> String {
		self.reason_lookups.set(self.reason_lookups.get() + 1);
		self.inner.reason_wikitext(name)
	}

	fn action_description(&self, name: &str) -> String {
		self.inner.action_description(name)
	}

	fn reason_description(&self, name: &str) -> String {
		self.inner.reason_description(name)
	}
}
