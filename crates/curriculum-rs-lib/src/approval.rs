//! The set of courses the learner has completed.

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};

use crate::course::CourseId;
use crate::registry::Registry;

/// Approved course ids.
///
/// [`add()`](ApprovalStore::add) and [`remove()`](ApprovalStore::remove) do no validation,
/// prerequisite checks belong to the [`Gateway`](crate::Gateway).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalStore {
	approved: BTreeSet<CourseId>,
}

impl ApprovalStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuilds a store from previously persisted ids.
	///
	/// Ids that are no longer part of `registry` are dropped.
	pub fn restore(registry: &Registry, ids: impl IntoIterator<Item = CourseId>) -> Self {
		let mut store = Self::new();
		for id in ids {
			if registry.contains(id.as_str()) {
				store.approved.insert(id);
			} else {
				log::warn!("Dropping persisted approval for unknown course {}", id);
			}
		}
		log::debug!("Restored {} approved courses", store.len());
		store
	}

	pub fn is_approved(&self, id: &str) -> bool {
		self.approved.contains(id)
	}

	/// A snapshot of the approved ids, later changes to the store aren't reflected in it.
	pub fn approved_ids(&self) -> BTreeSet<CourseId> {
		self.approved.clone()
	}

	pub fn iter(&self) -> impl Iterator<Item = &CourseId> {
		self.approved.iter()
	}

	pub fn add(&mut self, id: CourseId) {
		log::trace!("Approving course {}", id);
		self.approved.insert(id);
	}

	pub fn remove(&mut self, id: &str) {
		log::trace!("Removing approval for course {}", id);
		self.approved.remove(id);
	}

	pub fn clear(&mut self) {
		log::trace!("Clearing all approvals");
		self.approved.clear();
	}

	pub fn len(&self) -> usize {
		self.approved.len()
	}

	pub fn is_empty(&self) -> bool {
		self.approved.is_empty()
	}
}
