//! Un-approving a course along with every approved course built on top of it.
//!
//! # Usage
//! 1. [`compute_affected()`] to get a [`Retraction`] without touching the store.
//! 1. Show [`Retraction::affected()`] to the learner and ask whether to continue.
//! 1. [`retract()`] to apply it, or drop the [`Retraction`] to abort.

use std::collections::{HashSet, VecDeque};

use crate::approval::ApprovalStore;
use crate::course::CourseId;
use crate::registry::Registry;

/// The courses that lose their approval when `target` does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retraction {
	/// Target first, then dependents in the order they were discovered.
	affected: Vec<CourseId>,
}

impl Retraction {
	pub fn target(&self) -> &CourseId {
		&self.affected[0]
	}

	/// Every course to be un-approved, starting with the target.
	pub fn affected(&self) -> &[CourseId] {
		&self.affected
	}

	/// The affected courses other than the target.
	pub fn dependents(&self) -> &[CourseId] {
		&self.affected[1..]
	}

	pub fn contains(&self, id: &str) -> bool {
		self.affected.iter().any(|a| a.as_str() == id)
	}

	pub fn len(&self) -> usize {
		self.affected.len()
	}

	/// Never true, a retraction always contains its target.
	pub fn is_empty(&self) -> bool {
		self.affected.is_empty()
	}
}

/// Finds `target` and every approved course that transitively depends on it.
///
/// Only approved dependents are followed, a course that isn't approved has nothing to lose.
/// Whether `target` itself is approved isn't checked here.
///
/// # Errors
/// - [`UnknownCourse`](crate::Error::UnknownCourse) when `target` isn't registered.
pub fn compute_affected(target: &str, registry: &Registry, approvals: &ApprovalStore) -> crate::Result<Retraction> {
	let target = registry.course(target).ok_or_else(|| crate::Error::UnknownCourse(target.into()))?.id.clone();

	let mut affected = vec![target.clone()];
	let mut seen = HashSet::<CourseId>::from([target.clone()]);
	let mut frontier = VecDeque::<CourseId>::from([target]);

	while let Some(current) = frontier.pop_front() {
		for dependent in registry.dependents(current.as_str())? {
			if !approvals.is_approved(dependent.as_str()) || seen.contains(dependent) {
				continue;
			}
			seen.insert(dependent.clone());
			affected.push(dependent.clone());
			frontier.push_back(dependent.clone());
		}
	}

	log::debug!("Retracting {} affects {} courses", affected[0], affected.len());

	Ok(Retraction { affected })
}

/// Removes every course in `retraction` from `store`.
pub fn retract(retraction: &Retraction, store: &mut ApprovalStore) {
	for id in retraction.affected() {
		store.remove(id.as_str());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::course::Course;

	fn ids(retraction: &Retraction) -> Vec<&str> {
		retraction.affected().iter().map(CourseId::as_str).collect()
	}

	fn approvals(ids: &[&str]) -> ApprovalStore {
		let mut store = ApprovalStore::new();
		for id in ids {
			store.add(CourseId::from(*id));
		}
		store
	}

	/// `A -> B -> D`, `A -> C -> D`, `E` independent, `F` requires `E` and `B`.
	fn registry() -> Registry {
		Registry::new([
			Course::new("A", Vec::<&str>::new()),
			Course::new("B", ["A"]),
			Course::new("C", ["A"]),
			Course::new("D", ["B", "C"]),
			Course::new("E", Vec::<&str>::new()),
			Course::new("F", ["E", "B"]),
		]).unwrap()
	}

	#[test]
	fn target_comes_first_then_breadth_first() {
		let store = approvals(&["A", "B", "C", "D", "E", "F"]);
		let retraction = compute_affected("A", &registry(), &store).unwrap();
		assert_eq!(ids(&retraction), vec!["A", "B", "C", "D", "F"]);
		assert_eq!(retraction.target().as_str(), "A");
		assert_eq!(retraction.dependents().len(), 4);
	}

	#[test]
	fn unrelated_courses_survive() {
		let mut store = approvals(&["A", "B", "C", "D", "E", "F"]);
		let retraction = compute_affected("C", &registry(), &store).unwrap();
		assert_eq!(ids(&retraction), vec!["C", "D"]);

		retract(&retraction, &mut store);
		let remaining: Vec<_> = store.iter().map(CourseId::as_str).collect();
		assert_eq!(remaining, vec!["A", "B", "E", "F"]);
	}

	#[test]
	fn unapproved_dependents_are_not_followed() {
		let store = approvals(&["A", "C"]);
		let retraction = compute_affected("A", &registry(), &store).unwrap();
		assert_eq!(ids(&retraction), vec!["A", "C"]);
		assert!(!retraction.contains("B"));
	}

	#[test]
	fn leaf_only_affects_itself() {
		let store = approvals(&["A", "B", "C", "D"]);
		let retraction = compute_affected("D", &registry(), &store).unwrap();
		assert_eq!(ids(&retraction), vec!["D"]);
		assert!(retraction.dependents().is_empty());
	}

	#[test]
	fn computing_does_not_mutate() {
		let store = approvals(&["A", "B"]);
		let before = store.clone();
		compute_affected("A", &registry(), &store).unwrap();
		assert_eq!(store, before);
	}

	#[test]
	fn unknown_target() {
		assert!(matches!(
			compute_affected("Z", &registry(), &ApprovalStore::new()),
			Err(crate::Error::UnknownCourse(_))
		));
	}
}
