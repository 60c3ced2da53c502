//! Projects the approval set onto every course of a registry.
//!
//! A course is unlocked by its direct prerequisites being approved, nothing propagates
//! further than that so a single pass over the courses is enough.

use crate::approval::ApprovalStore;
use crate::course::{Course, CourseStates, DisplayState};
use crate::registry::Registry;

/// Computes the display state of every course in `registry`.
pub fn resolve(registry: &Registry, approvals: &ApprovalStore) -> CourseStates {
	let states: CourseStates = registry.courses()
		.map(|course| (course.id.clone(), course_state(course, approvals)))
		.collect();
	log::debug!("Resolved states for {} courses", states.len());
	states
}

/// Display state of a single course.
///
/// # Errors
/// - [`UnknownCourse`](crate::Error::UnknownCourse) when `id` isn't registered.
pub fn state_of(registry: &Registry, approvals: &ApprovalStore, id: &str) -> crate::Result<DisplayState> {
	let course = registry.course(id).ok_or_else(|| crate::Error::UnknownCourse(id.into()))?;
	Ok(course_state(course, approvals))
}

fn course_state(course: &Course, approvals: &ApprovalStore) -> DisplayState {
	if approvals.is_approved(course.id.as_str()) {
		DisplayState::Approved
	} else if course.prerequisites.iter().all(|p| approvals.is_approved(p.as_str())) {
		/* Also covers courses without prerequisites */
		DisplayState::Unlocked
	} else {
		DisplayState::Locked
	}
}

/// Number of courses in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	pub approved: usize,
	pub unlocked: usize,
	pub locked: usize,
}

impl Summary {
	pub fn of(states: &CourseStates) -> Self {
		let mut summary = Self::default();
		for state in states.values() {
			match state {
				DisplayState::Approved => summary.approved += 1,
				DisplayState::Unlocked => summary.unlocked += 1,
				DisplayState::Locked => summary.locked += 1,
			}
		}
		summary
	}

	pub fn total(&self) -> usize {
		self.approved + self.unlocked + self.locked
	}
}

impl std::fmt::Display for Summary {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{} approved, {} unlocked, {} locked", self.approved, self.total(), self.unlocked, self.locked)
	}
}
