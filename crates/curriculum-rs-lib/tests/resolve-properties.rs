use curriculum_rs::resolver::resolve;
use curriculum_rs::{ApprovalStore, CourseId, DisplayState, Registry};
use curriculum_rs_test_utils::*;

/// Approval sets built from the bits of `mask` over the courses in declaration order.
///
/// These ignore prerequisites on purpose, the resolver has to cope with whatever was restored.
fn approval_sets(registry: &Registry) -> impl Iterator<Item = ApprovalStore> + '_ {
	let courses: Vec<CourseId> = registry.courses().map(|c| c.id.clone()).collect();
	/* Every 37th subset keeps this quick while still mixing all the courses */
	(0u32..(1 << courses.len())).step_by(37).map(move |mask| {
		let mut store = ApprovalStore::new();
		for (bit, id) in courses.iter().enumerate() {
			if mask & (1 << bit) != 0 {
				store.add(id.clone());
			}
		}
		store
	})
}

#[test]
fn resolve_is_total_and_deterministic() {
	let registry = engineering();
	for approvals in approval_sets(&registry) {
		let first = resolve(&registry, &approvals);
		let second = resolve(&registry, &approvals.clone());

		assert_eq!(first, second);
		assert_eq!(first.len(), registry.len());
		assert!(registry.courses().all(|c| first.contains_key(&c.id)));
	}
}

#[test]
fn courses_without_prerequisites_are_never_locked() {
	let registry = engineering();
	for approvals in approval_sets(&registry) {
		let states = resolve(&registry, &approvals);
		for course in registry.courses().filter(|c| c.prerequisites.is_empty()) {
			assert_ne!(states[&course.id], DisplayState::Locked, "{} locked with {:?}", course.id, approvals);
		}
	}
}

#[test]
fn approved_courses_stay_approved() {
	let registry = engineering();
	for approvals in approval_sets(&registry) {
		let states = resolve(&registry, &approvals);
		for id in approvals.iter() {
			assert_eq!(states[id], DisplayState::Approved);
		}
	}
}

#[test]
fn unlocked_means_every_prerequisite_approved() {
	let registry = engineering();
	for approvals in approval_sets(&registry) {
		let states = resolve(&registry, &approvals);
		for course in registry.courses() {
			let ready = course.prerequisites.iter().all(|p| approvals.is_approved(p.as_str()));
			match states[&course.id] {
				DisplayState::Approved => assert!(approvals.is_approved(course.id.as_str())),
				DisplayState::Unlocked => assert!(ready),
				DisplayState::Locked => assert!(!ready),
			}
		}
	}
}
