//! Retraction completeness and minimality checked against a plain reachability search
//! over every course of the engineering curriculum.

use std::collections::BTreeSet;

use curriculum_rs::cascade::{compute_affected, retract};
use curriculum_rs::{ApprovalStore, CourseId, Registry};
use curriculum_rs_test_utils::*;

/// Whether `course` requires `prerequisite`, directly or through other courses.
fn depends_on(registry: &Registry, course: &str, prerequisite: &str) -> bool {
	let mut stack = vec![course.to_owned()];
	let mut seen = BTreeSet::new();
	while let Some(current) = stack.pop() {
		for p in registry.prerequisites(&current).unwrap() {
			if p.as_str() == prerequisite {
				return true;
			}
			if seen.insert(p.clone()) {
				stack.push(p.to_string());
			}
		}
	}
	false
}

fn everything_approved(registry: &Registry) -> ApprovalStore {
	ApprovalStore::restore(registry, registry.all_course_ids())
}

#[test]
fn retraction_removes_exactly_the_transitive_dependents() {
	let registry = engineering();

	for target in registry.all_course_ids() {
		let mut store = everything_approved(&registry);
		let retraction = compute_affected(target.as_str(), &registry, &store).unwrap();
		retract(&retraction, &mut store);

		for id in registry.all_course_ids() {
			let should_survive = id != target && !depends_on(&registry, id.as_str(), target.as_str());
			assert_eq!(
				store.is_approved(id.as_str()), should_survive,
				"retracting {} left {} in the wrong state", target, id
			);
		}
	}
}

#[test]
fn no_approved_course_is_left_without_its_prerequisites() {
	let registry = engineering();

	for target in registry.all_course_ids() {
		let mut store = everything_approved(&registry);
		retract(&compute_affected(target.as_str(), &registry, &store).unwrap(), &mut store);

		for id in store.iter() {
			for p in registry.prerequisites(id.as_str()).unwrap() {
				assert!(store.is_approved(p.as_str()), "{} kept its approval without {} after retracting {}", id, p, target);
			}
		}
	}
}

#[test]
fn affected_list_starts_with_target_and_has_no_repeats() {
	let registry = engineering();
	let store = everything_approved(&registry);

	let retraction = compute_affected("MAT101", &registry, &store).unwrap();
	assert_eq!(retraction.target().as_str(), "MAT101");

	let unique: BTreeSet<&CourseId> = retraction.affected().iter().collect();
	assert_eq!(unique.len(), retraction.len());
	/* Statics only needs Physics I and Linear Algebra */
	let survivors: BTreeSet<_> = registry.all_course_ids().into_iter().filter(|id| !retraction.contains(id.as_str())).collect();
	assert_eq!(survivors, ids(["EST201", "FIS101", "ING101", "MAT102"]));
}

#[test]
fn dependents_are_reported_breadth_first() {
	let registry = engineering();
	let store = everything_approved(&registry);

	let retraction = compute_affected("RES301", &registry, &store).unwrap();
	let affected: Vec<_> = retraction.affected().iter().map(CourseId::as_str).collect();
	assert_eq!(affected, vec!["RES301", "EST401", "GEO401", "PRO501"]);
}
