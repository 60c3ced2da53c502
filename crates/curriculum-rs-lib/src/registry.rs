//! The immutable set of courses and the prerequisite graph between them.
//!
//! Edges point from a course to each of its prerequisites, the same direction a `Depends`
//! requirement points in a dependency graph. Dependents of a course are read back through
//! the incoming edges, which petgraph keeps as a per-node adjacency list so no scan over
//! every course is needed.

use std::collections::{BTreeSet, HashMap};

use petgraph::prelude::*;

use crate::course::{Course, CourseId};
use crate::Error;

#[derive(Debug, Clone)]
pub struct Registry {
	graph: DiGraph<Course, ()>,
	index: HashMap<CourseId, NodeIndex>,
}

impl Registry {
	/// Builds a registry from course definitions.
	///
	/// # Errors
	/// - [`DuplicateCourse`](Error::DuplicateCourse) when two courses share an id.
	/// - [`UnknownCourse`](Error::UnknownCourse) when a prerequisite isn't one of the given courses.
	/// - [`CyclicDependency`](Error::CyclicDependency) when a course requires itself, directly or transitively.
	pub fn new(courses: impl IntoIterator<Item = Course>) -> crate::Result<Self> {
		let mut graph = DiGraph::<Course, ()>::new();
		let mut index = HashMap::<CourseId, NodeIndex>::new();

		for course in courses {
			if index.contains_key(&course.id) {
				return Err(Error::DuplicateCourse(course.id));
			}
			let id = course.id.clone();
			let node = graph.add_node(course);
			index.insert(id, node);
		}

		for node in graph.node_indices() {
			let mut targets = Vec::<NodeIndex>::with_capacity(graph[node].prerequisites.len());
			for prerequisite in &graph[node].prerequisites {
				let target = index.get(prerequisite).ok_or_else(|| Error::UnknownCourse(prerequisite.clone()))?;
				targets.push(*target);
			}
			for target in targets {
				/* `update_edge` so a prerequisite listed twice is still a single edge */
				graph.update_edge(node, target, ());
			}
		}

		if let Some(cycle) = find_cycle(&graph) {
			let path: Vec<_> = cycle.into_iter().map(|n| graph[n].id.clone()).collect();
			return Err(Error::CyclicDependency(path));
		}

		log::debug!("Built course registry with {} courses and {} prerequisite edges", graph.node_count(), graph.edge_count());

		Ok(Self { graph, index })
	}

	/// Prerequisites of `id` in the order they were declared.
	///
	/// # Errors
	/// - [`UnknownCourse`](Error::UnknownCourse) when `id` isn't registered.
	pub fn prerequisites(&self, id: &str) -> crate::Result<&[CourseId]> {
		Ok(&self.graph[self.node(id)?].prerequisites)
	}

	/// Courses listing `id` as a direct prerequisite, in declaration order.
	///
	/// # Errors
	/// - [`UnknownCourse`](Error::UnknownCourse) when `id` isn't registered.
	pub fn dependents(&self, id: &str) -> crate::Result<Vec<&CourseId>> {
		let node = self.node(id)?;
		let mut nodes: Vec<_> = self.graph.neighbors_directed(node, Incoming).collect();
		/* petgraph yields the most recently added edge first */
		nodes.sort_unstable();
		Ok(nodes.into_iter().map(|n| &self.graph[n].id).collect())
	}

	pub fn course(&self, id: &str) -> Option<&Course> {
		self.index.get(id).map(|n| &self.graph[*n])
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// Name of the course for messages, the id itself when the course has no name or isn't registered.
	pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
		self.course(id).map_or(id, Course::display_name)
	}

	pub fn all_course_ids(&self) -> BTreeSet<CourseId> {
		self.index.keys().cloned().collect()
	}

	/// Every course in declaration order.
	pub fn courses(&self) -> impl Iterator<Item = &Course> {
		self.graph.node_indices().map(|n| &self.graph[n])
	}

	pub fn len(&self) -> usize {
		self.graph.node_count()
	}

	pub fn is_empty(&self) -> bool {
		self.graph.node_count() == 0
	}

	fn node(&self, id: &str) -> crate::Result<NodeIndex> {
		self.index.get(id).copied().ok_or_else(|| Error::UnknownCourse(CourseId::from(id)))
	}
}

/// Depth first search over the prerequisite edges marking nodes in progress and done.
///
/// Returns the nodes of the first cycle found, beginning and ending on the same node.
fn find_cycle(graph: &DiGraph<Course, ()>) -> Option<Vec<NodeIndex>> {
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	enum Mark {
		Unvisited,
		InProgress,
		Done,
	}

	let mut marks = vec![Mark::Unvisited; graph.node_count()];

	for root in graph.node_indices() {
		if marks[root.index()] != Mark::Unvisited {
			continue;
		}

		/* Each frame is a node on the current path and the prerequisites still to visit from it */
		let mut stack: Vec<(NodeIndex, Vec<NodeIndex>)> = vec![(root, graph.neighbors(root).collect())];
		marks[root.index()] = Mark::InProgress;

		while let Some((node, pending)) = stack.last_mut() {
			let node = *node;
			match pending.pop() {
				Some(next) => match marks[next.index()] {
					Mark::Unvisited => {
						marks[next.index()] = Mark::InProgress;
						stack.push((next, graph.neighbors(next).collect()));
					},
					Mark::InProgress => {
						/* `next` is on the current path so everything from it onwards forms the cycle */
						let start = stack.iter().position(|(n, _)| *n == next).unwrap_or_default();
						let mut cycle: Vec<_> = stack[start..].iter().map(|(n, _)| *n).collect();
						cycle.push(next);
						return Some(cycle);
					},
					Mark::Done => {},
				},
				None => {
					marks[node.index()] = Mark::Done;
					stack.pop();
				},
			}
		}
	}

	None
}
