//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

use crate::course::CourseId;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("validation error: {0}")]
	Validation(String),
	/// A lookup or a prerequisite refers to a course the registry doesn't know.
	#[error("unknown course `{0}`")]
	UnknownCourse(CourseId),
	#[error("course `{0}` is defined more than once")]
	DuplicateCourse(CourseId),
	/// The prerequisite graph contains a cycle. The path starts and ends on the same course.
	#[error("cyclic dependency: {}", format_cycle(.0))]
	CyclicDependency(Vec<CourseId>),
	#[error("request rejected: {0}")]
	Request(#[from] crate::gateway::RequestError),
}

fn format_cycle(path: &[CourseId]) -> String {
	path.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(" -> ")
}
