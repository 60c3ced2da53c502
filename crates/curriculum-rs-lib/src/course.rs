//! Course definitions and their derived display state.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

/// Unique identifier of a course within a curriculum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for CourseId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for CourseId {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

impl From<String> for CourseId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl std::borrow::Borrow<str> for CourseId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

/// A single unit of the curriculum.
///
/// Courses are immutable once they are part of a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
	pub id: CourseId,
	/// Human readable title, shown in place of the id when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Semester the course is normally taken in. Only used for grouping output.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub semester: Option<u32>,
	/// Courses that must be approved before this one, in declaration order.
	#[serde(default)]
	pub prerequisites: Vec<CourseId>,
}

impl Course {
	pub fn new(id: impl Into<CourseId>, prerequisites: impl IntoIterator<Item = impl Into<CourseId>>) -> Self {
		Self {
			id: id.into(),
			name: None,
			semester: None,
			prerequisites: prerequisites.into_iter().map(Into::into).collect(),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn with_semester(mut self, semester: u32) -> Self {
		self.semester = Some(semester);
		self
	}

	/// The name if one was given, otherwise the id.
	pub fn display_name(&self) -> &str {
		self.name.as_deref().unwrap_or(self.id.as_str())
	}
}

/// What a learner can currently do with a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayState {
	/// At least one prerequisite isn't approved yet.
	Locked,
	/// Every prerequisite is approved, the course can be approved.
	Unlocked,
	/// The learner has completed the course.
	Approved,
}

impl std::fmt::Display for DisplayState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DisplayState::Locked => f.write_str("locked"),
			DisplayState::Unlocked => f.write_str("unlocked"),
			DisplayState::Approved => f.write_str("approved"),
		}
	}
}

/// Display state of every course in a registry, ordered by id.
pub type CourseStates = BTreeMap<CourseId, DisplayState>;
