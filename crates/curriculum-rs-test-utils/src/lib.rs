//! Various helper functions for testing
//!
//! Fixtures panic on failure since they are only built from known good data,
//! anything touching the filesystem returns a result instead.

use std::collections::{BTreeSet, VecDeque};

use curriculum_rs::gateway::{ApprovalPersistence, Confirmation, Renderer};
use curriculum_rs::{Config, Course, CourseId, CourseStates, CurriculumFile, Registry};

/// Civil engineering curriculum with 13 courses over 5 semesters.
pub const ENGINEERING_JSON: &str = include_str!("../test-data/engineering.json");

/// Sends log output to the test harness. Safe to call from every test.
pub fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// `A` has no prerequisites, `B` and `C` require `A`, `D` requires `B` and `C`.
pub fn diamond() -> Registry {
	Registry::new([
		Course::new("A", Vec::<&str>::new()),
		Course::new("B", ["A"]),
		Course::new("C", ["A"]),
		Course::new("D", ["B", "C"]),
	]).expect("diamond registry should be valid")
}

pub fn engineering() -> Registry {
	CurriculumFile::from_json_str(ENGINEERING_JSON, true)
		.and_then(CurriculumFile::into_registry)
		.expect("engineering curriculum should be valid")
}

/// A config using a fresh temporary data directory.
///
/// The directory is removed when the returned [`tempfile::TempDir`] is dropped.
pub fn temp_config() -> std::io::Result<(tempfile::TempDir, Config)> {
	let dir = tempfile::tempdir()?;
	let mut config = Config::default();
	config.set_data_dir(dir.path().to_path_buf());
	Ok((dir, config))
}

/// Writes a curriculum document into `dir` and points `config` at it.
pub fn write_curriculum(dir: &std::path::Path, config: &mut Config, json: &str) -> std::io::Result<std::path::PathBuf> {
	let path = dir.join("curriculum.json");
	std::fs::write(&path, json)?;
	config.set_curriculum_path(path.clone());
	Ok(path)
}

/// Keeps every state map it is given.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
	pub renders: Vec<CourseStates>,
}

impl RecordingRenderer {
	pub fn last(&self) -> Option<&CourseStates> {
		self.renders.last()
	}
}

impl Renderer for RecordingRenderer {
	fn render(&mut self, _registry: &Registry, states: &CourseStates) {
		self.renders.push(states.clone());
	}
}

/// Answers confirmations from a script, declining once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedConfirmation {
	answers: VecDeque<bool>,
	/// Every message asked so far.
	pub asked: Vec<String>,
}

impl ScriptedConfirmation {
	pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
		Self { answers: answers.into_iter().collect(), asked: Vec::new() }
	}
}

impl Confirmation for ScriptedConfirmation {
	fn confirm(&mut self, message: &str) -> bool {
		self.asked.push(message.to_owned());
		self.answers.pop_front().unwrap_or(false)
	}
}

/// Persistence whose saves always fail.
#[derive(Debug, Default)]
pub struct FailingStore {
	pub attempts: usize,
}

impl ApprovalPersistence for FailingStore {
	fn load(&mut self) -> Option<BTreeSet<CourseId>> {
		None
	}

	fn save(&mut self, _approved: &BTreeSet<CourseId>) -> curriculum_rs::Result<()> {
		self.attempts += 1;
		Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only storage").into())
	}
}

/// Shorthand for building id sets in assertions.
pub fn ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> BTreeSet<CourseId> {
	ids.into_iter().map(CourseId::from).collect()
}
