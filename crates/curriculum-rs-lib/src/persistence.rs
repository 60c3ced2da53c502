//! Storage for the approved course ids.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::course::CourseId;
use crate::gateway::ApprovalPersistence;

/// Keeps approvals as a JSON array of ids in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
}

impl JsonFileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Uses the approvals file in the data directory of `config`.
	pub fn from_config(config: &crate::Config) -> Self {
		Self::new(config.approvals_path())
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads the file, distinguishing a missing file from one that can't be used.
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file exists but can't be read.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the contents aren't a list of ids.
	pub fn read(&self) -> crate::Result<Option<BTreeSet<CourseId>>> {
		let data = match std::fs::read(&self.path) {
			Ok(data) => data,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		};
		Ok(Some(serde_json::from_slice(&data)?))
	}
}

impl ApprovalPersistence for JsonFileStore {
	fn load(&mut self) -> Option<BTreeSet<CourseId>> {
		match self.read() {
			Ok(ids) => ids,
			Err(e) => {
				log::warn!("Ignoring saved progress at {}: {}", self.path.display(), e);
				None
			},
		}
	}

	fn save(&mut self, approved: &BTreeSet<CourseId>) -> crate::Result<()> {
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		let file = std::fs::File::create(&self.path)?;
		serde_json::to_writer_pretty(file, approved)?;
		log::debug!("Saved {} approved courses to {}", approved.len(), self.path.display());
		Ok(())
	}
}

/// Keeps approvals in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	saved: Option<BTreeSet<CourseId>>,
	saves: usize,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// A store that loads `ids` as if they were saved by a previous session.
	pub fn with_saved(ids: impl IntoIterator<Item = impl Into<CourseId>>) -> Self {
		Self { saved: Some(ids.into_iter().map(Into::into).collect()), saves: 0 }
	}

	pub fn saved(&self) -> Option<&BTreeSet<CourseId>> {
		self.saved.as_ref()
	}

	/// Number of times [`save()`](ApprovalPersistence::save()) has been called.
	pub fn save_count(&self) -> usize {
		self.saves
	}
}

impl ApprovalPersistence for MemoryStore {
	fn load(&mut self) -> Option<BTreeSet<CourseId>> {
		self.saved.clone()
	}

	fn save(&mut self, approved: &BTreeSet<CourseId>) -> crate::Result<()> {
		self.saved = Some(approved.clone());
		self.saves += 1;
		Ok(())
	}
}
