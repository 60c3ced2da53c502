use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

const APP_DIR_NAME: &str = "curriculum-rs";
const CONFIG_FILE_NAME: &str = "config.json";
const APPROVALS_FILE_NAME: &str = "approved.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	data_dir: PathBuf,
	curriculum_path: Option<PathBuf>,
	validate_curriculum: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			data_dir: {
				#[cfg(target_os = "windows")]
				let path = std::env::var_os("APPDATA").map(PathBuf::from).unwrap_or_default();

				#[cfg(not(target_os = "windows"))]
				let path = if let Some(e) = std::env::var_os("XDG_DATA_HOME") {
					PathBuf::from(e)
				} else {
					home_dir().join(".local/share")
				};

				path.join(APP_DIR_NAME)
			},
			curriculum_path: None,
			validate_curriculum: true,
		}
	}
}

impl Config {
	/// Where `config.json` is read from by [`load_from_disk()`](Config::load_from_disk()).
	pub fn config_dir() -> PathBuf {
		#[cfg(target_os = "windows")]
		let path = std::env::var_os("APPDATA").map(PathBuf::from).unwrap_or_default();

		#[cfg(not(target_os = "windows"))]
		let path = if let Some(e) = std::env::var_os("XDG_CONFIG_HOME") {
			PathBuf::from(e)
		} else {
			home_dir().join(".config")
		};

		path.join(APP_DIR_NAME)
	}

	/// Loads `config.json` from the [`config_dir()`](Config::config_dir()).
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file is missing or unreadable.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file isn't a valid config.
	pub fn load_from_disk() -> crate::Result<Self> {
		Self::load_from_file(Self::config_dir().join(CONFIG_FILE_NAME))
	}

	/// # Errors
	/// - [`IO`](crate::Error::IO) when the file is missing or unreadable.
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when the file isn't a valid config.
	pub fn load_from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let file = std::fs::File::open(path.as_ref())?;
		let config = serde_json::from_reader(std::io::BufReader::new(file))?;
		log::debug!("Loaded config from {}", path.as_ref().display());
		Ok(config)
	}

	/// Writes the config to the [`config_dir()`](Config::config_dir()).
	pub fn save_to_disk(&self) -> crate::Result<()> {
		self.save_to_file(Self::config_dir().join(CONFIG_FILE_NAME))
	}

	pub fn save_to_file(&self, path: impl AsRef<Path>) -> crate::Result<()> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		serde_json::to_writer_pretty(std::fs::File::create(path)?, self)?;
		Ok(())
	}

	pub fn data_dir(&self) -> &Path {
		&self.data_dir
	}
	/// returns if the directory is valid or not.
	pub fn set_data_dir(&mut self, data_dir: PathBuf) -> bool {
		if data_dir.is_dir() {
			self.data_dir = data_dir;
			true
		} else {
			false
		}
	}

	/// File the learner's approved courses are saved to.
	pub fn approvals_path(&self) -> PathBuf {
		self.data_dir.join(APPROVALS_FILE_NAME)
	}

	pub fn curriculum_path(&self) -> Option<&Path> {
		self.curriculum_path.as_deref()
	}
	/// returns if the file exists or not.
	pub fn set_curriculum_path(&mut self, curriculum_path: PathBuf) -> bool {
		if curriculum_path.is_file() {
			self.curriculum_path = Some(curriculum_path);
			true
		} else {
			false
		}
	}

	pub fn validate_curriculum(&self) -> bool {
		self.validate_curriculum
	}
	pub fn set_validate_curriculum(&mut self, validate_curriculum: bool) {
		self.validate_curriculum = validate_curriculum;
	}
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
	std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn setters_reject_missing_paths() {
		let dir = tempfile::tempdir().unwrap();
		let mut config = Config::default();

		assert!(!config.set_data_dir(dir.path().join("missing")));
		assert!(config.set_data_dir(dir.path().to_path_buf()));
		assert_eq!(config.approvals_path(), dir.path().join("approved.json"));

		assert!(!config.set_curriculum_path(dir.path().join("curriculum.json")));
		assert_eq!(config.curriculum_path(), None);
	}

	#[test]
	fn file_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let mut config = Config::default();
		config.set_data_dir(dir.path().to_path_buf());
		config.set_validate_curriculum(false);

		let path = dir.path().join("config.json");
		config.save_to_file(&path).unwrap();
		let loaded = Config::load_from_file(&path).unwrap();

		assert_eq!(loaded.data_dir(), dir.path());
		assert!(!loaded.validate_curriculum());
	}

	#[test]
	fn missing_fields_use_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.json");
		std::fs::write(&path, r#"{ "validate_curriculum": false }"#).unwrap();

		let loaded = Config::load_from_file(&path).unwrap();
		assert!(!loaded.validate_curriculum());
		assert_eq!(loaded.data_dir(), Config::default().data_dir());
	}
}
