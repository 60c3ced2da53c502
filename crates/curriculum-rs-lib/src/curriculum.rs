//! Curriculum definition files.
//!
//! A curriculum is a JSON document listing every course with its prerequisites:
//! ```json
//! {
//! 	"name": "Computer Engineering",
//! 	"courses": [
//! 		{ "id": "MAT101", "name": "Calculus I", "semester": 1 },
//! 		{ "id": "MAT201", "name": "Calculus II", "semester": 2, "prerequisites": ["MAT101"] }
//! 	]
//! }
//! ```

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::course::Course;
use crate::registry::Registry;
use crate::Error::Validation;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumFile {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub courses: Vec<Course>,
}

impl CurriculumFile {
	/// Parses a curriculum document.
	///
	/// # Parameters
	/// - `do_validation` - Check the document against the bundled schema first. Gives a full
	/// list of problems instead of stopping at the first one serde finds.
	/// # Errors
	/// - [`SerdeJSON`](crate::Error::SerdeJSON) when `json` isn't valid JSON or a curriculum.
	/// - [`Validation`](crate::Error::Validation) when the document doesn't match the schema.
	pub fn from_json_str(json: &str, do_validation: bool) -> crate::Result<Self> {
		let value: serde_json::Value = serde_json::from_str(json)?;

		if do_validation {
			validate(&value)?;
		}

		Ok(serde_json::from_value(value)?)
	}

	/// Reads a curriculum from a file, see [`from_json_str()`](CurriculumFile::from_json_str()).
	///
	/// # Errors
	/// - [`IO`](crate::Error::IO) when opening or reading from the file.
	/// - Any error from [`from_json_str()`](CurriculumFile::from_json_str()).
	pub fn load_from_file(path: impl AsRef<Path>, do_validation: bool) -> crate::Result<Self> {
		let path = path.as_ref();
		log::debug!("Reading curriculum from {}", path.display());
		let json = std::fs::read_to_string(path)?;
		Self::from_json_str(&json, do_validation)
	}

	/// Reads the curriculum named in `config`.
	///
	/// # Errors
	/// - [`Validation`](crate::Error::Validation) when no curriculum is configured.
	/// - Any error from [`load_from_file()`](CurriculumFile::load_from_file()).
	pub fn load_from_config(config: &crate::Config) -> crate::Result<Self> {
		let path = config.curriculum_path().ok_or_else(|| Validation("no curriculum file configured".to_string()))?;
		Self::load_from_file(path, config.validate_curriculum())
	}

	/// Builds the registry, see [`Registry::new()`] for the errors.
	pub fn into_registry(self) -> crate::Result<Registry> {
		let registry = Registry::new(self.courses)?;
		log::info!("Loaded curriculum {} with {} courses", self.name.as_deref().unwrap_or("(unnamed)"), registry.len());
		Ok(registry)
	}
}

fn validate(value: &serde_json::Value) -> crate::Result<()> {
	let schema: serde_json::Value = serde_json::from_str(include_str!("curriculum.schema.json"))?;
	let compiled = jsonschema::JSONSchema::compile(&schema)
		.map_err(|e| Validation(format!("curriculum schema is invalid: {}", e)))?;

	if let Err(errors) = compiled.validate(value) {
		let problems: Vec<String> = errors.map(|e| e.to_string()).collect();
		return Err(Validation(problems.join("; ")));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn curriculum_schema_compiles() {
		jsonschema::JSONSchema::compile(
			&serde_json::from_str(
				include_str!("curriculum.schema.json")
			).expect("schema isn't valid json")
		).expect("schema isn't invalid");
	}

	#[test]
	fn parses_optional_fields() {
		let file = CurriculumFile::from_json_str(r#"{
			"courses": [
				{ "id": "A" },
				{ "id": "B", "name": "Second", "semester": 2, "prerequisites": ["A"] }
			]
		}"#, true).unwrap();

		assert_eq!(file.name, None);
		assert_eq!(file.courses[0], Course::new("A", Vec::<&str>::new()));
		assert_eq!(file.courses[1], Course::new("B", ["A"]).with_name("Second").with_semester(2));
	}

	#[test]
	fn schema_reports_every_problem() {
		let res = CurriculumFile::from_json_str(r#"{
			"courses": [
				{ "id": "two words" },
				{ "id": "B", "semester": 0 }
			]
		}"#, true);

		match res {
			Err(Validation(msg)) => assert_eq!(msg.split("; ").count(), 2, "unexpected message {}", msg),
			other => panic!("expected validation error, got {:?}", other),
		}
	}

	#[test]
	fn without_validation_serde_still_rejects() {
		let res = CurriculumFile::from_json_str(r#"{ "courses": [ { "name": "no id" } ] }"#, false);
		assert!(matches!(res, Err(crate::Error::SerdeJSON(_))));
	}

	#[test]
	fn cycles_fail_when_building_the_registry() {
		let file = CurriculumFile::from_json_str(r#"{
			"courses": [
				{ "id": "A", "prerequisites": ["B"] },
				{ "id": "B", "prerequisites": ["A"] }
			]
		}"#, true).unwrap();

		assert!(matches!(file.into_registry(), Err(crate::Error::CyclicDependency(_))));
	}
}
