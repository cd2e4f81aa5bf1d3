//! The lock file, `project.lock.json`.
//! 
//! A lock file records the packages a previous restore picked for each target framework.
//! It is only ever read here, writing one is the job of the restore.

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::framework::FrameworkMoniker;
use crate::version::SemanticVersion;

mod lookup;
pub use lookup::LockFileLookup;

mod validation;
pub use validation::LockFileValidity;

pub const LOCK_FILE_NAME: &str = "project.lock.json";
/// The schema version this crate understands.
pub const LOCK_FILE_VERSION: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFileDependency {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub version: Option<SemanticVersion>,
}

/// One resolved library as recorded for a framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFileTargetLibrary {
	pub name: String,
	pub version: SemanticVersion,
	/// Lower case library type, `package` or `project`.
	#[serde(rename = "type")]
	pub library_type: String,
	#[serde(default)]
	pub dependencies: Vec<LockFileDependency>,
	#[serde(default)]
	pub assemblies: Vec<String>,
}

impl LockFileTargetLibrary {
	pub fn is_package(&self) -> bool {
		self.library_type.eq_ignore_ascii_case("package")
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFileTarget {
	pub framework: FrameworkMoniker,
	#[serde(default)]
	pub dependencies: Vec<LockFileTargetLibrary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
	pub version: i32,
	#[serde(default)]
	pub frameworks: Vec<LockFileTarget>,
}

impl LockFile {
	pub fn new(frameworks: Vec<LockFileTarget>) -> Self {
		Self { version: LOCK_FILE_VERSION, frameworks }
	}

	pub fn read(path: impl AsRef<Path>) -> crate::Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Ok(serde_json::from_str(&text)?)
	}

	pub fn write(&self, path: impl AsRef<Path>) -> crate::Result<()> {
		std::fs::write(path, serde_json::to_string_pretty(self)?)?;
		Ok(())
	}

	pub fn target_frameworks(&self) -> impl Iterator<Item = &FrameworkMoniker> {
		self.frameworks.iter().map(|t| &t.framework)
	}

	pub fn get_target(&self, framework: &FrameworkMoniker) -> Option<&LockFileTarget> {
		self.frameworks.iter().find(|t| &t.framework == framework)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn deserialize() {
		let lock: LockFile = serde_json::from_str(r#"{
			"version": 2,
			"frameworks": [{
				"framework": "dnx451",
				"dependencies": [{
					"name": "Foo",
					"version": "1.5.0",
					"type": "package",
					"dependencies": [{ "name": "Bar", "version": "2.0.0" }, { "name": "Baz" }],
					"assemblies": ["lib/dnx451/Foo.dll"]
				}]
			}]
		}"#).unwrap();

		let dnx = FrameworkMoniker::parse("DNX,Version=v4.5.1").unwrap();
		let target = lock.get_target(&dnx).unwrap();
		let foo = &target.dependencies[0];
		assert!(foo.is_package());
		assert_eq!(foo.version, SemanticVersion::new(1, 5, 0));
		assert_eq!(foo.dependencies[1].version, None);
		assert_eq!(foo.assemblies, ["lib/dnx451/Foo.dll"]);
	}

	#[test]
	fn missing_version_is_an_error() {
		assert!(serde_json::from_str::<LockFile>(r#"{ "frameworks": [] }"#).is_err());
	}
}
