//! Various helper functions for testing
//! 
//! functions in this module should use results and not use any panics to avoid confusion in callers

use std::path::{Path, PathBuf};

use depwalk_rs::lockfile::{LockFile, LockFileTarget, LockFileTargetLibrary, LockFileDependency, LOCK_FILE_NAME};
use depwalk_rs::framework::FrameworkMoniker;
use depwalk_rs::version::SemanticVersion;
use depwalk_rs::providers::DirectoryFrameworkReferenceResolver;
use depwalk_rs::Config;

#[derive(Debug, thiserror::Error)]
pub enum TestUtilsError {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("copy error: {0}")]
	Copy(#[from] fs_extra::error::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("depwalk error: {0}")]
	Depwalk(#[from] depwalk_rs::Error),
}

pub type Result<T> = std::result::Result<T, TestUtilsError>;

/// Directory holding the fixtures shipped with this crate.
pub fn test_data_dir() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

/// A solution in a temporary directory, removed on drop.
/// 
/// Projects are written to `<root>/src/<name>/project.json`.
pub struct TestSolution {
	dir: tempfile::TempDir,
}

impl TestSolution {
	pub fn new() -> Result<Self> {
		Ok(Self { dir: tempfile::tempdir()? })
	}

	/// Copies the fixture `test-data/<name>` into a new solution.
	pub fn from_fixture(name: &str) -> Result<Self> {
		let solution = Self::new()?;
		let options = fs_extra::dir::CopyOptions::new().content_only(true);
		fs_extra::dir::copy(test_data_dir().join(name), solution.root(), &options)?;
		Ok(solution)
	}

	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	pub fn project_dir(&self, name: &str) -> PathBuf {
		self.root().join("src").join(name)
	}

	pub fn write_global(&self, global: serde_json::Value) -> Result<()> {
		std::fs::write(self.root().join("global.json"), serde_json::to_string_pretty(&global)?)?;
		Ok(())
	}

	/// Writes `project.json` for `name`, returning the project directory.
	pub fn add_project(&self, name: &str, project: serde_json::Value) -> Result<PathBuf> {
		let dir = self.project_dir(name);
		std::fs::create_dir_all(&dir)?;
		std::fs::write(dir.join("project.json"), serde_json::to_string_pretty(&project)?)?;
		Ok(dir)
	}

	pub fn write_lock_file(&self, name: &str, lock_file: &LockFile) -> Result<()> {
		lock_file.write(self.project_dir(name).join(LOCK_FILE_NAME))?;
		Ok(())
	}

	pub fn write_raw_lock_file(&self, name: &str, contents: &str) -> Result<()> {
		std::fs::write(self.project_dir(name).join(LOCK_FILE_NAME), contents)?;
		Ok(())
	}

	/// Creates empty reference assemblies for `framework` under `<root>/reference-assemblies`.
	pub fn add_reference_assemblies(&self, framework: &str, names: &[&str]) -> Result<()> {
		let framework = FrameworkMoniker::parse(framework)?;
		let dir = DirectoryFrameworkReferenceResolver::new(self.reference_assemblies_dir()).framework_directory(&framework);
		std::fs::create_dir_all(&dir)?;
		for name in names {
			std::fs::write(dir.join(format!("{}.dll", name)), "")?;
		}
		Ok(())
	}

	pub fn reference_assemblies_dir(&self) -> PathBuf {
		self.root().join("reference-assemblies")
	}

	/// A config isolated from the environment, everything lives inside the solution.
	pub fn config(&self) -> Result<Config> {
		std::fs::create_dir_all(self.reference_assemblies_dir())?;
		let mut config = Config::default();
		config.set_packages_dir(self.root().join("packages"));
		config.set_reference_assemblies_dir(self.reference_assemblies_dir());
		config.set_gac_dirs(Vec::new());
		config.set_restore_command("depwalk restore");
		Ok(config)
	}

	pub fn load_project(&self, name: &str) -> Result<depwalk_rs::Project> {
		Ok(depwalk_rs::Project::from_directory(self.project_dir(name))?)
	}
}

/// Builds lock files one library at a time.
#[derive(Default)]
pub struct LockFileBuilder {
	targets: Vec<LockFileTarget>,
}

impl LockFileBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn framework(mut self, framework: &str) -> Result<Self> {
		self.targets.push(LockFileTarget {
			framework: FrameworkMoniker::parse(framework)?,
			dependencies: Vec::new(),
		});
		Ok(self)
	}

	/// Adds a package to the most recently added framework.
	/// 
	/// `dependencies` are `(name, minimum version)` pairs.
	pub fn package(mut self, name: &str, version: &str, dependencies: &[(&str, &str)]) -> Result<Self> {
		let library = LockFileTargetLibrary {
			name: name.to_string(),
			version: SemanticVersion::parse(version)?,
			library_type: "package".to_string(),
			dependencies: dependencies.iter()
				.map(|(n, v)| -> Result<LockFileDependency> {
					Ok(LockFileDependency { name: n.to_string(), version: Some(SemanticVersion::parse(v)?) })
				})
				.collect::<Result<Vec<_>>>()?,
			assemblies: vec![format!("lib/{}.dll", name)],
		};
		match self.targets.last_mut() {
			Some(target) => target.dependencies.push(library),
			None => return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "add a framework before packages").into()),
		}
		Ok(self)
	}

	pub fn build(self) -> LockFile {
		LockFile::new(self.targets)
	}
}
