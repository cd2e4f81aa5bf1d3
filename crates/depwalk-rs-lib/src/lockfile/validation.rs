use crate::project::Project;
use crate::dependency_management::LibraryDependency;
use super::{LockFile, LockFileTarget, LOCK_FILE_VERSION};

/// Whether a lock file can still be trusted for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockFileValidity {
	Valid,
	/// Written with a schema this crate doesn't understand.
	VersionMismatch(String),
	/// The manifest changed since the lock file was written.
	ContentMismatch(String),
}

impl LockFileValidity {
	pub fn is_valid(&self) -> bool {
		matches!(self, LockFileValidity::Valid)
	}

	/// Human readable reason the lock file is invalid.
	pub fn message(&self) -> Option<&str> {
		match self {
			LockFileValidity::Valid => None,
			LockFileValidity::VersionMismatch(m) | LockFileValidity::ContentMismatch(m) => Some(m),
		}
	}
}

impl LockFile {
	/// Checks the lock file against what `project` currently declares.
	/// 
	/// Every framework of the project needs a target and every package or project dependency
	/// needs a record whose version still satisfies the declared range. Framework references are
	/// never written to lock files so they are skipped.
	/// 
	/// A project without frameworks can be walked for any of them, so its dependencies are checked
	/// against every target in the lock file.
	pub fn validate_for_project(&self, project: &Project) -> LockFileValidity {
		if self.version != LOCK_FILE_VERSION {
			return LockFileValidity::VersionMismatch(format!(
				"The expected lock file version does not match the actual version, expected {} but found {}",
				LOCK_FILE_VERSION, self.version
			))
		}

		if project.frameworks().is_empty() {
			let needs_lock = project.dependencies().iter().any(|d| !d.library_range.is_framework_reference());
			if needs_lock && self.frameworks.is_empty() {
				return LockFileValidity::ContentMismatch("The lock file doesn't contain any target frameworks".to_string())
			}
			for target in &self.frameworks {
				if let Err(validity) = check_target(target, project.dependencies()) {
					return validity
				}
			}
		}

		for framework_info in project.frameworks() {
			let framework = &framework_info.framework;
			let target = match self.get_target(framework) {
				Some(t) => t,
				None => return LockFileValidity::ContentMismatch(format!(
					"The lock file is missing the target framework {}", framework
				)),
			};

			if let Err(validity) = check_target(target, &project.dependencies_for(framework)) {
				return validity
			}
		}

		log::debug!("Lock file is valid for {}", project.name());
		LockFileValidity::Valid
	}
}

/// Every dependency that gets locked must be recorded in `target` with a version inside its range.
fn check_target(target: &LockFileTarget, dependencies: &[LibraryDependency]) -> Result<(), LockFileValidity> {
	let framework = &target.framework;
	for dependency in dependencies {
		let range = &dependency.library_range;
		if range.is_framework_reference() {
			continue;
		}

		let locked = match target.dependencies.iter().find(|l| l.name == range.name()) {
			Some(l) => l,
			None => return Err(LockFileValidity::ContentMismatch(format!(
				"The dependency {} is missing from the lock file for {}", range, framework
			))),
		};

		if let Some(version_range) = range.version_range() {
			if !version_range.satisfies(&locked.version) {
				return Err(LockFileValidity::ContentMismatch(format!(
					"The dependency {} does not match the locked version {} for {}", range, locked.version, framework
				)))
			}
		}
	}
	Ok(())
}
