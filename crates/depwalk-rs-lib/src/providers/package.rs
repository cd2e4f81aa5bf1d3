use std::path::PathBuf;

use crate::dependency_management::*;
use crate::framework::FrameworkMoniker;
use crate::lockfile::LockFileLookup;
use crate::version::SemanticVersionRange;

/// Resolves packages recorded in the lock file.
/// 
/// Packages are expected to have been restored to `<packages>/<name>/<version>`. Whether they actually
/// are isn't checked, that is the restore's job.
pub struct PackageDependencyProvider {
	packages_dir: PathBuf,
	lookup: LockFileLookup,
}

impl PackageDependencyProvider {
	pub fn new(packages_dir: impl Into<PathBuf>, lookup: LockFileLookup) -> Self {
		Self { packages_dir: packages_dir.into(), lookup }
	}

	pub fn packages_dir(&self) -> &std::path::Path { &self.packages_dir }
}

impl super::DependencyProvider for PackageDependencyProvider {
	fn get_description(&self, range: &LibraryRange, framework: &FrameworkMoniker) -> crate::Result<Option<LibraryDescription>> {
		let locked = match self.lookup.get_package(framework, range.name()) {
			Some(l) => l,
			None => return Ok(None),
		};

		let dependencies = locked.dependencies.iter().map(|d| {
			let mut range = LibraryRange::new(d.name.clone());
			if let Some(v) = &d.version {
				range = range.with_version_range(SemanticVersionRange::at_least(v.clone()));
			}
			LibraryDependency::from(range)
		}).collect();

		let path = self.packages_dir.join(&locked.name).join(locked.version.to_normalized_string());

		let mut description = LibraryDescription::new(
			range.clone(),
			LibraryIdentity::new(locked.name.clone(), locked.version.clone(), LibraryType::Package),
			Some(path),
			dependencies,
			locked.assemblies.clone(),
			framework.clone(),
		);
		description.properties.set(properties::LOCKED_LIBRARY, locked.clone());
		Ok(Some(description))
	}

	fn name(&self) -> &'static str { "package" }
}
