use std::collections::HashMap;

use crate::framework::FrameworkMoniker;
use super::{LockFile, LockFileTargetLibrary};

/// Index over a [`LockFile`] by framework then library name.
#[derive(Debug, Clone, Default)]
pub struct LockFileLookup {
	targets: HashMap<FrameworkMoniker, HashMap<String, LockFileTargetLibrary>>,
}

impl LockFileLookup {
	pub fn new(lock_file: &LockFile) -> Self {
		let mut targets = HashMap::new();
		for target in &lock_file.frameworks {
			let libraries: &mut HashMap<String, LockFileTargetLibrary> = targets.entry(target.framework.clone()).or_default();
			for library in &target.dependencies {
				/* XXX: Duplicate names within a target would be a broken lock file, first one wins */
				libraries.entry(library.name.clone()).or_insert_with(|| library.clone());
			}
		}
		Self { targets }
	}

	pub fn get_library(&self, framework: &FrameworkMoniker, name: &str) -> Option<&LockFileTargetLibrary> {
		self.targets.get(framework)?.get(name)
	}

	/// Like [`get_library`](Self::get_library) but only for `package` records.
	pub fn get_package(&self, framework: &FrameworkMoniker, name: &str) -> Option<&LockFileTargetLibrary> {
		self.get_library(framework, name).filter(|l| l.is_package())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::lockfile::LockFileTarget;
	use crate::version::SemanticVersion;

	fn library(name: &str, library_type: &str) -> LockFileTargetLibrary {
		LockFileTargetLibrary {
			name: name.to_string(),
			version: SemanticVersion::new(1, 0, 0),
			library_type: library_type.to_string(),
			dependencies: Vec::new(),
			assemblies: Vec::new(),
		}
	}

	#[test]
	fn lookup_by_framework_and_name() {
		let dnx = FrameworkMoniker::parse("dnx451").unwrap();
		let core = FrameworkMoniker::parse("dnxcore50").unwrap();
		let lock = LockFile::new(vec![
			LockFileTarget { framework: dnx.clone(), dependencies: vec![library("Foo", "package"), library("App.Core", "project")] },
			LockFileTarget { framework: core.clone(), dependencies: vec![] },
		]);
		let lookup = LockFileLookup::new(&lock);

		assert!(lookup.get_package(&dnx, "Foo").is_some());
		assert!(lookup.get_package(&core, "Foo").is_none());
		assert!(lookup.get_library(&dnx, "App.Core").is_some());
		assert!(lookup.get_package(&dnx, "App.Core").is_none());
		assert!(lookup.get_library(&dnx, "foo").is_none());
	}
}
