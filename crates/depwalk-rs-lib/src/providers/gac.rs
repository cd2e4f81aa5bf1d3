use std::path::PathBuf;

use crate::dependency_management::*;
use crate::framework::FrameworkMoniker;
use crate::version::SemanticVersion;

/// Resolves framework references from a machine wide assembly cache.
/// 
/// Cache roots are laid out as `<root>/<name>/<version>__<public key token>/<name>.dll`.
/// The highest version satisfying the range is picked. Only desktop frameworks can load from the cache.
pub struct GacDependencyProvider {
	roots: Vec<PathBuf>,
}

impl GacDependencyProvider {
	pub fn new(roots: Vec<PathBuf>) -> Self {
		Self { roots }
	}

	fn find_assemblies<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (SemanticVersion, PathBuf)> + 'a {
		self.roots.iter()
			.flat_map(move |root| {
				walkdir::WalkDir::new(root.join(name)).min_depth(1).max_depth(1)
					.into_iter()
					.filter_map(|e| e.ok())
					.filter(|e| e.file_type().is_dir())
			})
			.filter_map(move |entry| {
				let dir_name = entry.file_name().to_string_lossy().to_string();
				let version = dir_name.split("__").next()?;
				let version = SemanticVersion::parse(version)
					.map_err(|e| log::trace!("Skipping {}: {}", entry.path().display(), e))
					.ok()?;
				let path = entry.path().join(format!("{}.dll", name));
				path.is_file().then_some((version, path))
			})
	}
}

impl super::DependencyProvider for GacDependencyProvider {
	fn get_description(&self, range: &LibraryRange, framework: &FrameworkMoniker) -> crate::Result<Option<LibraryDescription>> {
		if !framework.is_desktop() || !range.is_framework_reference() || self.roots.is_empty() {
			return Ok(None)
		}

		let best = self.find_assemblies(range.name())
			.filter(|(version, _)| range.version_range().map_or(true, |r| r.satisfies(version)))
			.max_by(|(a, _), (b, _)| a.cmp(b));

		Ok(best.map(|(version, path)| {
			LibraryDescription::new(
				range.clone(),
				LibraryIdentity::new(range.name(), version, LibraryType::GlobalCache),
				Some(path),
				Vec::new(),
				vec![range.name().to_string()],
				framework.clone(),
			)
		}))
	}

	fn name(&self) -> &'static str { "global assembly cache" }
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::providers::DependencyProvider;
	use crate::version::SemanticVersionRange;

	fn install(root: &std::path::Path, name: &str, dir: &str) {
		let dir = root.join(name).join(dir);
		std::fs::create_dir_all(&dir).unwrap();
		std::fs::write(dir.join(format!("{}.dll", name)), "").unwrap();
	}

	#[test]
	fn picks_highest_satisfying() {
		let root = tempfile::tempdir().unwrap();
		install(root.path(), "System.Web", "2.0.0.0__b03f5f7f11d50a3a");
		install(root.path(), "System.Web", "4.0.0.0__b03f5f7f11d50a3a");
		install(root.path(), "System.Web", "not-a-version__b03f5f7f11d50a3a");

		let provider = GacDependencyProvider::new(vec![root.path().to_path_buf()]);
		let desktop = FrameworkMoniker::parse("net45").unwrap();
		let range = LibraryRange::new("System.Web").with_allowed_types(["ReferenceAssembly", "GlobalCache"]);

		let found = provider.get_description(&range, &desktop).unwrap().unwrap();
		assert_eq!(found.identity.version(), Some(&SemanticVersion::new(4, 0, 0)));
		assert_eq!(found.identity.library_type(), LibraryType::GlobalCache);

		let capped = range.clone().with_version_range(SemanticVersionRange::parse("[1.0, 3.0)").unwrap());
		let found = provider.get_description(&capped, &desktop).unwrap().unwrap();
		assert_eq!(found.identity.version(), Some(&SemanticVersion::new(2, 0, 0)));

		let core = FrameworkMoniker::parse("dnxcore50").unwrap();
		assert!(provider.get_description(&range, &core).unwrap().is_none());
		assert!(provider.get_description(&LibraryRange::new("System.Web"), &desktop).unwrap().is_none());
	}
}
