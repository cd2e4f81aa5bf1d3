use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dependency_management::*;
use crate::framework::FrameworkMoniker;
use crate::version::SemanticVersion;

/// Locates assemblies shipped with a framework.
pub trait FrameworkReferenceResolver: Send + Sync {
	/// The path and version of `name` for `framework`, if the framework ships it.
	fn try_get_assembly(&self, name: &str, framework: &FrameworkMoniker) -> Option<(PathBuf, SemanticVersion)>;
}

/// `FrameworkList.json` in a framework directory, `{ "assemblies": { "System": "4.0.0.0" } }`.
#[derive(Debug, Default, Deserialize)]
struct FrameworkList {
	#[serde(default)]
	assemblies: HashMap<String, SemanticVersion>,
}

/// Reference assemblies laid out on disk as
/// `<root>/<identifier>/v<version>[/Profile/<profile>]/<name>.dll`.
/// 
/// An assembly's version comes from the directory's `FrameworkList.json` when it lists it,
/// otherwise the framework's own version is used.
#[derive(Debug, Clone)]
pub struct DirectoryFrameworkReferenceResolver {
	root: PathBuf,
}

impl DirectoryFrameworkReferenceResolver {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn framework_directory(&self, framework: &FrameworkMoniker) -> PathBuf {
		let mut dir = self.root
			.join(framework.identifier())
			.join(format!("v{}", framework.version_string()));
		if let Some(profile) = framework.profile() {
			dir = dir.join("Profile").join(profile);
		}
		dir
	}

	fn read_framework_list(dir: &Path) -> FrameworkList {
		let path = dir.join("FrameworkList.json");
		if !path.is_file() {
			return FrameworkList::default()
		}
		std::fs::read_to_string(&path)
			.map_err(crate::Error::from)
			.and_then(|s| serde_json::from_str(&s).map_err(crate::Error::from))
			.unwrap_or_else(|e| {
				log::warn!("Ignoring unreadable {}: {}", path.display(), e);
				FrameworkList::default()
			})
	}
}

impl FrameworkReferenceResolver for DirectoryFrameworkReferenceResolver {
	fn try_get_assembly(&self, name: &str, framework: &FrameworkMoniker) -> Option<(PathBuf, SemanticVersion)> {
		let dir = self.framework_directory(framework);
		let path = dir.join(format!("{}.dll", name));
		if !path.is_file() {
			return None
		}
		let version = Self::read_framework_list(&dir).assemblies.remove(name)
			.unwrap_or_else(|| framework.version().clone());
		Some((path, version))
	}
}

/// Resolves framework references against the assemblies a framework ships.
pub struct ReferenceAssemblyDependencyProvider {
	resolver: std::sync::Arc<dyn FrameworkReferenceResolver>,
}

impl ReferenceAssemblyDependencyProvider {
	pub fn new(resolver: std::sync::Arc<dyn FrameworkReferenceResolver>) -> Self {
		Self { resolver }
	}
}

impl super::DependencyProvider for ReferenceAssemblyDependencyProvider {
	fn get_description(&self, range: &LibraryRange, framework: &FrameworkMoniker) -> crate::Result<Option<LibraryDescription>> {
		if !range.is_framework_reference() {
			return Ok(None)
		}

		let (path, version) = match self.resolver.try_get_assembly(range.name(), framework) {
			Some(found) => found,
			None => return Ok(None),
		};

		/* The framework has the assembly but not a usable version of it, claim it anyway */
		let satisfied = range.version_range().map_or(true, |r| r.satisfies(&version));

		let mut description = LibraryDescription::new(
			range.clone(),
			LibraryIdentity::new(range.name(), version, LibraryType::ReferenceAssembly),
			Some(path),
			Vec::new(),
			vec![range.name().to_string()],
			framework.clone(),
		);
		description.resolved = satisfied;
		Ok(Some(description))
	}

	fn name(&self) -> &'static str { "reference assembly" }
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::providers::DependencyProvider;
	use crate::version::SemanticVersionRange;

	fn framework_reference(name: &str) -> LibraryRange {
		LibraryRange::new(name).with_allowed_types([LibraryType::ReferenceAssembly.as_str(), LibraryType::GlobalCache.as_str()])
	}

	#[test]
	fn resolves_from_directory() {
		let dir = tempfile::tempdir().unwrap();
		let framework = FrameworkMoniker::parse("dnx451").unwrap();
		let resolver = DirectoryFrameworkReferenceResolver::new(dir.path());
		let fw_dir = resolver.framework_directory(&framework);
		assert_eq!(fw_dir, dir.path().join("DNX").join("v4.5.1"));
		std::fs::create_dir_all(&fw_dir).unwrap();
		std::fs::write(fw_dir.join("System.dll"), "").unwrap();
		std::fs::write(fw_dir.join("System.Xml.dll"), "").unwrap();
		std::fs::write(fw_dir.join("FrameworkList.json"), r#"{ "assemblies": { "System.Xml": "4.0.0.0" } }"#).unwrap();

		let provider = ReferenceAssemblyDependencyProvider::new(std::sync::Arc::new(resolver));

		let system = provider.get_description(&framework_reference("System"), &framework).unwrap().unwrap();
		assert!(system.resolved);
		assert_eq!(system.identity.version(), Some(&SemanticVersion::new(4, 5, 1)));

		let xml = provider.get_description(&framework_reference("System.Xml"), &framework).unwrap().unwrap();
		assert_eq!(xml.identity.version(), Some(&SemanticVersion::new(4, 0, 0)));
		assert_eq!(xml.identity.library_type(), LibraryType::ReferenceAssembly);

		assert!(provider.get_description(&framework_reference("System.Missing"), &framework).unwrap().is_none());
		assert!(provider.get_description(&LibraryRange::new("System"), &framework).unwrap().is_none());
	}

	#[test]
	fn unsatisfied_version_is_claimed() {
		let dir = tempfile::tempdir().unwrap();
		let framework = FrameworkMoniker::parse("dnx451").unwrap();
		let resolver = DirectoryFrameworkReferenceResolver::new(dir.path());
		let fw_dir = resolver.framework_directory(&framework);
		std::fs::create_dir_all(&fw_dir).unwrap();
		std::fs::write(fw_dir.join("System.dll"), "").unwrap();

		let provider = ReferenceAssemblyDependencyProvider::new(std::sync::Arc::new(resolver));
		let range = framework_reference("System").with_version_range(SemanticVersionRange::parse("9.0.0").unwrap());
		let description = provider.get_description(&range, &framework).unwrap().unwrap();
		assert!(!description.resolved);
	}
}
