use std::path::PathBuf;

use crate::framework::FrameworkMoniker;
use super::*;

/// The result of resolving a [`LibraryRange`], one node of the resolved graph.
/// 
/// Nodes are only changed by the walk that created them. Once the walk finishes they are owned
/// by a [`LibraryManager`](crate::LibraryManager) and are read only.
#[derive(Debug, Clone)]
pub struct LibraryDescription {
	pub requested_range: LibraryRange,
	pub identity: LibraryIdentity,
	pub path: Option<PathBuf>,
	pub dependencies: Vec<LibraryDependency>,
	/// Names of the binaries that can be loaded from this library.
	pub assemblies: Vec<String>,
	pub framework: FrameworkMoniker,
	/// `false` when nothing could satisfy the range.
	pub resolved: bool,
	/// `false` when the range was satisfied by a type it doesn't allow. Always `true` for unresolved libraries.
	pub compatible: bool,
	pub properties: PropertyBag,
}

impl LibraryDescription {
	pub fn new(
		requested_range: LibraryRange,
		identity: LibraryIdentity,
		path: Option<PathBuf>,
		dependencies: Vec<LibraryDependency>,
		assemblies: Vec<String>,
		framework: FrameworkMoniker,
	) -> Self {
		Self {
			requested_range,
			identity,
			path,
			dependencies,
			assemblies,
			framework,
			resolved: true,
			compatible: true,
			properties: Default::default(),
		}
	}

	/// A node that claims `range` without satisfying it.
	pub fn unresolved(range: LibraryRange, framework: FrameworkMoniker) -> Self {
		let identity = LibraryIdentity::unresolved(range.name());
		Self {
			resolved: false,
			..Self::new(range, identity, None, Vec::new(), Vec::new(), framework)
		}
	}

	pub fn name(&self) -> &str {
		self.identity.name()
	}

	/// The read only view handed to consumers outside the resolver.
	pub fn to_library(&self) -> Library {
		Library::new(
			self.identity.name(),
			self.identity.version().map(|v| v.to_normalized_string()).unwrap_or_default(),
			self.path.as_ref().map(|p| p.to_string_lossy().to_string()).unwrap_or_default(),
			self.identity.library_type().as_str(),
			self.dependencies.iter().map(|d| d.name().to_string()).collect(),
			self.assemblies.iter().map(|a| assembly_name(a)).collect(),
		).with_properties(self.properties.clone())
	}
}

/// Assemblies are recorded either by display name or as a path to the binary.
fn assembly_name(assembly: &str) -> AssemblyName {
	match assembly.strip_suffix(".dll") {
		Some(path) => AssemblyName::parse(path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)),
		None => AssemblyName::parse(assembly),
	}
}
