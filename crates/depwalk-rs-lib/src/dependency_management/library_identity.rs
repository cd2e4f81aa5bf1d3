use serde::{Serialize, Deserialize};

use crate::version::SemanticVersion;

/// What kind of thing satisfied a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryType {
	/// A sibling project built from source.
	Project,
	/// A package recorded in the lock file.
	Package,
	/// An assembly shipped with the target framework.
	ReferenceAssembly,
	/// An assembly installed in the machine wide cache.
	GlobalCache,
	/// Nothing could satisfy the request.
	Unresolved,
}

impl LibraryType {
	pub const ALL: [LibraryType; 5] = [
		LibraryType::Project,
		LibraryType::Package,
		LibraryType::ReferenceAssembly,
		LibraryType::GlobalCache,
		LibraryType::Unresolved,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			LibraryType::Project => "Project",
			LibraryType::Package => "Package",
			LibraryType::ReferenceAssembly => "ReferenceAssembly",
			LibraryType::GlobalCache => "GlobalCache",
			LibraryType::Unresolved => "Unresolved",
		}
	}

	/// Lock files and manifests write types in lower case.
	pub fn parse(s: impl AsRef<str>) -> crate::Result<Self> {
		let s = s.as_ref();
		Self::ALL.into_iter()
			.find(|t| t.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| crate::Error::Parse(format!("unknown library type `{}`", s)))
	}
}

impl std::fmt::Display for LibraryType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// The concrete library a request was satisfied by.
/// 
/// Two identities are the same library when their name and version match, the type is not considered.
/// Names are compared ordinally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryIdentity {
	name: String,
	/// Only `None` for [`LibraryType::Unresolved`].
	version: Option<SemanticVersion>,
	library_type: LibraryType,
}

impl LibraryIdentity {
	pub fn new(name: impl Into<String>, version: SemanticVersion, library_type: LibraryType) -> Self {
		Self { name: name.into(), version: Some(version), library_type }
	}

	/// Placeholder identity for a request nothing could satisfy.
	pub fn unresolved(name: impl Into<String>) -> Self {
		Self { name: name.into(), version: None, library_type: LibraryType::Unresolved }
	}

	pub fn name(&self) -> &str { &self.name }
	pub fn version(&self) -> Option<&SemanticVersion> { self.version.as_ref() }
	pub fn library_type(&self) -> LibraryType { self.library_type }
}

impl PartialEq for LibraryIdentity {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name && self.version == other.version
	}
}

impl Eq for LibraryIdentity {}

impl std::hash::Hash for LibraryIdentity {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.name.hash(state);
		self.version.hash(state);
	}
}

impl std::fmt::Display for LibraryIdentity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.version {
			Some(v) => write!(f, "{} {}", self.name, v),
			None => write!(f, "{}", self.name),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn type_is_ignored_for_equality() {
		let v = SemanticVersion::new(1, 0, 0);
		assert_eq!(LibraryIdentity::new("Foo", v.clone(), LibraryType::Project), LibraryIdentity::new("Foo", v, LibraryType::Package));
	}

	#[test]
	fn names_are_case_sensitive() {
		let v = SemanticVersion::new(1, 0, 0);
		assert_ne!(LibraryIdentity::new("Foo", v.clone(), LibraryType::Package), LibraryIdentity::new("foo", v, LibraryType::Package));
	}

	#[test]
	fn type_parsing_ignores_case() {
		assert_eq!(LibraryType::parse("package").unwrap(), LibraryType::Package);
		assert!(LibraryType::parse("tarball").is_err());
	}
}
