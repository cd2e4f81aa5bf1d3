use super::{LibraryRange, LibraryDependencyType};

/// An edge from a library to the range it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDependency {
	pub library_range: LibraryRange,
	pub dependency_type: LibraryDependencyType,
}

impl LibraryDependency {
	pub fn new(library_range: LibraryRange, dependency_type: LibraryDependencyType) -> Self {
		Self { library_range, dependency_type }
	}

	pub fn name(&self) -> &str {
		self.library_range.name()
	}
}

impl From<LibraryRange> for LibraryDependency {
	fn from(library_range: LibraryRange) -> Self {
		Self { library_range, dependency_type: Default::default() }
	}
}

impl std::fmt::Display for LibraryDependency {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {:?}", self.library_range, self.dependency_type.flags())
	}
}
