//! The value types the walk operates on: what was requested, what was found and the node pairing the two.

mod library_identity;
pub use library_identity::LibraryIdentity;
pub use library_identity::LibraryType;

mod library_range;
pub use library_range::LibraryRange;
pub use library_range::SourceLocation;

mod dependency_type;
pub use dependency_type::LibraryDependencyType;
pub use dependency_type::LibraryDependencyTypeFlag;
pub use dependency_type::LibraryDependencyTypeKeyword;

mod library_dependency;
pub use library_dependency::LibraryDependency;

mod property;
pub use property::LibraryPropertyName;
pub use property::PropertyBag;

mod library_description;
pub use library_description::LibraryDescription;

mod library;
pub use library::Library;
pub use library::AssemblyName;

/// Well known keys for [`PropertyBag`]s set by the providers.
pub mod properties {
	use super::LibraryPropertyName;

	/// The project a `Project` library was built from.
	pub const PROJECT: LibraryPropertyName<crate::project::Project> = LibraryPropertyName::new("Project");
	/// The lock file record a `Package` library was resolved from.
	pub const LOCKED_LIBRARY: LibraryPropertyName<crate::lockfile::LockFileTargetLibrary> = LibraryPropertyName::new("LockedLibrary");
}
