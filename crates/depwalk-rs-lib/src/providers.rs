//! Strategies for satisfying a [`LibraryRange`].
//! 
//! The walker asks each provider in turn and the first to return a description wins, so the order
//! providers are handed to the [`DependencyWalker`](crate::walker::DependencyWalker) is part of the
//! resolution contract:
//! 1. [`ProjectReferenceDependencyProvider`]
//! 1. [`PackageDependencyProvider`], only present with a usable lock file.
//! 1. [`ReferenceAssemblyDependencyProvider`]
//! 1. [`GacDependencyProvider`]
//! 1. [`UnresolvedDependencyProvider`]

use crate::dependency_management::*;
use crate::framework::FrameworkMoniker;

/// Something able to resolve some kind of range.
pub trait DependencyProvider {
	/// `Ok(None)` when the range is outside what this provider handles.
	/// 
	/// A description with `resolved` set to `false` claims the range without satisfying it and stops
	/// later providers being asked.
	/// 
	/// # Errors
	/// Only for malformed input, such as a broken manifest. These abort the walk.
	fn get_description(&self, range: &LibraryRange, framework: &FrameworkMoniker) -> crate::Result<Option<LibraryDescription>>;

	/// Used when logging provider queries.
	fn name(&self) -> &'static str;
}

mod project_reference;
pub use project_reference::ProjectReferenceDependencyProvider;
mod package;
pub use package::PackageDependencyProvider;
mod reference_assembly;
pub use reference_assembly::ReferenceAssemblyDependencyProvider;
pub use reference_assembly::FrameworkReferenceResolver;
pub use reference_assembly::DirectoryFrameworkReferenceResolver;
mod gac;
pub use gac::GacDependencyProvider;
mod unresolved;
pub use unresolved::UnresolvedDependencyProvider;
