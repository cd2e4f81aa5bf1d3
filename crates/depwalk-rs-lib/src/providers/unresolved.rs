use crate::dependency_management::*;
use crate::framework::FrameworkMoniker;

/// Claims every range as unresolved. Always last.
pub struct UnresolvedDependencyProvider;

impl super::DependencyProvider for UnresolvedDependencyProvider {
	fn get_description(&self, range: &LibraryRange, framework: &FrameworkMoniker) -> crate::Result<Option<LibraryDescription>> {
		Ok(Some(LibraryDescription::unresolved(range.clone(), framework.clone())))
	}

	fn name(&self) -> &'static str { "unresolved" }
}
