use crate::dependency_management::*;
use crate::framework::FrameworkMoniker;
use crate::project::ProjectResolver;

/// Resolves ranges naming a sibling project.
/// 
/// The allowed types of the range aren't checked here, a project satisfying a `package` range
/// still resolves and is later marked incompatible.
pub struct ProjectReferenceDependencyProvider {
	resolver: ProjectResolver,
}

impl ProjectReferenceDependencyProvider {
	pub fn new(resolver: ProjectResolver) -> Self {
		Self { resolver }
	}
}

impl super::DependencyProvider for ProjectReferenceDependencyProvider {
	fn get_description(&self, range: &LibraryRange, framework: &FrameworkMoniker) -> crate::Result<Option<LibraryDescription>> {
		if range.is_framework_reference() {
			return Ok(None)
		}

		let project = match self.resolver.try_resolve_project(range.name())? {
			Some(p) => p,
			None => return Ok(None),
		};

		let mut description = LibraryDescription::new(
			range.clone(),
			LibraryIdentity::new(project.name(), project.version().clone(), LibraryType::Project),
			Some(project.project_file_path().to_path_buf()),
			project.dependencies_for(framework),
			vec![project.name().to_string()],
			framework.clone(),
		);

		/* A project that targets frameworks but not this one can't be used */
		if !project.frameworks().is_empty() && project.get_target_framework(framework).is_none() {
			log::debug!("Project {} doesn't target {}", project.name(), framework);
			description.resolved = false;
		}

		description.properties.set(properties::PROJECT, project);
		Ok(Some(description))
	}

	fn name(&self) -> &'static str { "project" }
}
