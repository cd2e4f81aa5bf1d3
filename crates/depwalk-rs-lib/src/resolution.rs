//! Putting the pieces together: picking providers for a project, running the walk and reporting
//! on the lock file.
//! 
//! # Usage
//! 1. Create a [`ResolutionBuilder`] for a project and framework.
//! 1. Optionally override directories, the framework reference resolver or lock file validation.
//! 1. [`ResolutionBuilder::build()`] to walk and get a [`Resolution`].
//! 1. Query [`Resolution::library_manager()`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use crate::Config;
use crate::diagnostics::{DiagnosticMessage, DiagnosticMessageSeverity};
use crate::framework::FrameworkMoniker;
use crate::library_manager::LibraryManager;
use crate::lockfile::{LockFile, LockFileLookup, LockFileValidity, LOCK_FILE_NAME};
use crate::project::{Project, ProjectResolver, PROJECT_FILE_NAME};
use crate::providers::*;
use crate::walker::DependencyWalker;

pub struct ResolutionBuilder {
	project: Project,
	target_framework: FrameworkMoniker,
	config: Config,
	root_directory: Option<PathBuf>,
	packages_directory: Option<PathBuf>,
	framework_resolver: Option<Arc<dyn FrameworkReferenceResolver>>,
	skip_lock_file_validation: bool,
}

/// What happened to the lock file during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockFileStatus {
	Missing,
	Checked(LockFileValidity),
}

impl ResolutionBuilder {
	pub fn new(project: Project, target_framework: FrameworkMoniker) -> Self {
		Self {
			project,
			target_framework,
			config: Default::default(),
			root_directory: None,
			packages_directory: None,
			framework_resolver: None,
			skip_lock_file_validation: false,
		}
	}

	pub fn config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}

	/// Defaults to the directory holding `global.json` or the project's parent.
	pub fn root_directory(mut self, root_directory: impl Into<PathBuf>) -> Self {
		self.root_directory = Some(root_directory.into());
		self
	}

	/// Defaults to `packages` from `global.json` or else the configured packages directory.
	pub fn packages_directory(mut self, packages_directory: impl Into<PathBuf>) -> Self {
		self.packages_directory = Some(packages_directory.into());
		self
	}

	/// Defaults to a [`DirectoryFrameworkReferenceResolver`] over the configured reference assemblies.
	pub fn framework_resolver(mut self, resolver: Arc<dyn FrameworkReferenceResolver>) -> Self {
		self.framework_resolver = Some(resolver);
		self
	}

	/// Allows a lock file that no longer matches the project to be used anyway.
	/// 
	/// A lock file written with a different schema version is never used.
	pub fn skip_lock_file_validation(mut self, skip: bool) -> Self {
		self.skip_lock_file_validation = skip;
		self
	}

	/// # Errors
	/// Only when a provider fails on malformed input, such as a sibling project with a broken manifest.
	pub fn build(self) -> crate::Result<Resolution> {
		let project_dir = self.project.project_directory().to_path_buf();
		let root_directory = self.root_directory.clone()
			.unwrap_or_else(|| crate::project::resolve_root_directory(&project_dir));
		let project_resolver = ProjectResolver::new(&project_dir, Some(root_directory.as_path()));

		let packages_directory = self.packages_directory.clone()
			.or_else(|| project_resolver.global_settings().and_then(|g| g.packages_directory()))
			.unwrap_or_else(|| self.config.packages_dir().to_path_buf());

		let framework_resolver = self.framework_resolver.clone()
			.unwrap_or_else(|| Arc::new(DirectoryFrameworkReferenceResolver::new(self.config.reference_assemblies_dir())) as Arc<dyn FrameworkReferenceResolver>);

		let lock_file_path = project_dir.join(LOCK_FILE_NAME);
		let (lock_file_status, lookup) = self.check_lock_file(&lock_file_path);

		let mut providers: Vec<Box<dyn DependencyProvider>> = vec![
			Box::new(ProjectReferenceDependencyProvider::new(project_resolver)),
		];
		if let Some(lookup) = lookup {
			providers.push(Box::new(PackageDependencyProvider::new(&packages_directory, lookup)));
		} else {
			log::info!("Not using a lock file for {}, packages will be unresolved", self.project.name());
		}
		providers.push(Box::new(ReferenceAssemblyDependencyProvider::new(framework_resolver)));
		providers.push(Box::new(GacDependencyProvider::new(self.config.gac_dirs().to_vec())));
		providers.push(Box::new(UnresolvedDependencyProvider));

		let resolved = DependencyWalker::new(providers)
			.walk_project(&self.project, &self.target_framework)?;
		let mut library_manager = LibraryManager::new(resolved);

		match &lock_file_status {
			LockFileStatus::Missing => library_manager.add_global_diagnostics(DiagnosticMessage::new(
				format!("The expected lock file doesn't exist. Please run \"{}\" to generate a new lock file.", self.config.restore_command()),
				&lock_file_path,
				DiagnosticMessageSeverity::Error,
			)),
			LockFileStatus::Checked(validity) => if let Some(message) = validity.message() {
				library_manager.add_global_diagnostics(DiagnosticMessage::new(
					format!("{}. Please run \"{}\" to generate a new lock file.", message, self.config.restore_command()),
					&lock_file_path,
					DiagnosticMessageSeverity::Error,
				));
			},
		}

		Ok(Resolution {
			root_directory,
			packages_directory,
			project: self.project,
			lock_file_status,
			library_manager,
		})
	}

	/// Reads and validates the lock file, giving a lookup when the package provider should be used.
	fn check_lock_file(&self, path: &Path) -> (LockFileStatus, Option<LockFileLookup>) {
		if !path.is_file() {
			log::warn!("No lock file at {}", path.display());
			return (LockFileStatus::Missing, None)
		}

		let lock_file = match LockFile::read(path) {
			Ok(l) => l,
			Err(e) => {
				log::warn!("Unable to read lock file {}: {}", path.display(), e);
				let validity = LockFileValidity::ContentMismatch(format!("The lock file could not be read: {}", e));
				return (LockFileStatus::Checked(validity), None)
			},
		};

		let validity = lock_file.validate_for_project(&self.project);
		/* A schema mismatch leaves packages unresolved even when skipping validation */
		let skip = self.skip_lock_file_validation && !matches!(validity, LockFileValidity::VersionMismatch(_));

		let lookup = if validity.is_valid() || skip {
			if !validity.is_valid() {
				log::warn!("Using stale lock file {}", path.display());
			}
			Some(LockFileLookup::new(&lock_file))
		} else {
			log::info!("Lock file {} is invalid: {}", path.display(), validity.message().unwrap_or_default());
			None
		};

		(LockFileStatus::Checked(validity), lookup)
	}
}

/// The outcome of resolving one project for one framework.
#[derive(Debug)]
pub struct Resolution {
	root_directory: PathBuf,
	packages_directory: PathBuf,
	project: Project,
	lock_file_status: LockFileStatus,
	library_manager: LibraryManager,
}

impl Resolution {
	/// Resolves the project in `project_dir` with default settings.
	/// 
	/// # Errors
	/// - [`ProjectNotFound`](crate::Error::ProjectNotFound) when `project_dir` holds no project.
	/// - Any error reading the manifest or from the walk.
	pub fn from_directory(project_dir: impl AsRef<Path>, target_framework: FrameworkMoniker) -> crate::Result<Self> {
		let project = load_project(project_dir.as_ref())?;
		ResolutionBuilder::new(project, target_framework).build()
	}

	pub fn root_directory(&self) -> &Path { &self.root_directory }
	pub fn packages_directory(&self) -> &Path { &self.packages_directory }
	pub fn project(&self) -> &Project { &self.project }
	pub fn lock_file_status(&self) -> &LockFileStatus { &self.lock_file_status }
	pub fn library_manager(&self) -> &LibraryManager { &self.library_manager }

	pub fn into_library_manager(self) -> LibraryManager {
		self.library_manager
	}
}

/// Reads the project in `project_dir`, failing with [`ProjectNotFound`](crate::Error::ProjectNotFound) when there isn't one.
pub fn load_project(project_dir: &Path) -> crate::Result<Project> {
	if !project_dir.join(PROJECT_FILE_NAME).is_file() {
		return Err(crate::Error::ProjectNotFound(project_dir.to_path_buf()))
	}
	Project::from_directory(project_dir)
}

/// Resolves the graph of each project for `target_framework` in parallel.
/// 
/// Each walk builds its own providers, nothing is shared between them.
pub fn resolve_project_graphs(projects: Vec<Project>, target_framework: &FrameworkMoniker, config: &Config) -> Vec<crate::Result<LibraryManager>> {
	projects.into_par_iter()
		.map(|project| {
			ResolutionBuilder::new(project, target_framework.clone())
				.config(config.clone())
				.build()
				.map(Resolution::into_library_manager)
		})
		.collect()
}
