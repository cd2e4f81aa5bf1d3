use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{Project, PROJECT_FILE_NAME};

pub const GLOBAL_SETTINGS_FILE_NAME: &str = "global.json";

/// Solution level settings read from `global.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalSettings {
	#[serde(default = "GlobalSettings::default_projects")]
	pub projects: Vec<PathBuf>,
	#[serde(default)]
	pub packages: Option<PathBuf>,
	#[serde(skip)]
	pub file_path: PathBuf,
}

impl GlobalSettings {
	fn default_projects() -> Vec<PathBuf> {
		vec![PathBuf::from("src"), PathBuf::from("test")]
	}

	pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path)?;
		let mut settings: GlobalSettings = serde_json::from_str(&text)?;
		settings.file_path = path.to_path_buf();
		Ok(settings)
	}

	/// Searches `directory` and its ancestors for `global.json`.
	pub fn find(directory: impl AsRef<Path>) -> Option<PathBuf> {
		directory.as_ref().ancestors()
			.map(|d| d.join(GLOBAL_SETTINGS_FILE_NAME))
			.find(|p| p.is_file())
	}

	pub fn root_directory(&self) -> &Path {
		self.file_path.parent().unwrap_or_else(|| Path::new("."))
	}

	/// `packages` relative to the solution root.
	pub fn packages_directory(&self) -> Option<PathBuf> {
		self.packages.as_ref().map(|p| self.root_directory().join(p))
	}
}

/// The directory a solution is rooted in.
/// 
/// This is the directory holding the nearest `global.json` or, failing that, the parent of the project directory.
pub fn resolve_root_directory(project_dir: impl AsRef<Path>) -> PathBuf {
	let project_dir = project_dir.as_ref();
	if let Some(global) = GlobalSettings::find(project_dir) {
		if let Some(root) = global.parent() {
			return root.to_path_buf();
		}
	}
	project_dir.parent().unwrap_or(project_dir).to_path_buf()
}

/// Finds sibling projects by name.
/// 
/// Projects are discovered once when the resolver is built. A project named `N` lives at
/// `<search path>/N/project.json`.
#[derive(Debug, Clone)]
pub struct ProjectResolver {
	search_paths: Vec<PathBuf>,
	projects: HashMap<String, PathBuf>,
	global_settings: Option<GlobalSettings>,
}

impl ProjectResolver {
	/// `root_directory` defaults to the one found by [`resolve_root_directory`].
	pub fn new(project_dir: impl AsRef<Path>, root_directory: Option<&Path>) -> Self {
		let project_dir = project_dir.as_ref();
		let root = root_directory.map(Path::to_path_buf).unwrap_or_else(|| resolve_root_directory(project_dir));

		let global_settings = GlobalSettings::find(&root).and_then(|path| {
			GlobalSettings::from_file(&path)
				.map_err(|e| log::warn!("Ignoring unreadable {}: {}", path.display(), e))
				.ok()
		});

		let mut search_paths = Vec::new();
		if let Some(parent) = project_dir.parent() {
			search_paths.push(parent.to_path_buf());
		}
		let configured = global_settings.as_ref()
			.map(|g| g.projects.clone())
			.unwrap_or_else(GlobalSettings::default_projects);
		for p in configured {
			let p = root.join(p);
			if !search_paths.contains(&p) {
				search_paths.push(p);
			}
		}

		let mut projects = HashMap::new();
		for search_path in &search_paths {
			for entry in walkdir::WalkDir::new(search_path).min_depth(1).max_depth(1).sort_by_file_name()
				.into_iter()
				.filter_map(|e| e.ok())
				.filter(|e| e.file_type().is_dir())
			{
				let name = entry.file_name().to_string_lossy().to_string();
				let project_file = entry.path().join(PROJECT_FILE_NAME);
				/* Earlier search paths take priority */
				if project_file.is_file() && !projects.contains_key(&name) {
					log::trace!("Found project {} at {}", name, project_file.display());
					projects.insert(name, project_file);
				}
			}
		}

		Self { search_paths, projects, global_settings }
	}

	pub fn search_paths(&self) -> &[PathBuf] { &self.search_paths }
	pub fn global_settings(&self) -> Option<&GlobalSettings> { self.global_settings.as_ref() }

	pub fn project_names(&self) -> impl Iterator<Item = &str> {
		self.projects.keys().map(String::as_str)
	}

	pub fn project_file(&self, name: &str) -> Option<&Path> {
		self.projects.get(name).map(PathBuf::as_path)
	}

	/// Reads the project named `name`, `None` when there is no such project.
	pub fn try_resolve_project(&self, name: &str) -> crate::Result<Option<Project>> {
		match self.projects.get(name) {
			Some(path) => Ok(Some(Project::from_file(path)?)),
			None => Ok(None),
		}
	}
}
