//! The project manifest, `project.json`.
//! 
//! Only the parts the resolver consumes are read: the version, the declared dependencies and the
//! per framework dependencies and framework assemblies.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::dependency_management::*;
use crate::framework::FrameworkMoniker;
use crate::version::{SemanticVersion, SemanticVersionRange};

mod project_resolver;
pub use project_resolver::ProjectResolver;
pub use project_resolver::GlobalSettings;
pub use project_resolver::resolve_root_directory;

pub const PROJECT_FILE_NAME: &str = "project.json";

/// Dependencies that only apply when building for one framework.
#[derive(Debug, Clone)]
pub struct TargetFrameworkInformation {
	pub framework: FrameworkMoniker,
	pub dependencies: Vec<LibraryDependency>,
}

#[derive(Debug, Clone)]
pub struct Project {
	name: String,
	version: SemanticVersion,
	project_file_path: PathBuf,
	dependencies: Vec<LibraryDependency>,
	frameworks: Vec<TargetFrameworkInformation>,
}

impl Project {
	pub fn new(name: impl Into<String>, version: SemanticVersion, project_file_path: impl Into<PathBuf>) -> Self {
		Self {
			name: name.into(),
			version,
			project_file_path: project_file_path.into(),
			dependencies: Vec::new(),
			frameworks: Vec::new(),
		}
	}

	pub fn with_dependency(mut self, dependency: impl Into<LibraryDependency>) -> Self {
		self.dependencies.push(dependency.into());
		self
	}

	pub fn with_framework(mut self, framework: FrameworkMoniker, dependencies: Vec<LibraryDependency>) -> Self {
		self.frameworks.push(TargetFrameworkInformation { framework, dependencies });
		self
	}

	/// Reads `project.json` from `directory`.
	pub fn from_directory(directory: impl AsRef<Path>) -> crate::Result<Self> {
		Self::from_file(directory.as_ref().join(PROJECT_FILE_NAME))
	}

	pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path)?;
		let json: Value = serde_json::from_str(&text)?;
		Self::read_from_json(json, path)
	}

	/// # Errors
	/// - [`Parse`](crate::Error::Parse) when a version, range, framework or target is malformed.
	/// - [`UnknownDependencyType`](crate::Error::UnknownDependencyType) for a bad `type` keyword.
	pub fn read_from_json(v: Value, project_file_path: &Path) -> crate::Result<Self> {
		use crate::Error::Parse;

		let obj = v.as_object().ok_or_else(|| Parse("project is not a JSON object".to_string()))?;

		let name = project_file_path.parent()
			.and_then(|p| p.file_name())
			.map(|n| n.to_string_lossy().to_string())
			.ok_or_else(|| Parse(format!("can't determine project name from {}", project_file_path.display())))?;

		let version = match obj.get("version") {
			Some(Value::String(s)) => SemanticVersion::parse(s)?,
			Some(_) => return Err(Parse("version must be a string".to_string())),
			None => SemanticVersion::new(1, 0, 0),
		};

		let dependencies = match obj.get("dependencies") {
			Some(deps) => read_dependencies(deps, project_file_path, false)?,
			None => Vec::new(),
		};

		let mut frameworks = Vec::new();
		if let Some(fws) = obj.get("frameworks") {
			let fws = fws.as_object().ok_or_else(|| Parse("frameworks must be an object".to_string()))?;
			for (moniker, body) in fws {
				let framework = FrameworkMoniker::parse(moniker)?;
				let mut dependencies = Vec::new();
				if let Some(body) = body.as_object() {
					if let Some(deps) = body.get("dependencies") {
						dependencies.extend(read_dependencies(deps, project_file_path, false)?);
					}
					if let Some(deps) = body.get("frameworkAssemblies") {
						dependencies.extend(read_dependencies(deps, project_file_path, true)?);
					}
				}
				frameworks.push(TargetFrameworkInformation { framework, dependencies });
			}
		}

		Ok(Self {
			name,
			version,
			project_file_path: project_file_path.to_path_buf(),
			dependencies,
			frameworks,
		})
	}

	pub fn name(&self) -> &str { &self.name }
	pub fn version(&self) -> &SemanticVersion { &self.version }
	pub fn project_file_path(&self) -> &Path { &self.project_file_path }

	pub fn project_directory(&self) -> &Path {
		self.project_file_path.parent().unwrap_or_else(|| Path::new("."))
	}

	/// Dependencies shared by every framework.
	pub fn dependencies(&self) -> &[LibraryDependency] { &self.dependencies }
	pub fn frameworks(&self) -> &[TargetFrameworkInformation] { &self.frameworks }

	pub fn get_target_framework(&self, framework: &FrameworkMoniker) -> Option<&TargetFrameworkInformation> {
		self.frameworks.iter().find(|f| &f.framework == framework)
	}

	/// Shared dependencies followed by the ones specific to `framework`.
	pub fn dependencies_for(&self, framework: &FrameworkMoniker) -> Vec<LibraryDependency> {
		let mut deps = self.dependencies.clone();
		if let Some(info) = self.get_target_framework(framework) {
			deps.extend(info.dependencies.iter().cloned());
		}
		deps
	}
}

/// Reads a `"Name": "range"` or `"Name": { "version", "type", "target" }` map.
fn read_dependencies(v: &Value, project_file_path: &Path, framework_assemblies: bool) -> crate::Result<Vec<LibraryDependency>> {
	use crate::Error::Parse;

	let map: &Map<String, Value> = v.as_object().ok_or_else(|| Parse("dependencies must be an object".to_string()))?;
	let mut dependencies = Vec::with_capacity(map.len());

	for (name, value) in map {
		let (version, keywords, target) = match value {
			Value::String(s) => (Some(s.as_str()), None, None),
			Value::Object(o) => (get_str(o, "version", name)?, get_str(o, "type", name)?, get_str(o, "target", name)?),
			_ => return Err(Parse(format!("dependency `{}` must be a string or object", name))),
		};

		let mut range = LibraryRange::new(name.clone()).with_source(project_file_path, 0, 0);

		if let Some(version) = version.filter(|v| !v.trim().is_empty()) {
			range = range.with_version_range(SemanticVersionRange::parse(version)?);
		}

		if framework_assemblies {
			range = range.with_allowed_types([LibraryType::ReferenceAssembly.as_str(), LibraryType::GlobalCache.as_str()]);
		} else if let Some(target) = target {
			let allowed = match target {
				"project" => LibraryType::Project,
				"package" => LibraryType::Package,
				_ => return Err(Parse(format!("unknown target `{}` for dependency `{}`", target, name))),
			};
			range = range.with_allowed_types([allowed.as_str()]);
		}

		let dependency_type = LibraryDependencyType::parse(keywords.unwrap_or_default())?;
		dependencies.push(LibraryDependency::new(range, dependency_type));
	}

	Ok(dependencies)
}

fn get_str<'a>(o: &'a Map<String, Value>, key: &str, dependency: &str) -> crate::Result<Option<&'a str>> {
	match o.get(key) {
		Some(Value::String(s)) => Ok(Some(s.as_str())),
		Some(_) => Err(crate::Error::Parse(format!("`{}` of dependency `{}` must be a string", key, dependency))),
		None => Ok(None),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use serde_json::json;

	fn read(v: Value) -> crate::Result<Project> {
		Project::read_from_json(v, Path::new("/src/App/project.json"))
	}

	#[test]
	fn name_comes_from_directory() {
		let project = read(json!({})).unwrap();
		assert_eq!(project.name(), "App");
		assert_eq!(project.version(), &SemanticVersion::new(1, 0, 0));
		assert_eq!(project.project_directory(), Path::new("/src/App"));
	}

	#[test]
	fn dependencies_keep_declaration_order() {
		let project = read(json!({
			"version": "2.1.0",
			"dependencies": {
				"Zeta": "1.0.0",
				"Alpha": { "version": "[1.0.0, 2.0.0)", "type": "build", "target": "package" },
				"Lib": { "target": "project" }
			}
		})).unwrap();

		let names = project.dependencies().iter().map(|d| d.name()).collect::<Vec<_>>();
		assert_eq!(names, ["Zeta", "Alpha", "Lib"]);

		let alpha = &project.dependencies()[1];
		assert!(alpha.library_range.allows_type("Package"));
		assert!(!alpha.library_range.allows_type("Project"));
		assert!(alpha.dependency_type.contains(LibraryDependencyTypeFlag::PREPROCESS_COMPONENT));
		assert!(project.dependencies()[2].library_range.version_range().is_none());
	}

	#[test]
	fn framework_specific_dependencies() {
		let project = read(json!({
			"dependencies": { "Shared": "1.0.0" },
			"frameworks": {
				"dnx451": {
					"dependencies": { "DesktopOnly": "1.0.0" },
					"frameworkAssemblies": { "System.Xml": "" }
				},
				"dnxcore50": {}
			}
		})).unwrap();

		let dnx451 = FrameworkMoniker::parse("dnx451").unwrap();
		let deps = project.dependencies_for(&dnx451);
		assert_eq!(deps.iter().map(|d| d.name()).collect::<Vec<_>>(), ["Shared", "DesktopOnly", "System.Xml"]);
		assert!(deps[2].library_range.is_framework_reference());

		let core = FrameworkMoniker::parse("dnxcore50").unwrap();
		assert_eq!(project.dependencies_for(&core).len(), 1);
	}

	#[test]
	fn unknown_type_keyword_is_fatal() {
		let r = read(json!({ "dependencies": { "Foo": { "version": "1.0.0", "type": "sometimes" } } }));
		assert!(matches!(r, Err(crate::Error::UnknownDependencyType(_))));
	}

	#[test]
	fn unknown_target_fails() {
		let r = read(json!({ "dependencies": { "Foo": { "target": "tarball" } } }));
		assert!(matches!(r, Err(crate::Error::Parse(_))));
	}
}
