use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;

use depwalk_rs::*;
use depwalk_rs::dependency_management::{properties, LibraryType};
use depwalk_rs::providers::DirectoryFrameworkReferenceResolver;
use depwalk_rs_test_utils::{TestSolution, LockFileBuilder};

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn dnx451() -> FrameworkMoniker {
	FrameworkMoniker::parse("dnx451").unwrap()
}

fn resolve(solution: &TestSolution, project: &str) -> depwalk_rs::Result<Resolution> {
	let project = solution.load_project(project).unwrap();
	ResolutionBuilder::new(project, dnx451())
		.config(solution.config().unwrap())
		.framework_resolver(Arc::new(DirectoryFrameworkReferenceResolver::new(solution.reference_assemblies_dir())))
		.build()
}

/// Every name reachable from the root appears exactly once.
fn assert_one_node_per_name(manager: &LibraryManager) {
	let mut requested = HashSet::new();
	requested.insert(manager.root().name().to_string());
	for description in manager.get_library_descriptions() {
		for dependency in &description.dependencies {
			requested.insert(dependency.name().to_string());
		}
	}
	let names = manager.get_library_descriptions().map(|d| d.name().to_string()).collect::<Vec<_>>();
	assert_eq!(names.len(), requested.len());
	assert_eq!(names.into_iter().collect::<HashSet<_>>(), requested);
}

#[test]
fn resolve_fixture_solution() {
	init_logging();
	let solution = TestSolution::from_fixture("simple-solution").unwrap();
	solution.add_reference_assemblies("dnx451", &["System.Xml"]).unwrap();

	let resolution = resolve(&solution, "App").unwrap();
	let manager = resolution.library_manager();

	assert!(manager.get_all_diagnostics().is_empty(), "{:?}", manager.get_all_diagnostics());
	assert_one_node_per_name(manager);

	let app = manager.root();
	assert_eq!(app.name(), "App");
	assert_eq!(app.identity.library_type(), LibraryType::Project);

	let lib = manager.get_library("Lib").unwrap();
	assert_eq!(lib.library_type(), "Project");
	assert_eq!(lib.get_property(properties::PROJECT).unwrap().name(), "Lib");

	let json = manager.get_library("Newtonsoft.Json").unwrap();
	assert_eq!(json.version(), "6.0.8");
	assert_eq!(json.library_type(), "Package");
	assert!(json.path().ends_with("6.0.8"));
	assert!(json.path().starts_with(&*solution.root().join("packages").to_string_lossy()));
	assert_eq!(json.get_property(properties::LOCKED_LIBRARY).unwrap().assemblies, ["lib/net45/Newtonsoft.Json.dll"]);

	let xml = manager.get_library_description("System.Xml").unwrap();
	assert!(xml.resolved);
	assert!(xml.compatible);
	assert_eq!(xml.identity.library_type(), LibraryType::ReferenceAssembly);

	let referencing = manager.get_referencing_libraries("Newtonsoft.Json").iter().map(|l| l.name().to_string()).collect::<Vec<_>>();
	assert_eq!(referencing, ["App", "Lib"]);

	let order = manager.dependency_order().iter().map(|d| d.name()).collect::<Vec<_>>();
	assert_eq!(order.last(), Some(&"App"));
	let position = |name: &str| order.iter().position(|n| *n == name).unwrap();
	assert!(position("Newtonsoft.Json") < position("Lib"));
}

#[test]
fn circular_projects_terminate() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({ "dependencies": { "A": "" } })).unwrap();
	solution.add_project("A", json!({ "dependencies": { "B": "" } })).unwrap();
	solution.add_project("B", json!({ "dependencies": { "A": "" } })).unwrap();

	let resolution = resolve(&solution, "App").unwrap();
	let manager = resolution.library_manager();

	assert_one_node_per_name(manager);
	assert_eq!(manager.get_library_descriptions().count(), 3);
	assert!(manager.get_library_descriptions().all(|d| d.resolved && d.compatible));
	assert_eq!(manager.get_referencing_libraries("A").len(), 2);
	assert_eq!(manager.dependency_order().len(), 3);
}

#[test]
fn first_resolution_wins() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({
		"dependencies": {
			"Util": "",
			"Shared": { "version": "5.0.0", "target": "package" }
		}
	})).unwrap();
	solution.add_project("Util", json!({ "dependencies": { "Shared": "" } })).unwrap();
	solution.add_project("Shared", json!({ "version": "1.0.0" })).unwrap();

	let resolution = resolve(&solution, "App").unwrap();
	let manager = resolution.library_manager();
	let shared = manager.get_library_description("Shared").unwrap();

	/* Util's request came first and accepts a project */
	assert!(shared.requested_range.allowed_types().is_empty());
	assert_eq!(shared.identity.library_type(), LibraryType::Project);
	assert!(shared.path.as_ref().unwrap().ends_with("Shared/project.json"));
	assert!(shared.resolved);
	assert!(shared.compatible);

	/* App's later request is reported but changes nothing */
	let diagnostics = manager.get_all_diagnostics();
	assert!(diagnostics.iter().any(|d| d.is_error() && d.message().contains("doesn't allow")));
	assert!(diagnostics.iter().any(|d| d.message().starts_with("Dependency specified was")));
}

#[test]
fn disallowed_type_is_incompatible() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({
		"dependencies": { "Shared": { "target": "package" } }
	})).unwrap();
	solution.add_project("Shared", json!({})).unwrap();

	let resolution = resolve(&solution, "App").unwrap();
	let manager = resolution.library_manager();
	let shared = manager.get_library_description("Shared").unwrap();

	assert!(shared.resolved);
	assert!(!shared.compatible);
	for description in manager.get_library_descriptions() {
		assert!(description.compatible || description.resolved);
	}
}

#[test]
fn unknown_dependency_type_is_fatal() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({ "dependencies": { "Broken": "" } })).unwrap();
	solution.add_project("Broken", json!({ "dependencies": { "Foo": { "type": "sometimes" } } })).unwrap();

	let project = solution.load_project("App").unwrap();
	let result = ResolutionBuilder::new(project, dnx451()).config(solution.config().unwrap()).build();
	assert!(matches!(result, Err(Error::UnknownDependencyType(_))));
}

#[test]
fn missing_project_is_fatal() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	let result = Resolution::from_directory(solution.project_dir("Nothing"), dnx451());
	assert!(matches!(result, Err(Error::ProjectNotFound(_))));
}

#[test]
fn project_missing_framework_is_unresolved() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({ "dependencies": { "CoreOnly": "" }, "frameworks": { "dnx451": {} } })).unwrap();
	solution.add_project("CoreOnly", json!({ "frameworks": { "dnxcore50": {} } })).unwrap();

	let resolution = resolve(&solution, "App").unwrap();
	let core_only = resolution.library_manager().get_library_description("CoreOnly").unwrap();
	assert!(!core_only.resolved);
	assert!(core_only.compatible);
}

#[test]
fn project_provider_beats_locked_package() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({
		"dependencies": { "Shared": "", "Other": "" },
		"frameworks": { "dnx451": {} }
	})).unwrap();
	solution.add_project("Shared", json!({})).unwrap();
	let lock = LockFileBuilder::new().framework("dnx451").unwrap()
		.package("Shared", "1.0.0", &[]).unwrap()
		.package("Other", "2.0.0", &[]).unwrap()
		.build();
	solution.write_lock_file("App", &lock).unwrap();

	let resolution = resolve(&solution, "App").unwrap();
	let manager = resolution.library_manager();
	assert!(manager.get_all_diagnostics().is_empty(), "{:?}", manager.get_all_diagnostics());
	assert_eq!(manager.get_library_description("Shared").unwrap().identity.library_type(), LibraryType::Project);
	assert_eq!(manager.get_library_description("Other").unwrap().identity.library_type(), LibraryType::Package);
}

#[test]
fn reference_assembly_beats_gac() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({
		"frameworks": { "dnx451": { "frameworkAssemblies": { "System.Web": "", "System.Drawing": "" } } }
	})).unwrap();
	solution.add_reference_assemblies("dnx451", &["System.Web"]).unwrap();
	let gac = solution.root().join("gac");
	for name in ["System.Web", "System.Drawing"] {
		let dir = gac.join(name).join("4.0.0.0__b03f5f7f11d50a3a");
		std::fs::create_dir_all(&dir).unwrap();
		std::fs::write(dir.join(format!("{}.dll", name)), "").unwrap();
	}
	solution.write_lock_file("App", &LockFileBuilder::new().framework("dnx451").unwrap().build()).unwrap();

	let mut config = solution.config().unwrap();
	assert_eq!(config.set_gac_dirs(vec![gac]), 1);
	let resolution = ResolutionBuilder::new(solution.load_project("App").unwrap(), dnx451())
		.config(config)
		.framework_resolver(Arc::new(DirectoryFrameworkReferenceResolver::new(solution.reference_assemblies_dir())))
		.build()
		.unwrap();
	let manager = resolution.library_manager();

	let web = manager.get_library_description("System.Web").unwrap();
	assert!(web.resolved);
	assert_eq!(web.identity.library_type(), LibraryType::ReferenceAssembly);
	let drawing = manager.get_library_description("System.Drawing").unwrap();
	assert!(drawing.resolved);
	assert_eq!(drawing.identity.library_type(), LibraryType::GlobalCache);
}

#[test]
fn parallel_walks() {
	init_logging();
	let solution = TestSolution::new().unwrap();
	solution.add_project("App", json!({ "dependencies": { "Lib": "" } })).unwrap();
	solution.add_project("Tool", json!({ "dependencies": { "Lib": "", "Missing": "1.0.0" } })).unwrap();
	solution.add_project("Lib", json!({})).unwrap();
	let lock = LockFileBuilder::new().framework("dnx451").unwrap().build();
	solution.write_lock_file("App", &lock).unwrap();

	let projects = vec![solution.load_project("App").unwrap(), solution.load_project("Tool").unwrap()];
	let managers = depwalk_rs::resolution::resolve_project_graphs(projects, &dnx451(), &solution.config().unwrap());

	assert_eq!(managers.len(), 2);
	let app = managers[0].as_ref().unwrap();
	let tool = managers[1].as_ref().unwrap();
	assert_eq!(app.root().name(), "App");
	assert_eq!(tool.root().name(), "Tool");
	assert!(app.get_library("Lib").is_some());
	assert!(!tool.get_library_description("Missing").unwrap().resolved);
}
