//! Read access to the result of a walk.

use std::collections::HashMap;

use petgraph::prelude::*;
use petgraph::visit::DfsPostOrder;

use crate::dependency_management::*;
use crate::diagnostics::DiagnosticMessage;
use crate::framework::FrameworkMoniker;
use crate::walker::{DependencyGraph, ResolvedGraph};

/// Owns the resolved graph of one walk.
/// 
/// Global diagnostics can only be added while the manager is still owned by whoever ran the walk,
/// after that it is only read and can be shared between threads.
#[derive(Debug)]
pub struct LibraryManager {
	graph: DependencyGraph,
	nodes: HashMap<String, NodeIndex>,
	root: NodeIndex,
	framework: FrameworkMoniker,
	walk_diagnostics: Vec<DiagnosticMessage>,
	global_diagnostics: Vec<DiagnosticMessage>,
}

impl LibraryManager {
	pub fn new(resolved: ResolvedGraph) -> Self {
		Self {
			graph: resolved.graph,
			nodes: resolved.nodes,
			root: resolved.root,
			framework: resolved.framework,
			walk_diagnostics: resolved.diagnostics,
			global_diagnostics: Vec::new(),
		}
	}

	/// Records a problem that doesn't belong to any one library, such as a missing lock file.
	pub fn add_global_diagnostics(&mut self, message: DiagnosticMessage) {
		self.global_diagnostics.push(message);
	}

	pub fn framework(&self) -> &FrameworkMoniker { &self.framework }
	pub fn graph(&self) -> &DependencyGraph { &self.graph }

	pub fn root(&self) -> &LibraryDescription {
		&self.graph[self.root]
	}

	pub fn get_library_description(&self, name: &str) -> Option<&LibraryDescription> {
		self.nodes.get(name).map(|i| &self.graph[*i])
	}

	pub fn get_library_descriptions(&self) -> impl Iterator<Item = &LibraryDescription> {
		self.graph.node_weights()
	}

	pub fn get_library(&self, name: &str) -> Option<Library> {
		self.get_library_description(name).map(LibraryDescription::to_library)
	}

	pub fn get_libraries(&self) -> Vec<Library> {
		self.get_library_descriptions().map(LibraryDescription::to_library).collect()
	}

	/// Libraries which directly depend on `name`.
	pub fn get_referencing_libraries(&self, name: &str) -> Vec<Library> {
		let index = match self.nodes.get(name) {
			Some(i) => *i,
			None => return Vec::new(),
		};
		let mut referencing = self.graph.neighbors_directed(index, Incoming)
			.map(|i| self.graph[i].to_library())
			.collect::<Vec<_>>();
		referencing.sort_by(|a, b| a.name().cmp(b.name()));
		referencing
	}

	/// Dependencies before the libraries depending on them, ending with the root.
	/// 
	/// Inside a cycle the order is arbitrary.
	pub fn dependency_order(&self) -> Vec<&LibraryDescription> {
		let mut order = Vec::with_capacity(self.graph.node_count());
		let mut dfs = DfsPostOrder::new(&self.graph, self.root);
		while let Some(i) = dfs.next(&self.graph) {
			order.push(&self.graph[i]);
		}
		order
	}

	pub fn get_global_diagnostics(&self) -> &[DiagnosticMessage] {
		&self.global_diagnostics
	}

	/// Global diagnostics followed by everything found during the walk.
	pub fn get_all_diagnostics(&self) -> Vec<DiagnosticMessage> {
		self.global_diagnostics.iter().chain(self.walk_diagnostics.iter()).cloned().collect()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::diagnostics::DiagnosticMessageSeverity;
	use crate::version::SemanticVersion;

	fn description(name: &str) -> LibraryDescription {
		LibraryDescription::new(
			LibraryRange::new(name),
			LibraryIdentity::new(name, SemanticVersion::new(1, 0, 0), LibraryType::Package),
			None,
			Vec::new(),
			Vec::new(),
			FrameworkMoniker::parse("dnx451").unwrap(),
		)
	}

	/// Root -> A -> C, Root -> B -> C
	fn manager() -> LibraryManager {
		let mut graph = DependencyGraph::default();
		let mut nodes = HashMap::new();
		for name in ["Root", "A", "B", "C"] {
			nodes.insert(name.to_string(), graph.add_node(description(name)));
		}
		for (from, to) in [("Root", "A"), ("Root", "B"), ("A", "C"), ("B", "C")] {
			graph.add_edge(nodes[from], nodes[to], LibraryDependencyType::default());
		}
		let root = nodes["Root"];
		LibraryManager::new(ResolvedGraph {
			graph,
			nodes,
			root,
			framework: FrameworkMoniker::parse("dnx451").unwrap(),
			diagnostics: vec![DiagnosticMessage::new("walk", "project.json", DiagnosticMessageSeverity::Warning)],
			states: Default::default(),
		})
	}

	#[test]
	fn lookup() {
		let m = manager();
		assert_eq!(m.root().name(), "Root");
		assert_eq!(m.get_library("C").unwrap().version(), "1.0.0");
		assert!(m.get_library("Missing").is_none());
		assert_eq!(m.get_libraries().len(), 4);
	}

	#[test]
	fn referencing_libraries() {
		let m = manager();
		let names = m.get_referencing_libraries("C").iter().map(|l| l.name().to_string()).collect::<Vec<_>>();
		assert_eq!(names, ["A", "B"]);
		assert!(m.get_referencing_libraries("Root").is_empty());
	}

	#[test]
	fn dependencies_come_first() {
		let m = manager();
		let order = m.dependency_order().iter().map(|d| d.name()).collect::<Vec<_>>();
		assert_eq!(order.len(), 4);
		assert_eq!(order[0], "C");
		assert_eq!(order[3], "Root");
	}

	#[test]
	fn global_diagnostics_come_first() {
		let mut m = manager();
		m.add_global_diagnostics(DiagnosticMessage::new("global", "project.lock.json", DiagnosticMessageSeverity::Error));
		let all = m.get_all_diagnostics();
		assert_eq!(all.iter().map(|d| d.message()).collect::<Vec<_>>(), ["global", "walk"]);
		assert_eq!(m.get_global_diagnostics().len(), 1);
	}
}
