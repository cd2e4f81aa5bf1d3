//! The walk from a root project to a complete graph of [`LibraryDescription`]s.
//! 
//! # Rules
//! - Each range is offered to the providers in order and the first description returned becomes the node.
//! - There is only ever one node per library name. The first range to reach a name decides what it
//! resolves to, later ranges for the same name are checked against it but never re-resolve it.
//! This doesn't attempt to find a version satisfying every requester.
//! - A library requested by one of its own dependents is linked but not expanded again.
//! 
//! Resolution problems never fail the walk, they end up as node state and [`DiagnosticMessage`]s.

use std::collections::HashMap;

use petgraph::prelude::*;

use crate::dependency_management::*;
use crate::diagnostics::{DiagnosticMessage, DiagnosticMessageSeverity};
use crate::framework::FrameworkMoniker;
use crate::project::Project;
use crate::providers::DependencyProvider;
use crate::version::{SemanticVersion, SemanticVersionRange};

/// Nodes are libraries, edges point from a library to its dependency.
pub type DependencyGraph = DiGraph<LibraryDescription, LibraryDependencyType>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
	Unvisited,
	InProgress,
	/// Terminal, `resolved` is `true`.
	Resolved,
	/// Terminal, `resolved` is `false`.
	Unsatisfied,
}

/// The frozen result of a walk.
#[derive(Debug)]
pub struct ResolvedGraph {
	pub graph: DependencyGraph,
	pub nodes: HashMap<String, NodeIndex>,
	pub root: NodeIndex,
	pub framework: FrameworkMoniker,
	pub diagnostics: Vec<DiagnosticMessage>,
	/// Final state of every name reached, always [`NodeState::Resolved`] or [`NodeState::Unsatisfied`].
	pub states: HashMap<String, NodeState>,
}

impl ResolvedGraph {
	pub fn state(&self, name: &str) -> NodeState {
		self.states.get(name).copied().unwrap_or(NodeState::Unvisited)
	}
}

pub struct DependencyWalker {
	providers: Vec<Box<dyn DependencyProvider>>,
}

struct WalkState<'p> {
	providers: &'p [Box<dyn DependencyProvider>],
	framework: FrameworkMoniker,
	graph: DependencyGraph,
	nodes: HashMap<String, NodeIndex>,
	/// A name stays [`NodeState::InProgress`] while its dependencies are being expanded.
	states: HashMap<String, NodeState>,
	diagnostics: Vec<DiagnosticMessage>,
}

impl DependencyWalker {
	/// `providers` are queried in the order given.
	pub fn new(providers: Vec<Box<dyn DependencyProvider>>) -> Self {
		Self { providers }
	}

	/// Walks the graph below the library `name` at exactly `version`.
	/// 
	/// # Errors
	/// Only when a provider fails on malformed input.
	pub fn walk(self, name: &str, version: SemanticVersion, framework: &FrameworkMoniker) -> crate::Result<ResolvedGraph> {
		let root_range = LibraryRange::new(name).with_version_range(SemanticVersionRange::exact(version));
		self.walk_range(root_range, framework)
	}

	/// Walks `project` as the root, so problems with the root point at its `project.json`.
	pub fn walk_project(self, project: &Project, framework: &FrameworkMoniker) -> crate::Result<ResolvedGraph> {
		let root_range = LibraryRange::new(project.name())
			.with_version_range(SemanticVersionRange::exact(project.version().clone()))
			.with_source(project.project_file_path(), 0, 0);
		self.walk_range(root_range, framework)
	}

	pub fn walk_range(self, root_range: LibraryRange, framework: &FrameworkMoniker) -> crate::Result<ResolvedGraph> {
		log::debug!("Walking {} for {}", root_range, framework);
		let mut state = WalkState {
			providers: &self.providers,
			framework: framework.clone(),
			graph: Default::default(),
			nodes: Default::default(),
			states: Default::default(),
			diagnostics: Default::default(),
		};

		let root = state.visit(&root_range, None)?;
		state.report_nodes();

		log::debug!("Walk of {} finished with {} libraries", root_range.name(), state.graph.node_count());
		Ok(ResolvedGraph {
			graph: state.graph,
			nodes: state.nodes,
			root,
			framework: framework.clone(),
			diagnostics: state.diagnostics,
			states: state.states,
		})
	}
}

impl<'p> WalkState<'p> {
	fn state(&self, name: &str) -> NodeState {
		self.states.get(name).copied().unwrap_or(NodeState::Unvisited)
	}

	/// Processes `range`, linking it from `parent` when there is one.
	fn visit(&mut self, range: &LibraryRange, parent: Option<(NodeIndex, LibraryDependencyType)>) -> crate::Result<NodeIndex> {
		if let Some(&index) = self.nodes.get(range.name()) {
			if self.state(range.name()) == NodeState::InProgress {
				log::trace!("Cycle back to {}, not expanding", range.name());
			} else {
				log::trace!("Reusing {} for {}", self.graph[index].identity, range);
			}
			if let Some((p, t)) = parent {
				self.graph.update_edge(p, index, t);
			}
			self.check_later_request(range, index);
			return Ok(index)
		}

		self.states.insert(range.name().to_string(), NodeState::InProgress);

		let mut found = None;
		for provider in self.providers {
			log::trace!("Asking {} provider for {}", provider.name(), range);
			if let Some(d) = provider.get_description(range, &self.framework)? {
				found = Some(d);
				break;
			}
		}
		let mut description = found.unwrap_or_else(|| LibraryDescription::unresolved(range.clone(), self.framework.clone()));

		if description.resolved && !range.allows_type(description.identity.library_type().as_str()) {
			description.compatible = false;
		}
		if description.resolved {
			self.check_version(range, &description.identity);
		}

		let resolved = description.resolved;
		let dependencies = description.dependencies.clone();
		let index = self.graph.add_node(description);
		self.nodes.insert(range.name().to_string(), index);
		if let Some((p, t)) = parent {
			self.graph.update_edge(p, index, t);
		}

		for dependency in &dependencies {
			self.visit(&dependency.library_range, Some((index, dependency.dependency_type)))?;
		}

		let state = if resolved { NodeState::Resolved } else { NodeState::Unsatisfied };
		self.states.insert(range.name().to_string(), state);
		Ok(index)
	}

	/// A later request can't change the node but is still held to its own constraints.
	fn check_later_request(&mut self, range: &LibraryRange, index: NodeIndex) {
		let existing = &self.graph[index];
		if !existing.resolved {
			return
		}
		let identity = existing.identity.clone();
		if !range.allows_type(identity.library_type().as_str()) {
			self.diagnostics.push(diagnostic(
				range,
				format!("The dependency {} was already resolved to {} of type {} which it doesn't allow.", range, identity, identity.library_type()),
				DiagnosticMessageSeverity::Error,
			));
		}
		self.check_version(range, &identity);
	}

	fn check_version(&mut self, range: &LibraryRange, identity: &LibraryIdentity) {
		if let (Some(version_range), Some(version)) = (range.version_range(), identity.version()) {
			if !version_range.satisfies(version) {
				self.diagnostics.push(diagnostic(
					range,
					format!("Dependency specified was {} but ended up with {}.", range, identity),
					DiagnosticMessageSeverity::Warning,
				));
			}
		}
	}

	/// One error for every node that ended unsatisfied or incompatible.
	fn report_nodes(&mut self) {
		for description in self.graph.node_weights() {
			let range = &description.requested_range;
			if !description.resolved {
				self.diagnostics.push(diagnostic(
					range,
					format!("The dependency {} could not be resolved.", range),
					DiagnosticMessageSeverity::Error,
				));
			} else if !description.compatible {
				self.diagnostics.push(diagnostic(
					range,
					format!("The dependency {} was resolved to {} of type {} which it doesn't allow.", range, description.identity, description.identity.library_type()),
					DiagnosticMessageSeverity::Error,
				));
			}
		}
	}
}

fn diagnostic(range: &LibraryRange, message: String, severity: DiagnosticMessageSeverity) -> DiagnosticMessage {
	let source = range.source();
	let d = DiagnosticMessage::new(message, source.file.clone(), severity);
	if source.line > 0 {
		d.with_position(source.line, source.column)
	} else {
		d
	}
}
