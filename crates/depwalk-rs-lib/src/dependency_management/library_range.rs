use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::version::SemanticVersionRange;
use super::LibraryType;

/// Where a request was written, kept so diagnostics can point at it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SourceLocation {
	pub file: PathBuf,
	pub line: u32,
	pub column: u32,
}

/// A named request for a library.
/// 
/// An empty `allowed_types` set places no constraint on the kind of library that may satisfy it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryRange {
	name: String,
	version_range: Option<SemanticVersionRange>,
	allowed_types: BTreeSet<String>,
	source: SourceLocation,
}

impl LibraryRange {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			version_range: None,
			allowed_types: Default::default(),
			source: Default::default(),
		}
	}

	pub fn with_version_range(mut self, version_range: SemanticVersionRange) -> Self {
		self.version_range = Some(version_range);
		self
	}

	pub fn with_allowed_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.allowed_types = types.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_source(mut self, file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
		self.source = SourceLocation { file: file.into(), line, column };
		self
	}

	pub fn name(&self) -> &str { &self.name }
	pub fn version_range(&self) -> Option<&SemanticVersionRange> { self.version_range.as_ref() }
	pub fn allowed_types(&self) -> &BTreeSet<String> { &self.allowed_types }
	pub fn source(&self) -> &SourceLocation { &self.source }

	/// The range must be either unconstrained or have `library_type` as an allowed type.
	pub fn allows_type(&self, library_type: &str) -> bool {
		self.allowed_types.is_empty() || self.allowed_types.contains(library_type)
	}

	/// A reference to an assembly provided by the framework or machine cache rather than a package or project.
	pub fn is_framework_reference(&self) -> bool {
		!self.allowed_types.is_empty()
			&& self.allowed_types.iter().all(|t| t == LibraryType::ReferenceAssembly.as_str() || t == LibraryType::GlobalCache.as_str())
	}
}

/// `types/Name range`, `*` standing in for unconstrained types.
impl std::fmt::Display for LibraryRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.allowed_types.is_empty() {
			write!(f, "*")?;
		} else {
			write!(f, "{}", self.allowed_types.iter().cloned().collect::<Vec<_>>().join("||"))?;
		}
		write!(f, "/{}", self.name)?;
		if let Some(range) = &self.version_range {
			write!(f, " {}", range)?;
		}
		Ok(())
	}
}
