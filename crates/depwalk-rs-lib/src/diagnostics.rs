//! Problems found while resolving, reported as data rather than errors.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticMessageSeverity {
	Info,
	Warning,
	Error,
}

impl std::fmt::Display for DiagnosticMessageSeverity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DiagnosticMessageSeverity::Info => write!(f, "info"),
			DiagnosticMessageSeverity::Warning => write!(f, "warning"),
			DiagnosticMessageSeverity::Error => write!(f, "error"),
		}
	}
}

/// A position inside a file, both 1 based. Zero means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
	pub line: u32,
	pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
	message: String,
	file_path: PathBuf,
	severity: DiagnosticMessageSeverity,
	position: Option<Position>,
}

impl DiagnosticMessage {
	pub fn new(message: impl Into<String>, file_path: impl Into<PathBuf>, severity: DiagnosticMessageSeverity) -> Self {
		Self {
			message: message.into(),
			file_path: file_path.into(),
			severity,
			position: None,
		}
	}

	pub fn with_position(mut self, line: u32, column: u32) -> Self {
		self.position = Some(Position { line, column });
		self
	}

	pub fn message(&self) -> &str { &self.message }
	pub fn file_path(&self) -> &Path { &self.file_path }
	pub fn severity(&self) -> DiagnosticMessageSeverity { self.severity }
	pub fn position(&self) -> Option<Position> { self.position }

	pub fn is_error(&self) -> bool {
		self.severity == DiagnosticMessageSeverity::Error
	}
}

/// `file(line,column): severity: message`
impl std::fmt::Display for DiagnosticMessage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.file_path.display())?;
		if let Some(p) = self.position {
			write!(f, "({},{})", p.line, p.column)?;
		}
		write!(f, ": {}: {}", self.severity, self.message)
	}
}

/// Checks if any of `diagnostics` should fail a build.
pub fn has_errors<'a>(diagnostics: impl IntoIterator<Item = &'a DiagnosticMessage>) -> bool {
	diagnostics.into_iter().any(DiagnosticMessage::is_error)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn display_includes_position() {
		let d = DiagnosticMessage::new("broken", "a/project.json", DiagnosticMessageSeverity::Error).with_position(3, 7);
		assert_eq!(d.to_string(), "a/project.json(3,7): error: broken");
	}

	#[test]
	fn warnings_are_not_errors() {
		let d = [DiagnosticMessage::new("hmm", "x", DiagnosticMessageSeverity::Warning)];
		assert!(!has_errors(&d));
	}
}
