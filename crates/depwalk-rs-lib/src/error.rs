//! Library error type.
//! 
//! Only malformed input ends up here. Anything the resolver can recover from is recorded as
//! node state and [`crate::diagnostics::DiagnosticMessage`]s instead.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("unknown dependency type keyword `{0}`")]
	UnknownDependencyType(String),
	#[error("unable to resolve project from {}", .0.display())]
	ProjectNotFound(std::path::PathBuf),
}
