pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod version;
pub mod framework;
pub use framework::FrameworkMoniker;

pub mod diagnostics;
pub use diagnostics::DiagnosticMessage;

pub mod dependency_management;
pub mod project;
pub use project::Project;
pub mod lockfile;
pub use lockfile::LockFile;

pub mod providers;
pub mod walker;
pub mod library_manager;
pub use library_manager::LibraryManager;

pub mod resolution;
pub use resolution::ResolutionBuilder;
pub use resolution::Resolution;
