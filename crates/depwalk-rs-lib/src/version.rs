//! Library versions and the ranges used to request them.

mod semantic_version;
pub use semantic_version::SemanticVersion;

mod version_range;
pub use version_range::SemanticVersionRange;
