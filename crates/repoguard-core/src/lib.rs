#![deny(missing_docs)]

//! # repoguard-core: Monorepo Convention Checks
//!
//! Static checks that keep a large multi-project source tree buildable.
//! The centrepiece is solution filter closure validation: every solution
//! filter must list the complete transitive closure of its projects'
//! references, otherwise building the filter breaks only later in CI.
//!
//! ## Components
//!
//! - [`path`]: resolves backslash-dialect references against OS-native
//!   paths and verifies on-disk letter casing.
//! - [`project`]: reads MSBuild project descriptors and yields their
//!   direct reference edges.
//! - [`closure`](mod@closure): breadth-first closure walk reporting projects a filter
//!   is missing.
//! - [`filter`]: parses solution filter descriptors into seed sets.
//! - [`context`] / [`report`]: explicit repository context and per-filter
//!   reports for the calling layer.
//!
//! Every check is read-only with respect to the repository and recomputes
//! its view of the graph from disk on each run.

pub mod closure;
pub mod context;
pub mod error;
pub mod filter;
pub mod path;
pub mod project;
pub mod project_path;
pub mod report;

// Re-export primary types at crate root for ergonomic imports.
pub use closure::{closure, missing_dependencies};
pub use context::{RepoContext, RepoguardConfig};
pub use error::{RepoError, RepoResult};
pub use filter::{BrokenPath, BrokenPathKind, LoadedFilter, SolutionFilter};
pub use path::{resolve_reference, resolve_relative, verify_exact_casing};
pub use project::{DependencySource, MsBuildProjectReader, ProjectFile};
pub use project_path::{ProjectPath, SeedSet};
pub use report::{validate_filter, validate_filters, FilterReport};
