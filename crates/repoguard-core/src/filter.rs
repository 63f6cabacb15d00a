//! # Solution Filter Descriptors
//!
//! A solution filter (`*.slnf`) names a home solution and the subset of its
//! projects to load:
//!
//! ```json
//! {
//!   "solution": {
//!     "path": "..\\..\\Monorepo.sln",
//!     "projects": ["Components\\Web\\Src\\Web.csproj"]
//!   }
//! }
//! ```
//!
//! The home solution path is relative to the descriptor's directory. Project
//! entries are relative to the repository root and are joined as plain
//! paths: no up-directory marker handling applies here. Both are anchored
//! and lexically normalized so they compare equal to resolved references.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RepoError, RepoResult};
use crate::path::{absolute, clean_separators, normalize};
use crate::project_path::{ProjectPath, SeedSet};

#[derive(Debug, Deserialize)]
struct SolutionFilterFile {
    solution: Option<SolutionSection>,
}

#[derive(Debug, Deserialize)]
struct SolutionSection {
    path: Option<String>,
    projects: Option<Vec<String>>,
}

/// Entry point for reading filter descriptors.
#[derive(Debug, Clone, Copy)]
pub struct SolutionFilter;

impl SolutionFilter {
    /// Load the descriptor at `filter_path`, resolving projects against
    /// `repo_root`.
    ///
    /// # Errors
    ///
    /// - [`RepoError::Io`] if the descriptor cannot be read.
    /// - [`RepoError::MalformedFilter`] if it is not valid JSON.
    /// - [`RepoError::MissingField`] if `solution`, `solution.path` or
    ///   `solution.projects` is absent, or the path is blank.
    pub fn load(filter_path: &Path, repo_root: &Path) -> RepoResult<LoadedFilter> {
        let content =
            std::fs::read_to_string(filter_path).map_err(|e| RepoError::io(filter_path, e))?;
        Self::parse(filter_path, &content, repo_root)
    }

    /// Parse descriptor `content` as if read from `filter_path`.
    pub fn parse(filter_path: &Path, content: &str, repo_root: &Path) -> RepoResult<LoadedFilter> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let file: SolutionFilterFile =
            serde_json::from_str(content).map_err(|source| RepoError::MalformedFilter {
                path: filter_path.to_path_buf(),
                source,
            })?;

        let missing = |field| RepoError::MissingField {
            path: filter_path.to_path_buf(),
            field,
        };

        let section = file.solution.ok_or_else(|| missing("solution"))?;
        let solution_path = section
            .path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| missing("solution.path"))?;
        let projects = section.projects.ok_or_else(|| missing("solution.projects"))?;

        let filter_dir = filter_path.parent().unwrap_or(Path::new(""));
        let home_solution = absolute(&filter_dir.join(clean_separators(&solution_path)))?;

        let repo_root = absolute(repo_root)?;
        let listed: Vec<PathBuf> = projects
            .iter()
            .map(|project| normalize(&repo_root.join(clean_separators(project))))
            .collect();
        let seed: SeedSet = listed.iter().map(|p| ProjectPath::new(p.clone())).collect();

        tracing::debug!(
            filter = %filter_path.display(),
            listed = listed.len(),
            distinct = seed.len(),
            "loaded solution filter"
        );

        Ok(LoadedFilter {
            filter_path: filter_path.to_path_buf(),
            home_solution,
            listed,
            seed,
        })
    }
}

/// A parsed solution filter.
#[derive(Debug, Clone)]
pub struct LoadedFilter {
    filter_path: PathBuf,
    home_solution: PathBuf,
    listed: Vec<PathBuf>,
    seed: SeedSet,
}

impl LoadedFilter {
    /// The descriptor this filter was read from.
    pub fn filter_path(&self) -> &Path {
        &self.filter_path
    }

    /// Absolute path of the solution the filter restricts.
    pub fn home_solution(&self) -> &Path {
        &self.home_solution
    }

    /// Deduplicated project set feeding the closure walk.
    pub fn seed(&self) -> &SeedSet {
        &self.seed
    }

    /// Projects as listed, in file order, duplicates kept.
    pub fn listed_projects(&self) -> &[PathBuf] {
        &self.listed
    }

    /// Listed paths that do not exist on disk: the home solution first,
    /// then projects in file order.
    pub fn broken_paths(&self) -> Vec<BrokenPath> {
        let mut broken = Vec::new();
        if !self.home_solution.is_file() {
            broken.push(BrokenPath {
                kind: BrokenPathKind::Solution,
                path: self.home_solution.clone(),
            });
        }
        broken.extend(
            self.listed
                .iter()
                .filter(|project| !project.is_file())
                .map(|project| BrokenPath {
                    kind: BrokenPathKind::Project,
                    path: project.clone(),
                }),
        );
        broken
    }
}

/// What a broken filter entry was supposed to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokenPathKind {
    /// The home solution.
    Solution,
    /// A listed project.
    Project,
}

/// A filter entry that resolves to nothing on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenPath {
    /// Which entry is broken.
    pub kind: BrokenPathKind,
    /// The resolved path that does not exist.
    pub path: PathBuf,
}

impl std::fmt::Display for BrokenPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            BrokenPathKind::Solution => write!(f, "solution path '{}' is broken", self.path.display()),
            BrokenPathKind::Project => write!(f, "project path '{}' is broken", self.path.display()),
        }
    }
}
