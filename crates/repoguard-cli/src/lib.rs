//! # repoguard-cli: Monorepo Convention Checks
//!
//! Provides the `repoguard` command-line interface over `repoguard-core`.
//!
//! ## Subcommands
//!
//! - `repoguard filters`: solution filter path and dependency-closure checks.
//! - `repoguard casing`: exact on-disk casing of the given paths.
//!
//! ```bash
//! repoguard filters
//! repoguard filters Components/Web/Web.slnf --json
//! repoguard casing docs/Getting-Started.md
//! ```
//!
//! Handlers return an exit code: 0 when every check passes, 1 when any
//! check reports a finding.

pub mod casing;
pub mod filters;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use repoguard_core::path::normalize;
use repoguard_core::{RepoContext, RepoguardConfig};

/// Turn a command-line path argument into a normalized path.
///
/// Relative arguments name a repo-relative entry when one exists, so
/// `repoguard filters Components/Web/Web.slnf` works from any directory
/// inside the checkout; anything else is taken relative to `cwd`.
pub fn resolve_path(path: &Path, repo_root: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize(path);
    }
    let repo_relative = normalize(&repo_root.join(path));
    if repo_relative.exists() {
        repo_relative
    } else {
        normalize(&cwd.join(path))
    }
}

/// Build the repository context from the global flags.
///
/// An explicit `root` bypasses discovery; otherwise the root is found by
/// walking up from the current directory.
pub fn build_context(root: Option<&Path>, config: Option<&Path>) -> Result<RepoContext> {
    let config = match config {
        Some(path) => RepoguardConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => RepoguardConfig::default(),
    };

    match root {
        Some(root) => Ok(RepoContext::new(root, config)),
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            Ok(RepoContext::discover(&cwd, config)?)
        }
    }
}
