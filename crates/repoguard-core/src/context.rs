//! # Repository Context
//!
//! Every check runs against an explicit [`RepoContext`]: the repository root
//! plus the [`RepoguardConfig`] in force. The context is built once at
//! process start and passed by reference into each call.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RepoError, RepoResult};
use crate::path::{absolute, clean_separators, normalize};

/// Tunables for repository discovery and filter scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoguardConfig {
    /// Entry whose presence marks the repository root.
    pub root_marker: String,
    /// File extension of solution filter descriptors, without the dot.
    pub filter_extension: String,
    /// Repo-relative directories skipped during discovery.
    pub excluded_dirs: Vec<String>,
}

impl Default for RepoguardConfig {
    fn default() -> Self {
        Self {
            root_marker: ".git".to_string(),
            filter_extension: "slnf".to_string(),
            excluded_dirs: vec!["Components/Temp".to_string()],
        }
    }
}

impl RepoguardConfig {
    /// Load a YAML configuration file. Omitted fields keep their defaults.
    pub fn load(path: &Path) -> RepoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RepoError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| RepoError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The repository being validated.
#[derive(Debug, Clone)]
pub struct RepoContext {
    root: PathBuf,
    config: RepoguardConfig,
    excluded: Vec<PathBuf>,
}

impl RepoContext {
    /// Build a context for a known root. A relative root is anchored on the
    /// working directory; the root is lexically normalized either way.
    pub fn new(root: impl Into<PathBuf>, config: RepoguardConfig) -> Self {
        let root = root.into();
        let root = absolute(&root).unwrap_or_else(|e| {
            tracing::warn!(root = %root.display(), error = %e, "could not anchor repository root");
            normalize(&root)
        });
        let excluded = config
            .excluded_dirs
            .iter()
            .map(|dir| fold_case(&root.join(clean_separators(dir))))
            .collect();
        Self {
            root,
            config,
            excluded,
        }
    }

    /// Walk up from `start` to the first directory holding the configured
    /// root marker.
    ///
    /// # Errors
    ///
    /// [`RepoError::RootNotFound`] if no ancestor carries the marker.
    pub fn discover(start: &Path, config: RepoguardConfig) -> RepoResult<Self> {
        let mut dir = start;
        loop {
            if dir.join(&config.root_marker).exists() {
                tracing::debug!(root = %dir.display(), "resolved repository root");
                return Ok(Self::new(dir, config));
            }
            dir = match dir.parent() {
                Some(parent) => parent,
                None => {
                    return Err(RepoError::RootNotFound {
                        start: start.to_path_buf(),
                        marker: config.root_marker,
                    })
                }
            };
        }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configuration in force.
    pub fn config(&self) -> &RepoguardConfig {
        &self.config
    }

    /// `path` relative to the root, or `path` itself when outside it.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Whether `path` lies inside an excluded directory.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let folded = fold_case(path);
        self.excluded.iter().any(|prefix| folded.starts_with(prefix))
    }

    /// Every solution filter under the root, sorted, skipping the root
    /// marker and excluded directories.
    pub fn solution_filters(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();
        self.walk(&self.root, &mut found);
        found.sort();
        found
    }

    fn walk(&self, dir: &Path, acc: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory during filter scan");
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if self.is_excluded(&path) {
                continue;
            }
            let is_link = entry.file_type().is_ok_and(|t| t.is_symlink());
            if path.is_dir() {
                if is_link {
                    tracing::debug!(dir = %path.display(), "skipping symlinked directory");
                    continue;
                }
                if entry.file_name() == self.config.root_marker.as_str() {
                    continue;
                }
                self.walk(&path, acc);
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.config.filter_extension))
            {
                acc.push(path);
            }
        }
    }
}

/// Lowercased, normalized form used for component-wise prefix checks.
fn fold_case(path: &Path) -> PathBuf {
    PathBuf::from(normalize(path).to_string_lossy().to_lowercase())
}
