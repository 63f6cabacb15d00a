//! # Project Paths
//!
//! [`ProjectPath`] identifies a project descriptor on disk. The file systems
//! the monorepo is checked out on are case-preserving but not always
//! case-sensitive, so two paths that differ only by letter case name the
//! same project: equality, ordering and hashing all go through a lowercased
//! key computed once at construction.
//!
//! [`SeedSet`] is the deduplicated project list declared by a solution
//! filter.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// Absolute, OS-native path to a project descriptor with case-insensitive
/// identity.
#[derive(Debug, Clone)]
pub struct ProjectPath {
    path: PathBuf,
    key: String,
}

impl ProjectPath {
    /// Wrap a path. The original casing is preserved for display.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = path.to_string_lossy().to_lowercase();
        Self { path, key }
    }

    /// The path as given, original casing intact.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Consume into the underlying path.
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl PartialEq for ProjectPath {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ProjectPath {}

impl Hash for ProjectPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for ProjectPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProjectPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl From<PathBuf> for ProjectPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for ProjectPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Serialize for ProjectPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.path.serialize(serializer)
    }
}

/// The set of projects a solution filter declares. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet(BTreeSet<ProjectPath>);

impl SeedSet {
    /// Whether `project` is declared by the filter.
    pub fn contains(&self, project: &ProjectPath) -> bool {
        self.0.contains(project)
    }

    /// Iterate the declared projects in case-insensitive path order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectPath> {
        self.0.iter()
    }

    /// Number of distinct declared projects.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the filter declares no projects.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new seed set holding this one's projects plus `extra`.
    pub fn extended<I>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = ProjectPath>,
    {
        let mut projects = self.0.clone();
        projects.extend(extra);
        Self(projects)
    }
}

impl FromIterator<ProjectPath> for SeedSet {
    fn from_iter<I: IntoIterator<Item = ProjectPath>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SeedSet {
    type Item = &'a ProjectPath;
    type IntoIter = std::collections::btree_set::Iter<'a, ProjectPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
