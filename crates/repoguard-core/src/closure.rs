//! # Solution Filter Closure
//!
//! A solution filter builds only the projects it lists, so it must list the
//! complete transitive closure of their project references. This module
//! walks the reference graph breadth-first from a filter's [`SeedSet`] and
//! reports every reachable project the filter forgot.
//!
//! ## Invariants
//!
//! - The result never contains a seed project.
//! - Every project is expanded at most once per walk: a single `seen` set
//!   marks projects as they are enqueued, so cyclic and self-referencing
//!   graphs terminate.
//! - Any error from the [`DependencySource`] aborts the walk. A broken
//!   project anywhere in the reachable graph must block validation instead
//!   of understating the closure.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::error::RepoResult;
use crate::project::DependencySource;
use crate::project_path::{ProjectPath, SeedSet};

/// Projects reachable from `seed` that `seed` does not already contain.
///
/// # Errors
///
/// Propagates the first error returned by `source` for any visited project.
pub fn missing_dependencies<S>(source: &S, seed: &SeedSet) -> RepoResult<BTreeSet<ProjectPath>>
where
    S: DependencySource + ?Sized,
{
    let mut missing = BTreeSet::new();
    walk(source, seed, |project| {
        missing.insert(project.clone());
    })?;

    tracing::debug!(
        seed = seed.len(),
        missing = missing.len(),
        "computed missing filter dependencies"
    );
    Ok(missing)
}

/// Every project reachable from `seed` through zero or more references,
/// seed included.
pub fn closure<S>(source: &S, seed: &SeedSet) -> RepoResult<BTreeSet<ProjectPath>>
where
    S: DependencySource + ?Sized,
{
    let mut reachable: BTreeSet<ProjectPath> = seed.iter().cloned().collect();
    walk(source, seed, |project| {
        reachable.insert(project.clone());
    })?;
    Ok(reachable)
}

/// Breadth-first walk calling `on_discovered` once per non-seed project.
fn walk<S, F>(source: &S, seed: &SeedSet, mut on_discovered: F) -> RepoResult<()>
where
    S: DependencySource + ?Sized,
    F: FnMut(&ProjectPath),
{
    let mut seen: HashSet<ProjectPath> = seed.iter().cloned().collect();
    let mut queue: VecDeque<ProjectPath> = seed.iter().cloned().collect();

    while let Some(project) = queue.pop_front() {
        let dependencies = source.direct_dependencies(&project)?;
        tracing::trace!(
            project = %project,
            direct = dependencies.len(),
            "expanded project"
        );

        for dependency in dependencies {
            if seen.insert(dependency.clone()) {
                on_discovered(&dependency);
                queue.push_back(dependency);
            }
        }
    }

    Ok(())
}
