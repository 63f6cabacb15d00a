//! # Per-Filter Validation
//!
//! Runs every solution filter check against one descriptor and folds the
//! outcome into a [`FilterReport`]. Errors are captured rather than
//! propagated so that a broken descriptor or project never prevents the
//! remaining filters in a run from being checked.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::closure::missing_dependencies;
use crate::context::RepoContext;
use crate::filter::{BrokenPath, SolutionFilter};
use crate::project::DependencySource;

/// Outcome of validating one solution filter.
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    /// Repo-relative path of the descriptor.
    pub filter: PathBuf,
    /// Listed entries that do not exist on disk.
    pub broken_paths: Vec<BrokenPath>,
    /// Repo-relative projects the filter needs but does not list.
    pub missing_dependencies: Vec<PathBuf>,
    /// Load or graph failure that stopped the checks early.
    pub error: Option<String>,
}

impl FilterReport {
    fn new(filter: PathBuf) -> Self {
        Self {
            filter,
            broken_paths: Vec::new(),
            missing_dependencies: Vec::new(),
            error: None,
        }
    }

    /// True when no check found anything.
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.broken_paths.is_empty() && self.missing_dependencies.is_empty()
    }
}

/// Validate the filter at `filter_path`: load it, check its listed paths,
/// then check its dependency closure.
///
/// The closure walk still runs when listed paths are broken; a missing
/// listed project then surfaces as the walk's error.
pub fn validate_filter<S>(ctx: &RepoContext, source: &S, filter_path: &Path) -> FilterReport
where
    S: DependencySource + ?Sized,
{
    let mut report = FilterReport::new(ctx.relative(filter_path).to_path_buf());

    let loaded = match SolutionFilter::load(filter_path, ctx.root()) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::warn!(filter = %filter_path.display(), error = %e, "failed to load solution filter");
            report.error = Some(e.to_string());
            return report;
        }
    };

    report.broken_paths = loaded.broken_paths();

    match missing_dependencies(source, loaded.seed()) {
        Ok(missing) => {
            report.missing_dependencies = missing
                .into_iter()
                .map(|project| ctx.relative(project.as_path()).to_path_buf())
                .collect();
        }
        Err(e) => {
            tracing::warn!(filter = %filter_path.display(), error = %e, "dependency walk failed");
            report.error = Some(e.to_string());
        }
    }

    tracing::info!(
        filter = %report.filter.display(),
        passed = report.passed(),
        missing = report.missing_dependencies.len(),
        broken = report.broken_paths.len(),
        "validated solution filter"
    );
    report
}

/// Validate each filter independently.
pub fn validate_filters<S>(ctx: &RepoContext, source: &S, filters: &[PathBuf]) -> Vec<FilterReport>
where
    S: DependencySource + ?Sized,
{
    filters
        .iter()
        .map(|filter| validate_filter(ctx, source, filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RepoguardConfig;
    use crate::project::MsBuildProjectReader;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn project_referencing(refs: &[&str]) -> String {
        let items: String = refs
            .iter()
            .map(|r| format!("<ProjectReference Include=\"{r}\" />"))
            .collect();
        format!("<Project Sdk=\"Microsoft.NET.Sdk\"><ItemGroup>{items}</ItemGroup></Project>")
    }

    #[test]
    fn reports_missing_dependencies_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("Mono.sln"), "");
        write(&root.join("X/X.csproj"), &project_referencing(&["..\\Y\\Y.csproj"]));
        write(&root.join("Y/Y.csproj"), &project_referencing(&["..\\Z\\Z.csproj"]));
        write(&root.join("Z/Z.csproj"), &project_referencing(&[]));
        let filter = root.join("x.slnf");
        write(&filter, r#"{"solution":{"path":"Mono.sln","projects":["X\\X.csproj"]}}"#);

        let ctx = RepoContext::new(root, RepoguardConfig::default());
        let report = validate_filter(&ctx, &MsBuildProjectReader, &filter);

        assert!(!report.passed());
        assert_eq!(report.filter, PathBuf::from("x.slnf"));
        assert_eq!(
            report.missing_dependencies,
            vec![Path::new("Y").join("Y.csproj"), Path::new("Z").join("Z.csproj")]
        );
        assert!(report.error.is_none());
    }

    #[test]
    fn malformed_descriptor_is_captured() {
        let dir = tempfile::tempdir().unwrap();
        let filter = dir.path().join("bad.slnf");
        write(&filter, "not json");

        let ctx = RepoContext::new(dir.path(), RepoguardConfig::default());
        let report = validate_filter(&ctx, &MsBuildProjectReader, &filter);

        assert!(!report.passed());
        assert!(report.error.as_deref().unwrap().contains("not valid JSON"));
    }

    #[test]
    fn one_broken_filter_does_not_stop_the_next() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("Mono.sln"), "");
        write(&root.join("A/A.csproj"), &project_referencing(&[]));
        let bad = root.join("bad.slnf");
        write(&bad, "{");
        let good = root.join("good.slnf");
        write(&good, r#"{"solution":{"path":"Mono.sln","projects":["A\\A.csproj"]}}"#);

        let ctx = RepoContext::new(root, RepoguardConfig::default());
        let reports = validate_filters(&ctx, &MsBuildProjectReader, &[bad, good]);

        assert_eq!(reports.len(), 2);
        assert!(!reports[0].passed());
        assert!(reports[1].passed());
    }
}
