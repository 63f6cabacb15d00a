//! # Filters Subcommand
//!
//! Checks solution filters: every listed path must exist and every project
//! reachable through project references must be listed. Each filter is
//! validated independently so one broken descriptor never hides the rest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use repoguard_core::{validate_filters, FilterReport, MsBuildProjectReader, RepoContext};

/// Arguments for the `repoguard filters` subcommand.
#[derive(Args, Debug)]
pub struct FiltersArgs {
    /// Filter descriptors to check. Defaults to every filter in the repository.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Emit the reports as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct FiltersSummary<'a> {
    total: usize,
    passed: usize,
    reports: &'a [FilterReport],
}

/// Execute the filters subcommand.
///
/// Returns exit code: 0 when every filter passes, 1 otherwise.
pub fn run_filters(args: &FiltersArgs, ctx: &RepoContext) -> Result<u8> {
    let filters: Vec<PathBuf> = if args.paths.is_empty() {
        ctx.solution_filters()
    } else {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        args.paths
            .iter()
            .map(|path| crate::resolve_path(path, ctx.root(), &cwd))
            .collect()
    };

    tracing::info!(count = filters.len(), "checking solution filters");

    let reports = validate_filters(ctx, &MsBuildProjectReader, &filters);
    let passed = reports.iter().filter(|r| r.passed()).count();

    if args.json {
        let summary = FiltersSummary {
            total: reports.len(),
            passed,
            reports: &reports,
        };
        let rendered =
            serde_json::to_string_pretty(&summary).context("failed to serialize filter reports")?;
        println!("{rendered}");
    } else {
        print_text(&reports, passed);
    }

    Ok(if passed == reports.len() { 0 } else { 1 })
}

fn print_text(reports: &[FilterReport], passed: usize) {
    println!("Filters: {}/{} passed", passed, reports.len());

    for report in reports.iter().filter(|r| !r.passed()) {
        let filter = report.filter.display();
        if let Some(ref error) = report.error {
            println!("  FAIL: {filter} — {error}");
        }
        for broken in &report.broken_paths {
            println!("  FAIL: {filter} — {broken}");
        }
        for missing in &report.missing_dependencies {
            println!(
                "  FAIL: {filter} — missing dependency {}",
                missing.display()
            );
        }
    }

    let failed = reports.len() - passed;
    if failed > 0 {
        println!(
            "\n{} filter(s) failed validation out of {} total.",
            failed,
            reports.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use repoguard_core::RepoguardConfig;

    use super::*;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn args(paths: Vec<PathBuf>) -> FiltersArgs {
        FiltersArgs { paths, json: false }
    }

    #[test]
    fn empty_repository_passes() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = RepoContext::new(dir.path(), RepoguardConfig::default());
        assert_eq!(run_filters(&args(vec![]), &ctx).unwrap(), 0);
    }

    #[test]
    fn incomplete_filter_fails() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("Mono.sln"), "");
        write(
            &root.join("A/A.csproj"),
            r#"<Project><ItemGroup><ProjectReference Include="..\B\B.csproj" /></ItemGroup></Project>"#,
        );
        write(&root.join("B/B.csproj"), "<Project />");
        write(
            &root.join("a.slnf"),
            r#"{"solution":{"path":"Mono.sln","projects":["A\\A.csproj"]}}"#,
        );

        let ctx = RepoContext::new(root, RepoguardConfig::default());
        assert_eq!(run_filters(&args(vec![]), &ctx).unwrap(), 1);
    }

    #[test]
    fn explicit_path_is_resolved_against_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(&root.join("Mono.sln"), "");
        write(&root.join("A/A.csproj"), "<Project />");
        write(
            &root.join("sub/a.slnf"),
            r#"{"solution":{"path":"..\\Mono.sln","projects":["A\\A.csproj"]}}"#,
        );

        let ctx = RepoContext::new(root, RepoguardConfig::default());
        let code = run_filters(
            &FiltersArgs {
                paths: vec![PathBuf::from("sub/a.slnf")],
                json: true,
            },
            &ctx,
        )
        .unwrap();
        assert_eq!(code, 0);
    }
}
