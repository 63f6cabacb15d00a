//! # Casing Subcommand
//!
//! Verifies that each path is spelled with the exact letter casing stored on
//! disk. On case-insensitive file systems a wrongly-cased link still opens
//! locally but breaks on case-sensitive checkouts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use repoguard_core::{verify_exact_casing, RepoContext};

/// Arguments for the `repoguard casing` subcommand.
#[derive(Args, Debug)]
pub struct CasingArgs {
    /// Paths to verify.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the casing subcommand.
///
/// Returns exit code: 0 when every path exists with exact casing, 1 otherwise.
pub fn run_casing(args: &CasingArgs, ctx: &RepoContext) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let mut had_failures = false;

    for path in &args.paths {
        let resolved = crate::resolve_path(path, ctx.root(), &cwd);
        if !resolved.exists() {
            println!("MISSING: {}", resolved.display());
            had_failures = true;
        } else if verify_exact_casing(&resolved) {
            println!("OK: {}", resolved.display());
        } else {
            println!("FAIL: {} — casing differs from disk", resolved.display());
            had_failures = true;
        }
    }

    Ok(u8::from(had_failures))
}

#[cfg(test)]
mod tests {
    use repoguard_core::RepoguardConfig;

    use super::*;

    #[test]
    fn exact_path_passes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Readme.md"), "x").unwrap();
        let ctx = RepoContext::new(dir.path(), RepoguardConfig::default());

        let args = CasingArgs {
            paths: vec![PathBuf::from("Readme.md")],
        };
        assert_eq!(run_casing(&args, &ctx).unwrap(), 0);
    }

    #[test]
    fn wrong_case_or_missing_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Readme.md"), "x").unwrap();
        let ctx = RepoContext::new(dir.path(), RepoguardConfig::default());

        let args = CasingArgs {
            paths: vec![dir.path().join("README.md")],
        };
        assert_eq!(run_casing(&args, &ctx).unwrap(), 1);

        let args = CasingArgs {
            paths: vec![dir.path().join("nope.md")],
        };
        assert_eq!(run_casing(&args, &ctx).unwrap(), 1);
    }
}
