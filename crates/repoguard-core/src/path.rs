//! # Reference Path Resolution
//!
//! Project files and documentation in the monorepo write relative references
//! in the Windows dialect (`..\Shared\Shared.csproj`) regardless of which OS
//! the checkout lives on. This module resolves such references against
//! OS-native base paths and verifies that a path's letter casing matches
//! what is actually stored on disk.
//!
//! Resolution is purely lexical: the resolved target does not need to exist.
//! Only [`verify_exact_casing`] touches the file system.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::error::{RepoError, RepoResult};

/// Prefix that moves the resolution anchor up one directory.
const UP_DIRECTORY_MARKER: &str = "..\\";

/// Separator used by references inside project files.
const REFERENCE_SEPARATOR: char = '\\';

/// Resolve a backslash-dialect `reference` declared inside the file at
/// `base_file`. The anchor is the file's parent directory.
///
/// ```
/// # #[cfg(unix)] {
/// use std::path::{Path, PathBuf};
/// let resolved = repoguard_core::path::resolve_reference(
///     Path::new("/root/A/B/proj.ext"),
///     "..\\C\\thing.ext",
/// ).unwrap();
/// assert_eq!(resolved, PathBuf::from("/root/A/C/thing.ext"));
/// # }
/// ```
///
/// # Errors
///
/// [`RepoError::InvalidArgument`] if either input is empty.
pub fn resolve_reference(base_file: &Path, reference: &str) -> RepoResult<PathBuf> {
    if base_file.as_os_str().is_empty() {
        return Err(RepoError::InvalidArgument("base path"));
    }
    if reference.is_empty() {
        return Err(RepoError::InvalidArgument("reference"));
    }

    let base_file = absolute(base_file)?;
    let anchor = base_file.parent().unwrap_or(&base_file);
    resolve_relative(anchor, reference)
}

/// Resolve a backslash-dialect `reference` against a directory.
///
/// Leading `..\` markers are consumed one at a time, each moving the anchor
/// to its parent; markers beyond the file-system root stay at the root. The
/// remainder is translated to the host separator, joined and normalized.
///
/// # Errors
///
/// [`RepoError::InvalidArgument`] if either input is empty.
pub fn resolve_relative(base_dir: &Path, reference: &str) -> RepoResult<PathBuf> {
    if base_dir.as_os_str().is_empty() {
        return Err(RepoError::InvalidArgument("base path"));
    }
    if reference.is_empty() {
        return Err(RepoError::InvalidArgument("reference"));
    }

    let mut anchor = absolute(base_dir)?;
    let mut remainder = reference;
    while let Some(rest) = remainder.strip_prefix(UP_DIRECTORY_MARKER) {
        remainder = rest;
        if !anchor.pop() {
            tracing::trace!(reference, "up-directory marker clamped at file-system root");
        }
    }

    let remainder = if MAIN_SEPARATOR == REFERENCE_SEPARATOR {
        remainder.to_string()
    } else {
        remainder.replace(REFERENCE_SEPARATOR, MAIN_SEPARATOR_STR)
    };

    // A leading separator would make `join` discard the anchor.
    let remainder = remainder.trim_start_matches(MAIN_SEPARATOR);

    Ok(normalize(&anchor.join(remainder)))
}

/// Replace both `/` and `\` with the host separator.
pub fn clean_separators(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

/// Lexically normalize a path: drop `.` and empty segments and fold `..`
/// into the preceding segment. An absolute path never climbs above its
/// root; a relative path keeps leading `..` segments it cannot fold.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::Prefix(_)) | Some(Component::RootDir) => {}
                _ => out.push(".."),
            },
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

/// Check that `path` exists and that every segment, from the file name up
/// to the root, is spelled with exactly the casing stored on disk.
///
/// Returns `false` when nothing exists at `path`; callers that must tell
/// "missing" apart from "wrong case" check existence separately.
///
/// Each level re-lists its parent directory. At most one entry per
/// case-insensitive name is assumed; when several exist the level passes
/// only if one of them matches exactly.
pub fn verify_exact_casing(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    let Ok(full) = absolute(path) else {
        return false;
    };

    for level in full.ancestors() {
        let (Some(name), Some(parent)) = (level.file_name(), level.parent()) else {
            break;
        };
        if !has_exact_entry(parent, name) {
            tracing::debug!(
                path = %full.display(),
                segment = %name.to_string_lossy(),
                "casing mismatch"
            );
            return false;
        }
    }

    true
}

fn has_exact_entry(dir: &Path, name: &OsStr) -> bool {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to list directory for casing check");
            return false;
        }
    };

    let folded = name.to_string_lossy().to_lowercase();
    let candidates: Vec<_> = entries
        .flatten()
        .map(|entry| entry.file_name())
        .filter(|candidate| candidate.to_string_lossy().to_lowercase() == folded)
        .collect();

    if candidates.len() > 1 {
        tracing::warn!(
            dir = %dir.display(),
            name = %name.to_string_lossy(),
            count = candidates.len(),
            "several entries differ only by case"
        );
    }

    candidates.iter().any(|candidate| candidate.as_os_str() == name)
}

/// Anchor a relative path on the working directory, then normalize.
pub(crate) fn absolute(path: &Path) -> RepoResult<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().map_err(|e| RepoError::io(path, e))?;
    Ok(normalize(&cwd.join(path)))
}
