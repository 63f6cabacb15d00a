//! # Project Reference Graph
//!
//! Reads MSBuild project descriptors (`*.csproj`) and extracts their
//! declared `<ProjectReference Include="...">` edges. Each raw `Include`
//! is written in the backslash dialect relative to the project file and is
//! resolved through [`resolve_reference`](crate::path::resolve_reference).
//!
//! The graph is never stored. Edges are re-read from disk on every call so a
//! validation run always reflects the current checkout.
//!
//! ## Tolerance
//!
//! Only `ProjectReference` elements whose parent is an `ItemGroup` count as
//! edges. Every other element and attribute is ignored, and namespaces
//! (legacy `xmlns="http://schemas.microsoft.com/developer/msbuild/2003"`)
//! are matched by local name.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{RepoError, RepoResult};
use crate::path::resolve_reference;
use crate::project_path::ProjectPath;

const PROJECT_ELEMENT: &[u8] = b"Project";
const ITEM_GROUP_ELEMENT: &[u8] = b"ItemGroup";
const PROJECT_REFERENCE_ELEMENT: &[u8] = b"ProjectReference";
const INCLUDE_ATTRIBUTE: &[u8] = b"Include";

/// Source of direct project-reference edges consumed by the closure walk.
pub trait DependencySource {
    /// Direct dependencies of `project`, in declaration order, duplicates
    /// kept.
    ///
    /// # Errors
    ///
    /// [`RepoError::ProjectNotFound`] if `project` does not exist and
    /// [`RepoError::MalformedProject`] if it cannot be parsed.
    fn direct_dependencies(&self, project: &ProjectPath) -> RepoResult<Vec<ProjectPath>>;
}

/// Reads edges from MSBuild project files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsBuildProjectReader;

impl DependencySource for MsBuildProjectReader {
    fn direct_dependencies(&self, project: &ProjectPath) -> RepoResult<Vec<ProjectPath>> {
        ProjectFile::open(project.as_path())?.dependencies().collect()
    }
}

/// An in-memory adjacency map. Projects absent from the map are reported as
/// not found, matching the on-disk reader.
impl<S: BuildHasher> DependencySource for HashMap<ProjectPath, Vec<ProjectPath>, S> {
    fn direct_dependencies(&self, project: &ProjectPath) -> RepoResult<Vec<ProjectPath>> {
        self.get(project)
            .cloned()
            .ok_or_else(|| RepoError::ProjectNotFound {
                path: project.as_path().to_path_buf(),
            })
    }
}

/// A parsed project descriptor: its location and the raw `Include` values
/// of its project references.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    references: Vec<String>,
}

impl ProjectFile {
    /// Read and parse the project descriptor at `path`.
    ///
    /// # Errors
    ///
    /// - [`RepoError::ProjectNotFound`] if no file exists at `path`.
    /// - [`RepoError::MalformedProject`] if the content is not a well-formed
    ///   MSBuild project.
    /// - [`RepoError::Io`] for any other read failure.
    pub fn open(path: &Path) -> RepoResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RepoError::ProjectNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::InvalidData => RepoError::MalformedProject {
                path: path.to_path_buf(),
                reason: "content is not valid UTF-8".to_string(),
            },
            _ => RepoError::io(path, e),
        })?;
        Self::parse(path, &content)
    }

    /// Parse `content` as the project descriptor located at `path`.
    pub fn parse(path: &Path, content: &str) -> RepoResult<Self> {
        let malformed = |reason: String| RepoError::MalformedProject {
            path: path.to_path_buf(),
            reason,
        };

        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut saw_root = false;
        let mut references = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| {
                malformed(format!(
                    "XML error at byte {}: {e}",
                    reader.error_position()
                ))
            })?;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let name = e.local_name().as_ref().to_vec();
                    if stack.is_empty() {
                        if saw_root {
                            return Err(malformed("multiple root elements".to_string()));
                        }
                        if name != PROJECT_ELEMENT {
                            return Err(malformed(format!(
                                "root element is <{}>, expected <Project>",
                                String::from_utf8_lossy(&name)
                            )));
                        }
                        saw_root = true;
                    }

                    let parent = stack.last().map(Vec::as_slice);
                    if parent == Some(ITEM_GROUP_ELEMENT) && name == PROJECT_REFERENCE_ELEMENT {
                        let include = include_value(e).map_err(malformed)?;
                        references.push(include);
                    }

                    if matches!(event, Event::Start(_)) {
                        stack.push(name);
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(malformed("no root element".to_string()));
        }
        if !stack.is_empty() {
            return Err(malformed("unexpected end of file".to_string()));
        }

        tracing::trace!(
            project = %path.display(),
            references = references.len(),
            "parsed project descriptor"
        );

        Ok(Self {
            path: path.to_path_buf(),
            references,
        })
    }

    /// Where the descriptor lives.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw `Include` values in declaration order.
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Resolved direct dependencies, lazily, in declaration order.
    pub fn dependencies(&self) -> impl Iterator<Item = RepoResult<ProjectPath>> + '_ {
        self.references
            .iter()
            .map(|include| resolve_reference(&self.path, include).map(ProjectPath::new))
    }
}

fn include_value(element: &BytesStart<'_>) -> Result<String, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| format!("bad ProjectReference attribute: {e}"))?;
        if attr.key.local_name().as_ref() != INCLUDE_ATTRIBUTE {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|e| format!("bad ProjectReference Include value: {e}"))?;
        let value = value.trim();
        if value.is_empty() {
            break;
        }
        return Ok(value.to_string());
    }
    Err("ProjectReference without Include".to_string())
}
