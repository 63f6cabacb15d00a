//! # Panic Paths
//!
//! Adversarial descriptor content must surface as structured errors, never
//! as panics.

use std::path::Path;

use proptest::prelude::*;
use repoguard_core::{ProjectFile, RepoError, SolutionFilter};

#[test]
fn deeply_nested_project_xml_parses() {
    let mut content = String::from("<Project>");
    for _ in 0..200 {
        content.push_str("<Choose><When>");
    }
    for _ in 0..200 {
        content.push_str("</When></Choose>");
    }
    content.push_str("</Project>");

    let project = ProjectFile::parse(Path::new("/r/deep.csproj"), &content).unwrap();
    assert!(project.references().is_empty());
}

#[test]
fn escaped_include_is_unescaped() {
    let content =
        "<Project><ItemGroup><ProjectReference Include=\"..\\A&amp;B\\A&amp;B.csproj\"/></ItemGroup></Project>";
    let project = ProjectFile::parse(Path::new("/r/x.csproj"), content).unwrap();
    assert_eq!(project.references(), &["..\\A&B\\A&B.csproj".to_string()]);
}

#[test]
fn filter_with_wrong_types_is_malformed() {
    let err = SolutionFilter::parse(
        Path::new("/r/f.slnf"),
        r#"{"solution":{"path":3,"projects":"A.csproj"}}"#,
        Path::new("/r"),
    )
    .unwrap_err();
    assert!(matches!(err, RepoError::MalformedFilter { .. }));
}

proptest! {
    #[test]
    fn project_parser_never_panics(content in ".{0,256}") {
        let _ = ProjectFile::parse(Path::new("/r/fuzz.csproj"), &content);
    }

    #[test]
    fn filter_parser_never_panics(content in ".{0,256}") {
        let _ = SolutionFilter::parse(Path::new("/r/fuzz.slnf"), &content, Path::new("/r"));
    }
}
