//! # CLI Handlers
//!
//! Drives the `repoguard` subcommand handlers against temporary
//! repositories and checks their exit codes.

use std::path::{Path, PathBuf};

use repoguard_cli::casing::{run_casing, CasingArgs};
use repoguard_cli::filters::{run_filters, FiltersArgs};
use repoguard_cli::build_context;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn seeded_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join(".git")).unwrap();
    write(&root.join("Monorepo.sln"), "");
    write(
        &root.join("Components/Web/Web.csproj"),
        r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <ItemGroup>
    <ProjectReference Include="..\Core\Core.csproj" />
  </ItemGroup>
</Project>"#,
    );
    write(&root.join("Components/Core/Core.csproj"), "<Project Sdk=\"Microsoft.NET.Sdk\" />");
    dir
}

#[test]
fn discovered_filters_fail_when_one_is_incomplete() {
    let dir = seeded_repo();
    let root = dir.path();
    write(
        &root.join("Components/Web/Web.slnf"),
        r#"{"solution":{"path":"..\\..\\Monorepo.sln","projects":["Components\\Web\\Web.csproj"]}}"#,
    );
    write(
        &root.join("Components/Web/Full.slnf"),
        r#"{"solution":{"path":"..\\..\\Monorepo.sln","projects":["Components\\Web\\Web.csproj","Components\\Core\\Core.csproj"]}}"#,
    );

    let ctx = build_context(Some(root), None).unwrap();
    assert_eq!(ctx.solution_filters().len(), 2);

    let code = run_filters(
        &FiltersArgs {
            paths: vec![],
            json: false,
        },
        &ctx,
    )
    .unwrap();
    assert_eq!(code, 1);

    let code = run_filters(
        &FiltersArgs {
            paths: vec![PathBuf::from("Components/Web/Full.slnf")],
            json: true,
        },
        &ctx,
    )
    .unwrap();
    assert_eq!(code, 0);
}

#[test]
fn temp_components_are_not_scanned() {
    let dir = seeded_repo();
    let root = dir.path();
    write(&root.join("Components/Temp/Scratch/broken.slnf"), "{");

    let ctx = build_context(Some(root), None).unwrap();
    assert!(ctx.solution_filters().is_empty());

    let code = run_filters(
        &FiltersArgs {
            paths: vec![],
            json: false,
        },
        &ctx,
    )
    .unwrap();
    assert_eq!(code, 0);
}

#[test]
fn casing_handler_checks_each_path() {
    let dir = seeded_repo();
    let ctx = build_context(Some(dir.path()), None).unwrap();

    let ok = CasingArgs {
        paths: vec![PathBuf::from("Components/Core/Core.csproj")],
    };
    assert_eq!(run_casing(&ok, &ctx).unwrap(), 0);

    let bad = CasingArgs {
        paths: vec![dir.path().join("components").join("Core").join("Core.csproj")],
    };
    assert_eq!(run_casing(&bad, &ctx).unwrap(), 1);
}
