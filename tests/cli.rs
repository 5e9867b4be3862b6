//! CLI tests for treeforge
//!
//! Runs the binary against temporary directories and checks its output.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn treeforge() -> Command {
    Command::cargo_bin("treeforge").unwrap()
}

// =============================================================================
// list
// =============================================================================

#[test]
fn list_prints_directories_and_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("node_modules")).unwrap();
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("node_modules").join("x.js"), "x").unwrap();
    fs::write(root.join("sub").join("b.txt"), "b").unwrap();

    let expected = format!(
        "Carpeta: {}\n  Archivo: a.txt\n\nCarpeta: {}\n  Archivo: b.txt\n\n",
        root.display(),
        root.join("sub").display()
    );

    treeforge()
        .arg("list")
        .arg(root)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn list_missing_directory_fails() {
    let temp = TempDir::new().unwrap();

    treeforge()
        .arg("list")
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

// =============================================================================
// build
// =============================================================================

#[test]
fn build_materializes_description() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("proyecto_corregido.json");
    fs::write(
        &input,
        r#"{"files": {"src": {"files": {"main.txt": "hello"}}, "readme.txt": "info"}}"#,
    )
    .unwrap();

    treeforge()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Project generated at: NuevoProyectoCorregido",
        ));

    let out = temp.path().join("NuevoProyectoCorregido");
    assert_eq!(
        fs::read_to_string(out.join("src").join("main.txt")).unwrap(),
        "hello"
    );
    assert_eq!(fs::read_to_string(out.join("readme.txt")).unwrap(), "info");
}

#[test]
fn build_missing_input_creates_nothing() {
    let temp = TempDir::new().unwrap();

    treeforge()
        .current_dir(temp.path())
        .args(["build", "missing.json", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input not found"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn build_malformed_input_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("bad.json"), "{\"files\": [1, 2]}").unwrap();

    treeforge()
        .current_dir(temp.path())
        .args(["build", "bad.json", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed input"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn build_stats_prints_summary() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("desc.json"),
        r#"{"files": {"a.txt": "a"}}"#,
    )
    .unwrap();

    treeforge()
        .current_dir(temp.path())
        .args(["build", "desc.json", "out", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files Written"));
}

// =============================================================================
// tree and capture
// =============================================================================

#[test]
fn tree_writes_to_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src").join("index.ts"), "").unwrap();
    fs::write(root.join("package.json"), "{}").unwrap();
    let out = temp.path().join("tree.txt");

    treeforge()
        .arg("tree")
        .arg(&root)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tree saved to:"));

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "├── src\n│   └── index.ts\n└── package.json"
    );
}

#[test]
fn capture_then_build_round_trip() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(project.join("src")).unwrap();
    fs::create_dir_all(project.join("node_modules").join("dep")).unwrap();
    fs::write(project.join("src").join("index.ts"), "export {};\n").unwrap();
    fs::write(project.join("node_modules").join("dep").join("index.js"), "x").unwrap();

    treeforge()
        .current_dir(temp.path())
        .args(["capture", "project", "proyecto.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project captured to: proyecto.json"));

    let json = fs::read_to_string(temp.path().join("proyecto.json")).unwrap();
    assert!(!json.contains("node_modules"));

    treeforge()
        .current_dir(temp.path())
        .args(["build", "proyecto.json", "rebuilt"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("rebuilt").join("src").join("index.ts")).unwrap(),
        "export {};\n"
    );
}
