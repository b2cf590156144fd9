use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Runs the binary with an isolated HOME so no real presets are picked up.
fn prompt_tree(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("prompt_tree").expect("Failed to find prompt_tree binary");
    cmd.env("HOME", home.path())
        .env_remove("RUST_LOG")
        .arg("--no-progress");
    cmd
}

fn sample_project() -> TempDir {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("proj/a.py"), "class Foo: pass\n");
    write_file(&temp.path().join("proj/Dockerfile"), "FROM python:3.12\n");
    write_file(&temp.path().join("proj/config.toml"), "name = \"demo\"\n");
    write_file(&temp.path().join("proj/venv/dummy.txt"), "x");
    temp
}

#[test]
fn default_run_prints_tree_without_contents() {
    let temp = sample_project();
    let home = tempdir().unwrap();

    prompt_tree(&home)
        .arg(temp.path().join("proj"))
        .assert()
        .success()
        .stdout("proj\n├── Dockerfile\n├── a.py\n├── config.toml\n└── venv [venv skipped]\n");
}

#[test]
fn py_flag_adds_class_section() {
    let temp = sample_project();
    let home = tempdir().unwrap();
    let root = temp.path().join("proj");

    let expected = format!(
        "----- Python / Additional Contents -----\nFile: {}\nClass: Foo\nclass Foo: pass\n------\n",
        root.join("a.py").display()
    );

    prompt_tree(&home)
        .arg("--py")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::ends_with(expected))
        .stdout(predicate::str::contains("FROM python").not());
}

#[test]
fn tree_flag_drops_contents() {
    let temp = sample_project();
    let home = tempdir().unwrap();

    prompt_tree(&home)
        .args(["--all", "--tree"])
        .arg(temp.path().join("proj"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Additional Contents").not());
}

#[test]
fn docker_variants_are_recognised() {
    let temp = tempdir().unwrap();
    let home = tempdir().unwrap();
    for name in ["Dockerfile", "Dockerfile.dev", "dockerfile.prod", "Dockerfile.notes"] {
        write_file(&temp.path().join(name), &format!("FROM {name}\n"));
    }

    let assert = prompt_tree(&home)
        .arg("--docker")
        .arg(temp.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    for name in ["Dockerfile", "Dockerfile.dev", "dockerfile.prod", "Dockerfile.notes"] {
        assert!(stdout.contains(&format!("FROM {name}")), "missing {name}");
    }
}

#[test]
fn repeated_path_is_served_from_cache() {
    let temp = sample_project();
    let home = tempdir().unwrap();
    let root = temp.path().join("proj");

    let assert = prompt_tree(&home)
        .arg("-v")
        .arg(&root)
        .arg(&root)
        .assert()
        .success()
        .stderr(predicate::str::contains("Cache hit"));

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let half = stdout.len() / 2;
    assert_eq!(stdout[..half], stdout[half..]);
}

#[test]
fn preset_from_home_config_is_applied() {
    let temp = sample_project();
    let home = tempdir().unwrap();
    write_file(
        &home.path().join(".config/prompt_tree/presets.toml"),
        "[toml-only]\nshow_toml_content = true\n",
    );

    prompt_tree(&home)
        .args(["--preset", "toml-only"])
        .arg(temp.path().join("proj"))
        .assert()
        .success()
        .stdout(predicate::str::contains("name = \"demo\""))
        .stdout(predicate::str::contains("Class: Foo").not());
}

#[test]
fn non_directory_path_fails() {
    let temp = sample_project();
    let home = tempdir().unwrap();

    prompt_tree(&home)
        .arg(temp.path().join("proj/a.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a directory"));
}
