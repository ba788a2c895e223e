// CLI integration tests driving the binary against fabricated install trees.
use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_pyside2-config");
    let mut cmd = Command::new(exe);
    // Keep the ambient environment out of facet resolution.
    cmd.env_remove("PYSIDE2_CONFIG_SEARCH_PATH")
        .env_remove("PYSIDE2_CONFIG_PYTHON")
        .env_remove("LLVM_INSTALL_DIR")
        .env_remove("CLANG_INSTALL_DIR");
    cmd
}

fn stdout_line(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .trim_end_matches('\n')
        .to_string()
}

/// `site-packages/PySide2` with two shared libraries and include dirs.
fn fabricate_install_tree(root: &Path) -> (PathBuf, PathBuf) {
    let site = root.join("site-packages");
    let pyside2 = site.join("PySide2");
    std::fs::create_dir_all(pyside2.join("include/PySide2")).expect("include dirs");
    std::fs::create_dir_all(pyside2.join("include/shiboken2")).expect("include dirs");
    for name in ["libpyside2.so", "libshiboken2.so", "README.txt"] {
        std::fs::write(pyside2.join(name), b"").expect("lib file");
    }
    let canonical = std::fs::canonicalize(&pyside2).expect("canonicalize");
    (site, canonical)
}

#[cfg(unix)]
#[test]
fn locates_pyside2_in_fabricated_tree() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (site, pyside2) = fabricate_install_tree(temp.path());

    let output = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", &site)
        .arg("--pyside2")
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), pyside2.to_string_lossy());
}

#[cfg(unix)]
#[test]
fn include_and_link_facets_derive_from_the_location() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (site, pyside2) = fabricate_install_tree(temp.path());
    let d = pyside2.to_string_lossy();

    let include = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", &site)
        .arg("--pyside2-include")
        .output()
        .expect("run");
    assert!(include.status.success());
    assert_eq!(
        stdout_line(&include),
        format!("{d}/include/PySide2 {d}/include/shiboken2")
    );

    let link = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", &site)
        .arg("--pyside2-link")
        .output()
        .expect("run");
    assert!(link.status.success());
    assert_eq!(stdout_line(&link), format!("-L{d} -lpyside2 -lshiboken2"));

    let libs = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", &site)
        .arg("--pyside2-shared-libraries")
        .output()
        .expect("run");
    assert!(libs.status.success());
    assert_eq!(
        stdout_line(&libs),
        format!("{d}/libpyside2.so {d}/libshiboken2.so")
    );
}

#[cfg(unix)]
#[test]
fn facets_print_in_flag_table_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (site, pyside2) = fabricate_install_tree(temp.path());
    let d = pyside2.to_string_lossy();

    let output = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", &site)
        .args(["--pyside2-link", "--pyside2"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let lines: Vec<_> = String::from_utf8_lossy(&output.stdout).lines().map(String::from).collect();
    assert_eq!(lines, [d.to_string(), format!("-L{d} -lpyside2 -lshiboken2")]);
}

#[test]
fn missing_pyside2_aborts_with_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", temp.path())
        .arg("--pyside2")
        .output()
        .expect("run");
    assert_eq!(output.status.code().unwrap(), 3);
    assert!(output.stdout.is_empty());
    let stderr: Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stderr).trim()).expect("json stderr");
    let message = stderr["error"]["message"].as_str().unwrap();
    assert!(message.contains("Unable to locate PySide2"));
}

#[test]
fn dependent_facets_share_the_not_found_abort() {
    let temp = tempfile::tempdir().expect("tempdir");

    for flag in [
        "--pyside2-include",
        "--pyside2-link",
        "--pyside2-shared-libraries",
    ] {
        let output = cmd()
            .env("PYSIDE2_CONFIG_SEARCH_PATH", temp.path())
            .arg(flag)
            .output()
            .expect("run");
        assert_eq!(output.status.code().unwrap(), 3, "flag {flag}");
        assert!(output.stdout.is_empty(), "flag {flag}");
    }
}

#[test]
fn all_facets_abort_on_first_failure_without_partial_output() {
    let temp = tempfile::tempdir().expect("tempdir");

    // python-include is evaluated first in all-facets mode; with no usable
    // interpreter the run aborts before any facet line is printed.
    let output = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", temp.path())
        .env("PYSIDE2_CONFIG_PYTHON", "pyside2-config-no-such-python")
        .arg("-a")
        .output()
        .expect("run");
    assert_eq!(output.status.code().unwrap(), 4);
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unable to locate Python"));
}

#[test]
fn clang_bin_dir_is_empty_when_nothing_resolves() {
    let temp = tempfile::tempdir().expect("tempdir");

    // Empty PATH keeps a real llvm-config out of reach.
    let output = cmd()
        .env("PATH", temp.path())
        .arg("--clang-bin-dir")
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), "");
}

#[test]
fn clang_bin_dir_resolves_from_llvm_install_dir() {
    let temp = tempfile::tempdir().expect("tempdir");
    let prefix = temp.path().join("llvm");
    std::fs::create_dir_all(prefix.join("bin")).expect("bin dir");
    let canonical_bin = std::fs::canonicalize(prefix.join("bin")).expect("canonicalize");

    let output = cmd()
        .env("LLVM_INSTALL_DIR", &prefix)
        .arg("--clang-bin-dir")
        .output()
        .expect("run");
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), canonical_bin.to_string_lossy());
}

#[cfg(unix)]
#[test]
fn json_mode_emits_one_object_keyed_by_facet() {
    let temp = tempfile::tempdir().expect("tempdir");
    let (site, pyside2) = fabricate_install_tree(temp.path());

    let output = cmd()
        .env("PYSIDE2_CONFIG_SEARCH_PATH", &site)
        .env("PATH", temp.path())
        .args(["--json", "--pyside2", "--clang-bin-dir"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).expect("json stdout");
    assert_eq!(
        value["pyside2"].as_str().unwrap(),
        pyside2.to_string_lossy()
    );
    assert_eq!(value["clang-bin-dir"].as_str().unwrap(), "");
}

#[test]
fn help_exits_zero_with_usage_text_only() {
    let output = cmd().arg("--help").output().expect("run");
    assert_eq!(output.status.code().unwrap(), 0);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Print PySide2 location"));
    assert!(stdout.contains("--pyside2-shared-libraries"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = cmd().arg("--no-such-facet").output().expect("run");
    assert_eq!(output.status.code().unwrap(), 2);
    assert!(output.stdout.is_empty());
}
