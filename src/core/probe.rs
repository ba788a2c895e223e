//! Purpose: Narrow capability seam between facet logic and the host system.
//! Exports: `Probe` trait and the real `SystemProbe` implementation.
//! Role: Every filesystem check, glob, symlink resolution, and subprocess
//! capture the resolver performs goes through this trait so tests can
//! substitute fakes.
//! Invariants: Glob results are sorted for stable output across filesystems.
//! Invariants: Probe methods never panic on missing paths or absent tools.

use std::path::{Path, PathBuf};
use std::process::Command;

pub trait Probe {
    fn is_dir(&self, path: &Path) -> bool;

    /// Match `pattern` (a single-`*` prefix/suffix pattern such as
    /// `lib*.so`) against the file names directly inside `dir`.
    fn glob(&self, dir: &Path, pattern: &str) -> Vec<PathBuf>;

    /// Resolve symlinks to an absolute path; `None` when the path does not
    /// exist.
    fn canonicalize(&self, path: &Path) -> Option<PathBuf>;

    /// Run a program and return its first stdout line, trimmed. `None` when
    /// the program is absent, fails, or prints nothing.
    fn capture_first_line(&self, program: &str, args: &[&str]) -> Option<String>;

    /// Run a program and return its full stdout on success.
    fn capture_output(&self, program: &str, args: &[&str]) -> Option<String>;
}

pub struct SystemProbe;

impl Probe for SystemProbe {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn glob(&self, dir: &Path, pattern: &str) -> Vec<PathBuf> {
        let Some((prefix, suffix)) = pattern.split_once('*') else {
            return Vec::new();
        };
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut matches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.starts_with(prefix)
                    && name.ends_with(suffix)
                    && name.len() >= prefix.len() + suffix.len()
            })
            .map(|entry| entry.path())
            .collect();
        matches.sort();
        matches
    }

    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        std::fs::canonicalize(path).ok()
    }

    fn capture_first_line(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = self.capture_output(program, args)?;
        let line = output.lines().next()?.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }

    fn capture_output(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(program).args(args).output().ok()?;
        if !output.status.success() {
            tracing::debug!(program, code = ?output.status.code(), "probe subprocess failed");
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
