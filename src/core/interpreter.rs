//! Purpose: Query the host Python interpreter's configuration in one shot.
//! Exports: `InterpreterInfo` and its `query` constructor.
//! Role: External-collaborator boundary; the interpreter is spawned once per
//! facet that needs it and replies with a single JSON object.
//! Invariants: Candidate order is `python3` then `python`; the
//! `PYSIDE2_CONFIG_PYTHON` override replaces both.
//! Invariants: `sys.path` order is preserved exactly as the interpreter
//! reports it.

use serde_json::Value;

use crate::core::config::ResolverConfig;
use crate::core::error::{Error, ErrorKind};
use crate::core::probe::Probe;

const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

const PYTHON_OVERRIDE_VAR: &str = "PYSIDE2_CONFIG_PYTHON";

// Prints sysconfig facts plus sys.path as one JSON line. The debug-suffix
// check mirrors the classic `imp.get_suffixes()` probe for `_d` extension
// modules on debug interpreter builds.
const QUERY_PROGRAM: &str = r#"import sys, sysconfig, json, importlib.machinery
print(json.dumps({
    "version": "%d.%d" % sys.version_info[:2],
    "abiflags": getattr(sys, "abiflags", ""),
    "include": sysconfig.get_path("include"),
    "libdir": sysconfig.get_config_var("LIBDIR") or "",
    "debug_suffix": any(s.endswith(("_d.pyd", "_d.so"))
                       for s in importlib.machinery.EXTENSION_SUFFIXES),
    "path": sys.path,
}))"#;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterpreterInfo {
    pub version: String,
    pub abiflags: String,
    pub include_dir: String,
    pub libdir: String,
    pub debug_suffix: bool,
    pub search_paths: Vec<String>,
}

impl InterpreterInfo {
    pub fn query(config: &ResolverConfig, probe: &dyn Probe) -> Result<Self, Error> {
        let mut tried = Vec::new();
        for candidate in candidates(config) {
            tried.push(candidate.clone());
            if let Some(output) = probe.capture_output(&candidate, &["-c", QUERY_PROGRAM]) {
                tracing::debug!(interpreter = %candidate, "interpreter query succeeded");
                return Self::from_json_reply(&output);
            }
        }
        Err(Error::new(ErrorKind::Interpreter)
            .with_message(format!(
                "Unable to locate Python (tried: {})",
                tried.join(", ")
            ))
            .with_hint("Put a Python interpreter on PATH or set PYSIDE2_CONFIG_PYTHON."))
    }

    pub fn version_no_dots(&self) -> String {
        self.version.replace('.', "")
    }

    fn from_json_reply(reply: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(reply.trim()).map_err(|err| {
            Error::new(ErrorKind::Interpreter)
                .with_message("interpreter configuration reply was not valid JSON")
                .with_source(err)
        })?;
        let field = |name: &str| -> Result<String, Error> {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::new(ErrorKind::Interpreter)
                        .with_message(format!("interpreter reply missing field `{name}`"))
                })
        };
        let search_paths = value
            .get("path")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .ok_or_else(|| {
                Error::new(ErrorKind::Interpreter)
                    .with_message("interpreter reply missing field `path`")
            })?;

        Ok(Self {
            version: field("version")?,
            abiflags: field("abiflags")?,
            include_dir: field("include")?,
            libdir: field("libdir")?,
            debug_suffix: value
                .get("debug_suffix")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            search_paths,
        })
    }
}

fn candidates(config: &ResolverConfig) -> Vec<String> {
    match config.env(PYTHON_OVERRIDE_VAR) {
        Some(exe) if !exe.is_empty() => vec![exe.to_string()],
        _ => PYTHON_CANDIDATES.iter().map(|c| (*c).to_string()).collect(),
    }
}
