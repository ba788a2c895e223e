//! Purpose: Resolve each configuration facet from filesystem and environment
//! state.
//! Exports: `Resolver`, `Facet`, `ALL_FACETS`.
//! Role: The whole point of the tool; every facet is a pure function of the
//! injected config and probe.
//! Invariants: Search-path order is significant; the first `site-` entry with
//! a `PySide2` subdirectory wins.
//! Invariants: Facets are stateless and recomputed per query; nothing is
//! cached between calls.
//! Invariants: The clang facet degrades to an empty string instead of failing.

use std::path::Path;

use crate::core::config::ResolverConfig;
use crate::core::error::{Error, ErrorKind};
use crate::core::interpreter::InterpreterInfo;
use crate::core::platform::Platform;
use crate::core::probe::Probe;

const PYSIDE2_DIR_NAME: &str = "PySide2";
const SITE_MARKER: &str = "site-";

/// All-facets evaluation order, matching the CLI flag table top to bottom.
pub const ALL_FACETS: [Facet; 7] = [
    Facet::PythonInclude,
    Facet::PythonLink,
    Facet::Pyside2Location,
    Facet::Pyside2Include,
    Facet::Pyside2Link,
    Facet::Pyside2SharedLibraries,
    Facet::ClangBinDir,
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Facet {
    PythonInclude,
    PythonLink,
    Pyside2Location,
    Pyside2Include,
    Pyside2Link,
    Pyside2SharedLibraries,
    ClangBinDir,
}

impl Facet {
    pub fn key(self) -> &'static str {
        match self {
            Facet::PythonInclude => "python-include",
            Facet::PythonLink => "python-link",
            Facet::Pyside2Location => "pyside2",
            Facet::Pyside2Include => "pyside2-include",
            Facet::Pyside2Link => "pyside2-link",
            Facet::Pyside2SharedLibraries => "pyside2-shared-libraries",
            Facet::ClangBinDir => "clang-bin-dir",
        }
    }

    pub fn resolve(self, resolver: &Resolver<'_>) -> Result<String, Error> {
        match self {
            Facet::PythonInclude => resolver.python_include(),
            Facet::PythonLink => resolver.python_link(),
            Facet::Pyside2Location => resolver.locate_pyside2(),
            Facet::Pyside2Include => resolver.pyside2_include(),
            Facet::Pyside2Link => resolver.pyside2_link(),
            Facet::Pyside2SharedLibraries => resolver.pyside2_shared_libraries(),
            Facet::ClangBinDir => Ok(resolver.clang_bin_dir()),
        }
    }
}

pub struct Resolver<'a> {
    config: &'a ResolverConfig,
    probe: &'a dyn Probe,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ResolverConfig, probe: &'a dyn Probe) -> Self {
        Self { config, probe }
    }

    /// First `site-` search-path entry whose `PySide2` subdirectory exists,
    /// symlink-resolved and separator-cleaned.
    pub fn locate_pyside2(&self) -> Result<String, Error> {
        for entry in self.search_paths()? {
            if !entry.contains(SITE_MARKER) {
                continue;
            }
            let candidate = Path::new(&entry).join(PYSIDE2_DIR_NAME);
            if self.probe.is_dir(&candidate) {
                let resolved = self.probe.canonicalize(&candidate).unwrap_or(candidate);
                tracing::debug!(path = %resolved.display(), "located PySide2");
                return Ok(self
                    .config
                    .platform()
                    .clean_path(&resolved.to_string_lossy()));
            }
        }
        Err(Error::new(ErrorKind::NotFound)
            .with_message("Unable to locate PySide2")
            .with_hint(
                "Install PySide2 into the interpreter's site-packages, \
                 or point PYSIDE2_CONFIG_SEARCH_PATH at it.",
            ))
    }

    pub fn pyside2_include(&self) -> Result<String, Error> {
        let location = self.locate_pyside2()?;
        Ok(format!(
            "{location}/include/PySide2 {location}/include/shiboken2"
        ))
    }

    pub fn pyside2_link(&self) -> Result<String, Error> {
        let location = self.locate_pyside2()?;
        let platform = self.config.platform();
        let mut flags = vec![format!("-L{location}")];
        for lib in self
            .probe
            .glob(Path::new(&location), &platform.shared_library_glob())
        {
            flags.push(platform.link_option(&lib));
        }
        Ok(flags.join(" "))
    }

    /// Shared-library file list. On Windows each matched import library is
    /// resolved and reported as its `.dll` counterpart; zero matches is an
    /// explicit empty result, not a failure.
    pub fn pyside2_shared_libraries(&self) -> Result<String, Error> {
        let location = self.locate_pyside2()?;
        let platform = self.config.platform();
        let libs = self
            .probe
            .glob(Path::new(&location), &platform.shared_library_glob());

        let paths: Vec<String> = match platform.runtime_library_extension() {
            Some(ext) => libs
                .iter()
                .map(|lib| {
                    let resolved = self.probe.canonicalize(lib).unwrap_or_else(|| lib.clone());
                    platform.clean_path(&resolved.with_extension(ext).to_string_lossy())
                })
                .collect(),
            None => libs
                .iter()
                .map(|lib| platform.clean_path(&lib.to_string_lossy()))
                .collect(),
        };
        Ok(paths.join(" "))
    }

    pub fn python_include(&self) -> Result<String, Error> {
        let info = self.interpreter()?;
        Ok(info.include_dir)
    }

    pub fn python_link(&self) -> Result<String, Error> {
        let info = self.interpreter()?;
        Ok(python_link_flags(self.config.platform(), &info))
    }

    /// Toolchain bin directory: `LLVM_INSTALL_DIR`, then `CLANG_INSTALL_DIR`,
    /// then `llvm-config --prefix`. Absence of all three is not an error;
    /// the facet reports an empty string.
    pub fn clang_bin_dir(&self) -> String {
        let prefix = ["LLVM_INSTALL_DIR", "CLANG_INSTALL_DIR"]
            .iter()
            .find_map(|var| {
                self.config
                    .env(var)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| self.probe.capture_first_line("llvm-config", &["--prefix"]));
        let Some(prefix) = prefix else {
            return String::new();
        };
        let bin = Path::new(&prefix).join("bin");
        let resolved = self.probe.canonicalize(&bin).unwrap_or(bin);
        self.config
            .platform()
            .clean_path(&resolved.to_string_lossy())
    }

    fn interpreter(&self) -> Result<InterpreterInfo, Error> {
        InterpreterInfo::query(self.config, self.probe)
    }

    fn search_paths(&self) -> Result<Vec<String>, Error> {
        if let Some(paths) = self.config.search_path_override() {
            return Ok(paths);
        }
        Ok(self.interpreter()?.search_paths)
    }
}

// TODO: statically linked interpreter builds still get a dynamic -lpython
// flag here; LIBDIR points at the static archive in that layout.
fn python_link_flags(platform: Platform, info: &InterpreterInfo) -> String {
    match platform {
        Platform::Windows => {
            let suffix = if info.debug_suffix { "_d" } else { "" };
            format!(
                "-L{} -lpython{}{}",
                info.libdir,
                info.version_no_dots(),
                suffix
            )
        }
        Platform::MacOs => format!("-L{} -lpython{}", info.libdir, info.version),
        Platform::Unix => format!("-lpython{}{}", info.version, info.abiflags),
    }
}
