//! Purpose: Centralize every platform-dependent rule the facet resolver needs.
//! Exports: `Platform` plus its capability methods (suffix, glob, link flags).
//! Role: Single lookup table; no other module branches on the target OS.
//! Invariants: Glob composition yields exactly `*.lib`, `lib*.dylib`, or `lib*.so`.
//! Invariants: Link-option derivation strips the `lib` prefix only on Unix-likes.

use std::path::Path;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Platform {
    Windows,
    MacOs,
    Unix,
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    pub fn shared_library_suffix(self) -> &'static str {
        match self {
            Platform::Windows => "lib",
            Platform::MacOs => "dylib",
            Platform::Unix => "so",
        }
    }

    /// Glob pattern for the binding package's shared libraries. Windows has
    /// no `lib` naming convention; Unix-likes do.
    pub fn shared_library_glob(self) -> String {
        let pattern = format!("*.{}", self.shared_library_suffix());
        match self {
            Platform::Windows => pattern,
            _ => format!("lib{pattern}"),
        }
    }

    /// qmake link option for a shared-library file name.
    /// `libfoo.so` becomes `-lfoo` on Unix-likes; `foo.lib` stays `-lfoo`.
    pub fn link_option(self, lib: &Path) -> String {
        let base = lib
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self {
            Platform::Windows => format!("-l{base}"),
            _ => format!("-l{}", base.get(3..).unwrap_or("")),
        }
    }

    /// Windows import libraries (`.lib`) pair with `.dll` runtime libraries.
    pub fn runtime_library_extension(self) -> Option<&'static str> {
        match self {
            Platform::Windows => Some("dll"),
            _ => None,
        }
    }

    /// Normalize separators for emission. qmake wants forward slashes even
    /// on Windows.
    pub fn clean_path(self, path: &str) -> String {
        match self {
            Platform::Windows => path.replace('\\', "/"),
            _ => path.to_string(),
        }
    }

    /// Separator for path-list environment variables.
    pub fn path_list_separator(self) -> char {
        match self {
            Platform::Windows => ';',
            _ => ':',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Platform;
    use std::path::Path;

    #[test]
    fn glob_composition_per_platform() {
        assert_eq!(Platform::Windows.shared_library_glob(), "*.lib");
        assert_eq!(Platform::MacOs.shared_library_glob(), "lib*.dylib");
        assert_eq!(Platform::Unix.shared_library_glob(), "lib*.so");
    }

    #[test]
    fn link_option_strips_lib_prefix_on_unix() {
        assert_eq!(
            Platform::Unix.link_option(Path::new("/opt/pyside/libfoo.so")),
            "-lfoo"
        );
        assert_eq!(
            Platform::MacOs.link_option(Path::new("libshiboken2.dylib")),
            "-lshiboken2"
        );
    }

    #[test]
    fn link_option_keeps_base_name_on_windows() {
        assert_eq!(
            Platform::Windows.link_option(Path::new("C:/py/foo.lib")),
            "-lfoo"
        );
    }

    #[test]
    fn runtime_extension_only_on_windows() {
        assert_eq!(Platform::Windows.runtime_library_extension(), Some("dll"));
        assert_eq!(Platform::Unix.runtime_library_extension(), None);
        assert_eq!(Platform::MacOs.runtime_library_extension(), None);
    }

    #[test]
    fn clean_path_normalizes_backslashes_on_windows_only() {
        assert_eq!(
            Platform::Windows.clean_path("C:\\py\\PySide2"),
            "C:/py/PySide2"
        );
        assert_eq!(Platform::Unix.clean_path("/a\\b"), "/a\\b");
    }
}
