//! Tailwind CSS standalone CLI download table.
//!
//! | OS      | Arch    | Asset                        |
//! |---------|---------|------------------------------|
//! | linux   | x86_64  | `tailwindcss-linux-x64`      |
//! | linux   | aarch64 | `tailwindcss-linux-arm64`    |
//! | macos   | x86_64  | `tailwindcss-macos-x64`      |
//! | macos   | aarch64 | `tailwindcss-macos-arm64`    |
//! | windows | x86_64  | `tailwindcss-windows-x64.exe`|

use std::path::PathBuf;

/// Release directory every asset is fetched from.
pub const TAILWIND_RELEASE_BASE: &str =
    "https://github.com/tailwindlabs/tailwindcss/releases/latest/download";

/// An OS/architecture pair, as reported by `std::env::consts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    pub const fn new(os: &'static str, arch: &'static str) -> Self {
        Self { os, arch }
    }

    /// The platform this binary was built for.
    pub const fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn is_windows(&self) -> bool {
        self.os == "windows"
    }

    /// Published asset name, or `None` if Tailwind ships nothing for it.
    pub fn tailwind_asset(&self) -> Option<&'static str> {
        match (self.os, self.arch) {
            ("linux", "x86_64") => Some("tailwindcss-linux-x64"),
            ("linux", "aarch64") => Some("tailwindcss-linux-arm64"),
            ("macos", "x86_64") => Some("tailwindcss-macos-x64"),
            ("macos", "aarch64") => Some("tailwindcss-macos-arm64"),
            ("windows", "x86_64") => Some("tailwindcss-windows-x64.exe"),
            _ => None,
        }
    }

    /// Full download URL under `base`.
    pub fn tailwind_url(&self, base: &str) -> Option<String> {
        self.tailwind_asset()
            .map(|asset| format!("{}/{}", base.trim_end_matches('/'), asset))
    }

    /// Where the binary lands inside the project.
    pub fn tailwind_destination(&self) -> PathBuf {
        let name = if self.is_windows() {
            "tailwindcss.exe"
        } else {
            "tailwindcss"
        };
        PathBuf::from("bin").join(name)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_platforms_map_to_assets() {
        assert_eq!(
            Platform::new("linux", "x86_64").tailwind_url(TAILWIND_RELEASE_BASE),
            Some(format!("{TAILWIND_RELEASE_BASE}/tailwindcss-linux-x64"))
        );
        assert_eq!(
            Platform::new("macos", "aarch64").tailwind_asset(),
            Some("tailwindcss-macos-arm64")
        );
        assert_eq!(
            Platform::new("windows", "x86_64").tailwind_asset(),
            Some("tailwindcss-windows-x64.exe")
        );
    }

    #[test]
    fn unsupported_platform_has_no_asset() {
        assert_eq!(Platform::new("freebsd", "x86_64").tailwind_asset(), None);
        assert_eq!(Platform::new("windows", "aarch64").tailwind_asset(), None);
    }

    #[test]
    fn windows_destination_has_exe_suffix() {
        assert_eq!(
            Platform::new("windows", "x86_64").tailwind_destination(),
            PathBuf::from("bin").join("tailwindcss.exe")
        );
        assert_eq!(
            Platform::new("linux", "x86_64").tailwind_destination(),
            PathBuf::from("bin").join("tailwindcss")
        );
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        assert_eq!(
            Platform::new("linux", "aarch64").tailwind_url("http://127.0.0.1:8080/"),
            Some("http://127.0.0.1:8080/tailwindcss-linux-arm64".to_string())
        );
    }
}
