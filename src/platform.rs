//! Host platform detection and canonical platform pairs.
//!
//! Release assets are published for a small closed set of `(OS, architecture)`
//! pairs. Raw host identifiers are mapped through a single table; anything
//! outside the table is rejected before any network or filesystem activity.

use crate::error::{InstallError, Result};
use std::fmt;

/// Supported CPU architecture families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// 64-bit x86 (`x86_64`, `amd64`).
    X86_64,
    /// 64-bit ARM (`arm64`, `aarch64`).
    Arm64,
}

impl Arch {
    /// Map a raw architecture identifier to its canonical family.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::UnsupportedArch`] for any value outside the
    /// supported table.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiff_install::platform::Arch;
    ///
    /// assert_eq!(Arch::parse("amd64").unwrap(), Arch::X86_64);
    /// assert!(Arch::parse("riscv64").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "arm64" | "aarch64" => Ok(Self::Arm64),
            _ => Err(InstallError::UnsupportedArch {
                value: raw.to_owned(),
            }),
        }
    }

    /// Return the canonical asset-name component for this architecture.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported operating system families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    /// Linux hosts.
    Linux,
    /// macOS hosts (reported as `darwin` by uname and `macos` by Rust).
    Darwin,
    /// Windows hosts, including MSYS, MinGW, and Cygwin environments.
    Windows,
}

impl Os {
    /// Map a raw OS identifier to its canonical family.
    ///
    /// MSYS-style environments report identifiers such as `msys_nt-10.0`;
    /// these match by prefix. Matching is case-insensitive throughout.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::UnsupportedOs`] for any value outside the
    /// supported table.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiff_install::platform::Os;
    ///
    /// assert_eq!(Os::parse("msys_nt-10.0").unwrap(), Os::Windows);
    /// assert!(Os::parse("freebsd").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let lowered = raw.to_ascii_lowercase();
        if lowered == "linux" {
            return Ok(Self::Linux);
        }
        if lowered == "darwin" || lowered == "macos" {
            return Ok(Self::Darwin);
        }
        if lowered == "windows"
            || lowered.starts_with("msys")
            || lowered.starts_with("mingw")
            || lowered.starts_with("cygwin")
        {
            return Ok(Self::Windows);
        }
        Err(InstallError::UnsupportedOs {
            value: raw.to_owned(),
        })
    }

    /// Return the canonical asset-name component for this OS family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::Windows => "Windows",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical `(OS, architecture)` pair used to select the release asset.
///
/// # Examples
///
/// ```
/// use skiff_install::platform::{Arch, Os, Platform};
///
/// let platform = Platform::new(Os::Linux, Arch::X86_64);
/// assert_eq!(platform.to_string(), "Linux_x86_64");
/// assert_eq!(platform.archive_ext(), ".tar.gz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// CPU architecture family.
    pub arch: Arch,
}

impl Platform {
    /// Create a platform pair from canonical components.
    #[must_use]
    pub const fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Detect the host platform from compile-time host identifiers.
    ///
    /// Both identifiers pass through the same raw-value tables as
    /// [`Os::parse`] and [`Arch::parse`], keeping the mapping in one place.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-platform error when the host is outside the
    /// release matrix. No side effects occur before this point.
    pub fn detect() -> Result<Self> {
        Self::from_raw(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map raw OS and architecture identifiers to a canonical pair.
    ///
    /// # Errors
    ///
    /// Returns an unsupported-platform error for values outside the table.
    pub fn from_raw(raw_os: &str, raw_arch: &str) -> Result<Self> {
        let os = Os::parse(raw_os)?;
        let arch = Arch::parse(raw_arch)?;
        Ok(Self { os, arch })
    }

    /// Return the archive extension used for this platform's release asset.
    #[must_use]
    pub const fn archive_ext(self) -> &'static str {
        match self.os {
            Os::Windows => ".zip",
            Os::Linux | Os::Darwin => ".tar.gz",
        }
    }

    /// Return the executable filename suffix for this platform.
    #[must_use]
    pub const fn exe_suffix(self) -> &'static str {
        match self.os {
            Os::Windows => ".exe",
            Os::Linux | Os::Darwin => "",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::x86_64("x86_64", Arch::X86_64)]
    #[case::amd64("amd64", Arch::X86_64)]
    #[case::arm64("arm64", Arch::Arm64)]
    #[case::aarch64("aarch64", Arch::Arm64)]
    #[case::uppercase("AMD64", Arch::X86_64)]
    fn arch_parse_maps_raw_values(#[case] raw: &str, #[case] expected: Arch) {
        assert_eq!(Arch::parse(raw).expect("supported arch"), expected);
    }

    #[rstest]
    #[case::riscv("riscv64")]
    #[case::i686("i686")]
    #[case::empty("")]
    fn arch_parse_rejects_unsupported(#[case] raw: &str) {
        let err = Arch::parse(raw).expect_err("unsupported arch");
        assert!(matches!(err, InstallError::UnsupportedArch { .. }));
    }

    #[rstest]
    #[case::linux("linux", Os::Linux)]
    #[case::darwin("darwin", Os::Darwin)]
    #[case::macos("macos", Os::Darwin)]
    #[case::msys("msys_nt-10.0", Os::Windows)]
    #[case::mingw("mingw64_nt-10.0-19045", Os::Windows)]
    #[case::cygwin("cygwin_nt-10.0", Os::Windows)]
    #[case::windows("windows", Os::Windows)]
    #[case::mixed_case("Linux", Os::Linux)]
    fn os_parse_maps_raw_values(#[case] raw: &str, #[case] expected: Os) {
        assert_eq!(Os::parse(raw).expect("supported OS"), expected);
    }

    #[rstest]
    #[case::freebsd("freebsd")]
    #[case::solaris("sunos")]
    #[case::empty("")]
    fn os_parse_rejects_unsupported(#[case] raw: &str) {
        let err = Os::parse(raw).expect_err("unsupported OS");
        assert!(matches!(err, InstallError::UnsupportedOs { .. }));
    }

    #[test]
    fn linux_x86_64_renders_canonical_pair() {
        let platform = Platform::from_raw("linux", "x86_64").expect("supported");
        assert_eq!(platform.to_string(), "Linux_x86_64");
        assert_eq!(platform.archive_ext(), ".tar.gz");
        assert_eq!(platform.exe_suffix(), "");
    }

    #[test]
    fn msys_host_selects_windows_asset() {
        let platform = Platform::from_raw("msys_nt-10.0", "x86_64").expect("supported");
        assert_eq!(platform.to_string(), "Windows_x86_64");
        assert_eq!(platform.archive_ext(), ".zip");
        assert_eq!(platform.exe_suffix(), ".exe");
    }

    #[test]
    fn detect_succeeds_on_supported_hosts() {
        // The test host is one of the supported platforms; detection must map
        // it to exactly one canonical pair.
        let platform = Platform::detect().expect("test host should be supported");
        assert!(!platform.to_string().is_empty());
    }

    #[rstest]
    #[case::darwin_arm("darwin", "arm64", "Darwin_arm64")]
    #[case::windows_amd64("windows", "amd64", "Windows_x86_64")]
    fn from_raw_is_deterministic(#[case] os: &str, #[case] arch: &str, #[case] expected: &str) {
        let platform = Platform::from_raw(os, arch).expect("supported");
        assert_eq!(platform.to_string(), expected);
    }
}
