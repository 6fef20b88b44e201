//! Platform identification in the tool vendor's naming scheme.
//!
//! The vendor publishes release assets named `nitro-<os>-<arch>.zip` where
//! `<os>` is one of `osx`, `linux`, `win` and `<arch>` is `x64` or `arm64`.
//! Resolution is total over the supported identifiers and fails loudly for
//! everything else; there is no silent default.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Platform identifier combining OS and architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Create a new platform.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Resolve from raw host identifiers.
    ///
    /// Pure and side-effect free; safe to call repeatedly.
    pub fn resolve(host_os: &str, host_arch: &str) -> Result<Self> {
        Ok(Self {
            os: Os::resolve(host_os)?,
            arch: Arch::resolve(host_arch)?,
        })
    }

    /// Resolve the platform this process is running on.
    pub fn current() -> Result<Self> {
        Self::resolve(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Expected file name of the tool binary on this platform.
    #[must_use]
    pub fn binary_name(&self) -> &'static str {
        match self.os {
            Os::Win => "nitro.exe",
            _ => "nitro",
        }
    }

    /// Release asset name for this platform.
    #[must_use]
    pub fn asset_name(&self) -> String {
        format!("nitro-{}-{}.zip", self.os, self.arch)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Operating system family, in vendor naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Osx,
    Linux,
    Win,
}

impl Os {
    /// Resolve from a raw host identifier.
    ///
    /// Accepts `darwin`/`macos`, `linux`, and `win32`/`windows` so both the
    /// pipeline host's identifiers and `std::env::consts::OS` resolve.
    pub fn resolve(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "darwin" | "macos" => Ok(Self::Osx),
            "linux" => Ok(Self::Linux),
            "win32" | "windows" => Ok(Self::Win),
            _ => Err(Error::unsupported_platform(raw)),
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Osx => write!(f, "osx"),
            Self::Linux => write!(f, "linux"),
            Self::Win => write!(f, "win"),
        }
    }
}

/// CPU architecture, in vendor naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X64,
    Arm64,
}

impl Arch {
    /// Resolve from a raw host identifier.
    pub fn resolve(raw: &str) -> Result<Self> {
        match raw.to_lowercase().as_str() {
            "x64" | "x86_64" | "amd64" => Ok(Self::X64),
            "arm64" | "aarch64" => Ok(Self::Arm64),
            _ => Err(Error::unsupported_architecture(raw)),
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X64 => write!(f, "x64"),
            Self::Arm64 => write!(f, "arm64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_resolve() {
        assert_eq!(Os::resolve("darwin").unwrap(), Os::Osx);
        assert_eq!(Os::resolve("macos").unwrap(), Os::Osx);
        assert_eq!(Os::resolve("linux").unwrap(), Os::Linux);
        assert_eq!(Os::resolve("win32").unwrap(), Os::Win);
        assert_eq!(Os::resolve("windows").unwrap(), Os::Win);
    }

    #[test]
    fn test_os_resolve_unsupported() {
        let error = Os::resolve("freebsd").unwrap_err();
        match error {
            Error::UnsupportedPlatform { value } => assert_eq!(value, "freebsd"),
            _ => panic!("Expected UnsupportedPlatform variant"),
        }
    }

    #[test]
    fn test_arch_resolve() {
        assert_eq!(Arch::resolve("x64").unwrap(), Arch::X64);
        assert_eq!(Arch::resolve("x86_64").unwrap(), Arch::X64);
        assert_eq!(Arch::resolve("amd64").unwrap(), Arch::X64);
        assert_eq!(Arch::resolve("arm64").unwrap(), Arch::Arm64);
        assert_eq!(Arch::resolve("aarch64").unwrap(), Arch::Arm64);
    }

    #[test]
    fn test_arch_resolve_unsupported() {
        let error = Arch::resolve("mips").unwrap_err();
        match error {
            Error::UnsupportedArchitecture { value } => assert_eq!(value, "mips"),
            _ => panic!("Expected UnsupportedArchitecture variant"),
        }
    }

    #[test]
    fn test_resolve_supported_grid() {
        // All documented (hostOs, hostArch) pairs resolve to the vendor naming.
        for (host_os, os) in [("darwin", Os::Osx), ("linux", Os::Linux), ("win32", Os::Win)] {
            for (host_arch, arch) in [
                ("x64", Arch::X64),
                ("x86_64", Arch::X64),
                ("arm64", Arch::Arm64),
                ("aarch64", Arch::Arm64),
            ] {
                let platform = Platform::resolve(host_os, host_arch).unwrap();
                assert_eq!(platform.os, os);
                assert_eq!(platform.arch, arch);
            }
        }
    }

    #[test]
    fn test_resolve_fails_on_either_component() {
        assert!(matches!(
            Platform::resolve("sunos", "x64"),
            Err(Error::UnsupportedPlatform { .. })
        ));
        assert!(matches!(
            Platform::resolve("linux", "riscv64"),
            Err(Error::UnsupportedArchitecture { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::new(Os::Osx, Arch::Arm64).to_string(), "osx-arm64");
        assert_eq!(Platform::new(Os::Win, Arch::X64).to_string(), "win-x64");
    }

    #[test]
    fn test_binary_name() {
        assert_eq!(Platform::new(Os::Linux, Arch::X64).binary_name(), "nitro");
        assert_eq!(Platform::new(Os::Osx, Arch::Arm64).binary_name(), "nitro");
        assert_eq!(Platform::new(Os::Win, Arch::X64).binary_name(), "nitro.exe");
    }

    #[test]
    fn test_asset_name() {
        assert_eq!(
            Platform::new(Os::Osx, Arch::Arm64).asset_name(),
            "nitro-osx-arm64.zip"
        );
        assert_eq!(
            Platform::new(Os::Linux, Arch::X64).asset_name(),
            "nitro-linux-x64.zip"
        );
    }

    #[test]
    fn test_current_resolves_on_supported_hosts() {
        // The test suite only runs on platforms the vendor supports.
        let platform = Platform::current().unwrap();
        assert!(!platform.asset_name().is_empty());
    }
}
