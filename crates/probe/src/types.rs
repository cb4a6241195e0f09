//! Typed records for probed system facts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Windows,
    Mac,
    Unknown,
}

impl Os {
    /// The operating system this binary was built for
    #[cfg(target_os = "linux")]
    pub const fn current() -> Self {
        Os::Linux
    }

    #[cfg(target_os = "macos")]
    pub const fn current() -> Self {
        Os::Mac
    }

    #[cfg(target_os = "windows")]
    pub const fn current() -> Self {
        Os::Windows
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    pub const fn current() -> Self {
        Os::Unknown
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "Linux",
            Os::Windows => "Windows",
            Os::Mac => "Mac",
            Os::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    I386,
    Amd64,
    Arm,
    Unknown,
}

impl Arch {
    /// The architecture this binary was built for
    #[cfg(target_arch = "x86")]
    pub const fn current() -> Self {
        Arch::I386
    }

    #[cfg(target_arch = "x86_64")]
    pub const fn current() -> Self {
        Arch::Amd64
    }

    #[cfg(any(target_arch = "arm", target_arch = "aarch64"))]
    pub const fn current() -> Self {
        Arch::Arm
    }

    #[cfg(not(any(
        target_arch = "x86",
        target_arch = "x86_64",
        target_arch = "arm",
        target_arch = "aarch64"
    )))]
    pub const fn current() -> Self {
        Arch::Unknown
    }

    /// Classify a `uname -m` style machine string.
    ///
    /// A trailing "64" wins over the prefix rules, so "aarch64" classifies
    /// as 64-bit rather than ARM.
    pub fn from_machine(machine: &str) -> Self {
        let machine = machine.trim();
        if machine.ends_with("64") {
            Arch::Amd64
        } else if machine.starts_with('i') {
            Arch::I386
        } else if machine.starts_with("arm") {
            Arch::Arm
        } else {
            Arch::Unknown
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::I386 => "i386",
            Arch::Amd64 => "amd64",
            Arch::Arm => "arm",
            Arch::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// OS version as reported by the host
///
/// Built fresh on every query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsVersion {
    /// Raw version string as printed by the source utility
    pub version: String,
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    /// Free-form release name; "Unknown" when the host cannot say
    pub name: String,
}

/// C runtime library name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibcName {
    Glibc,
    Msvcrt,
    BsdLibc,
    Unknown,
}

impl LibcName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LibcName::Glibc => "glibc",
            LibcName::Msvcrt => "msvcrt",
            LibcName::BsdLibc => "bsdlibc",
            LibcName::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LibcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// C runtime library in use on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Libc {
    pub name: LibcName,
    pub major: u32,
    pub minor: u32,
}

/// Compiler toolchain name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerName {
    Gcc,
    Clang,
    Msvc,
    Mingw,
    Cygwin,
}

impl CompilerName {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CompilerName::Gcc => "gcc",
            CompilerName::Clang => "clang",
            CompilerName::Msvc => "msvc",
            CompilerName::Mingw => "mingw",
            CompilerName::Cygwin => "cygwin",
        }
    }
}

impl fmt::Display for CompilerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Installed compiler toolchain
///
/// `major` is always strictly positive; candidates that report a zero major
/// version are treated as absent and never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    pub name: CompilerName,
    pub major: u32,
    pub minor: u32,
}
