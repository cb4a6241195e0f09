//! Host system fact probing
//!
//! Queries the machine for OS identity and version, CPU architecture,
//! installed C compilers and the C runtime in use, by shelling out to
//! platform utilities (`uname`, `lsb_release`, `sw_vers`, `getconf`),
//! reading the Windows registry or calling the `GetVersion` export of
//! kernel32.
//!
//! Every query is stateless, synchronous and uncached: at most one child
//! process or native call per question, errors surfaced immediately to the
//! caller. The per-platform probers are generic over [`CommandRunner`] (and
//! [`WindowsApi`] on Windows), so all parsing and decision logic is testable
//! on any host; the top-level functions wire in the live implementations for
//! the build target.

mod compiler;
mod error;
mod linux;
mod macos;
mod run;
mod types;
mod version;
mod windows;

pub use error::ProbeError;
pub use linux::LinuxProber;
pub use macos::MacProber;
pub use run::{CommandRunner, SystemRunner};
pub use types::{Arch, Compiler, CompilerName, Libc, LibcName, Os, OsVersion};
#[cfg(windows)]
pub use windows::NativeApi;
pub use windows::{WindowsApi, WindowsProber};

/// The operating system this binary was built for.
///
/// Fixed by the build target; never fails and never probes.
pub fn os() -> Os {
    Os::current()
}

/// The CPU architecture this binary was built for.
///
/// Fixed by the build target; no external process is spawned. Use
/// [`Arch::from_machine`] to classify captured `uname -m` output instead.
pub fn architecture() -> Arch {
    Arch::current()
}

/// OS version and release name of the host.
pub fn os_version() -> Result<OsVersion, ProbeError> {
    #[cfg(target_os = "linux")]
    return LinuxProber::new(SystemRunner).os_version();
    #[cfg(target_os = "macos")]
    return MacProber::new(SystemRunner).os_version();
    #[cfg(target_os = "windows")]
    return WindowsProber::new(SystemRunner, NativeApi).os_version();
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    Err(ProbeError::Unsupported)
}

/// C runtime library in use on the host.
///
/// `Ok(None)` means the host verifiably has no C runtime (possible on
/// Windows); supported Unix targets always report one or fail.
pub fn libc() -> Result<Option<Libc>, ProbeError> {
    #[cfg(target_os = "linux")]
    return LinuxProber::new(SystemRunner).libc();
    #[cfg(target_os = "macos")]
    return MacProber::new(SystemRunner).libc();
    #[cfg(target_os = "windows")]
    return WindowsProber::new(SystemRunner, NativeApi).libc();
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    Err(ProbeError::Unsupported)
}

/// Installed C compiler toolchains, in candidate order.
///
/// Candidates that are not installed are simply absent from the result; the
/// returned entries always have a strictly positive major version.
pub fn compilers() -> Result<Vec<Compiler>, ProbeError> {
    #[cfg(target_os = "linux")]
    return LinuxProber::new(SystemRunner).compilers();
    #[cfg(target_os = "macos")]
    return MacProber::new(SystemRunner).compilers();
    #[cfg(target_os = "windows")]
    return WindowsProber::new(SystemRunner, NativeApi).compilers();
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    Err(ProbeError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_is_never_unknown_on_supported_targets() {
        assert_ne!(os(), Os::Unknown);
    }

    #[test]
    fn test_architecture_is_never_unknown_on_supported_targets() {
        assert_ne!(architecture(), Arch::Unknown);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_live_os_version() {
        let version = os_version().unwrap();
        assert!(!version.version.is_empty());
        assert!(version.major > 0);
        assert!(!version.name.is_empty());
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_live_compilers_have_positive_majors() {
        let compilers = compilers().unwrap();
        assert!(compilers.iter().all(|c| c.major > 0));
    }
}
