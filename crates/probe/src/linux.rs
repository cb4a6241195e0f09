//! Linux prober: uname, lsb_release, getconf and compiler discovery

use crate::compiler;
use crate::error::ProbeError;
use crate::run::CommandRunner;
use crate::types::{Arch, Compiler, CompilerName, Libc, LibcName, OsVersion};

/// Compiler executables probed on Linux
const CANDIDATES: &[(CompilerName, &str)] =
    &[(CompilerName::Gcc, "gcc"), (CompilerName::Clang, "clang")];

/// Queries Linux system facts through external utilities
#[derive(Debug)]
pub struct LinuxProber<R> {
    runner: R,
}

impl<R: CommandRunner> LinuxProber<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Kernel version from `uname -r`, distribution name from `lsb_release -d`.
    ///
    /// The name is optional metadata: a missing or malformed `lsb_release`
    /// yields "Unknown" rather than an error.
    pub fn os_version(&self) -> Result<OsVersion, ProbeError> {
        let version = self
            .runner
            .run("uname", &["-r"])
            .map_err(|source| ProbeError::ToolUnavailable { tool: "uname", source })?;
        let (major, minor, micro) = crate::version::parse_leading_triple("kernel version", &version)?;
        let name = self.distribution_name();
        Ok(OsVersion {
            version,
            major,
            minor,
            micro,
            name,
        })
    }

    // `lsb_release -d` prints "Description:\t<name>".
    fn distribution_name(&self) -> String {
        match self.runner.run("lsb_release", &["-d"]) {
            Ok(output) => match output.split_once(':') {
                Some((_, name)) => name.trim().to_string(),
                None => "Unknown".to_string(),
            },
            Err(_) => "Unknown".to_string(),
        }
    }

    /// Architecture classified from `uname -m` output.
    ///
    /// The build-target constant is preferred for the local machine; this is
    /// the probing variant for callers that inspect a captured machine string.
    pub fn machine_arch(&self) -> Result<Arch, ProbeError> {
        let machine = self
            .runner
            .run("uname", &["-m"])
            .map_err(|source| ProbeError::ToolUnavailable { tool: "uname", source })?;
        Ok(Arch::from_machine(&machine))
    }

    /// glibc version from `getconf GNU_LIBC_VERSION`.
    ///
    /// glibc is assumed; musl and other libcs are not detected.
    pub fn libc(&self) -> Result<Option<Libc>, ProbeError> {
        let output = self
            .runner
            .run("getconf", &["GNU_LIBC_VERSION"])
            .map_err(|source| ProbeError::ToolUnavailable { tool: "getconf", source })?;
        let (major, minor) = crate::version::parse_loose_pair("glibc version", &output)?;
        Ok(Some(Libc {
            name: LibcName::Glibc,
            major,
            minor,
        }))
    }

    /// Installed compilers from the fixed candidate list.
    pub fn compilers(&self) -> Result<Vec<Compiler>, ProbeError> {
        compiler::probe_candidates(&self.runner, CANDIDATES)
    }
}
