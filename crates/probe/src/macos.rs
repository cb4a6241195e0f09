//! macOS prober: sw_vers and clang

use crate::compiler;
use crate::error::ProbeError;
use crate::run::CommandRunner;
use crate::types::{Compiler, CompilerName, Libc, LibcName, OsVersion};

/// Compiler executables probed on macOS
const CANDIDATES: &[(CompilerName, &str)] = &[(CompilerName::Clang, "clang")];

/// Queries macOS system facts through external utilities
#[derive(Debug)]
pub struct MacProber<R> {
    runner: R,
}

impl<R: CommandRunner> MacProber<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Product version and name from `sw_vers`.
    ///
    /// The product name is optional metadata and falls back to "Unknown",
    /// same as the distribution name on Linux.
    pub fn os_version(&self) -> Result<OsVersion, ProbeError> {
        let version = self
            .runner
            .run("sw_vers", &["-productVersion"])
            .map_err(|source| ProbeError::ToolUnavailable { tool: "sw_vers", source })?;
        let (major, minor, micro) =
            crate::version::parse_leading_triple("product version", &version)?;
        let name = self
            .runner
            .run("sw_vers", &["-productName"])
            .unwrap_or_else(|_| "Unknown".to_string());
        Ok(OsVersion {
            version,
            major,
            minor,
            micro,
            name,
        })
    }

    /// C runtime version proxied from `clang --version`.
    ///
    /// The bundled runtime carries no queryable version of its own, so the
    /// toolchain version stands in for it.
    pub fn libc(&self) -> Result<Option<Libc>, ProbeError> {
        let output = self
            .runner
            .run("clang", &["--version"])
            .map_err(|source| ProbeError::ToolUnavailable { tool: "clang", source })?;
        let (major, minor) = crate::version::parse_loose_pair("libc version", &output)?;
        Ok(Some(Libc {
            name: LibcName::BsdLibc,
            major,
            minor,
        }))
    }

    /// Installed compilers from the fixed candidate list.
    pub fn compilers(&self) -> Result<Vec<Compiler>, ProbeError> {
        compiler::probe_candidates(&self.runner, CANDIDATES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::fake::FakeRunner;

    const CLANG_BANNER: &str = "Apple clang version 12.0.0 (clang-1200.0.32.29)\n\
                                Target: x86_64-apple-darwin19.6.0";

    #[test]
    fn test_os_version() {
        let runner = FakeRunner::default()
            .reply("sw_vers -productVersion", "10.15.7\n")
            .reply("sw_vers -productName", "Mac OS X");
        let version = MacProber::new(runner).os_version().unwrap();
        assert_eq!(version.version, "10.15.7");
        assert_eq!((version.major, version.minor, version.micro), (10, 15, 7));
        assert_eq!(version.name, "Mac OS X");
    }

    #[test]
    fn test_os_version_without_product_name() {
        let runner = FakeRunner::default().reply("sw_vers -productVersion", "13.2.1");
        let version = MacProber::new(runner).os_version().unwrap();
        assert_eq!(version.name, "Unknown");
    }

    #[test]
    fn test_os_version_without_sw_vers_fails() {
        let runner = FakeRunner::default();
        assert!(matches!(
            MacProber::new(runner).os_version(),
            Err(ProbeError::ToolUnavailable { tool: "sw_vers", .. })
        ));
    }

    #[test]
    fn test_libc_proxied_from_clang() {
        let runner = FakeRunner::default().reply("clang --version", CLANG_BANNER);
        let libc = MacProber::new(runner).libc().unwrap().unwrap();
        assert_eq!(libc.name, LibcName::BsdLibc);
        assert_eq!((libc.major, libc.minor), (12, 0));
    }

    #[test]
    fn test_compilers() {
        let runner = FakeRunner::default().reply("clang --version", CLANG_BANNER);
        let compilers = MacProber::new(runner).compilers().unwrap();
        assert_eq!(compilers.len(), 1);
        assert_eq!(compilers[0].name, CompilerName::Clang);
        assert_eq!((compilers[0].major, compilers[0].minor), (12, 0));
    }
}
