//! Windows prober: registry, GetVersion, msvcrt.dll and MSVC discovery
//!
//! The decision logic is platform independent and compiles everywhere so it
//! can be tested off Windows; only [`NativeApi`] touches the Win32 API.

use std::io;
use std::path::Path;

use crate::compiler;
use crate::error::ProbeError;
use crate::run::CommandRunner;
use crate::types::{Compiler, CompilerName, Libc, LibcName, OsVersion};
use tracing::debug;

/// Marketing names keyed by (major, minor).
///
/// Some releases share version numbers, hence the '/'. Note that GetVersion
/// does not report higher than 6.2 to unmanifested programs.
const VERSION_NAMES: &[(u32, u32, &str)] = &[
    (5, 0, "Windows 2000"),
    (5, 1, "Windows XP"),
    (5, 2, "Windows XP / Windows Server 2003"),
    (6, 0, "Windows Vista / Windows Server 2008"),
    (6, 1, "Windows 7 / Windows Server 2008 R2"),
    (6, 2, "Windows 8 / Windows Server 2012"),
    (6, 3, "Windows 8.1 / Windows Server 2012 R2"),
    (10, 0, "Windows 10 / Windows Server"),
];

pub(crate) fn version_name(major: u32, minor: u32) -> &'static str {
    VERSION_NAMES
        .iter()
        .find(|&&(ma, mi, _)| ma == major && mi == minor)
        .map(|&(_, _, name)| name)
        .unwrap_or("Unknown")
}

/// Decode a packed `GetVersion` result: low byte is the major version, the
/// next byte the minor, the high word the build number.
pub(crate) fn decode_packed_version(packed: u32) -> (u32, u32, u32) {
    (packed & 0xff, (packed >> 8) & 0xff, packed >> 16)
}

fn build_os_version(major: u32, minor: u32, micro: u32) -> OsVersion {
    OsVersion {
        version: format!("{major}.{minor}.{micro}"),
        major,
        minor,
        micro,
        name: version_name(major, minor).to_string(),
    }
}

/// Native facilities the Windows prober depends on.
///
/// Split out so the prober logic can be driven by a fake in tests, the same
/// way [`CommandRunner`] stands in for child processes.
pub trait WindowsApi {
    /// `CurrentMajorVersionNumber`, `CurrentMinorVersionNumber` and
    /// `CurrentBuild` from `HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion`.
    fn nt_current_version(&self) -> io::Result<(u32, u32, String)>;

    /// Packed version from the `GetVersion` export of kernel32.
    fn get_version(&self) -> io::Result<u32>;

    /// Value name and data pairs under
    /// `HKLM\SOFTWARE\Wow6432Node\Microsoft\VisualStudio\SxS\VS7`.
    fn vs_sxs_values(&self) -> io::Result<Vec<(String, String)>>;

    fn env_var(&self, name: &str) -> Option<String>;

    fn file_exists(&self, path: &Path) -> bool;
}

/// Queries Windows system facts through the registry, kernel32 and PowerShell
#[derive(Debug)]
pub struct WindowsProber<R, A> {
    runner: R,
    api: A,
}

impl<R: CommandRunner, A: WindowsApi> WindowsProber<R, A> {
    pub fn new(runner: R, api: A) -> Self {
        Self { runner, api }
    }

    /// Version from the NT CurrentVersion registry key, falling back to the
    /// packed `GetVersion` result when the registry is unreadable.
    pub fn os_version(&self) -> Result<OsVersion, ProbeError> {
        let (major, minor, micro) = match self.registry_version() {
            Ok(triple) => triple,
            Err(registry) => {
                debug!(%registry, "registry version unavailable, falling back to GetVersion");
                match self.api.get_version() {
                    Ok(packed) => decode_packed_version(packed),
                    Err(dll) => return Err(ProbeError::WindowsVersion { registry, dll }),
                }
            }
        };
        Ok(build_os_version(major, minor, micro))
    }

    fn registry_version(&self) -> io::Result<(u32, u32, u32)> {
        let (major, minor, build) = self.api.nt_current_version()?;
        let micro = build.trim().parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("CurrentBuild {build:?}: {err}"),
            )
        })?;
        Ok((major, minor, micro))
    }

    /// File version of `%SYSTEMROOT%\System32\msvcrt.dll`.
    ///
    /// An absent DLL means the system has no C runtime to report; that is
    /// `Ok(None)`, not an error.
    pub fn libc(&self) -> Result<Option<Libc>, ProbeError> {
        let root = self
            .api
            .env_var("SYSTEMROOT")
            .ok_or(ProbeError::EnvMissing("SYSTEMROOT"))?;
        let msvcrt = Path::new(&root).join("System32").join("msvcrt.dll");
        if !self.api.file_exists(&msvcrt) {
            return Ok(None);
        }
        // version.dll needs VerQueryValue and C struct juggling; PowerShell
        // reads the same resource with far less ceremony.
        let script = format!("(Get-Item '{}').VersionInfo", msvcrt.display());
        let output = self
            .runner
            .run("powershell", &["-command", &script])
            .map_err(|source| ProbeError::ToolUnavailable { tool: "powershell", source })?;
        let (major, minor) = crate::version::parse_loose_pair("msvcrt version", &output)?;
        Ok(Some(Libc {
            name: LibcName::Msvcrt,
            major,
            minor,
        }))
    }

    /// Probes gcc.exe (MinGW) plus every MSVC installation registered under
    /// the Visual Studio SxS key. The SxS technique covers toolchains up to
    /// VS2017.
    pub fn compilers(&self) -> Result<Vec<Compiler>, ProbeError> {
        let mut candidates = vec![(CompilerName::Mingw, "gcc.exe".to_string())];
        if let Ok(values) = self.api.vs_sxs_values() {
            for (name, path) in values {
                // Version-named values ("14.0", "15.0") mark installations;
                // the key carries other values too.
                if name.parse::<f32>().is_err() {
                    continue;
                }
                let cl = Path::new(&path).join("VC").join("bin").join("cl.exe");
                if self.api.file_exists(&cl) {
                    candidates.push((CompilerName::Msvc, cl.to_string_lossy().into_owned()));
                }
            }
        }
        let mut found = Vec::new();
        for (name, program) in candidates {
            if let Some(compiler) = compiler::probe_candidate(&self.runner, name, &program)? {
                found.push(compiler);
            }
        }
        Ok(found)
    }
}

/// [`WindowsApi`] backed by the live registry and kernel32
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeApi;

#[cfg(windows)]
mod native {
    use super::{NativeApi, WindowsApi};
    use std::ffi::OsStr;
    use std::io;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use std::ptr;
    use winapi::shared::minwindef::{DWORD, HKEY};
    use winapi::shared::winerror::{ERROR_NO_MORE_ITEMS, ERROR_SUCCESS};
    use winapi::um::sysinfoapi::GetVersion;
    use winapi::um::winnt::{KEY_QUERY_VALUE, REG_DWORD, REG_SZ};
    use winapi::um::winreg::{
        HKEY_LOCAL_MACHINE, RegCloseKey, RegEnumValueW, RegOpenKeyExW, RegQueryValueExW,
    };

    fn to_wide(value: &str) -> Vec<u16> {
        OsStr::new(value).encode_wide().chain(Some(0)).collect()
    }

    /// Open registry key, closed on drop.
    struct RegKey(HKEY);

    impl RegKey {
        fn open_local_machine(subkey: &str) -> io::Result<Self> {
            let wide = to_wide(subkey);
            let mut handle = ptr::null_mut();
            let status = unsafe {
                RegOpenKeyExW(HKEY_LOCAL_MACHINE, wide.as_ptr(), 0, KEY_QUERY_VALUE, &mut handle)
            };
            if status as DWORD != ERROR_SUCCESS {
                return Err(io::Error::from_raw_os_error(status));
            }
            Ok(Self(handle))
        }

        fn dword(&self, name: &str) -> io::Result<u32> {
            let wide = to_wide(name);
            let mut kind: DWORD = 0;
            let mut data: DWORD = 0;
            let mut size = std::mem::size_of::<DWORD>() as DWORD;
            let status = unsafe {
                RegQueryValueExW(
                    self.0,
                    wide.as_ptr(),
                    ptr::null_mut(),
                    &mut kind,
                    &mut data as *mut DWORD as *mut u8,
                    &mut size,
                )
            };
            if status as DWORD != ERROR_SUCCESS {
                return Err(io::Error::from_raw_os_error(status));
            }
            if kind != REG_DWORD {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{name} is not a REG_DWORD value"),
                ));
            }
            Ok(data)
        }

        fn string(&self, name: &str) -> io::Result<String> {
            let wide = to_wide(name);
            let mut kind: DWORD = 0;
            let mut size: DWORD = 0;
            // First call sizes the buffer, second fills it.
            let status = unsafe {
                RegQueryValueExW(
                    self.0,
                    wide.as_ptr(),
                    ptr::null_mut(),
                    &mut kind,
                    ptr::null_mut(),
                    &mut size,
                )
            };
            if status as DWORD != ERROR_SUCCESS {
                return Err(io::Error::from_raw_os_error(status));
            }
            if kind != REG_SZ {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{name} is not a REG_SZ value"),
                ));
            }
            let mut buf = vec![0u16; (size as usize).div_ceil(2)];
            let status = unsafe {
                RegQueryValueExW(
                    self.0,
                    wide.as_ptr(),
                    ptr::null_mut(),
                    &mut kind,
                    buf.as_mut_ptr() as *mut u8,
                    &mut size,
                )
            };
            if status as DWORD != ERROR_SUCCESS {
                return Err(io::Error::from_raw_os_error(status));
            }
            while buf.last() == Some(&0) {
                buf.pop();
            }
            Ok(String::from_utf16_lossy(&buf))
        }

        fn string_values(&self) -> io::Result<Vec<(String, String)>> {
            let mut values = Vec::new();
            let mut index: DWORD = 0;
            loop {
                let mut name_buf = vec![0u16; 256];
                let mut name_len = name_buf.len() as DWORD;
                let status = unsafe {
                    RegEnumValueW(
                        self.0,
                        index,
                        name_buf.as_mut_ptr(),
                        &mut name_len,
                        ptr::null_mut(),
                        ptr::null_mut(),
                        ptr::null_mut(),
                        ptr::null_mut(),
                    )
                };
                if status as DWORD == ERROR_NO_MORE_ITEMS {
                    break;
                }
                if status as DWORD != ERROR_SUCCESS {
                    return Err(io::Error::from_raw_os_error(status));
                }
                let name = String::from_utf16_lossy(&name_buf[..name_len as usize]);
                if let Ok(data) = self.string(&name) {
                    values.push((name, data));
                }
                index += 1;
            }
            Ok(values)
        }
    }

    impl Drop for RegKey {
        fn drop(&mut self) {
            unsafe {
                RegCloseKey(self.0);
            }
        }
    }

    impl WindowsApi for NativeApi {
        fn nt_current_version(&self) -> io::Result<(u32, u32, String)> {
            let key = RegKey::open_local_machine(r"SOFTWARE\Microsoft\Windows NT\CurrentVersion")?;
            let major = key.dword("CurrentMajorVersionNumber")?;
            let minor = key.dword("CurrentMinorVersionNumber")?;
            let build = key.string("CurrentBuild")?;
            Ok((major, minor, build))
        }

        fn get_version(&self) -> io::Result<u32> {
            // Documented as infallible for desktop processes.
            Ok(unsafe { GetVersion() })
        }

        fn vs_sxs_values(&self) -> io::Result<Vec<(String, String)>> {
            RegKey::open_local_machine(r"SOFTWARE\Wow6432Node\Microsoft\VisualStudio\SxS\VS7")?
                .string_values()
        }

        fn env_var(&self, name: &str) -> Option<String> {
            std::env::var(name).ok()
        }

        fn file_exists(&self, path: &Path) -> bool {
            path.exists()
        }
    }
}
