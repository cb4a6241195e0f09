//! Error types for sysprobe

use thiserror::Error;

/// Errors surfaced by the probing queries
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probed executable, registry key or DLL export could not be invoked
    #[error("{tool} is unavailable: {source}")]
    ToolUnavailable {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Output was obtained but did not match the expected numeric pattern
    #[error("unable to parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },

    /// A required environment variable is unset
    #[error("environment variable {0} is not set")]
    EnvMissing(&'static str),

    /// Both the registry and the GetVersion fallback failed
    #[error("cannot determine Windows version: registry: {registry}; GetVersion: {dll}")]
    WindowsVersion {
        registry: std::io::Error,
        dll: std::io::Error,
    },

    /// The build target has no prober
    #[error("no system prober for this platform")]
    Unsupported,
}
