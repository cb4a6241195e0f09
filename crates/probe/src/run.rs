//! Child process execution behind an injectable seam

use std::io;
use std::process::Command;
use tracing::debug;

/// Capability to run an external command and capture its output.
///
/// Probers take this as a type parameter so tests substitute canned output
/// without mutating process-wide state.
pub trait CommandRunner {
    /// Run `program` with `args` and return its trimmed stdout.
    ///
    /// A spawn failure or a non-zero exit status is an `io::Error`.
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String>;
}

/// Runs commands on the host: synchronous, blocking, no timeout, no retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
        debug!(program, ?args, "running probe command");
        let output = Command::new(program).args(args).output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{program} exited with {}",
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::CommandRunner;
    use std::collections::HashMap;
    use std::io;

    /// Canned command output keyed by the full command line.
    ///
    /// Unknown commands fail with `NotFound`, matching an absent executable.
    #[derive(Debug, Default)]
    pub(crate) struct FakeRunner {
        replies: HashMap<String, String>,
    }

    pub(crate) fn command_key(program: &str, args: &[&str]) -> String {
        std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    impl FakeRunner {
        pub(crate) fn reply(mut self, command: &str, output: &str) -> Self {
            self.replies.insert(command.to_string(), output.to_string());
            self
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> io::Result<String> {
            let key = command_key(program, args);
            self.replies
                .get(&key)
                .map(|output| output.trim().to_string())
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::NotFound, format!("{key}: not found"))
                })
        }
    }
}
