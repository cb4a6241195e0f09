//! Compiler candidate probing shared by the platform probers

use crate::error::ProbeError;
use crate::run::CommandRunner;
use crate::types::{Compiler, CompilerName};
use crate::version;
use tracing::debug;

/// Probe one candidate compiler executable with `--version`.
///
/// `Ok(None)` means the candidate is absent: either the executable could not
/// be invoked at all, or it reported a zero major version. Output from an
/// executable that did run must contain a parsable version triple; anything
/// else is an error rather than a silent skip.
pub(crate) fn probe_candidate<R: CommandRunner>(
    runner: &R,
    name: CompilerName,
    program: &str,
) -> Result<Option<Compiler>, ProbeError> {
    let output = match runner.run(program, &["--version"]) {
        Ok(output) => output,
        Err(err) => {
            debug!(program, %err, "compiler candidate not invokable, skipping");
            return Ok(None);
        }
    };
    let (major, minor) = version::parse_embedded_triple("compiler version", &output)?;
    if major == 0 {
        return Ok(None);
    }
    Ok(Some(Compiler { name, major, minor }))
}

/// Probe a fixed candidate list, keeping only the candidates that exist.
pub(crate) fn probe_candidates<R: CommandRunner>(
    runner: &R,
    candidates: &[(CompilerName, &str)],
) -> Result<Vec<Compiler>, ProbeError> {
    let mut found = Vec::new();
    for &(name, program) in candidates {
        if let Some(compiler) = probe_candidate(runner, name, program)? {
            found.push(compiler);
        }
    }
    Ok(found)
}
