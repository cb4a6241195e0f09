//! Regex parsing of free-form version strings

use crate::error::ProbeError;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Leading major.minor.micro, each part split by a single non-digit.
static LEADING_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\D(\d+)\D(\d+)").unwrap());

// First major.minor.patch triple anywhere in the text; only the first two
// groups are captured. Compiler banners bury the version mid-line.
static EMBEDDED_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\D(\d+)\D\d+").unwrap());

// First two numeric groups anywhere in the text.
static LOOSE_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\D(\d+)").unwrap());

fn group(caps: &Captures<'_>, index: usize, what: &'static str, input: &str) -> Result<u32, ProbeError> {
    caps[index].parse().map_err(|_| ProbeError::Parse {
        what,
        input: input.to_string(),
    })
}

/// Parse a version string that starts with `major.minor.micro`.
///
/// Any single non-digit character may separate the parts; trailing text such
/// as `-generic` is ignored.
pub(crate) fn parse_leading_triple(
    what: &'static str,
    input: &str,
) -> Result<(u32, u32, u32), ProbeError> {
    let caps = LEADING_TRIPLE.captures(input).ok_or_else(|| ProbeError::Parse {
        what,
        input: input.to_string(),
    })?;
    Ok((
        group(&caps, 1, what, input)?,
        group(&caps, 2, what, input)?,
        group(&caps, 3, what, input)?,
    ))
}

/// Find a `major.minor.patch` triple anywhere in the text and keep the first
/// two parts.
pub(crate) fn parse_embedded_triple(
    what: &'static str,
    input: &str,
) -> Result<(u32, u32), ProbeError> {
    let caps = EMBEDDED_TRIPLE.captures(input).ok_or_else(|| ProbeError::Parse {
        what,
        input: input.to_string(),
    })?;
    Ok((group(&caps, 1, what, input)?, group(&caps, 2, what, input)?))
}

/// Find the first two numeric groups anywhere in the text.
pub(crate) fn parse_loose_pair(
    what: &'static str,
    input: &str,
) -> Result<(u32, u32), ProbeError> {
    let caps = LOOSE_PAIR.captures(input).ok_or_else(|| ProbeError::Parse {
        what,
        input: input.to_string(),
    })?;
    Ok((group(&caps, 1, what, input)?, group(&caps, 2, what, input)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_triple_round_trip() {
        assert_eq!(parse_leading_triple("version", "10.15.7").unwrap(), (10, 15, 7));
    }

    #[test]
    fn test_leading_triple_any_separator() {
        assert_eq!(parse_leading_triple("version", "5-10_0").unwrap(), (5, 10, 0));
        assert_eq!(parse_leading_triple("version", "5.10.0").unwrap(), (5, 10, 0));
    }

    #[test]
    fn test_leading_triple_ignores_trailing_text() {
        assert_eq!(
            parse_leading_triple("version", "5.10.0-generic").unwrap(),
            (5, 10, 0)
        );
    }

    #[test]
    fn test_leading_triple_must_lead() {
        assert!(parse_leading_triple("version", "kernel 5.10.0").is_err());
    }

    #[test]
    fn test_leading_triple_rejects_partial() {
        assert!(parse_leading_triple("version", "5.10").is_err());
        assert!(parse_leading_triple("version", "garbage").is_err());
        assert!(parse_leading_triple("version", "").is_err());
    }

    #[test]
    fn test_leading_triple_rejects_overflow() {
        assert!(parse_leading_triple("version", "99999999999.1.2").is_err());
    }

    #[test]
    fn test_embedded_triple_in_banner() {
        let banner = "clang version 15.0.7 (Fedora 15.0.7-2.fc37)";
        assert_eq!(parse_embedded_triple("compiler version", banner).unwrap(), (15, 0));
    }

    #[test]
    fn test_embedded_triple_needs_three_groups() {
        assert!(parse_embedded_triple("compiler version", "cc 4.2").is_err());
    }

    #[test]
    fn test_loose_pair() {
        assert_eq!(parse_loose_pair("libc version", "glibc 2.31").unwrap(), (2, 31));
    }

    #[test]
    fn test_loose_pair_rejects_single_number() {
        assert!(parse_loose_pair("libc version", "version 7").is_err());
    }

    #[test]
    fn test_parse_error_carries_input() {
        let err = parse_leading_triple("kernel version", "nope").unwrap_err();
        assert!(err.to_string().contains("kernel version"));
        assert!(err.to_string().contains("nope"));
    }
}
