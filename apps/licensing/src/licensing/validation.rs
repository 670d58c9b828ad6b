//! Input validators for the licensing forms.
//!
//! Both patterns are ASCII-only. Rust's `\w` and `\d` are Unicode-aware, so the
//! character classes are spelled out.

use std::sync::LazyLock;

use regex::Regex;

/// One `port@hostname` entry. Anchored at the start only: trailing text after a
/// valid host prefix is accepted.
static NLM_SERVER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+@[A-Za-z0-9_\-.]+").expect("NLM server pattern is valid"));

static MATLAB_VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Rr][0-9]{4}[ab]$").expect("MATLAB version pattern is valid"));

/// Separators between NLM servers: `:` on unix, `;` on Windows, `,` inside a
/// server triad.
const NLM_SEPARATORS: [char; 3] = [':', ';', ','];

/// Checks whether `connection_string` is a valid NLM server list.
///
/// Accepted shapes:
/// - `port@hostname`
/// - `port1@host1:port2@host2`
/// - `port1@host1:port2@host2,port3@host3,port4@host4:port5@host5`
///
/// A trailing separator yields an empty entry, which makes the whole string
/// invalid.
pub fn is_valid_nlm_connection_string(connection_string: &str) -> bool {
    connection_string
        .split(NLM_SEPARATORS)
        .all(|server| NLM_SERVER_REGEX.is_match(server))
}

/// Checks whether `version` names a MATLAB release, like `R2024a`.
pub fn is_valid_matlab_version(version: &str) -> bool {
    MATLAB_VERSION_REGEX.is_match(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nlm_single_server() {
        assert!(is_valid_nlm_connection_string("1234@hostname"));
        assert!(is_valid_nlm_connection_string("27000@license-server.example.com"));
        assert!(is_valid_nlm_connection_string("1@a_b"));
    }

    #[test]
    fn test_nlm_multiple_servers() {
        assert!(is_valid_nlm_connection_string("1234@hostname,4567@hostname"));
        assert!(is_valid_nlm_connection_string("1@h1:2@h2"));
        assert!(is_valid_nlm_connection_string("1@h1;2@h2"));
        assert!(is_valid_nlm_connection_string("1@h1:2@h2,3@h3,4@h4:5@h5"));
    }

    #[test]
    fn test_nlm_missing_host() {
        assert!(!is_valid_nlm_connection_string("1234"));
        assert!(!is_valid_nlm_connection_string("1234@"));
        assert!(!is_valid_nlm_connection_string("@hostname"));
        assert!(!is_valid_nlm_connection_string("port@hostname"));
    }

    #[test]
    fn test_nlm_trailing_separator_is_invalid() {
        assert!(!is_valid_nlm_connection_string("1234@hostname,"));
        assert!(!is_valid_nlm_connection_string("1234@hostname:"));
        assert!(!is_valid_nlm_connection_string("1234@hostname;"));
        assert!(!is_valid_nlm_connection_string(",1234@hostname"));
    }

    #[test]
    fn test_nlm_empty_is_invalid() {
        assert!(!is_valid_nlm_connection_string(""));
    }

    #[test]
    fn test_nlm_only_prefix_is_checked() {
        // Anything after a valid host prefix is tolerated
        assert!(is_valid_nlm_connection_string("1234@host name"));
        assert!(is_valid_nlm_connection_string("1234@host/extra"));
    }

    #[test]
    fn test_nlm_rejects_non_ascii_digits_and_hosts() {
        assert!(!is_valid_nlm_connection_string("١٢٣@hostname"));
        assert!(!is_valid_nlm_connection_string("1234@é"));
    }

    #[test]
    fn test_matlab_version_valid() {
        assert!(is_valid_matlab_version("R2024a"));
        assert!(is_valid_matlab_version("r2024b"));
        assert!(is_valid_matlab_version("R1999a"));
    }

    #[test]
    fn test_matlab_version_invalid() {
        assert!(!is_valid_matlab_version("2024a"));
        assert!(!is_valid_matlab_version("R2024c"));
        assert!(!is_valid_matlab_version("R2024A"));
        assert!(!is_valid_matlab_version("R24a"));
        assert!(!is_valid_matlab_version("R2024a "));
        assert!(!is_valid_matlab_version(" R2024a"));
        assert!(!is_valid_matlab_version("R2024a\n"));
        assert!(!is_valid_matlab_version(""));
    }
}
