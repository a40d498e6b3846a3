use super::CheckOutcome;
use crate::external::run_tool;
use hex::FromHex;
use std::{path::Path, time::Duration};

/// Computes the file's SHA256 digest with the external tool and compares it
/// against the published digest.
pub(crate) async fn check(
    tool: &str,
    path: &Path,
    expected: &str,
    timeout: Duration,
) -> CheckOutcome {
    let output = match run_tool(tool, path, timeout).await {
        Ok(output) => output,
        Err(why) => {
            let diagnostic = crate::misc::format_error(&why);
            error!("{}", diagnostic);
            return CheckOutcome::Error(diagnostic);
        }
    };

    if output.status != Some(0) {
        let diagnostic = output.stderr.trim().to_owned();
        error!("{}: {}", tool, diagnostic);
        return CheckOutcome::Error(diagnostic);
    }

    // The tool reports `<hex digest>  <filename>` on stdout.
    let computed = match output.stdout.split_whitespace().next() {
        Some(computed) => computed,
        None => return CheckOutcome::Error(fomat!("`" (tool) "` produced no digest on stdout")),
    };

    compare(expected, computed)
}

/// Compares two hex-encoded SHA256 digests, case-insensitively and exactly.
pub(crate) fn compare(expected: &str, computed: &str) -> CheckOutcome {
    let expected_bytes = match <[u8; 32]>::from_hex(expected) {
        Ok(bytes) => bytes,
        Err(_) => {
            return CheckOutcome::Error(
                fomat!("published digest '" (expected) "' is not a valid SHA256 digest"),
            )
        }
    };

    let computed_bytes = match <[u8; 32]>::from_hex(computed) {
        Ok(bytes) => bytes,
        Err(_) => {
            return CheckOutcome::Error(
                fomat!("computed digest '" (computed) "' is not a valid SHA256 digest"),
            )
        }
    };

    if expected_bytes == computed_bytes {
        CheckOutcome::Passed
    } else {
        CheckOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn comparison_is_case_insensitive() {
        let digest = "ab".repeat(32);

        assert_eq!(compare(&digest.to_uppercase(), &digest), CheckOutcome::Passed);
        assert_eq!(compare(&digest, &digest.to_uppercase()), CheckOutcome::Passed);
    }

    #[test]
    fn mismatched_digests_fail() {
        assert_eq!(compare(&"ab".repeat(32), &"cd".repeat(32)), CheckOutcome::Failed);
    }

    #[test]
    fn invalid_expected_digest_is_an_error() {
        assert!(matches!(compare("not-a-digest", &"ab".repeat(32)), CheckOutcome::Error(_)));
        assert!(matches!(compare("abcd", &"ab".repeat(32)), CheckOutcome::Error(_)));
    }

    #[tokio::test]
    async fn digest_of_a_real_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.iso");
        std::fs::write(&path, b"").unwrap();

        let outcome = check("sha256sum", &path, EMPTY_SHA256, Duration::from_secs(30)).await;
        assert_eq!(outcome, CheckOutcome::Passed);

        // The published digest may be upper-case.
        let outcome =
            check("sha256sum", &path, &EMPTY_SHA256.to_uppercase(), Duration::from_secs(30)).await;
        assert_eq!(outcome, CheckOutcome::Passed);
    }

    #[tokio::test]
    async fn mismatched_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.iso");
        std::fs::write(&path, b"").unwrap();

        let outcome = check("sha256sum", &path, &"ab".repeat(32), Duration::from_secs(30)).await;
        assert_eq!(outcome, CheckOutcome::Failed);
    }

    #[tokio::test]
    async fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such.iso");

        let outcome = check("sha256sum", &path, EMPTY_SHA256, Duration::from_secs(30)).await;
        assert!(matches!(outcome, CheckOutcome::Error(_)));
    }
}
