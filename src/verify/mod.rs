mod digest;
mod media;

use std::{fmt, path::Path, time::Duration};

/// Upper bound for a single external checksum-tool invocation.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(900);

pub const SHA256_TOOL: &str = "sha256sum";

pub const MEDIA_TOOL: &str = "checkisomd5";

/// Outcome of one verification check for one local file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckOutcome {
    Passed,
    Failed,
    /// The media carries no embedded checksum; not a failure.
    Skipped,
    /// The check could not be carried out; carries the surfaced diagnostic.
    Error(String),
}

impl CheckOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::Passed => "PASSED",
            CheckOutcome::Failed => "FAILED",
            CheckOutcome::Skipped => "SKIPPED",
            CheckOutcome::Error(_) => "ERROR",
        }
    }

    /// Whether this outcome makes the whole run failing.
    pub fn is_failure(&self) -> bool {
        matches!(self, CheckOutcome::Failed | CheckOutcome::Error(_))
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.as_str()) }
}

/// The two external checksum tools, held as data so that alternate
/// implementations substitute without touching the orchestration.
#[derive(Clone, Debug)]
pub struct Verifier {
    pub sha256_tool: String,
    pub media_tool: String,
    pub timeout: Duration,
}

impl Default for Verifier {
    fn default() -> Self {
        Verifier {
            sha256_tool: SHA256_TOOL.to_owned(),
            media_tool: MEDIA_TOOL.to_owned(),
            timeout: TOOL_TIMEOUT,
        }
    }
}

impl Verifier {
    /// Compares the file's SHA256 digest against the published one.
    pub async fn check_sha256(&self, path: &Path, expected: &str) -> CheckOutcome {
        digest::check(&self.sha256_tool, path, expected, self.timeout).await
    }

    /// Runs the embedded-media self-check over the file.
    pub async fn check_media(&self, path: &Path) -> CheckOutcome {
        media::check(&self.media_tool, path, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CheckOutcome::Passed => false ; "passed is not a failure")]
    #[test_case(CheckOutcome::Skipped => false ; "skipped is not a failure")]
    #[test_case(CheckOutcome::Failed => true ; "failed is a failure")]
    #[test_case(CheckOutcome::Error(String::new()) => true ; "error counts as a failure")]
    fn failure_policy(outcome: CheckOutcome) -> bool { outcome.is_failure() }

    #[test]
    fn labels() {
        assert_eq!(CheckOutcome::Passed.to_string(), "PASSED");
        assert_eq!(CheckOutcome::Error("why".into()).to_string(), "ERROR");
    }
}
