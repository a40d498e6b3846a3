use super::CheckOutcome;
use crate::external::run_tool;
use std::{path::Path, time::Duration};

/// Runs the embedded-checksum self-check tool over the file.
pub(crate) async fn check(tool: &str, path: &Path, timeout: Duration) -> CheckOutcome {
    let output = match run_tool(tool, path, timeout).await {
        Ok(output) => output,
        Err(why) => {
            let diagnostic = crate::misc::format_error(&why);
            error!("{}", diagnostic);
            return CheckOutcome::Error(diagnostic);
        }
    };

    // The self-check tool's own report is part of our output.
    if !output.stdout.is_empty() {
        pintln!((output.stdout.trim_end()));
    }

    outcome_for(output.status, &output.stderr)
}

/// Maps the self-check tool's exit status to an outcome.
///
/// Exit 2 means the media carries no embedded checksum to verify.
pub(crate) fn outcome_for(status: Option<i32>, stderr: &str) -> CheckOutcome {
    match status {
        Some(0) => CheckOutcome::Passed,
        Some(1) => CheckOutcome::Failed,
        Some(2) => CheckOutcome::Skipped,
        Some(code) => {
            let diagnostic = fomat!("unexpected exit status " (code) ": " (stderr.trim()));
            error!("{}", diagnostic);
            CheckOutcome::Error(diagnostic)
        }
        None => {
            let diagnostic = fomat!("terminated by signal: " (stderr.trim()));
            error!("{}", diagnostic);
            CheckOutcome::Error(diagnostic)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some(0) => CheckOutcome::Passed ; "exit zero passes")]
    #[test_case(Some(1) => CheckOutcome::Failed ; "exit one fails")]
    #[test_case(Some(2) => CheckOutcome::Skipped ; "exit two is skipped, never failed")]
    fn exit_codes(status: Option<i32>) -> CheckOutcome { outcome_for(status, "") }

    #[test]
    fn unexpected_statuses_are_errors() {
        assert!(matches!(outcome_for(Some(3), "boom"), CheckOutcome::Error(_)));
        assert!(matches!(outcome_for(None, "killed"), CheckOutcome::Error(_)));
    }

    #[tokio::test]
    async fn passing_and_failing_tools() {
        // Stand-in tools with the same exit-status contract.
        let path = Path::new("ignored.iso");

        assert_eq!(check("true", path, Duration::from_secs(5)).await, CheckOutcome::Passed);
        assert_eq!(check("false", path, Duration::from_secs(5)).await, CheckOutcome::Failed);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn skip_status_is_recorded_as_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("no-embedded-checksum");
        std::fs::write(&tool, "#!/bin/sh\nexit 2\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let outcome =
            check(tool.to_str().unwrap(), Path::new("ignored.iso"), Duration::from_secs(5)).await;
        assert_eq!(outcome, CheckOutcome::Skipped);
    }
}
