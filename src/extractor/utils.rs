// Helper functions for provider implementations

use std::process::{Output, Stdio};
use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

use super::errors::ExtractError;

/// Run a command to completion, capturing stdout and stderr.
///
/// With `timeout_secs` set the child is killed once the deadline passes.
pub async fn run_output_with_timeout(
    program: &str,
    args: &[String],
    timeout_secs: Option<u64>,
) -> Result<Output, ExtractError> {
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ExtractError::other(format!("Failed to start {}: {}", program, e)))?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| ExtractError::other(format!("Failed to capture stdout from {}", program)))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| ExtractError::other(format!("Failed to capture stderr from {}", program)))?;

    // Drain both pipes concurrently so a chatty stderr cannot block the child
    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });

    let waited = match timeout_secs {
        Some(secs) => {
            let waited = timeout(Duration::from_secs(secs), child.wait()).await;
            match waited {
                Ok(status) => status,
                Err(_) => {
                    let _ = child.kill().await;
                    stdout_task.abort();
                    stderr_task.abort();
                    return Err(ExtractError::other(format!("Timed out after {}s", secs)));
                }
            }
        }
        None => child.wait().await,
    };
    let status = waited
        .map_err(|e| ExtractError::other(format!("Failed to wait for {}: {}", program, e)))?;

    let stdout = join_pipe(stdout_task, "stdout").await?;
    let stderr = join_pipe(stderr_task, "stderr").await?;

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

async fn join_pipe(
    task: tokio::task::JoinHandle<std::io::Result<Vec<u8>>>,
    pipe: &str,
) -> Result<Vec<u8>, ExtractError> {
    task.await
        .map_err(|e| ExtractError::other(format!("{} task failed: {}", pipe, e)))?
        .map_err(|e| ExtractError::other(format!("Failed to read {}: {}", pipe, e)))
}

/// Turn a finished yt-dlp process into a parsed record or a classified error
pub fn media_info_from_output(
    output: &Output,
) -> Result<super::models::RawMediaInfo, ExtractError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::from_stderr(&stderr));
    }

    super::models::RawMediaInfo::from_json(&output.stdout)
}

/// Quick check that `program args...` runs and exits 0
pub fn command_succeeds(program: &str, args: &[&str]) -> bool {
    std::process::Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::extractor::errors::FailureKind;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_output() {
        let output = run_output_with_timeout("sh", &sh("echo out; echo err 1>&2"), Some(5))
            .await
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "out");
        assert_eq!(String::from_utf8_lossy(&output.stderr).trim(), "err");
    }

    #[tokio::test]
    async fn test_timeout_kills_child() {
        let err = run_output_with_timeout("sh", &sh("sleep 5"), Some(1))
            .await
            .unwrap_err();
        assert_eq!(err, ExtractError::other("Timed out after 1s"));
    }

    #[tokio::test]
    async fn test_missing_program_is_other_failure() {
        let err = run_output_with_timeout("definitely-not-a-real-binary-xyz", &[], None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Other);
        assert!(err.message().starts_with("Failed to start"));
    }

    #[tokio::test]
    async fn test_failed_run_is_classified() {
        let output = run_output_with_timeout(
            "sh",
            &sh("echo 'ERROR: [youtube] x: Video unavailable' 1>&2; exit 1"),
            None,
        )
        .await
        .unwrap();
        let err = media_info_from_output(&output).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Extraction);
    }

    #[tokio::test]
    async fn test_successful_run_is_parsed() {
        let output = run_output_with_timeout("sh", &sh(r#"echo '{"title": "T"}'"#), None)
            .await
            .unwrap();
        let info = media_info_from_output(&output).unwrap();
        assert_eq!(info.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_command_succeeds() {
        assert!(command_succeeds("sh", &["-c", "exit 0"]));
        assert!(!command_succeeds("sh", &["-c", "exit 3"]));
        assert!(!command_succeeds("definitely-not-a-real-binary-xyz", &[]));
    }
}
