//! Blocking process execution with cooperative cancellation.

use flotilla_core::{CancelToken, StackError};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run `program` to completion and return its captured stdout.
///
/// Stdout and stderr are drained concurrently while the exit status is
/// polled against the cancellation token; tripping the token kills the
/// child and returns `Cancelled`. A non-zero exit becomes
/// `ExecutionFailed` carrying the stderr text — backends put their real
/// diagnostics there and routinely emit non-fatal noise on stdout — with a
/// fallback message naming the exit code so the diagnostic is never empty.
pub fn run(
    token: &CancelToken,
    program: &Path,
    args: &[String],
    working_dir: Option<&Path>,
    env: &[(String, String)],
) -> Result<Vec<u8>, StackError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }
    for (key, value) in env {
        command.env(key, value);
    }

    let mut child = command.spawn()?;
    let stdout_drain = drain(child.stdout.take());
    let stderr_drain = drain(child.stderr.take());

    let status = wait_or_cancel(token, &mut child)?;
    let stdout = stdout_drain.join().unwrap_or_default();
    let stderr = stderr_drain.join().unwrap_or_default();

    if status.success() {
        return Ok(stdout);
    }

    let mut diagnostic = String::from_utf8_lossy(&stderr).trim().to_owned();
    if diagnostic.is_empty() {
        diagnostic = format!(
            "{} exited with code {}",
            program.display(),
            status.code().unwrap_or(-1)
        );
    }
    Err(StackError::ExecutionFailed(diagnostic))
}

fn wait_or_cancel(
    token: &CancelToken,
    child: &mut Child,
) -> Result<std::process::ExitStatus, StackError> {
    loop {
        if token.is_cancelled() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(StackError::Cancelled);
        }
        match child.try_wait()? {
            Some(status) => return Ok(status),
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sh(token: &CancelToken, script: &str) -> Result<Vec<u8>, StackError> {
        run(
            token,
            Path::new("sh"),
            &["-c".to_owned(), script.to_owned()],
            None,
            &[],
        )
    }

    #[test]
    fn captures_stdout_on_success() {
        let output = sh(&CancelToken::new(), "printf 'pulling done'").unwrap();
        assert_eq!(output, b"pulling done");
    }

    #[test]
    fn nonzero_exit_surfaces_stderr_text() {
        let err = sh(
            &CancelToken::new(),
            "echo informational; echo 'no such service: web' >&2; exit 1",
        )
        .unwrap_err();
        match err {
            StackError::ExecutionFailed(msg) => {
                assert!(msg.contains("no such service: web"));
                assert!(!msg.contains("informational"));
            }
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn empty_stderr_falls_back_to_exit_code_message() {
        let err = sh(&CancelToken::new(), "echo only-stdout; exit 7").unwrap_err();
        match err {
            StackError::ExecutionFailed(msg) => {
                assert!(!msg.is_empty());
                assert!(msg.contains("exited with code 7"));
            }
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn cancellation_kills_the_child() {
        let token = CancelToken::new();
        let trip = token.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            trip.cancel();
        });

        let started = Instant::now();
        let err = sh(&token, "sleep 30").unwrap_err();
        assert!(matches!(err, StackError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn working_dir_and_env_reach_the_child() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "present").unwrap();
        let output = run(
            &CancelToken::new(),
            Path::new("sh"),
            &["-c".to_owned(), "cat marker; printf \"|$STACK_VAR\"".to_owned()],
            Some(dir.path()),
            &[("STACK_VAR".to_owned(), "value".to_owned())],
        )
        .unwrap();
        assert_eq!(output, b"present|value");
    }
}
