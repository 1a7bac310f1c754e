//! SSH transport using OpenSSH connection multiplexing
//!
//! `connect` starts an authenticated control-master process per host
//! (`sshpass -e ssh -M -N -f`), so the static password is presented
//! exactly once; `run` executes commands over the established control
//! socket. Unknown host keys are accepted, matching the trust model of a
//! closed monitored fleet.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::process::Command;

use super::{RemoteSession, Transport};
use crate::config::Host;
use crate::error::TransportError;

/// Timeout for the initial TCP/auth handshake (seconds)
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Timeout for one remote command execution (seconds)
const EXEC_TIMEOUT_SECS: u64 = 30;

/// [`Transport`] implementation backed by the system `ssh` client
pub struct SshTransport {
    control_dir: PathBuf,
}

impl SshTransport {
    /// Creates a transport whose control sockets live under `control_dir`.
    #[must_use]
    pub fn new(control_dir: impl Into<PathBuf>) -> Self {
        Self {
            control_dir: control_dir.into(),
        }
    }
}

#[async_trait]
impl Transport for SshTransport {
    async fn connect(&self, host: &Host) -> Result<Box<dyn RemoteSession>, TransportError> {
        let control_path = self.control_dir.join(format!("{}.sock", host.name));
        let destination = format!("{}@{}", host.user, host.name);

        let mut cmd = Command::new("sshpass");
        cmd.arg("-e").arg("ssh");
        cmd.env("SSHPASS", host.password.expose_secret());
        cmd.arg("-M").arg("-N").arg("-f");
        cmd.arg("-S").arg(&control_path);
        cmd.arg("-o").arg("StrictHostKeyChecking=no");
        cmd.arg("-o")
            .arg(format!("ConnectTimeout={CONNECT_TIMEOUT_SECS}"));
        cmd.arg("-p").arg(host.port.to_string());
        cmd.arg(&destination);
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|e| TransportError::Connect {
            host: host.name.clone(),
            reason: format!("failed to spawn ssh: {e}"),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = format!("ssh exited with {}: {}", output.status, stderr.trim());
            return Err(if stderr.contains("Permission denied") {
                TransportError::Auth {
                    host: host.name.clone(),
                    reason,
                }
            } else {
                TransportError::Connect {
                    host: host.name.clone(),
                    reason,
                }
            });
        }

        Ok(Box::new(SshSession {
            host: host.name.clone(),
            destination,
            control_path,
        }))
    }
}

/// One multiplexed SSH session, closed best-effort on drop
struct SshSession {
    host: String,
    destination: String,
    control_path: PathBuf,
}

#[async_trait]
impl RemoteSession for SshSession {
    async fn run(&self, command: &str) -> Result<String, TransportError> {
        let exec_err = |reason: String| TransportError::Exec {
            host: self.host.clone(),
            command: command.to_string(),
            reason,
        };

        let mut cmd = Command::new("ssh");
        cmd.arg("-S").arg(&self.control_path);
        cmd.arg("-o").arg("BatchMode=yes");
        cmd.arg(&self.destination);
        cmd.arg(command);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let timeout = Duration::from_secs(EXEC_TIMEOUT_SECS);
        match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) if output.status.success() => String::from_utf8(output.stdout)
                .map_err(|e| exec_err(format!("invalid UTF-8 in output: {e}"))),
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(exec_err(format!(
                    "exit {}: {}",
                    output.status,
                    stderr.trim()
                )))
            }
            Ok(Err(e)) => Err(exec_err(format!("failed to spawn ssh: {e}"))),
            Err(_) => Err(exec_err(format!("timed out after {EXEC_TIMEOUT_SECS}s"))),
        }
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        let _ = std::process::Command::new("ssh")
            .arg("-S")
            .arg(&self.control_path)
            .arg("-O")
            .arg("exit")
            .arg(&self.destination)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}
