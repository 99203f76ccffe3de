// src/exec/command.rs

use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::watch::{CallbackFuture, ReloadCallback};

/// Runs a shell command as the reload callback.
///
/// A non-zero exit status is logged and swallowed so the watcher keeps
/// polling. Failing to spawn the shell at all is returned as an error, which
/// stops the poll loop.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    cmd: String,
}

impl ShellCommand {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    /// Run the command to completion, forwarding its output to the log.
    pub async fn run(&self) -> Result<ExitStatus> {
        info!(cmd = %self.cmd, "running reload command");

        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };

        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning reload command '{}'", self.cmd))?;

        let stdout = child.stdout.take().map(|out| tokio::spawn(forward_lines(out, "stdout")));
        let stderr = child.stderr.take().map(|err| tokio::spawn(forward_lines(err, "stderr")));

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for reload command '{}'", self.cmd))?;

        join_forwarders(&self.cmd, [stdout, stderr].into_iter().flatten()).await;

        Ok(status)
    }
}

impl ReloadCallback for ShellCommand {
    fn on_change(&self) -> CallbackFuture<'_> {
        Box::pin(async move {
            let status = self.run().await?;
            if status.success() {
                debug!(cmd = %self.cmd, "reload command finished");
            } else {
                warn!(cmd = %self.cmd, %status, "reload command failed");
            }
            Ok(())
        })
    }
}

/// Wait for the output forwarders. Returns how many of them failed.
async fn join_forwarders<I>(cmd: &str, forwarders: I) -> usize
where
    I: IntoIterator<Item = JoinHandle<()>>,
{
    let mut lost = 0;
    for forwarder in forwarders {
        if let Err(err) = forwarder.await {
            warn!(cmd, error = %err, "reload command output was lost");
            lost += 1;
        }
    }
    lost
}

async fn forward_lines<R>(reader: R, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => info!(target: "treewatch::exec", stream, "{line}"),
            Ok(None) => break,
            Err(err) => {
                warn!(stream, error = %err, "failed to read reload command output");
                break;
            }
        }
    }
}
