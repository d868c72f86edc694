// ABOUTME: SCP upload over an SSH exec channel.
// ABOUTME: Speaks the source side of the rcp protocol against `scp -t` on the remote host.

use super::client::Session;
use super::error::{Error, Result};
use crate::shell;
use russh::client::Msg;
use russh::{Channel, ChannelMsg};
use std::path::Path;

impl Session {
    /// Upload a local file into `remote_dir` under `file_name`.
    ///
    /// Returns the number of bytes sent.
    pub async fn upload(&self, local: &Path, remote_dir: &str, file_name: &str) -> Result<u64> {
        let timeout = self.config().transfer_timeout;
        match tokio::time::timeout(timeout, self.upload_inner(local, remote_dir, file_name)).await
        {
            Ok(result) => result,
            Err(_) => Err(Error::TransferTimeout(timeout)),
        }
    }

    async fn upload_inner(&self, local: &Path, remote_dir: &str, file_name: &str) -> Result<u64> {
        if file_name.is_empty() || file_name.contains(['/', '\n']) {
            return Err(Error::TransferRejected(format!(
                "invalid remote file name: {:?}",
                file_name
            )));
        }

        let file = tokio::fs::File::open(local).await?;
        let size = file.metadata().await?.len();

        let mut channel = self
            .handle()
            .channel_open_session()
            .await
            .map_err(|e| Error::Channel(format!("failed to open channel: {}", e)))?;

        // -d makes the sink refuse a target that is not an existing directory
        let command = format!("scp -d -t {}", shell::quote(remote_dir));
        tracing::debug!("exec: {}", command);
        channel.exec(true, command).await?;

        let mut pending = Vec::new();

        // Sink signals readiness before the first header
        read_ack(&mut channel, &mut pending).await?;

        let header = file_header(size, file_name);
        channel.data(header.as_bytes()).await?;
        read_ack(&mut channel, &mut pending).await?;

        channel.data(file).await?;
        channel.data(&[0u8][..]).await?;
        read_ack(&mut channel, &mut pending).await?;

        channel.eof().await?;
        wait_for_exit(&mut channel).await?;

        tracing::debug!(
            "Uploaded {} ({} bytes) to {}/{}",
            local.display(),
            size,
            remote_dir,
            file_name
        );
        Ok(size)
    }
}

/// The `C` record announcing a regular file to the sink.
fn file_header(size: u64, file_name: &str) -> String {
    format!("C0644 {} {}\n", size, file_name)
}

/// Outcome of inspecting the bytes received so far.
#[derive(Debug, PartialEq, Eq)]
enum Ack {
    Ok,
    Rejected(String),
    Incomplete,
}

/// Consume one acknowledgement from the front of `pending`.
///
/// `0` is success; `1` (warning) and `2` (fatal) carry a message terminated by a newline.
fn parse_ack(pending: &mut Vec<u8>) -> Ack {
    match pending.first() {
        None => Ack::Incomplete,
        Some(0) => {
            pending.remove(0);
            Ack::Ok
        }
        Some(1 | 2) => match pending.iter().position(|b| *b == b'\n') {
            Some(end) => {
                let message = String::from_utf8_lossy(&pending[1..end]).trim().to_string();
                pending.drain(..=end);
                Ack::Rejected(message)
            }
            None => Ack::Incomplete,
        },
        Some(other) => {
            let message = format!("unexpected response byte {:#04x}", other);
            pending.clear();
            Ack::Rejected(message)
        }
    }
}

async fn read_ack(channel: &mut Channel<Msg>, pending: &mut Vec<u8>) -> Result<()> {
    loop {
        match parse_ack(pending) {
            Ack::Ok => return Ok(()),
            Ack::Rejected(message) => return Err(Error::TransferRejected(message)),
            Ack::Incomplete => {}
        }

        match channel.wait().await {
            Some(ChannelMsg::Data { data }) => pending.extend_from_slice(&data),
            Some(ChannelMsg::ExtendedData { data, ext: 1 }) => {
                tracing::debug!("scp stderr: {}", String::from_utf8_lossy(&data).trim());
            }
            Some(ChannelMsg::ExitStatus { exit_status }) if exit_status != 0 => {
                return Err(Error::TransferRejected(format!(
                    "remote scp exited with status {}",
                    exit_status
                )));
            }
            Some(ChannelMsg::Eof | ChannelMsg::Close) | None => return Err(Error::ChannelClosed),
            Some(_) => {}
        }
    }
}

async fn wait_for_exit(channel: &mut Channel<Msg>) -> Result<()> {
    loop {
        match channel.wait().await {
            Some(ChannelMsg::ExitStatus { exit_status: 0 }) => return Ok(()),
            Some(ChannelMsg::ExitStatus { exit_status }) => {
                return Err(Error::TransferRejected(format!(
                    "remote scp exited with status {}",
                    exit_status
                )));
            }
            // Some servers close without reporting a status once the sink is done
            Some(ChannelMsg::Close) | None => return Ok(()),
            Some(_) => {}
        }
    }
}
