// ABOUTME: SSH-specific error types.
// ABOUTME: Covers connection, authentication, command and SCP transfer failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("authentication failed for user {0}")]
    AuthenticationFailed(String),

    #[error("SSH agent not available: {0}")]
    AgentUnavailable(String),

    #[error("failed to load key from {path}: {reason}")]
    KeyLoadFailed { path: PathBuf, reason: String },

    #[error("SSH channel error: {0}")]
    Channel(String),

    #[error("command timed out after {0:?}")]
    CommandTimeout(std::time::Duration),

    #[error("channel closed unexpectedly without exit status")]
    ChannelClosed,

    #[error("scp transfer rejected by remote: {0}")]
    TransferRejected(String),

    #[error("scp transfer timed out after {0:?}")]
    TransferTimeout(std::time::Duration),

    #[error("SSH protocol error: {0}")]
    Protocol(#[from] russh::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_transfer_keeps_remote_message() {
        let err = Error::TransferRejected("scp: /srv/www: No such file or directory".to_string());
        assert_eq!(
            err.to_string(),
            "scp transfer rejected by remote: scp: /srv/www: No such file or directory"
        );
    }

    #[test]
    fn channel_error_names_the_failed_operation() {
        let err = Error::Channel("failed to open channel: session closed".to_string());
        assert!(err.to_string().starts_with("SSH channel error: failed to open channel"));
    }
}
