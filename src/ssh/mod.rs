// ABOUTME: SSH transport for the deployment host.
// ABOUTME: Password, agent and key authentication, remote commands, and SCP upload.

mod client;
mod error;
mod scp;

pub use client::{Auth, CommandOutput, Session, SessionConfig};
pub use error::{Error, Result};
