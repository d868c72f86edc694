// ABOUTME: Library root for webdeploy - exposes the pipeline and its parts for testing.
// ABOUTME: The main binary is in main.rs.

pub mod archive;
pub mod build;
pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod project;
pub mod shell;
pub mod ssh;
