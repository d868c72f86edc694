// ABOUTME: Command handlers for the webdeploy CLI.

mod deploy;

pub use deploy::deploy;
