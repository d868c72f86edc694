// ABOUTME: The five-step deployment pipeline.
// ABOUTME: Build, archive, clear remote, upload, unpack, strictly in that order.

mod remote;
mod runner;
mod stages;
mod step;

pub use remote::{SshStages, clear_commands, unpack_commands};
pub use runner::run;
pub use stages::Stages;
pub use step::Step;
