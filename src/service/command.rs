//! Command execution seam.
//!
//! Commands are simulated: nothing is spawned, the runner only logs what it
//! would have executed.

use anyhow::Result;
use async_trait::async_trait;
use log::info;

/// Output returned by the simulated runner for every command.
pub const COMMAND_SUCCESS: &str = "Command executed successfully";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `pixi <command> <args...>` and return its output.
    async fn run(&self, command: &str, args: &[String]) -> Result<String>;
}

/// Runner that pretends every command succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedRunner;

#[async_trait]
impl CommandRunner for SimulatedRunner {
    async fn run(&self, command: &str, args: &[String]) -> Result<String> {
        info!("Executing: pixi {} {}", command, args.join(" "));
        Ok(COMMAND_SUCCESS.to_string())
    }
}
