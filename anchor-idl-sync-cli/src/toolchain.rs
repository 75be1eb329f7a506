//! External toolchain calls: `anchor keys list` and `cargo expand`.

use anchor_idl_sync_core::error::{Result, SyncError};
use std::process::Command;

/// Executables used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    pub anchor: String,
    pub cargo: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            anchor: "anchor".to_string(),
            cargo: "cargo".to_string(),
        }
    }
}

/// Runs an external command to completion and returns its stdout.
pub trait CommandRunner {
    /// Errors with `ToolUnavailable` if the program cannot be spawned and
    /// `ToolExecution` if it exits unsuccessfully.
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        (**self).run(program, args)
    }
}

/// Blocking `std::process::Command` runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command = command_line(program, args);
        log::debug!("Running: {}", command);

        let output = Command::new(program).args(args).output().map_err(|e| {
            log::debug!("Failed to spawn {}: {}", program, e);
            SyncError::ToolUnavailable {
                tool: program.to_string(),
            }
        })?;

        if !output.status.success() {
            return Err(SyncError::ToolExecution {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The Anchor workspace as seen through its two command-line tools.
pub struct Toolchain<R> {
    runner: R,
    config: ToolchainConfig,
}

impl<R: CommandRunner> Toolchain<R> {
    pub fn new(runner: R, config: ToolchainConfig) -> Self {
        Self { runner, config }
    }

    /// Executables that fail to answer `--help`, in `cargo`, `anchor` order.
    pub fn missing_tools(&self) -> Vec<String> {
        [&self.config.cargo, &self.config.anchor]
            .into_iter()
            .filter(|tool| self.runner.run(tool, &["--help"]).is_err())
            .cloned()
            .collect()
    }

    /// Program names from `anchor keys list`, in listing order.
    pub fn program_names(&self) -> Result<Vec<String>> {
        let stdout = self.runner.run(&self.config.anchor, &["keys", "list"])?;
        Ok(parse_program_names(&stdout))
    }

    /// Macro-expanded source of the program's crate.
    pub fn expand_program(&self, program: &str) -> Result<String> {
        let package = cargo_package_name(program);
        log::info!("Running: {} expand -p {}", self.config.cargo, package);
        self.runner.run(&self.config.cargo, &["expand", "-p", &package])
    }
}

/// Parse `name: address` lines; lines without a colon are ignored.
pub fn parse_program_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(name, _)| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Anchor names programs in snake_case, their cargo packages use kebab-case.
pub fn cargo_package_name(program: &str) -> String {
    program.replace('_', "-")
}
