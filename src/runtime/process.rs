//! Child process spawning.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use super::RealRuntime;

/// A running child process whose stdout is captured through a pipe.
pub trait ChildProcess: Send {
    /// Takes ownership of the stdout pipe. Returns `None` on subsequent calls.
    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>>;

    /// Waits for the child to exit and returns its exit code.
    /// `None` means the child was terminated by a signal.
    fn wait(&mut self) -> Result<Option<i32>>;
}

/// [`ChildProcess`] backed by `std::process::Child`.
pub struct RealChild {
    child: std::process::Child,
}

impl ChildProcess for RealChild {
    fn take_stdout(&mut self) -> Option<Box<dyn Read + Send>> {
        self.child
            .stdout
            .take()
            .map(|stdout| Box::new(stdout) as Box<dyn Read + Send>)
    }

    fn wait(&mut self) -> Result<Option<i32>> {
        let status = self.child.wait().context("Failed to wait for child process")?;
        Ok(status.code())
    }
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn spawn_impl(
        &self,
        program: &Path,
        args: &[String],
    ) -> Result<Box<dyn ChildProcess>> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start {:?}", program))?;
        Ok(Box::new(RealChild { child }))
    }
}
