//! Launcher for the pre-built contest executables.
//!
//! One executable per supported OS family is shipped next to the launcher
//! binary. The launcher picks the right one, starts it with the
//! configuration path and mirrors its stdout until it exits.

mod relay;

use crate::platform::OsFamily;
use crate::runtime::Runtime;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info, warn};
use std::io::{BufReader, Write};
use std::path::PathBuf;

pub use relay::relay_lines;

/// Message printed when no executable exists for the host OS.
pub const UNSUPPORTED_MESSAGE: &str = "Your OS is not supported";

/// How a launch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// No executable exists for this OS; nothing was started.
    Unsupported(OsFamily),
    /// The child ran to completion.
    Exited {
        /// Exit code, or `None` if the child was killed by a signal.
        code: Option<i32>,
        /// Number of stdout lines relayed.
        lines: usize,
    },
}

impl LaunchOutcome {
    /// Status the launcher process should exit with.
    ///
    /// An unsupported OS exits successfully; a child killed by a signal
    /// maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchOutcome::Unsupported(_) => 0,
            LaunchOutcome::Exited { code, .. } => code.unwrap_or(1),
        }
    }
}

/// Path of the contest executable for `os`: the mapped file name inside the
/// directory that holds the running launcher (symlinks resolved).
///
/// Returns `None` for an unsupported OS.
pub fn resolve_executable<R: Runtime>(runtime: &R, os: &OsFamily) -> Result<Option<PathBuf>> {
    let Some(name) = os.launcher_executable() else {
        return Ok(None);
    };

    let exe = runtime.current_exe()?;
    let exe = runtime.canonicalize(&exe)?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("Launcher path {:?} has no parent directory", exe))?;

    Ok(Some(dir.join(name)))
}

/// Starts the contest executable for `os` with `config` as its only argument
/// and relays its stdout to `out` until the child closes it.
#[tracing::instrument(skip(runtime, out))]
pub fn launch<R: Runtime, W: Write>(
    runtime: &R,
    os: &OsFamily,
    config: &str,
    out: &mut W,
) -> Result<LaunchOutcome> {
    let Some(executable) = resolve_executable(runtime, os)? else {
        warn!("No contest executable for OS {:?}", os);
        return Ok(LaunchOutcome::Unsupported(os.clone()));
    };

    if !runtime.exists(&executable) {
        bail!("Contest executable not found: {:?}", executable);
    }

    info!("Starting {:?} with config {:?}", executable, config);
    let mut child = runtime.spawn(&executable, &[config.to_string()])?;

    let stdout = child
        .take_stdout()
        .ok_or_else(|| anyhow!("Child process {:?} has no stdout pipe", executable))?;

    let lines = relay_lines(BufReader::new(stdout), out)
        .with_context(|| format!("Failed to relay output of {:?}", executable))?;
    debug!("Relayed {} lines, waiting for child to exit", lines);

    let code = child.wait()?;
    match code {
        Some(0) => info!("{:?} finished", executable),
        Some(c) => warn!("{:?} exited with status {}", executable, c),
        None => warn!("{:?} was terminated by a signal", executable),
    }

    Ok(LaunchOutcome::Exited { code, lines })
}

/// Runs [`launch`] and reports the result on `out` the way the `run` binary
/// does: the unsupported-OS message when nothing was started. Returns the
/// status the launcher should exit with.
pub fn run_launcher<R: Runtime, W: Write>(
    runtime: &R,
    os: &OsFamily,
    config: &str,
    out: &mut W,
) -> Result<i32> {
    let outcome = launch(runtime, os, config, out)?;

    if let LaunchOutcome::Unsupported(_) = outcome {
        writeln!(out, "{}", UNSUPPORTED_MESSAGE).context("Failed to write to stdout")?;
    }
    out.flush().context("Failed to flush stdout")?;

    Ok(outcome.exit_code())
}
