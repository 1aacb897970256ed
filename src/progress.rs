//! Progress accounting and console display for long-running operations.
//!
//! Both the download and the extraction report through the same pair of types:
//! [`Progress`] accumulates transferred bytes and is passed by value to every
//! progress callback, and [`ProgressPrinter`] renders it as a single line that
//! is overwritten with a carriage return.

use std::io::{self, Write};

/// Percentage of `done` out of `total`, truncated and clamped to 100.
///
/// A zero total is considered complete, so an empty archive or an empty
/// response reports 100% instead of dividing by zero.
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let value = (done as u128 * 100) / total as u128;
    value.min(100) as u8
}

/// Accumulated progress of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Bytes processed so far.
    pub done: u64,
    /// Expected number of bytes, if known.
    pub total: Option<u64>,
}

impl Progress {
    pub fn new(total: Option<u64>) -> Self {
        Self { done: 0, total }
    }

    /// Returns the progress after `bytes` more have been processed.
    #[must_use]
    pub fn advance(self, bytes: u64) -> Self {
        Self {
            done: self.done.saturating_add(bytes),
            total: self.total,
        }
    }

    /// Whole-number percentage, or `None` when the total is unknown.
    pub fn percent(&self) -> Option<u8> {
        self.total.map(|total| percent(self.done, total))
    }
}

/// Renders progress to a terminal-like writer.
pub struct ProgressPrinter<W: Write> {
    out: W,
}

impl<W: Write> ProgressPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Prints the heading line for a new operation.
    pub fn begin(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "{}", title)?;
        self.out.flush()
    }

    /// Overwrites the current line with the latest progress value.
    pub fn report(&mut self, progress: Progress) -> io::Result<()> {
        match progress.percent() {
            Some(p) => write!(self.out, "\r{:2}%", p)?,
            None => write!(self.out, "\r{} bytes", progress.done)?,
        }
        self.out.flush()
    }

    /// Ends the progress line and prints the completion marker.
    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nDone!")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
