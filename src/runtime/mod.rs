//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Information about the running executable
//! - `fs` - File system operations (create, open, remove, directory, permissions)
//! - `process` - Child process spawning with a piped stdout

mod env;
mod fs;
mod process;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use process::{ChildProcess, RealChild};

/// A readable, seekable byte source (archives need random access).
pub trait ReadSeek: std::io::Read + std::io::Seek {}

impl<T: std::io::Read + std::io::Seek> ReadSeek for T {}

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn current_exe(&self) -> Result<PathBuf>;

    /// Canonicalize a path by resolving all symlinks and returning the canonical absolute path.
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    // File System
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;
    fn open(&self, path: &Path) -> Result<Box<dyn ReadSeek + Send>>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Processes
    /// Start `program` with `args`, capturing its stdout. Stdin and stderr
    /// are inherited from the current process.
    fn spawn(&self, program: &Path, args: &[String]) -> Result<Box<dyn ChildProcess>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn current_exe(&self) -> Result<PathBuf> {
        self.current_exe_impl()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        self.canonicalize_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn ReadSeek + Send>> {
        self.open_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    fn spawn(&self, program: &Path, args: &[String]) -> Result<Box<dyn ChildProcess>> {
        self.spawn_impl(program, args)
    }
}
