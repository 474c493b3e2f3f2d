//! Shared utilities for integration tests.
//!
//! Provides a scratch source/destination pair with helpers for laying out
//! fragment files, plus a serialised handle on the global test logger.

// Items in this shared module may not be used by all test binaries that import it.
#![allow(
    dead_code,
    reason = "shared test utilities are not used by all test binaries"
)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, OnceLock},
};

use logtest::Logger;
use pkg_merge::PKG_MAGIC;
use rstest::fixture;
use tempfile::TempDir;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Source and destination directories for one test.
pub struct Workspace {
    source: TempDir,
    destination: TempDir,
}

impl Workspace {
    /// Create two empty scratch directories.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            source: tempfile::tempdir()?,
            destination: tempfile::tempdir()?,
        })
    }

    pub fn source(&self) -> &Path { self.source.path() }

    pub fn destination(&self) -> &Path { self.destination.path() }

    /// Write a fragment with arbitrary contents.
    pub fn fragment(&self, name: &str, contents: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.source().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write a root fragment: the PKG magic followed by `body`.
    pub fn root(&self, name: &str, body: &[u8]) -> std::io::Result<PathBuf> {
        let mut contents = PKG_MAGIC.to_vec();
        contents.extend_from_slice(body);
        self.fragment(name, &contents)
    }

    /// Names of the files currently in the destination, sorted.
    pub fn outputs(&self) -> std::io::Result<Vec<String>> {
        let mut names = fs::read_dir(self.destination())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names)
    }
}

#[fixture]
pub fn workspace() -> Workspace {
    #[expect(
        clippy::expect_used,
        reason = "scratch directories are required for every test"
    )]
    Workspace::new().expect("create scratch directories")
}

/// Concatenate byte slices in order.
pub fn concat(parts: &[&[u8]]) -> Vec<u8> { parts.iter().flat_map(|p| p.iter().copied()).collect() }

/// Handle to the global logger with exclusive access.
///
/// Serialises tests that capture log output so records from one test never
/// leak into another.
pub struct LoggerHandle {
    guard: MutexGuard<'static, Logger>,
}

impl LoggerHandle {
    /// Acquire the global [`Logger`] instance.
    pub fn new() -> Self {
        static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

        let logger = LOGGER.get_or_init(|| Mutex::new(Logger::start()));
        let guard = logger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        Self { guard }
    }

    /// Drain captured records into `(level, message)` pairs.
    pub fn drain(&mut self) -> Vec<(log::Level, String)> {
        let mut records = Vec::new();
        while let Some(record) = self.guard.pop() {
            records.push((record.level(), record.args().to_string()));
        }
        records
    }
}

#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn logger() -> LoggerHandle { LoggerHandle::new() }
