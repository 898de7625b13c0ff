//! Result model shared by the top-level operations.

use std::fmt;
use std::path::PathBuf;

/// What one call managed to do before it finished or stopped.
///
/// `paths` is always meaningful, even when `error` is set: the operations never roll back, so
/// the paths they touched before failing are reported alongside the failure.
#[derive(Debug)]
pub struct Outcome<E> {
    pub paths: Vec<PathBuf>,
    pub error: Option<E>,
}
impl<E> Outcome<E> {
    pub fn completed(paths: Vec<PathBuf>) -> Self {
        Self { paths, error: None }
    }
    pub fn aborted(paths: Vec<PathBuf>, error: E) -> Self {
        Self {
            paths,
            error: Some(error),
        }
    }
    /// `true` when the call ran to the end without error.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
    /// Drops the partial paths of a failed call and keeps only the error.
    pub fn into_result(self) -> Result<Vec<PathBuf>, E> {
        match self.error {
            None => Ok(self.paths),
            Some(error) => Err(error),
        }
    }
}
impl<E: fmt::Display> fmt::Display for Outcome<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(f, "{} path(s), complete", self.paths.len()),
            Some(error) => write!(f, "{} path(s), aborted: {}", self.paths.len(), error),
        }
    }
}
