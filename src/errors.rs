use miette::Diagnostic;
use thiserror::Error;

/// The filesystem step that failed, used to phrase [`IoError`] messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
    #[error("listing a directory")]
    List,
    #[error("reading metadata")]
    Stat,
    #[error("removing an entry")]
    Remove,
    #[error("resolving an absolute path")]
    Resolve,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(trellis::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
    /// Builds a closure for `map_err` that tags an [`std::io::Error`] with its operation and path.
    pub fn tag(
        operation: FileOperation,
        path: &std::path::Path,
    ) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |error| Self::new(operation, path.to_path_buf(), error)
    }
}

/// Renders an error and all of its sources as one line, outermost first.
pub fn describe(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text
}

#[derive(Debug, Error, Diagnostic)]
pub enum FileFormat {
    #[error("toml")]
    Toml,
}
#[derive(Debug, Error, Diagnostic)]
#[error("Parsing error: {file_format} on '{path}'")]
#[diagnostic(
    code(trellis::parse),
    help("Every [[content]] table needs a `type` of \"folder\" or \"file\" and a `path`")
)]
pub struct ParseError {
    pub file_format: FileFormat,
    pub path: std::path::PathBuf,
    #[source]
    pub source: toml::de::Error,
}
impl ParseError {
    pub fn new(file_format: FileFormat, path: std::path::PathBuf, error: toml::de::Error) -> Self {
        Self {
            file_format,
            path,
            source: error,
        }
    }
}
