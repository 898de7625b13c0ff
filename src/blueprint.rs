use crate::errors::{FileFormat, FileOperation, IoError, ParseError};
use crate::merge::merge_data;
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Template values keyed by placeholder name.
pub type TemplateData = IndexMap<String, String>;

#[derive(Debug, Error, Diagnostic)]
pub enum BlueprintError {
    #[error("I/O error within blueprint domain")]
    #[diagnostic(code(trellis::blueprint::io))]
    Io(#[from] IoError),

    #[error("Unable to parse blueprint")]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

/// One desired filesystem object, relative to the base directory of a setup run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Folder {
        path: String,
    },
    File {
        path: String,
        #[serde(default)]
        template: String,
        #[serde(default)]
        data: TemplateData,
    },
}
impl Entry {
    pub fn folder(path: impl Into<String>) -> Self {
        Self::Folder { path: path.into() }
    }
    pub fn file(path: impl Into<String>, template: impl Into<String>, data: TemplateData) -> Self {
        Self::File {
            path: path.into(),
            template: template.into(),
            data,
        }
    }
    pub fn path(&self) -> &str {
        match self {
            Self::Folder { path } | Self::File { path, .. } => path,
        }
    }
}

/// A declarative directory layout.
///
/// In a TOML file a blueprint looks like:
///
/// ```toml
/// [defaults]
/// author = "nobody"
///
/// [[content]]
/// type = "folder"
/// path = "src"
///
/// [[content]]
/// type = "file"
/// path = "README.md"
/// template = "# {{name}} by {{author}}"
/// data = { name = "demo" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Blueprint {
    /// Blueprint-wide template values, overridden by each file's own `data`.
    #[serde(default)]
    pub defaults: TemplateData,
    #[serde(default)]
    pub content: Vec<Entry>,
}
impl Blueprint {
    pub fn new(content: Vec<Entry>) -> Self {
        Self {
            defaults: TemplateData::new(),
            content,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BlueprintError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(IoError::tag(FileOperation::Read, path))?;

        let parsed = toml::from_str(&content)
            .map_err(|error| ParseError::new(FileFormat::Toml, path.to_path_buf(), error))?;

        log::debug!("loaded blueprint from {}", path.display());

        Ok(parsed)
    }

    /// Sorts `content` in place by ascending `path` (byte-wise).
    ///
    /// Entries with equal paths keep their relative order.
    pub fn sort(&mut self) {
        self.content.sort_by(|a, b| a.path().cmp(b.path()));
    }

    /// Replaces every file entry's data with `defaults`, then the entry's own data, then
    /// `given`, later layers winning.
    pub fn resolve_data(&mut self, given: &TemplateData) {
        for entry in self.content.iter_mut() {
            if let Entry::File { data, .. } = entry {
                *data = merge_data(&self.defaults, data, given);
            }
        }
    }
}
