use std::path::{Component, Path, PathBuf};

use crate::errors::{FileOperation, IoError};

/// Lexically normalizes a blueprint path so it always stays below its base.
///
/// Root and prefix components are dropped (`/a` means `<base>/a`), `.` is skipped and `..`
/// pops the previous segment without ever climbing above the base.
pub fn normalize_relative(source: &str) -> PathBuf {
    let mut new_path = PathBuf::new();

    for component in Path::new(source).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}

            Component::ParentDir => {
                new_path.pop();
            }

            Component::Normal(segment) => new_path.push(segment),
        }
    }

    new_path
}

/// Joins a blueprint path onto an already absolute base.
pub fn resolve_under(base: &Path, source: &str) -> PathBuf {
    base.join(normalize_relative(source))
}

/// Makes `path` absolute against the current directory without touching the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf, IoError> {
    std::path::absolute(path).map_err(IoError::tag(FileOperation::Resolve, path))
}
