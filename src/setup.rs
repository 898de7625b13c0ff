use crate::{
    blueprint::{Blueprint, Entry},
    errors::{describe, FileOperation, IoError},
    monitor::{Event, Observer},
    outcome::Outcome,
    template::populate_template,
    utils::{absolutize, resolve_under},
};
use miette::Diagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SetupError {
    #[error("I/O error while ensuring setup")]
    #[diagnostic(code(trellis::setup::io))]
    Io(#[from] IoError),
}

/// Makes sure every folder and file of `blueprint` exists below `base_dir`.
///
/// `blueprint.content` is sorted in place by path before anything is touched, so callers see
/// their entries reordered afterwards. Entries are then handled one by one in that order:
///
/// - a folder is created (with its ancestors) only when missing, and only then reported;
/// - a file gets its missing parent directory created and reported first, then its template is
///   rendered and written, replacing any previous content. Files are reported on every call.
///
/// The first failure stops the walk. It is sent to `observer` as a single error event and
/// returned in the [`Outcome`] next to whatever was created before it. The reported paths are
/// absolute and sorted lexically.
pub fn ensure_setup(
    base_dir: &Path,
    blueprint: &mut Blueprint,
    observer: &dyn Observer,
) -> Outcome<SetupError> {
    let mut created: Vec<PathBuf> = Vec::new();

    let result = apply_blueprint(base_dir, blueprint, observer, &mut created);

    created.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    match result {
        Ok(()) => {
            log::debug!(
                "setup of {} complete, {} path(s) created",
                base_dir.display(),
                created.len()
            );
            Outcome::completed(created)
        }
        Err(error) => {
            observer.notify(&Event::error("failed to ensure setup").with_data(describe(&error)));
            Outcome::aborted(created, error)
        }
    }
}

fn apply_blueprint(
    base_dir: &Path,
    blueprint: &mut Blueprint,
    observer: &dyn Observer,
    created: &mut Vec<PathBuf>,
) -> Result<(), SetupError> {
    blueprint.sort();

    let base = absolutize(base_dir)?;

    for entry in &blueprint.content {
        let target = resolve_under(&base, entry.path());

        match entry {
            Entry::Folder { .. } => {
                if !target.exists() {
                    create_directory(&target)?;
                    record(created, observer, "created folder", target);
                }
            }
            Entry::File { template, data, .. } => {
                if let Some(parent) = target.parent() {
                    if !parent.exists() {
                        create_directory(parent)?;
                        record(created, observer, "created parent folder", parent.to_path_buf());
                    }
                }

                let contents = populate_template(template, data, observer);

                fs::write(&target, contents).map_err(IoError::tag(FileOperation::Write, &target))?;

                record(created, observer, "created file", target);
            }
        }
    }

    Ok(())
}

fn create_directory(path: &Path) -> Result<(), IoError> {
    fs::create_dir_all(path).map_err(IoError::tag(FileOperation::Mkdir, path))
}

fn record(created: &mut Vec<PathBuf>, observer: &dyn Observer, message: &str, path: PathBuf) {
    observer.notify(&Event::info(message).with_data(path.display()));
    created.push(path);
}
