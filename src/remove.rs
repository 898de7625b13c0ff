use crate::{
    errors::{describe, FileOperation, IoError},
    monitor::{Event, Observer},
    outcome::Outcome,
    utils::absolutize,
};
use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexSet;
use miette::Diagnostic;
use rayon::prelude::*;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error, Diagnostic)]
pub enum RemoveError {
    #[error("I/O error while clearing folder contents")]
    #[diagnostic(code(trellis::remove::io))]
    Io(#[from] IoError),

    #[error("Invalid glob pattern '{pattern}'")]
    #[diagnostic(
        code(trellis::remove::pattern),
        help("Supported wildcards are `*`, `?`, `**`, `[...]` and `{{a,b}}`")
    )]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A compiled pattern and how deep below the target it may reach.
struct Selector {
    matcher: GlobMatcher,
    max_depth: usize,
}
impl Selector {
    fn compile(pattern: &str) -> Result<Self, RemoveError> {
        let normalized = normalize_pattern(pattern);

        let matcher = GlobBuilder::new(normalized)
            .literal_separator(true)
            .build()
            .map_err(|error| RemoveError::Pattern {
                pattern: pattern.to_string(),
                source: error,
            })?
            .compile_matcher();

        // only `**` crosses directories; otherwise one level per path segment
        let max_depth = if normalized.contains("**") {
            usize::MAX
        } else {
            normalized.split('/').filter(|s| !s.is_empty()).count().max(1)
        };

        Ok(Self { matcher, max_depth })
    }
}

/// Strips leading `./` and trailing `/`, so `./build` and `build/` both mean `build`.
fn normalize_pattern(pattern: &str) -> &str {
    let mut normalized = pattern.trim();

    while let Some(rest) = normalized.strip_prefix("./") {
        normalized = rest.trim_start_matches('/');
    }

    normalized.trim_end_matches('/')
}

/// A deletion that has been decided but not yet carried out.
struct Scheduled {
    path: PathBuf,
    is_dir: bool,
}
impl Scheduled {
    fn run(&self) -> Result<(), IoError> {
        let result = if self.is_dir {
            match fs::remove_dir_all(&self.path) {
                Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            }
        } else {
            fs::remove_file(&self.path)
        };

        result.map_err(IoError::tag(FileOperation::Remove, &self.path))
    }
}

/// Deletes the entries of `target_dir` selected by `patterns`.
///
/// A leading `./` and trailing `/` are stripped from each pattern, and patterns left blank are
/// ignored. Without any usable pattern every direct entry of `target_dir`
/// is selected; otherwise each pattern is matched against paths relative to `target_dir` and
/// the matches are unioned. `*` and `?` never cross a `/`, so a pattern reaches below the top
/// level only through explicit segments (`build/*.o`) or `**`. An entry that sits inside an
/// already selected entry is dropped from the selection, since deleting its ancestor removes it.
///
/// Listing and inspecting entries happens sequentially and any failure there aborts before
/// anything is deleted. The deletions themselves run concurrently and all run to completion;
/// the first failure (in selection order) is reported.
///
/// The returned paths are absolute, in selection order, and recorded as each deletion is
/// scheduled: a path is listed even if its deletion later failed.
pub fn remove_folder_contents<S: AsRef<str>>(
    target_dir: &Path,
    patterns: &[S],
    observer: &dyn Observer,
) -> Outcome<RemoveError> {
    let mut deleted: Vec<PathBuf> = Vec::new();

    match clear(target_dir, patterns, observer, &mut deleted) {
        Ok(()) => Outcome::completed(deleted),
        Err(error) => {
            observer.notify(
                &Event::error("failed to remove folder contents").with_data(describe(&error)),
            );
            Outcome::aborted(deleted, error)
        }
    }
}

fn clear<S: AsRef<str>>(
    target_dir: &Path,
    patterns: &[S],
    observer: &dyn Observer,
    deleted: &mut Vec<PathBuf>,
) -> Result<(), RemoveError> {
    let target = absolutize(target_dir)?;

    let listing = list_entries(&target)?;

    let usable: Vec<&str> = patterns
        .iter()
        .map(AsRef::as_ref)
        .filter(|pattern| !normalize_pattern(pattern).is_empty())
        .collect();

    let selected = if usable.is_empty() {
        listing
    } else {
        select(&target, &usable)?
    };

    let mut scheduled: Vec<Scheduled> = Vec::with_capacity(selected.len());

    for relative in &selected {
        let path = target.join(relative);

        let metadata =
            fs::symlink_metadata(&path).map_err(IoError::tag(FileOperation::Stat, &path))?;

        deleted.push(path.clone());
        observer.notify(&Event::debug("scheduled deletion").with_data(path.display()));

        scheduled.push(Scheduled {
            path,
            is_dir: metadata.is_dir(),
        });
    }

    run_all(&scheduled)?;

    observer.notify(&Event::debug("finished deleting folder contents").with_data(target.display()));

    Ok(())
}

/// Runs every deletion concurrently and waits for all of them.
///
/// A failing deletion does not stop its siblings. The first failure in scheduling order is
/// returned, later ones are only logged.
fn run_all(scheduled: &[Scheduled]) -> Result<(), IoError> {
    let mut failures: Vec<IoError> = scheduled
        .par_iter()
        .filter_map(|job| job.run().err())
        .collect();

    if failures.is_empty() {
        return Ok(());
    }

    for extra in failures.iter().skip(1) {
        log::warn!("{}", describe(extra));
    }

    Err(failures.swap_remove(0))
}

fn list_entries(target: &Path) -> Result<IndexSet<PathBuf>, IoError> {
    let mut names = IndexSet::new();

    for entry in fs::read_dir(target).map_err(IoError::tag(FileOperation::List, target))? {
        let entry = entry.map_err(IoError::tag(FileOperation::List, target))?;
        names.insert(PathBuf::from(entry.file_name()));
    }

    Ok(names)
}

/// Unions the matches of every pattern, relative to `target`, in match order.
fn select(target: &Path, patterns: &[&str]) -> Result<IndexSet<PathBuf>, RemoveError> {
    let mut matched: IndexSet<PathBuf> = IndexSet::new();

    for pattern in patterns {
        let selector = Selector::compile(pattern)?;

        let walker = WalkDir::new(target)
            .min_depth(1)
            .max_depth(selector.max_depth)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|error| {
                let path = error.path().unwrap_or(target).to_path_buf();
                IoError::new(FileOperation::List, path, error.into())
            })?;

            let Ok(relative) = entry.path().strip_prefix(target) else {
                continue;
            };

            if selector.matcher.is_match(relative) {
                matched.insert(relative.to_path_buf());
            }
        }

        log::debug!("pattern '{}' selected {} entries so far", pattern, matched.len());
    }

    Ok(matched
        .iter()
        .filter(|relative| {
            !relative
                .ancestors()
                .skip(1)
                .any(|ancestor| matched.contains(ancestor))
        })
        .cloned()
        .collect())
}
