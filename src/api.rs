use crate::{
    blueprint::{self, Blueprint, TemplateData},
    monitor::Observer,
    outcome::Outcome,
    remove,
    setup::{self, ensure_setup, SetupError},
};
use std::path::Path;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TrellisError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Blueprint(#[from] blueprint::BlueprintError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Setup(#[from] setup::SetupError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Remove(#[from] remove::RemoveError),
}

/// Loads the blueprint at `blueprint_path` and ensures it below `base_dir`.
///
/// Every file entry's template data is layered as blueprint `defaults`, then the entry's own
/// `data`, then `given`.
///
/// A failure while creating folders or files does not turn into an `Err`: it is carried by the
/// returned [`Outcome`] next to the paths created before it.
///
/// # Errors
///
/// Returns a [`TrellisError`] if the blueprint file cannot be read or is not a valid blueprint.
pub fn ensure_from_file(
    base_dir: &Path,
    blueprint_path: &Path,
    given: &TemplateData,
    observer: &dyn Observer,
) -> Result<Outcome<SetupError>, TrellisError> {
    let mut blueprint = Blueprint::from_file(blueprint_path)?;

    log::debug!(
        "ensuring {} entries from {} below {}",
        blueprint.content.len(),
        blueprint_path.display(),
        base_dir.display()
    );

    blueprint.resolve_data(given);

    Ok(ensure_setup(base_dir, &mut blueprint, observer))
}
