//! Ensure a declared directory layout exists, and clear generated output by glob pattern.
//!
//! - [`setup::ensure_setup`] walks a [`blueprint::Blueprint`] and creates what is missing,
//!   rendering file contents with [`template::populate_template`].
//! - [`remove::remove_folder_contents`] deletes the entries of a directory that match a set of
//!   glob patterns.
//! - [`merge::merge_data`] layers template data.
//!
//! Both filesystem operations report to an explicit [`monitor::Observer`] and return an
//! [`outcome::Outcome`] holding the paths touched so far plus the error that stopped them, if any.

pub mod api;
pub mod blueprint;
pub mod errors;
pub mod merge;
pub mod monitor;
pub mod outcome;
pub mod remove;
pub mod setup;
pub mod template;
mod utils;

pub use api::{ensure_from_file, TrellisError};
pub use blueprint::{Blueprint, Entry, TemplateData};
pub use merge::merge_data;
pub use monitor::{Event, LogObserver, NullObserver, Observer, Recorder, Severity};
pub use outcome::Outcome;
pub use remove::remove_folder_contents;
pub use setup::ensure_setup;
pub use template::populate_template;
