//! Release-note generation from the commits made since the last published
//! release.
pub mod changelog;
pub mod config;
pub mod error;
pub mod forge;
pub mod repo;

pub use changelog::{ChangelogBuilder, document::ChangelogDocument};
pub use config::Config;
pub use error::{ReleaseNotesError, Result};

#[cfg(test)]
pub mod test_helpers;
