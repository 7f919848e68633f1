//! Hosted forge access: listing the published releases of a repository.

/// GitHub releases API client.
pub mod github;

/// Trait seam used by the changelog builder.
pub mod traits;

/// Release records and listing outcomes.
pub mod types;
