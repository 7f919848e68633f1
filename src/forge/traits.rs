//! Traits related to remote git forges
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::RepoCoordinates, error::Result, forge::types::ReleaseListing,
};

/// Lists the releases published for a hosted repository.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseLister: Send + Sync {
    /// Fetch the first page of releases for `repo`.
    ///
    /// A request that never got a successful answer is reported as
    /// [`ReleaseListing::FetchFailed`] rather than as an error so callers can
    /// decide whether an unknown release history is fatal.
    async fn list_releases(
        &self,
        repo: &RepoCoordinates,
    ) -> Result<ReleaseListing>;
}
