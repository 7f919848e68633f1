//! Local git history access.
//!
//! This module walks the commits of a local checkout between a release
//! boundary and HEAD. It handles:
//!
//! - Resolving the boundary reference (tag name or commit id) to a commit
//! - An exact walk of the commits reachable from HEAD but not from the
//!   boundary, returned oldest first
//! - Computing each commit's changed paths against its first parent
//!
//! # Usage
//!
//! ```rust,ignore
//! let repo = LocalRepo::open(Path::new("."))?;
//! let commits = repo.collect_since(Some("v1.0.0".into()))?;
//! ```
use git2::{DiffFindOptions, ErrorCode, Oid, Sort};
use log::*;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::error::{ReleaseNotesError, Result};

pub mod commit;

use commit::{CommitRecord, FileChange};

/// Collects the commits made since a boundary reference.
#[cfg_attr(test, automock)]
pub trait CommitRangeCollector {
    /// Return the commits reachable from HEAD that are not reachable from
    /// `boundary`, oldest first. The boundary commit itself is excluded.
    /// Without a boundary the whole history of HEAD is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseNotesError::BoundaryNotFound`] when `boundary` does
    /// not name anything in the local repository.
    fn collect_since(
        &self,
        boundary: Option<String>,
    ) -> Result<Vec<CommitRecord>>;
}

/// Read-only view of a local repository checkout.
pub struct LocalRepo {
    repo: git2::Repository,
}

impl LocalRepo {
    /// Open the repository at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("opening repository at {}", path.display());
        let repo = git2::Repository::open(path)?;
        Ok(Self { repo })
    }

    fn resolve_boundary(&self, boundary: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(boundary).map_err(|err| {
            if err.code() == ErrorCode::NotFound {
                ReleaseNotesError::BoundaryNotFound(boundary.to_string())
            } else {
                ReleaseNotesError::GitError(err)
            }
        })?;
        let commit = object.peel_to_commit()?;
        Ok(commit.id())
    }

    fn first_parent_changes(
        &self,
        commit: &git2::Commit,
    ) -> Result<Vec<FileChange>> {
        if commit.parent_count() == 0 {
            return Ok(vec![]);
        }

        let parent_tree = commit.parent(0)?.tree()?;
        let tree = commit.tree()?;
        let mut diff =
            self.repo
                .diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;

        // a moved file shows up as one Renamed delta, not Deleted + Added
        diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;

        let changes = diff
            .deltas()
            .map(|delta| {
                let old_path =
                    delta.old_file().path().map(|p| p.to_string_lossy());
                let new_path =
                    delta.new_file().path().map(|p| p.to_string_lossy());
                FileChange::new(
                    delta.status().into(),
                    old_path.as_deref(),
                    new_path.as_deref(),
                )
            })
            .collect();

        Ok(changes)
    }

    fn commit_record(&self, commit: &git2::Commit) -> Result<CommitRecord> {
        let author = commit.author();

        Ok(CommitRecord {
            hash: commit.id().to_string(),
            parent_hashes: commit
                .parent_ids()
                .map(|id| id.to_string())
                .collect(),
            author_name: author.name().unwrap_or("").to_string(),
            author_email: author.email().unwrap_or("").to_string(),
            message: commit.message().unwrap_or("").to_string(),
            changes: self.first_parent_changes(commit)?,
        })
    }
}

impl CommitRangeCollector for LocalRepo {
    fn collect_since(
        &self,
        boundary: Option<String>,
    ) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
        revwalk.push_head()?;

        if let Some(boundary) = boundary {
            let oid = self.resolve_boundary(&boundary)?;
            info!("collecting commits since {boundary} ({oid})");
            revwalk.hide(oid)?;
        } else {
            info!("no boundary: collecting full history");
        }

        let mut commits = vec![];

        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(self.commit_record(&commit)?);
        }

        debug!("collected {} commits", commits.len());

        Ok(commits)
    }
}
