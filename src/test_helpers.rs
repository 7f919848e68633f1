//! Common test helper functions shared across test modules.
//!
//! Provides commit record fixtures and throwaway git repositories built
//! directly through git2, so tests do not depend on a git binary or a
//! configured identity.
use git2::{Oid, Repository, Signature};
use std::{fs, path::Path};
use tempfile::TempDir;

use crate::repo::commit::{ChangeKind, CommitRecord, FileChange};

/// Creates a non-root commit record that modified `paths`.
///
/// # Example
/// ```ignore
/// let commit = create_test_commit(
///     "abcdef1234567890",
///     "1+alice@users.noreply.github.com",
///     "fix bug",
///     &["src/main.rs"],
/// );
/// ```
pub fn create_test_commit(
    hash: &str,
    email: &str,
    message: &str,
    paths: &[&str],
) -> CommitRecord {
    CommitRecord {
        hash: hash.to_string(),
        parent_hashes: vec!["f".repeat(40)],
        author_name: "Test Author".to_string(),
        author_email: email.to_string(),
        message: message.to_string(),
        changes: paths
            .iter()
            .map(|&p| FileChange::new(ChangeKind::Modified, Some(p), Some(p)))
            .collect(),
    }
}

/// A git repository in a temporary directory.
pub struct TestRepo {
    pub repo: Repository,
    tmp_dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let tmp_dir = TempDir::new().unwrap();
        let repo = Repository::init(tmp_dir.path()).unwrap();
        Self { repo, tmp_dir }
    }

    pub fn path(&self) -> &Path {
        self.tmp_dir.path()
    }

    /// Write `files` and commit them on HEAD, returning the new commit id.
    pub fn commit(
        &self,
        files: &[(&str, &str)],
        message: &str,
        email: &str,
    ) -> Oid {
        let mut index = self.repo.index().unwrap();

        for (name, content) in files {
            let full_path = self.path().join(name);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full_path, content).unwrap();
            index.add_path(Path::new(name)).unwrap();
        }

        self.commit_index(&mut index, message, email)
    }

    /// Delete `files` and commit the removal on HEAD.
    pub fn remove(&self, files: &[&str], message: &str, email: &str) -> Oid {
        let mut index = self.repo.index().unwrap();

        for name in files {
            fs::remove_file(self.path().join(name)).unwrap();
            index.remove_path(Path::new(name)).unwrap();
        }

        self.commit_index(&mut index, message, email)
    }

    /// Move `from` to `to` unchanged and commit the move on HEAD.
    pub fn rename(
        &self,
        from: &str,
        to: &str,
        message: &str,
        email: &str,
    ) -> Oid {
        let mut index = self.repo.index().unwrap();
        let to_path = self.path().join(to);

        if let Some(parent) = to_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::rename(self.path().join(from), &to_path).unwrap();
        index.remove_path(Path::new(from)).unwrap();
        index.add_path(Path::new(to)).unwrap();

        self.commit_index(&mut index, message, email)
    }

    /// Create a lightweight tag pointing at `oid`.
    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    fn commit_index(
        &self,
        index: &mut git2::Index,
        message: &str,
        email: &str,
    ) -> Oid {
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let signature = Signature::now("Test Author", email).unwrap();

        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok());
        let parents = parent.iter().collect::<Vec<_>>();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parents,
            )
            .unwrap()
    }
}
