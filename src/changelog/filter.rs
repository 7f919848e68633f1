//! Selects the commits worth mentioning in the changelog.
use crate::repo::commit::{ChangeKind, CommitRecord};

/// Path prefixes covering source code and the dependency manifest.
pub const DEFAULT_PATH_PREFIXES: [&str; 2] = ["src", "Cargo"];

/// Keeps commits whose first-parent diff touches a tracked path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    prefixes: Vec<String>,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_PREFIXES)
    }
}

impl PathFilter {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A commit qualifies when it has a parent and an added, deleted or
    /// modified file whose old or new path starts with a tracked prefix.
    /// Root commits never qualify.
    pub fn is_qualifying(&self, commit: &CommitRecord) -> bool {
        if commit.is_root() {
            return false;
        }

        commit
            .changes
            .iter()
            .filter(|change| {
                matches!(
                    change.kind,
                    ChangeKind::Added
                        | ChangeKind::Deleted
                        | ChangeKind::Modified
                )
            })
            .flat_map(|change| change.paths())
            .any(|path| self.matches(path))
    }

    /// Qualifying commits in input order.
    pub fn qualifying<'c>(
        &self,
        commits: &'c [CommitRecord],
    ) -> Vec<&'c CommitRecord> {
        commits.iter().filter(|c| self.is_qualifying(c)).collect()
    }

    fn matches(&self, path: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repo::commit::FileChange, test_helpers::create_test_commit};

    const EMAIL: &str = "1+alice@users.noreply.github.com";

    #[test]
    fn test_source_and_manifest_changes_qualify() {
        let filter = PathFilter::default();

        let source = create_test_commit("a", EMAIL, "m", &["src/foo.rs"]);
        let manifest = create_test_commit("b", EMAIL, "m", &["Cargo.toml"]);
        let lock = create_test_commit("c", EMAIL, "m", &["Cargo.lock"]);

        assert!(filter.is_qualifying(&source));
        assert!(filter.is_qualifying(&manifest));
        assert!(filter.is_qualifying(&lock));
    }

    #[test]
    fn test_docs_only_change_is_excluded() {
        let filter = PathFilter::default();
        let docs = create_test_commit("a", EMAIL, "m", &["docs/readme.md"]);
        assert!(!filter.is_qualifying(&docs));
    }

    #[test]
    fn test_root_commit_is_excluded() {
        let filter = PathFilter::default();
        let mut root = create_test_commit("a", EMAIL, "m", &["src/main.rs"]);
        root.parent_hashes.clear();
        assert!(!filter.is_qualifying(&root));
    }

    #[test]
    fn test_either_side_of_the_diff_counts() {
        let filter = PathFilter::default();

        let mut added = create_test_commit("a", EMAIL, "m", &[]);
        added.changes =
            vec![FileChange::new(ChangeKind::Added, None, Some("src/new.rs"))];

        let mut deleted = create_test_commit("b", EMAIL, "m", &[]);
        deleted.changes = vec![FileChange::new(
            ChangeKind::Deleted,
            Some("src/gone.rs"),
            None,
        )];

        assert!(filter.is_qualifying(&added));
        assert!(filter.is_qualifying(&deleted));
    }

    #[test]
    fn test_other_change_kinds_are_ignored() {
        let filter = PathFilter::default();
        let mut renamed = create_test_commit("a", EMAIL, "m", &[]);
        renamed.changes = vec![FileChange::new(
            ChangeKind::Other,
            Some("src/a.rs"),
            Some("src/b.rs"),
        )];
        assert!(!filter.is_qualifying(&renamed));
    }

    #[test]
    fn test_qualifying_preserves_order() {
        let filter = PathFilter::default();
        let commits = vec![
            create_test_commit("1", EMAIL, "first", &["src/a.rs"]),
            create_test_commit("2", EMAIL, "docs", &["README.md"]),
            create_test_commit("3", EMAIL, "third", &["Cargo.toml"]),
        ];

        let hashes = filter
            .qualifying(&commits)
            .iter()
            .map(|c| c.hash.as_str())
            .collect::<Vec<_>>();

        assert_eq!(hashes, ["1", "3"]);
    }

    #[test]
    fn test_custom_prefixes() {
        let filter = PathFilter::new(["docs"]);
        let docs = create_test_commit("a", EMAIL, "m", &["docs/readme.md"]);
        let source = create_test_commit("b", EMAIL, "m", &["src/lib.rs"]);
        assert!(filter.is_qualifying(&docs));
        assert!(!filter.is_qualifying(&source));
    }
}
