//! Commit snapshots read from local history.

/// How a path changed between a commit and its first parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    /// Renames, copies, type changes and anything else libgit2 reports.
    Other,
}

impl From<git2::Delta> for ChangeKind {
    fn from(delta: git2::Delta) -> Self {
        match delta {
            git2::Delta::Added => ChangeKind::Added,
            git2::Delta::Deleted => ChangeKind::Deleted,
            git2::Delta::Modified => ChangeKind::Modified,
            _ => ChangeKind::Other,
        }
    }
}

/// One changed file in a first-parent diff, with the path on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub kind: ChangeKind,
    pub old_path: Option<String>,
    pub new_path: Option<String>,
}

impl FileChange {
    pub fn new(
        kind: ChangeKind,
        old_path: Option<&str>,
        new_path: Option<&str>,
    ) -> Self {
        Self {
            kind,
            old_path: old_path.map(String::from),
            new_path: new_path.map(String::from),
        }
    }

    /// Paths on the before and after side, skipping missing ones.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.old_path
            .as_deref()
            .into_iter()
            .chain(self.new_path.as_deref())
    }
}

/// Read-only snapshot of a commit for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full hex object id.
    pub hash: String,
    /// Parent ids in order, empty for a root commit.
    pub parent_hashes: Vec<String>,
    pub author_name: String,
    pub author_email: String,
    pub message: String,
    /// Changes against the first parent. Always empty for a root commit.
    pub changes: Vec<FileChange>,
}

impl CommitRecord {
    pub fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }

    /// First 7 characters of the hash.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// First line of the commit message. A bare `\r` also ends a line.
    pub fn summary(&self) -> &str {
        self.message.split(['\n', '\r']).next().unwrap_or("")
    }
}
