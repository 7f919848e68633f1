use serde::Deserialize;

/// A published release as returned by the releases API. Fields the
/// changelog does not need are ignored when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseRecord {
    pub tag_name: String,
    pub created_at: String,
}

impl ReleaseRecord {
    pub fn new(
        tag_name: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            created_at: created_at.into(),
        }
    }
}

/// Outcome of asking the forge for its releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseListing {
    /// At least one release exists.
    Found(Vec<ReleaseRecord>),
    /// The request succeeded and the repository has no releases.
    Empty,
    /// The request failed or returned a non-success status.
    FetchFailed(String),
}

impl ReleaseListing {
    /// Wrap parsed records, mapping an empty list to
    /// [`ReleaseListing::Empty`].
    pub fn from_records(records: Vec<ReleaseRecord>) -> Self {
        if records.is_empty() {
            Self::Empty
        } else {
            Self::Found(records)
        }
    }
}
