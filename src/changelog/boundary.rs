//! Picks the release that marks the start of the changelog.
use chrono::{DateTime, FixedOffset};

use crate::{
    error::{ReleaseNotesError, Result},
    forge::types::ReleaseRecord,
};

/// Return the tag of the most recently created release, or `None` when
/// there are no releases.
///
/// Timestamps are parsed as RFC 3339 and compared as instants, so mixed
/// offsets order correctly. When two releases share the latest timestamp
/// the one listed first wins.
pub fn select_boundary(releases: &[ReleaseRecord]) -> Result<Option<String>> {
    let mut latest: Option<(DateTime<FixedOffset>, &ReleaseRecord)> = None;

    for release in releases {
        let created_at = DateTime::parse_from_rfc3339(&release.created_at)
            .map_err(|source| ReleaseNotesError::InvalidReleaseTimestamp {
                tag: release.tag_name.clone(),
                value: release.created_at.clone(),
                source,
            })?;

        if latest
            .as_ref()
            .is_none_or(|(newest, _)| created_at > *newest)
        {
            latest = Some((created_at, release));
        }
    }

    Ok(latest.map(|(_, release)| release.tag_name.clone()))
}
