//! Changelog generation for a release.
//!
//! [`ChangelogBuilder`] runs the whole pipeline once:
//!
//! 1. list the published releases and pick the newest one as the boundary
//! 2. collect the local commits made since that boundary, oldest first
//! 3. keep the commits that touched source code or the Cargo manifest
//! 4. render one Markdown line per commit under a release header
//! 5. write the document to the configured output file
//!
//! The document is only written once every entry rendered, so a failing run
//! never leaves a partial file behind.
use log::*;

use crate::{
    config::{Config, FetchFailurePolicy},
    error::{ReleaseNotesError, Result},
    forge::{traits::ReleaseLister, types::ReleaseListing},
    repo::CommitRangeCollector,
};

pub mod boundary;
pub mod document;
pub mod filter;

use boundary::select_boundary;
use document::{ChangelogDocument, EntryFormat, render_changelog};
use filter::PathFilter;

/// Builds the release changelog from forge releases and local history.
pub struct ChangelogBuilder {
    config: Config,
    lister: Box<dyn ReleaseLister>,
    collector: Box<dyn CommitRangeCollector>,
    filter: PathFilter,
}

impl ChangelogBuilder {
    pub fn new(
        config: Config,
        lister: Box<dyn ReleaseLister>,
        collector: Box<dyn CommitRangeCollector>,
    ) -> Self {
        Self {
            config,
            lister,
            collector,
            filter: PathFilter::default(),
        }
    }

    /// Tag of the latest published release, or `None` to use the whole
    /// history. A failed fetch is resolved through the configured
    /// [`FetchFailurePolicy`].
    pub async fn boundary(&self) -> Result<Option<String>> {
        let listing = self.lister.list_releases(&self.config.repo).await?;

        match listing {
            ReleaseListing::Found(releases) => {
                let boundary = select_boundary(&releases)?;
                if let Some(tag) = &boundary {
                    info!("latest published release: {tag}");
                }
                Ok(boundary)
            }
            ReleaseListing::Empty => {
                info!("no published releases: using full history");
                Ok(None)
            }
            ReleaseListing::FetchFailed(reason) => {
                match self.config.on_fetch_failure {
                    FetchFailurePolicy::Abort => {
                        Err(ReleaseNotesError::ReleasesUnavailable(reason))
                    }
                    FetchFailurePolicy::FullHistory => {
                        warn!(
                            "could not list releases ({reason}): using full history"
                        );
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Assemble the changelog document without writing it.
    pub async fn build(&self) -> Result<ChangelogDocument> {
        let boundary = self.boundary().await?;
        let commits = self.collector.collect_since(boundary)?;
        let qualifying = self.filter.qualifying(&commits);

        info!(
            "{} of {} commits touched tracked paths",
            qualifying.len(),
            commits.len()
        );

        render_changelog(
            &self.config.current_tag,
            qualifying,
            &EntryFormat::from_config(&self.config),
        )
    }

    /// Write `document` to the configured output path, replacing any
    /// existing content.
    pub async fn write(&self, document: &ChangelogDocument) -> Result<()> {
        tokio::fs::write(&self.config.output_path, document.to_string())
            .await?;
        info!(
            "wrote changelog for {} to {}",
            document.title(),
            self.config.output_path.display()
        );
        Ok(())
    }

    /// Build the changelog and write it out.
    pub async fn run(&self) -> Result<ChangelogDocument> {
        let document = self.build().await?;
        self.write(&document).await?;
        Ok(document)
    }
}
