//! Markdown rendering of the changelog body.
use log::*;
use std::fmt;

use crate::{
    config::{Config, UnknownAuthorPolicy},
    error::{ReleaseNotesError, Result},
    repo::commit::CommitRecord,
};

/// Release notes for one release: a title plus one line per commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
    title: String,
    entries: Vec<String>,
}

impl ChangelogDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: vec![],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn header(&self) -> String {
        format!("# Release {}\n\n### Changelog:\n", self.title)
    }
}

impl fmt::Display for ChangelogDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header())?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Extract the GitHub username from a no-reply address of the form
/// `id+username@users.noreply.github.com`.
///
/// Returns `None` when the address has no `+`. An address like
/// `1+@example.com` yields an empty username.
pub fn github_username(email: &str) -> Option<&str> {
    email.split('+').nth(1)?.split('@').next()
}

/// Formats a single commit as a changelog line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFormat {
    pub commit_link_base_url: String,
    pub author_link_base_url: String,
    pub unknown_author: UnknownAuthorPolicy,
}

impl EntryFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            commit_link_base_url: config.commit_link_base_url(),
            author_link_base_url: config.author_link_base_url(),
            unknown_author: config.unknown_author,
        }
    }

    /// Render `commit` as
    /// `* [short](commit link) [Author: [user](profile link)] - summary`.
    pub fn render(&self, commit: &CommitRecord) -> Result<String> {
        let author = match github_username(&commit.author_email) {
            Some(username) => {
                format!("[{username}]({}{username})", self.author_link_base_url)
            }
            None => match self.unknown_author {
                UnknownAuthorPolicy::Fail => {
                    return Err(ReleaseNotesError::unrecognized_author(
                        &commit.hash,
                        &commit.author_email,
                    ));
                }
                UnknownAuthorPolicy::AuthorName => {
                    warn!(
                        "no GitHub username in '{}' for commit {}: using author name",
                        commit.author_email,
                        commit.short_hash()
                    );
                    commit.author_name.clone()
                }
            },
        };

        Ok(format!(
            "* [{}]({}{}) [Author: {author}] - {}",
            commit.short_hash(),
            self.commit_link_base_url,
            commit.hash,
            commit.summary()
        ))
    }
}

/// Render `commits` in the order given under a `# Release {current_tag}`
/// header. Nothing is returned unless every commit renders.
pub fn render_changelog<'c, I>(
    current_tag: &str,
    commits: I,
    format: &EntryFormat,
) -> Result<ChangelogDocument>
where
    I: IntoIterator<Item = &'c CommitRecord>,
{
    let mut document = ChangelogDocument::new(current_tag);

    for commit in commits {
        document.push(format.render(commit)?);
    }

    Ok(document)
}
