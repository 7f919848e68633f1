//! Run configuration resolved from the process environment.
//!
//! Everything the changelog run needs is read exactly once into [`Config`]
//! and handed to the builder, so no other module touches the environment.
use secrecy::SecretString;
use std::{env, fmt, path::PathBuf, str::FromStr};

use crate::error::{ReleaseNotesError, Result};

/// Access token sent as a bearer credential. Required, may be empty.
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
/// Label of the release being prepared, used as the document title.
pub const TAG_VAR: &str = "TAG";
/// Optional `owner/name` override for the hosted repository.
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";
/// Optional API base URL override.
pub const API_URL_VAR: &str = "GITHUB_API_URL";
/// Optional web base URL override, used for commit and author links.
pub const SERVER_URL_VAR: &str = "GITHUB_SERVER_URL";
/// Optional path to the local checkout.
pub const REPO_PATH_VAR: &str = "RELNOTES_REPO_PATH";
/// Optional output file path.
pub const OUTPUT_VAR: &str = "RELNOTES_OUTPUT";
/// Optional behaviour when the release list cannot be fetched.
pub const FETCH_FAILURE_VAR: &str = "RELNOTES_ON_FETCH_FAILURE";
/// Optional behaviour for author emails without a GitHub username.
pub const UNKNOWN_AUTHOR_VAR: &str = "RELNOTES_UNKNOWN_AUTHOR";
/// Optional debug logging toggle.
pub const DEBUG_VAR: &str = "RELNOTES_DEBUG";

pub const DEFAULT_OWNER: &str = "NikolaMilosa";
pub const DEFAULT_REPO_NAME: &str = "ntfs-undelete";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";
pub const DEFAULT_REPO_PATH: &str = ".";
/// File picked up by the release-publishing step.
pub const DEFAULT_OUTPUT_FILE: &str = "body";

/// Owner and name of the hosted repository whose releases are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinates {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse an `owner/name` slug.
    pub fn parse(slug: &str) -> Result<Self> {
        match slug.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty()
                    && !name.is_empty()
                    && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(ReleaseNotesError::invalid_config(format!(
                "{REPOSITORY_VAR} must look like owner/name, got '{slug}'"
            ))),
        }
    }
}

impl Default for RepoCoordinates {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER, DEFAULT_REPO_NAME)
    }
}

impl fmt::Display for RepoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What to do when the release list could not be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchFailurePolicy {
    /// Stop the run without writing any output.
    Abort,
    /// Carry on as if no release had ever been published.
    #[default]
    FullHistory,
}

impl FromStr for FetchFailurePolicy {
    type Err = ReleaseNotesError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "full-history" => Ok(Self::FullHistory),
            other => Err(ReleaseNotesError::invalid_config(format!(
                "{FETCH_FAILURE_VAR} must be 'abort' or 'full-history', got '{other}'"
            ))),
        }
    }
}

/// What to do with an author email that carries no GitHub username.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownAuthorPolicy {
    /// Fail the whole build with `UnrecognizedAuthorFormat`.
    #[default]
    Fail,
    /// Show the commit author's name without a profile link.
    AuthorName,
}

impl FromStr for UnknownAuthorPolicy {
    type Err = ReleaseNotesError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "author-name" => Ok(Self::AuthorName),
            other => Err(ReleaseNotesError::invalid_config(format!(
                "{UNKNOWN_AUTHOR_VAR} must be 'fail' or 'author-name', got '{other}'"
            ))),
        }
    }
}

/// Complete configuration for one changelog run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the releases API. `None` sends no auth header.
    pub token: Option<SecretString>,
    /// Release label used as the document title.
    pub current_tag: String,
    /// Hosted repository whose releases are listed.
    pub repo: RepoCoordinates,
    /// Local checkout whose history is walked.
    pub repo_path: PathBuf,
    /// Base URL of the releases API.
    pub api_url: String,
    /// Base URL used to build commit and author links.
    pub server_url: String,
    /// Where the rendered document is written.
    pub output_path: PathBuf,
    pub on_fetch_failure: FetchFailurePolicy,
    pub unknown_author: UnknownAuthorPolicy,
    pub debug: bool,
}

impl Config {
    /// Build a config for `current_tag` with every optional field at its
    /// default value.
    pub fn new(current_tag: impl Into<String>) -> Self {
        Self {
            token: None,
            current_tag: current_tag.into(),
            repo: RepoCoordinates::default(),
            repo_path: PathBuf::from(DEFAULT_REPO_PATH),
            api_url: DEFAULT_API_URL.into(),
            server_url: DEFAULT_SERVER_URL.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            on_fetch_failure: FetchFailurePolicy::default(),
            unknown_author: UnknownAuthorPolicy::default(),
            debug: false,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable or `None` when it is unset.
    ///
    /// Required variables must be present, though the token may be empty.
    /// Optional variables that are unset or blank fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .ok_or_else(|| ReleaseNotesError::MissingEnvVar(key.into()))
        };
        let optional =
            |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = required(TOKEN_VAR)?;
        let current_tag = required(TAG_VAR)?;

        let mut config = Self::new(current_tag);

        if !token.is_empty() {
            config.token = Some(SecretString::from(token));
        }

        if let Some(slug) = optional(REPOSITORY_VAR) {
            config.repo = RepoCoordinates::parse(&slug)?;
        }

        if let Some(url) = optional(API_URL_VAR) {
            config.api_url = url;
        }

        if let Some(url) = optional(SERVER_URL_VAR) {
            config.server_url = url;
        }

        if let Some(path) = optional(REPO_PATH_VAR) {
            config.repo_path = PathBuf::from(path);
        }

        if let Some(path) = optional(OUTPUT_VAR) {
            config.output_path = PathBuf::from(path);
        }

        if let Some(policy) = optional(FETCH_FAILURE_VAR) {
            config.on_fetch_failure = policy.parse()?;
        }

        if let Some(policy) = optional(UNKNOWN_AUTHOR_VAR) {
            config.unknown_author = policy.parse()?;
        }

        if let Some(debug) = optional(DEBUG_VAR) {
            config.debug = matches!(
                debug.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        Ok(config)
    }

    /// Prefix that a full commit hash is appended to.
    pub fn commit_link_base_url(&self) -> String {
        format!(
            "{}/{}/{}/commit/",
            self.server_url.trim_end_matches('/'),
            self.repo.owner,
            self.repo.name
        )
    }

    /// Prefix that a GitHub username is appended to.
    pub fn author_link_base_url(&self) -> String {
        format!("{}/", self.server_url.trim_end_matches('/'))
    }
}
