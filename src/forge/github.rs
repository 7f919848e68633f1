//! Implements the ReleaseLister trait for GitHub
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::RepoCoordinates,
    error::Result,
    forge::{
        traits::ReleaseLister,
        types::{ReleaseListing, ReleaseRecord},
    },
};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub releases client using reqwest. The bearer token, when present, is
/// installed as a default header so every request carries it.
pub struct Github {
    base_url: Url,
    client: Client,
}

impl Github {
    /// Create a client for the API rooted at `api_url`.
    pub fn new(api_url: &str, token: Option<&SecretString>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.append(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        if let Some(token) = token {
            let mut token_value = HeaderValue::from_str(
                format!("Bearer {}", token.expose_secret()).as_str(),
            )?;
            token_value.set_sensitive(true);
            headers.append(AUTHORIZATION, token_value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        // join() replaces the last path segment unless the base ends in "/"
        let base_url =
            Url::parse(&format!("{}/", api_url.trim_end_matches('/')))?;

        Ok(Self { base_url, client })
    }

    fn releases_url(&self, repo: &RepoCoordinates) -> Result<Url> {
        let url = self
            .base_url
            .join(&format!("repos/{}/{}/releases", repo.owner, repo.name))?;
        Ok(url)
    }
}

#[async_trait]
impl ReleaseLister for Github {
    async fn list_releases(
        &self,
        repo: &RepoCoordinates,
    ) -> Result<ReleaseListing> {
        let url = self.releases_url(repo)?;
        debug!("requesting releases: {url}");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("release list request to {url} failed: {err}");
                return Ok(ReleaseListing::FetchFailed(err.to_string()));
            }
        };

        let status = response.status();

        if !status.is_success() {
            warn!("release list request to {url} returned {status}");
            return Ok(ReleaseListing::FetchFailed(format!(
                "{url} returned {status}"
            )));
        }

        let body = response.text().await?;
        let releases: Vec<ReleaseRecord> = serde_json::from_str(&body)?;

        info!("found {} published releases for {repo}", releases.len());

        Ok(ReleaseListing::from_records(releases))
    }
}
