use crate::config::Config;
use devconnector_domain::error::DcResult;

use anyhow::Context;
use entrait::*;
use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use std::time::Duration;

/// How many repositories are shown on a profile.
const REPO_COUNT: &str = "3";

#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: reqwest::Url,
    credentials: Option<(String, String)>,
}

impl GithubClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let credentials = match (&config.github_client_id, &config.github_secret) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        };

        Self::new(
            &config.github_api_url,
            credentials,
            Duration::from_secs(config.github_timeout_secs),
        )
    }

    pub fn new(
        api_url: &str,
        credentials: Option<(String, String)>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.parse().context("malformed github_api_url")?,
            credentials,
        })
    }

    fn repos_url(&self, username: &str) -> anyhow::Result<reqwest::Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("github_api_url cannot be a base"))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);

        Ok(url)
    }
}

pub trait GetGithubClient {
    fn get_github_client(&self) -> &GithubClient;
}

impl<T: GetGithubClient> GetGithubClient for Impl<T> {
    fn get_github_client(&self) -> &GithubClient {
        (**self).get_github_client()
    }
}

pub struct ReqwestGithubApi;

#[entrait]
impl devconnector_domain::github::GithubApiImpl for ReqwestGithubApi {
    pub async fn latest_repos(
        deps: &impl GetGithubClient,
        username: &str,
    ) -> DcResult<Option<serde_json::Value>> {
        let client = deps.get_github_client();

        let mut query = vec![("per_page", REPO_COUNT), ("sort", "created:asc")];
        if let Some((client_id, secret)) = &client.credentials {
            query.push(("client_id", client_id.as_str()));
            query.push(("client_secret", secret.as_str()));
        }

        let response = client
            .http
            .get(client.repos_url(username)?)
            .query(&query)
            .header(USER_AGENT, concat!("devconnector/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .context("failed to reach GitHub")?;

        if response.status() != StatusCode::OK {
            tracing::debug!(username, status = %response.status(), "no GitHub repos");
            return Ok(None);
        }

        let repos = response
            .json::<serde_json::Value>()
            .await
            .context("malformed response from GitHub")?;

        Ok(Some(repos))
    }
}
