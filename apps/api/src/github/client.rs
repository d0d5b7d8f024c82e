use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{GithubApi, GithubError, GithubRepo, GithubUser, Resource};
use crate::config::Config;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const REPOS_PER_PAGE: &str = "100";

/// Unauthenticated GitHub REST client. No token, no retries: every failure is
/// reported to the caller as-is.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        // Always ask for a fresh snapshot from any intermediate cache.
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.github_user_agent)
                .context("GITHUB_USER_AGENT is not a valid header value")?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            client,
            base_url: config.github_api_url.trim_end_matches('/').to_string(),
        })
    }

    fn user_url(&self, login: &str) -> String {
        format!("{}/users/{login}", self.base_url)
    }

    fn repos_url(&self, login: &str) -> String {
        format!("{}/users/{login}/repos", self.base_url)
    }

    fn repos_request(&self, login: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.repos_url(login))
            .query(&[("per_page", REPOS_PER_PAGE), ("sort", "updated")])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GithubError> {
        let response = request
            .send()
            .await
            .map_err(|source| GithubError::Transport { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!("GitHub {resource} request returned {status}");
            return Err(GithubError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| GithubError::Transport { resource, source })
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn user(&self, login: &str) -> Result<GithubUser, GithubError> {
        debug!("Fetching GitHub user {login}");
        let request = self.client.get(self.user_url(login));
        self.get_json(Resource::User, request).await
    }

    async fn repos(&self, login: &str) -> Result<Vec<GithubRepo>, GithubError> {
        debug!("Fetching GitHub repos for {login}");
        self.get_json(Resource::Repos, self.repos_request(login)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_follow_rest_layout() {
        let config = Config {
            github_api_url: "https://ghe.example.com/api/v3/".to_string(),
            ..Config::default()
        };
        let client = GithubClient::new(&config).unwrap();
        assert_eq!(
            client.user_url("octocat"),
            "https://ghe.example.com/api/v3/users/octocat"
        );
        assert_eq!(
            client.repos_url("octocat"),
            "https://ghe.example.com/api/v3/users/octocat/repos"
        );
    }

    #[test]
    fn test_repos_request_asks_for_100_most_recently_updated() {
        let client = GithubClient::new(&Config::default()).unwrap();
        let request = client.repos_request("torvalds").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://api.github.com/users/torvalds/repos?per_page=100&sort=updated"
        );
    }

    #[test]
    fn test_invalid_user_agent_is_rejected() {
        let config = Config {
            github_user_agent: "bad\nagent".to_string(),
            ..Config::default()
        };
        assert!(GithubClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_transport_error() {
        let config = Config {
            github_api_url: "http://127.0.0.1:9".to_string(),
            http_timeout: std::time::Duration::from_secs(2),
            ..Config::default()
        };
        let client = GithubClient::new(&config).unwrap();
        let err = client.user("octocat").await.unwrap_err();
        assert!(matches!(
            err,
            GithubError::Transport {
                resource: Resource::User,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Failed to fetch user");
    }
}
