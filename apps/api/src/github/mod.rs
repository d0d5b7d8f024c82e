//! GitHub lookup: handle detection in free text plus read-only profile/repo fetches
//! against the public REST API.
//!
//! All network access goes through the `GithubApi` trait. `AppState` carries an
//! `Arc<dyn GithubApi>` so handlers and `fetch_profile` can be tested with a fake.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub mod client;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod username;

pub use client::GithubClient;
pub use models::{GithubProfile, GithubRepo, GithubUser, LanguageCount};
pub use profile::fetch_profile;

/// Which of the two upstream calls an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Repos,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::User => f.write_str("user"),
            Resource::Repos => f.write_str("repos"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GithubError {
    /// GitHub answered with a non-success status.
    #[error("Failed to fetch {resource}")]
    Status { resource: Resource, status: u16 },

    /// The request never produced a usable response (connect, timeout, bad JSON).
    #[error("Failed to fetch {resource}")]
    Transport {
        resource: Resource,
        #[source]
        source: reqwest::Error,
    },
}

impl GithubError {
    pub fn resource(&self) -> Resource {
        match self {
            GithubError::Status { resource, .. } | GithubError::Transport { resource, .. } => {
                *resource
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GithubError::Status { status: 404, .. })
    }
}

/// Read-only view of the GitHub REST API.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// `GET /users/{login}`
    async fn user(&self, login: &str) -> Result<GithubUser, GithubError>;

    /// `GET /users/{login}/repos?per_page=100&sort=updated`, unfiltered.
    async fn repos(&self, login: &str) -> Result<Vec<GithubRepo>, GithubError>;
}
