use serde::{Deserialize, Serialize};

/// Profile fields from `GET /users/{login}`. Extra fields in the payload are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
}

/// One entry of `GET /users/{login}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub id: u64,
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub language: Option<String>,
    pub fork: bool,
}

/// Number of displayed repos whose primary language is `language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

/// Snapshot of one account: fork-free repos sorted by stars, plus the language tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    pub user: GithubUser,
    pub repos: Vec<GithubRepo>,
    pub languages: Vec<LanguageCount>,
}
