use tracing::info;

use super::{GithubApi, GithubError, GithubProfile, GithubRepo, LanguageCount};

/// Fetches the user and their repositories concurrently.
///
/// Fail-fast: if either call fails the whole lookup fails and nothing partial is
/// returned. Forks are dropped and the rest sorted by stars before returning.
pub async fn fetch_profile(api: &dyn GithubApi, login: &str) -> Result<GithubProfile, GithubError> {
    let (user, repos) = tokio::try_join!(api.user(login), api.repos(login))?;

    let repos = normalize_repos(repos);
    let languages = tally_languages(&repos);
    info!(
        "Fetched GitHub profile {login}: {} original repos, {} languages",
        repos.len(),
        languages.len()
    );

    Ok(GithubProfile {
        login: login.to_string(),
        user,
        repos,
        languages,
    })
}

/// Drops forks and orders by star count, highest first.
/// The sort is stable, so equal counts keep the API's order.
pub fn normalize_repos(repos: Vec<GithubRepo>) -> Vec<GithubRepo> {
    let mut originals: Vec<GithubRepo> = repos.into_iter().filter(|r| !r.fork).collect();
    originals.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    originals
}

/// Counts repos per primary language, most common first.
/// Repos without a language are skipped; ties keep first-seen order.
pub fn tally_languages(repos: &[GithubRepo]) -> Vec<LanguageCount> {
    let mut tally: Vec<LanguageCount> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        match tally.iter_mut().find(|entry| entry.language == language) {
            Some(entry) => entry.count += 1,
            None => tally.push(LanguageCount {
                language: language.to_string(),
                count: 1,
            }),
        }
    }
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::tests::{repo, FakeGithub};
    use crate::github::Resource;

    #[test]
    fn test_normalize_drops_forks_and_sorts_by_stars() {
        let repos = vec![
            repo(1, 50, None, true),
            repo(2, 10, None, false),
            repo(3, 30, None, false),
        ];
        let stars: Vec<u32> = normalize_repos(repos)
            .iter()
            .map(|r| r.stargazers_count)
            .collect();
        assert_eq!(stars, vec![30, 10]);
    }

    #[test]
    fn test_normalize_keeps_api_order_for_equal_stars() {
        let repos = vec![
            repo(1, 5, None, false),
            repo(2, 9, None, false),
            repo(3, 5, None, false),
            repo(4, 5, None, false),
        ];
        let ids: Vec<u64> = normalize_repos(repos).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_normalize_all_forks_is_empty() {
        assert!(normalize_repos(vec![repo(1, 100, Some("Rust"), true)]).is_empty());
    }

    #[test]
    fn test_tally_counts_and_orders_languages() {
        let repos = vec![
            repo(1, 0, Some("Go"), false),
            repo(2, 0, Some("Rust"), false),
            repo(3, 0, None, false),
            repo(4, 0, Some("Rust"), false),
            repo(5, 0, Some("C"), false),
        ];
        let tally = tally_languages(&repos);
        assert_eq!(
            tally,
            vec![
                LanguageCount {
                    language: "Rust".to_string(),
                    count: 2
                },
                LanguageCount {
                    language: "Go".to_string(),
                    count: 1
                },
                LanguageCount {
                    language: "C".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_tally_empty_when_no_languages() {
        assert!(tally_languages(&[repo(1, 3, None, false)]).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_profile_combines_user_and_normalized_repos() {
        let fake = FakeGithub::with_user(
            "torvalds",
            vec![
                repo(1, 50, Some("C"), true),
                repo(2, 10, Some("C"), false),
                repo(3, 30, Some("Rust"), false),
            ],
        );

        let profile = fetch_profile(&fake, "torvalds").await.unwrap();
        assert_eq!(profile.login, "torvalds");
        assert_eq!(profile.user.login, "torvalds");
        let ids: Vec<u64> = profile.repos.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(profile.languages.len(), 2);
        assert_eq!(profile.languages[0].language, "Rust");
    }

    #[tokio::test]
    async fn test_fetch_profile_issues_both_calls() {
        let fake = FakeGithub::with_user("octocat", vec![]);
        fetch_profile(&fake, "octocat").await.unwrap();
        let calls = fake.calls();
        assert!(calls.contains(&(Resource::User, "octocat".to_string())));
        assert!(calls.contains(&(Resource::Repos, "octocat".to_string())));
    }

    #[tokio::test]
    async fn test_user_failure_fails_whole_lookup() {
        let mut fake = FakeGithub::with_user("octocat", vec![repo(1, 1, None, false)]);
        fake.fail_user = Some(500);

        let err = fetch_profile(&fake, "octocat").await.unwrap_err();
        assert_eq!(err.resource(), Resource::User);
        assert_eq!(err.to_string(), "Failed to fetch user");
    }

    #[tokio::test]
    async fn test_repos_failure_fails_whole_lookup() {
        let mut fake = FakeGithub::with_user("octocat", vec![]);
        fake.fail_repos = Some(403);

        let err = fetch_profile(&fake, "octocat").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch repos");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let fake = FakeGithub::default();
        let err = fetch_profile(&fake, "ghost-user").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
