//! GitHub handle detection in unstructured resume text.
//!
//! Rules are tried in a fixed order and the first hit wins:
//! 1. a profile link (`github.com/<login>`, with or without scheme and `www.`)
//! 2. a labelled mention (`GitHub: <login>`, `github - <login>`)
//! 3. an `@<login>` later on the same line as the word `github`
//!
//! Input is lowercased before matching, so detected logins are always lowercase.
//! Detection is syntactic only; nothing here checks that the account exists.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::errors::AppError;

struct DetectionRule {
    name: &'static str,
    pattern: Regex,
}

static RULES: LazyLock<Vec<DetectionRule>> = LazyLock::new(|| {
    [
        (
            "link",
            r"(?:https?://)?(?:www\.)?github\.com/(?P<user>[a-z0-9-]+)(?:(?-u:\b)|/)",
        ),
        ("label", r"github\s*[:\-]\s*(?P<user>[a-z0-9-]+)"),
        ("mention", r"github[^\n\r@]*@(?P<user>[a-z0-9-]+)"),
    ]
    .into_iter()
    .map(|(name, pattern)| DetectionRule {
        name,
        pattern: Regex::new(pattern).expect("detection rule must be a valid regex"),
    })
    .collect()
});

/// Returns the first GitHub login found in `text`, lowercased, or `None`.
pub fn detect_username(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();

    RULES.iter().find_map(|rule| {
        let login = rule.pattern.captures(&lower)?.name("user")?.as_str();
        debug!("GitHub handle '{login}' matched by {} rule", rule.name);
        Some(login.to_string())
    })
}

/// Cleans a manually entered login: trims whitespace and one leading `@`.
/// Returns `Ok(None)` for blank input. Anything other than ASCII letters,
/// digits and `-` is rejected since the login ends up in an API path.
pub fn normalize_login(input: &str) -> Result<Option<String>, AppError> {
    let trimmed = input.trim();
    let value = trimmed.strip_prefix('@').unwrap_or(trimmed);
    if value.is_empty() {
        return Ok(None);
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(AppError::Validation(format!(
            "'{value}' is not a valid GitHub username"
        )));
    }
    Ok(Some(value.to_string()))
}
