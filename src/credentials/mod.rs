use crate::config::Config;

/// Environment variable name for providing an API token without the config file
pub const ENV_TOKEN_VAR: &str = "COMPETENCY_SCORES_TOKEN";

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Check for an API token in the COMPETENCY_SCORES_TOKEN environment variable.
/// Returns Some(token) if the env var is set and non-empty, None otherwise.
pub fn get_token_from_env() -> Option<String> {
    std::env::var(ENV_TOKEN_VAR).ok().and_then(|v| non_empty(&v))
}

/// Resolve the token to send with API requests.
///
/// The environment wins over `api.token` in the config file. None means
/// requests go out without an Authorization header.
pub fn resolve_token(config: &Config) -> Option<String> {
    get_token_from_env().or_else(|| {
        config
            .api
            .as_ref()
            .and_then(|api| api.token.as_deref())
            .and_then(non_empty)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_non_empty_trims() {
        assert_eq!(non_empty("  abc \n"), Some("abc".to_string()));
        assert_eq!(non_empty("   "), None);
    }

    #[test]
    fn test_resolve_token_from_config() {
        // Only meaningful when the env var is not set in the test environment
        if get_token_from_env().is_some() {
            return;
        }
        let config = Config {
            api: Some(ApiConfig {
                base_url: "http://localhost".to_string(),
                token: Some(" from-config ".to_string()),
            }),
            ..Config::default()
        };
        assert_eq!(resolve_token(&config), Some("from-config".to_string()));
        assert_eq!(resolve_token(&Config::default()), None);
    }
}
