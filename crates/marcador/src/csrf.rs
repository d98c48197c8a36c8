use crate::config::Config;

/// Value of a cookie in a raw `document.cookie` string
pub fn token_from_cookie(cookie: &str, name: &str) -> Option<String> {
    cookie
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// CSRF token for a state-changing request: the hidden form field first,
/// then the cookie.
pub fn find_token(fields: &[(String, String)], cookie: &str, config: &Config) -> Option<String> {
    fields
        .iter()
        .find(|(name, value)| *name == config.csrf_field && !value.is_empty())
        .map(|(_, value)| value.clone())
        .or_else(|| token_from_cookie(cookie, &config.csrf_cookie))
}
