//! Request URLs from a base URI and a resource path.

use postman_collection::Url;
use regex::Regex;
use std::sync::LazyLock;

static URI_PARAMETER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{([^}]+)\}").ok());

/// Rewrites RAML URI parameters (`{id}`) as Postman variables (`{{id}}`).
#[must_use]
pub fn to_postman_variables(text: &str) -> String {
    match URI_PARAMETER.as_ref() {
        Some(pattern) => pattern.replace_all(text, "{{$1}}").into_owned(),
        None => text.to_string(),
    }
}

/// Joins `base_uri` and `resource_path` and splits the result into the
/// protocol, host and path parts of a Postman URL.
///
/// The protocol defaults to `https` and the host to `localhost` when the base
/// URI has none. The query list is always present, starting out empty.
#[must_use]
pub fn build_url(base_uri: &str, resource_path: &str) -> Url {
    let trimmed = resource_path.trim_matches('/');
    let separator = if base_uri.ends_with('/') { "" } else { "/" };
    let raw = to_postman_variables(&format!("{base_uri}{separator}{trimmed}"));

    let (scheme, rest) = split_scheme(&raw);
    let (netloc, path) = match rest.strip_prefix("//") {
        Some(authority) => authority
            .find(['/', '?', '#'])
            .map_or((authority, ""), |end| authority.split_at(end)),
        None => ("", rest),
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();

    let host = if netloc.is_empty() {
        vec!["localhost".to_string()]
    } else {
        netloc.split('.').map(str::to_string).collect()
    };
    let protocol = scheme.unwrap_or("https").to_string();
    let path = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    Url {
        raw,
        protocol: Some(protocol),
        host,
        path: Some(path),
        query: Some(Vec::new()),
    }
}

/// Splits `scheme:rest` when the prefix is a valid URI scheme.
fn split_scheme(url: &str) -> (Option<&str>, &str) {
    let Some((scheme, rest)) = url.split_once(':') else {
        return (None, url);
    };
    let valid = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid && rest.starts_with("//") {
        (Some(scheme), rest)
    } else {
        (None, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_resource() {
        let url = build_url("https://api.example.com", "/users");
        assert_eq!(url.raw, "https://api.example.com/users");
        assert_eq!(url.protocol.as_deref(), Some("https"));
        assert_eq!(url.host, vec!["api", "example", "com"]);
        assert_eq!(url.path, Some(vec!["users".to_string()]));
        assert_eq!(url.query, Some(Vec::new()));
    }

    #[test]
    fn test_uri_parameter_pattern_compiles() {
        assert!(URI_PARAMETER.is_some());
        assert_eq!(
            to_postman_variables("/users/{userId}/posts/{postId}"),
            "/users/{{userId}}/posts/{{postId}}"
        );
        assert_eq!(to_postman_variables("/users/{}"), "/users/{}");
    }

    #[test]
    fn test_uri_parameters_become_variables() {
        let url = build_url("https://api.example.com/v1", "/users/{id}/posts");
        assert_eq!(url.raw, "https://api.example.com/v1/users/{{id}}/posts");
        assert_eq!(
            url.path,
            Some(vec![
                "v1".to_string(),
                "users".to_string(),
                "{{id}}".to_string(),
                "posts".to_string()
            ])
        );
    }

    #[test]
    fn test_nested_path_segments() {
        let url = build_url("https://api.example.com", "/users/{id}/posts");
        assert_eq!(url.path, Some(vec!["users".into(), "{{id}}".into(), "posts".into()]));
    }

    #[test]
    fn test_trailing_slash_on_base() {
        let url = build_url("http://localhost:8080/", "/health/");
        assert_eq!(url.raw, "http://localhost:8080/health");
        assert_eq!(url.protocol.as_deref(), Some("http"));
        assert_eq!(url.host, vec!["localhost:8080"]);
    }

    #[test]
    fn test_base_without_scheme() {
        let url = build_url("api.example.com", "/users");
        assert_eq!(url.raw, "api.example.com/users");
        assert_eq!(url.protocol.as_deref(), Some("https"));
        assert_eq!(url.host, vec!["localhost"]);
        assert_eq!(url.path, Some(vec!["api.example.com".into(), "users".into()]));
    }

    #[test]
    fn test_templated_base_uri() {
        let url = build_url("https://{region}.api.test/{version}", "/items");
        assert_eq!(url.raw, "https://{{region}}.api.test/{{version}}/items");
        assert_eq!(url.host, vec!["{{region}}", "api", "test"]);
    }

    #[test]
    fn test_root_resource() {
        let url = build_url("https://api.example.com", "/");
        assert_eq!(url.raw, "https://api.example.com/");
        assert_eq!(url.path, Some(Vec::new()));
    }
}
