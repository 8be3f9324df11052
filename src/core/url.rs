//! URL parsing and query string manipulation over the `url` crate.
//! Anything that fails to parse yields `None`.

use crate::domain::model::ParsedUrl;
use serde_json::{Map, Value};
use url::Url;

fn parse(input: &str) -> Option<Url> {
    match Url::parse(input.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Could not parse URL '{}': {}", input, e);
            None
        }
    }
}

pub fn parse_url(input: &str) -> Option<ParsedUrl> {
    let url = parse(input)?;
    let hostname = url.host_str().unwrap_or_default().to_string();
    let host = match url.port() {
        Some(port) => format!("{}:{}", hostname, port),
        None => hostname.clone(),
    };
    let origin = url.origin().ascii_serialization();

    Some(ParsedUrl {
        href: url.to_string(),
        protocol: format!("{}:", url.scheme()),
        host,
        hostname,
        port: url.port(),
        pathname: url.path().to_string(),
        search: url.query().map(|q| format!("?{}", q)).unwrap_or_default(),
        hash: url.fragment().map(|f| format!("#{}", f)).unwrap_or_default(),
        origin,
        query: url.query_pairs().into_owned().collect(),
    })
}

/// Decoded query parameters. Later duplicates win.
pub fn query_params(input: &str) -> Option<Map<String, Value>> {
    let url = parse(input)?;
    Some(
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect(),
    )
}

/// Form-urlencoded `k=v&...` without the leading `?`.
pub fn build_query_string<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish()
}

/// Appends `pairs` to the query, replacing existing keys of the same name.
pub fn add_query_params<K, V>(input: &str, pairs: &[(K, V)]) -> Option<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = parse(input)?;
    let replaced: Vec<&str> = pairs.iter().map(|(k, _)| k.as_ref()).collect();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(k, _)| !replaced.contains(&k.as_str()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        query.extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    }
    Some(url.to_string())
}

pub fn remove_query_param(input: &str, key: &str) -> Option<String> {
    let mut url = parse(input)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(k, _)| k != key)
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Some(url.to_string())
}

/// Hostname without a leading `www.`.
pub fn domain(input: &str) -> Option<String> {
    let url = parse(input)?;
    let host = url.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

pub fn is_absolute_url(input: &str) -> bool {
    Url::parse(input.trim()).is_ok()
}

/// Resolves `path` against `base` the way a browser resolves a link.
pub fn join_url(base: &str, path: &str) -> Option<String> {
    let base = parse(base)?;
    match base.join(path) {
        Ok(joined) => Some(joined.to_string()),
        Err(e) => {
            tracing::debug!("Could not join '{}' onto '{}': {}", path, base, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_components() {
        let parsed =
            parse_url("https://user@www.example.com:8080/a/b?x=1&y=two%20words#frag").unwrap();
        assert_eq!(parsed.protocol, "https:");
        assert_eq!(parsed.hostname, "www.example.com");
        assert_eq!(parsed.host, "www.example.com:8080");
        assert_eq!(parsed.port, Some(8080));
        assert_eq!(parsed.pathname, "/a/b");
        assert_eq!(parsed.search, "?x=1&y=two%20words");
        assert_eq!(parsed.hash, "#frag");
        assert_eq!(parsed.origin, "https://www.example.com:8080");
        assert_eq!(parsed.query.get("y").map(String::as_str), Some("two words"));
    }

    #[test]
    fn default_port_is_omitted() {
        let parsed = parse_url("https://example.com").unwrap();
        assert_eq!(parsed.port, None);
        assert_eq!(parsed.host, "example.com");
        assert_eq!(parsed.pathname, "/");
        assert_eq!(parsed.search, "");
    }

    #[test]
    fn invalid_urls_are_none() {
        assert!(parse_url("not a url").is_none());
        assert!(query_params("/relative?x=1").is_none());
        assert!(domain("::").is_none());
    }

    #[test]
    fn query_helpers() {
        let params = query_params("https://e.com/?a=1&b=x%2By").unwrap();
        assert_eq!(params["a"], "1");
        assert_eq!(params["b"], "x+y");

        assert_eq!(build_query_string(&[("q", "rust lang"), ("page", "2")]), "q=rust+lang&page=2");

        let added = add_query_params("https://e.com/p?a=1&b=2", &[("b", "3"), ("c", "4")]).unwrap();
        assert_eq!(added, "https://e.com/p?a=1&b=3&c=4");

        assert_eq!(
            remove_query_param("https://e.com/p?a=1&b=2", "a").as_deref(),
            Some("https://e.com/p?b=2")
        );
        assert_eq!(
            remove_query_param("https://e.com/p?a=1", "a").as_deref(),
            Some("https://e.com/p")
        );
    }

    #[test]
    fn domain_and_joins() {
        assert_eq!(domain("https://www.rust-lang.org/learn").as_deref(), Some("rust-lang.org"));
        assert!(is_absolute_url("mailto:someone@example.com"));
        assert!(!is_absolute_url("/docs"));
        assert_eq!(
            join_url("https://e.com/docs/intro", "../api").as_deref(),
            Some("https://e.com/api")
        );
    }
}
