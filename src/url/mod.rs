//! URL handling module for Hoopstat
//!
//! Builds index section URLs from the configured template and resolves the
//! profile links found in index rows against the catalog origin.

use crate::config::CatalogConfig;
use crate::{UrlError, UrlResult};
use url::Url;

/// Parses the catalog origin, accepting only HTTP(S)
pub fn parse_base_url(base: &str) -> UrlResult<Url> {
    let url = Url::parse(base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlError::InvalidScheme(other.to_string())),
    }
}

/// Builds the URL of one index section
///
/// # Example
///
/// ```
/// use hoopstat::url::{index_url, parse_base_url};
///
/// let base = parse_base_url("https://www.basketball-reference.com").unwrap();
/// let url = index_url(&base, "/players/{letter}/", 'q').unwrap();
/// assert_eq!(url.as_str(), "https://www.basketball-reference.com/players/q/");
/// ```
pub fn index_url(base: &Url, template: &str, letter: char) -> UrlResult<Url> {
    if !template.contains("{letter}") {
        return Err(UrlError::MissingPlaceholder(template.to_string()));
    }

    let path = template.replace("{letter}", &letter.to_string());
    base.join(&path)
        .map_err(|e| UrlError::Parse(format!("{}: {}", path, e)))
}

/// Builds every index section URL in configured order
pub fn index_urls(catalog: &CatalogConfig) -> UrlResult<Vec<(char, Url)>> {
    let base = parse_base_url(&catalog.base_url)?;
    catalog
        .sections
        .chars()
        .map(|letter| index_url(&base, &catalog.index_path, letter).map(|url| (letter, url)))
        .collect()
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be ignored:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - hrefs that do not resolve to HTTP(S)
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base.join(href).ok()?;
    if absolute.scheme() == "http" || absolute.scheme() == "https" {
        Some(absolute.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.basketball-reference.com").unwrap()
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("https://example.com").is_ok());
        assert!(matches!(
            parse_base_url("file:///tmp"),
            Err(UrlError::InvalidScheme(_))
        ));
        assert!(matches!(parse_base_url("nope"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_index_url() {
        let url = index_url(&base(), "/players/{letter}/", 'a').unwrap();
        assert_eq!(url.as_str(), "https://www.basketball-reference.com/players/a/");
    }

    #[test]
    fn test_index_url_requires_placeholder() {
        assert!(matches!(
            index_url(&base(), "/players/", 'a'),
            Err(UrlError::MissingPlaceholder(_))
        ));
    }

    #[test]
    fn test_index_urls_follow_section_order() {
        let catalog = CatalogConfig {
            base_url: "http://127.0.0.1:8080".to_string(),
            index_path: "/players/{letter}/".to_string(),
            sections: "cab".to_string(),
        };
        let urls = index_urls(&catalog).unwrap();
        let letters: Vec<char> = urls.iter().map(|(l, _)| *l).collect();
        assert_eq!(letters, vec!['c', 'a', 'b']);
        assert_eq!(urls[0].1.as_str(), "http://127.0.0.1:8080/players/c/");
    }

    #[test]
    fn test_resolve_relative_href() {
        assert_eq!(
            resolve_href(&base(), "/players/a/abdelal01.html"),
            Some("https://www.basketball-reference.com/players/a/abdelal01.html".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_href() {
        assert_eq!(
            resolve_href(&base(), "https://other.example.com/p"),
            Some("https://other.example.com/p".to_string())
        );
    }

    #[test]
    fn test_skip_unusable_hrefs() {
        assert_eq!(resolve_href(&base(), ""), None);
        assert_eq!(resolve_href(&base(), "#top"), None);
        assert_eq!(resolve_href(&base(), "javascript:void(0)"), None);
        assert_eq!(resolve_href(&base(), "mailto:a@b.c"), None);
    }
}
