use std::collections::HashSet;
use std::sync::OnceLock;

use doodles_logging::{doodles_debug, doodles_warn};
use regex::Regex;
use url::Url;

/// Deduplicated absolute URLs in first-seen order, keyed by their canonical serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    urls: Vec<Url>,
    seen: HashSet<String>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal URL is already present.
    pub fn insert(&mut self, url: Url) -> bool {
        if !self.seen.insert(url.as_str().to_owned()) {
            return false;
        }
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.urls.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.urls.iter().map(|url| url.as_str().to_owned()).collect()
    }
}

impl FromIterator<Url> for UrlSet {
    fn from_iter<T: IntoIterator<Item = Url>>(iter: T) -> Self {
        let mut set = UrlSet::new();
        for url in iter {
            set.insert(url);
        }
        set
    }
}

/// Parses user-supplied URLs. Any absolute URL is accepted; invalid entries are
/// logged and skipped.
pub fn normalize_cli_urls<I, S>(values: I) -> UrlSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = UrlSet::new();
    for value in values {
        let candidate = value.as_ref().trim();
        if candidate.is_empty() {
            continue;
        }
        match Url::parse(candidate) {
            Ok(url) => {
                set.insert(url);
            }
            Err(_) => doodles_warn!("Skipping invalid URL from CLI: {}", candidate),
        }
    }
    set
}

fn loc_pattern() -> &'static Regex {
    static LOC: OnceLock<Regex> = OnceLock::new();
    LOC.get_or_init(|| Regex::new(r"<loc>(.*?)</loc>").expect("static pattern"))
}

/// Extracts `http`/`https` URLs from the `<loc>` entries of a sitemap document.
///
/// This is a tag scan, not an XML parse. Malformed entries are dropped without a warning.
pub fn extract_sitemap_urls(xml: &str) -> UrlSet {
    let mut set = UrlSet::new();
    for captures in loc_pattern().captures_iter(xml) {
        let Some(raw) = captures.get(1) else {
            continue;
        };
        let candidate = raw.as_str().trim();
        if candidate.is_empty() {
            continue;
        }
        match Url::parse(candidate) {
            Ok(url) if is_web_scheme(&url) => {
                set.insert(url);
            }
            Ok(url) => doodles_debug!("ignoring sitemap entry with scheme {}", url.scheme()),
            Err(err) => doodles_debug!("ignoring malformed sitemap entry {:?}: {}", candidate, err),
        }
    }
    set
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Host as it appears in the authority: hostname plus any non-default port.
pub fn url_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPartition {
    pub matching: Vec<Url>,
    pub mismatched: Vec<Url>,
}

/// Splits URLs by whether their host equals `host` (ASCII case-insensitive).
pub fn partition_by_host(urls: &UrlSet, host: &str) -> HostPartition {
    let mut partition = HostPartition::default();
    for url in urls.iter() {
        let same_host = url_host(url).is_some_and(|h| h.eq_ignore_ascii_case(host));
        if same_host {
            partition.matching.push(url.clone());
        } else {
            partition.mismatched.push(url.clone());
        }
    }
    partition
}
