//! The page envelope returned by NetSuite collection endpoints.

use serde::{Deserialize, Serialize};

/// Relation tag of the link that points at the following page.
pub const NEXT_REL: &str = "next";

/// A navigation link in a page envelope.
///
/// NetSuite returns links such as
/// `{"rel": "next", "href": "https://.../suiteql?limit=1000&offset=1000"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationLink {
    /// Relation tag, e.g. `next`, `previous`, `self`.
    pub rel: String,
    /// Target reference, normally an absolute URL.
    pub href: String,
}

impl NavigationLink {
    /// Creates a new link.
    #[must_use]
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// Creates a `next` link.
    #[must_use]
    pub fn next(href: impl Into<String>) -> Self {
        Self::new(NEXT_REL, href)
    }
}

/// One fetched unit of results.
///
/// Only `links` drives pagination. `has_more`, `offset`, `count` and
/// `total_results` are carried through for the caller and never consulted
/// when deciding whether to fetch again.
///
/// Every field is optional on the wire and defaults when absent.
///
/// # Example
///
/// ```rust
/// use netsuite_api::Page;
///
/// let page: Page = serde_json::from_str(r#"{
///     "items": [{"id": "1"}],
///     "links": [{"rel": "next", "href": "https://example.com/suiteql?offset=1000&limit=1000"}],
///     "count": 1,
///     "hasMore": true,
///     "offset": 0,
///     "totalResults": 2
/// }"#).unwrap();
///
/// assert_eq!(page.items.len(), 1);
/// assert!(page.next_link().is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T = serde_json::Value> {
    /// Records on this page, opaque to the paginator.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Navigation links.
    #[serde(default)]
    pub links: Vec<NavigationLink>,
    /// Server hint that more results exist.
    #[serde(default)]
    pub has_more: bool,
    /// Offset of the first item on this page.
    #[serde(default)]
    pub offset: u64,
    /// Number of items on this page.
    #[serde(default)]
    pub count: u64,
    /// Total number of results across all pages.
    #[serde(default)]
    pub total_results: u64,
}

impl<T> Page<T> {
    /// Creates a page holding `items` and `links`, with informational
    /// fields zeroed.
    #[must_use]
    pub fn new(items: Vec<T>, links: Vec<NavigationLink>) -> Self {
        Self {
            items,
            links,
            has_more: false,
            offset: 0,
            count: 0,
            total_results: 0,
        }
    }

    /// Returns the first link tagged `next`, if any.
    #[must_use]
    pub fn next_link(&self) -> Option<&NavigationLink> {
        self.links.iter().find(|link| link.rel == NEXT_REL)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// The `offset` and `limit` query parameters carried by a `next` link.
///
/// Each field is `None` when the parameter is absent or not a valid
/// number; the paginator supplies the fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct NextPageParams {
    pub offset: Option<u64>,
    pub limit: Option<u32>,
}

impl NextPageParams {
    /// Parses the query string of `href`.
    ///
    /// Absolute and relative URLs are accepted; text without a `?` has no
    /// query. Anything after `#` is ignored. Values may use any decimal form
    /// of a whole number (`1000`, `1000.0`, `1e3`). A `limit` of zero counts
    /// as absent.
    pub fn parse(href: &str) -> Self {
        let without_fragment = href.split('#').next().unwrap_or_default();
        let query = without_fragment
            .split_once('?')
            .map_or("", |(_, query)| query);

        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "offset" => {
                    params.offset = parse_whole_number(&value);
                    if params.offset.is_none() {
                        tracing::warn!(href, value = %value, "Ignoring non-numeric offset in next link");
                    }
                }
                "limit" => {
                    params.limit = parse_whole_number(&value)
                        .and_then(|limit| u32::try_from(limit).ok())
                        .filter(|limit| *limit > 0);
                    if params.limit.is_none() {
                        tracing::warn!(href, value = %value, "Ignoring invalid limit in next link");
                    }
                }
                _ => {}
            }
        }
        params
    }
}

/// Parses a non-negative whole number written as an integer or a float.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_whole_number(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(number) = value.parse::<u64>() {
        return Some(number);
    }
    let number = value.parse::<f64>().ok()?;
    // 2^64 is the first float past u64::MAX
    (number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number < 18_446_744_073_709_551_616.0)
        .then_some(number as u64)
}
