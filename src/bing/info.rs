//! Image-of-the-day metadata: request URL and response parsing.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;

pub const ARCHIVE_PATH: &str = "HPImageArchive.aspx";

lazy_static! {
    static ref URI_RE: Regex = Regex::new(r#""url":"(/th\?.*?pid=hp)""#).expect("uri regex");
    // Escaped quotes stay inside the title
    static ref TITLE_RE: Regex =
        Regex::new(r#""title":"((?:[^"\\]|\\.)*)""#).expect("title regex");
}

/// Path and title of the featured image.
///
/// Either field is an empty string when the response did not contain it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageInfo {
    pub uri: String,
    pub title: String,
}

impl ImageInfo {
    pub fn has_uri(&self) -> bool {
        !self.uri.is_empty()
    }

    /// Extract uri and title from a metadata response body
    pub fn parse(body: &str) -> Self {
        Self {
            uri: first_capture(&URI_RE, body),
            title: first_capture(&TITLE_RE, body),
        }
    }

    /// Resolve the uri against the service origin
    pub fn image_url(&self, base: &Url) -> Result<Url> {
        base.join(&self.uri)
            .with_context(|| format!("joining image uri '{}' onto {}", self.uri, base))
    }
}

fn first_capture(re: &Regex, body: &str) -> String {
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
        .unwrap_or_default()
}

/// Decode JSON string escapes (`\u0026`, `\"`); keeps the raw text if it is not valid JSON.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}

/// Query parameters for one metadata request
#[derive(Debug, Clone)]
pub struct ArchiveQuery {
    pub index: u32,
    pub market: String,
    /// Cache buster, milliseconds since the epoch
    pub nc: i64,
}

impl ArchiveQuery {
    pub fn now(index: u32, market: &str) -> Self {
        Self {
            index,
            market: market.to_string(),
            nc: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base
            .join(ARCHIVE_PATH)
            .with_context(|| format!("building metadata url from {base}"))?;
        url.query_pairs_mut()
            .append_pair("format", "hp")
            .append_pair("idx", &self.index.to_string())
            .append_pair("n", "1")
            .append_pair("nc", &self.nc.to_string())
            .append_pair("pid", "hp")
            .append_pair("mkt", &self.market)
            .append_pair("quiz", "1")
            .append_pair("og", "1");
        Ok(url)
    }
}
