use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::json;

use super::info::{ArchiveQuery, ImageInfo};
use crate::ui::prelude::*;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_4) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/74.0.3729.108 Safari/537.36";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,\
     image/apng,*/*;q=0.8,application/signed-exchange;v=b3";

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(header::COOKIE, HeaderValue::from_static("ENSEARCH=BENVER=1;"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

/// Blocking HTTP client for the image service.
///
/// Fetch failures never propagate: they are reported and degrade to empty values.
pub struct BingClient {
    http: Client,
    base: Url,
}

impl BingClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid base url '{base_url}'"))?;
        // Responses are usually brotli encoded; reqwest decodes them transparently
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers())
            .brotli(true)
            .gzip(true)
            .timeout(None)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Fetch and parse the metadata of one day's image.
    ///
    /// Returns an empty [`ImageInfo`] when the request fails.
    pub fn fetch_image_info(&self, query: &ArchiveQuery) -> ImageInfo {
        let url = match query.url(&self.base) {
            Ok(url) => url,
            Err(e) => {
                emit(
                    Level::Warn,
                    "bing.info.bad_url",
                    &format!("Could not build metadata url: {e:#}"),
                    None,
                );
                return ImageInfo::default();
            }
        };
        emit(
            Level::Debug,
            "bing.info.request",
            &format!("GET {url}"),
            Some(json!({ "url": url.as_str() })),
        );

        match self.get_text(url) {
            Ok(body) => ImageInfo::parse(&body),
            Err(e) => {
                emit(
                    Level::Warn,
                    "bing.info.fetch_failed",
                    &format!("Failed to fetch image info: {e:#}"),
                    None,
                );
                ImageInfo::default()
            }
        }
    }

    /// Download the whole image into memory.
    ///
    /// Returns empty bytes when the request fails.
    pub fn fetch_image(&self, url: &Url) -> Vec<u8> {
        emit(
            Level::Info,
            "bing.image.download",
            &format!("Downloading: {url}"),
            Some(json!({ "url": url.as_str() })),
        );

        match self.get_bytes(url.clone()) {
            Ok(bytes) => bytes,
            Err(e) => {
                emit(
                    Level::Warn,
                    "bing.image.fetch_failed",
                    &format!("Failed to download image: {e:#}"),
                    None,
                );
                Vec::new()
            }
        }
    }

    fn get_text(&self, url: Url) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .context("sending metadata request")?
            .error_for_status()
            .context("metadata request rejected")?;
        response.text().context("reading metadata response")
    }

    fn get_bytes(&self, url: Url) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .context("sending image request")?
            .error_for_status()
            .context("image request rejected")?;
        Ok(response.bytes().context("reading image body")?.to_vec())
    }
}
