//! Bing image-of-the-day service: metadata lookup and image download.

pub mod client;
pub mod info;

pub use client::BingClient;
pub use info::{ArchiveQuery, ImageInfo};
