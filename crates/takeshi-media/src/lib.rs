//! # takeshi-media
//!
//! Media attachment downloads (through the protocol client's
//! [`MediaSource`](takeshi_core::traits::MediaSource)) and plain HTTP byte
//! fetches used by download commands.

mod download;
mod http;

pub use download::{content_node, has_media, MediaDownloader};
pub use http::{get_buffer, get_image_buffer, FetchOptions};
