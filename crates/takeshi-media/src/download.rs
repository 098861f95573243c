//! Media attachment download to the temp directory.

use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use takeshi_core::{
    error::TakeshiError,
    message::{MediaKind, MediaMessage, WebMessage},
    traits::MediaSource,
};
use tracing::debug;

/// Locate the content node for `kind`, directly on the message or inside
/// the quoted message it replies to.
pub fn content_node(message: &WebMessage, kind: MediaKind) -> Option<&MediaMessage> {
    let content = message.message.as_ref()?;
    content
        .media(kind)
        .or_else(|| content.quoted_message().and_then(|q| q.media(kind)))
}

/// Whether the message (or its quoted message) carries media of `kind`.
pub fn has_media(message: &WebMessage, kind: MediaKind) -> bool {
    content_node(message, kind).is_some()
}

/// Downloads attachments through the protocol client and stores them under
/// a temp directory.
#[derive(Clone)]
pub struct MediaDownloader {
    source: Arc<dyn MediaSource>,
    temp_dir: PathBuf,
}

impl MediaDownloader {
    pub fn new(source: Arc<dyn MediaSource>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            temp_dir: temp_dir.into(),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Download the `kind` attachment of `message` to
    /// `<temp_dir>/<file_name>.<extension>` and return its absolute path.
    ///
    /// Returns `Ok(None)` when the message has no such attachment. Stream and
    /// write failures propagate; a partially written file is left in place.
    pub async fn download(
        &self,
        message: &WebMessage,
        file_name: &str,
        kind: MediaKind,
        extension: &str,
    ) -> Result<Option<PathBuf>, TakeshiError> {
        let Some(content) = content_node(message, kind) else {
            return Ok(None);
        };

        let mut stream = self.source.download_content(content, kind).await?;
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }

        let path = std::path::absolute(self.temp_dir.join(format!("{file_name}.{extension}")))?;
        tokio::fs::write(&path, &buffer).await?;
        debug!("media: wrote {} bytes of {kind} to {}", buffer.len(), path.display());

        Ok(Some(path))
    }
}
