use crate::{
    error::TakeshiError,
    message::{MediaKind, MediaMessage},
};
use async_trait::async_trait;
use futures_util::stream::BoxStream;

/// Stream of decrypted media chunks, in order.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, TakeshiError>>;

/// Media download capability of the WhatsApp protocol client.
///
/// The client owns connection, decryption and retries; the bot only hands
/// it a content node and consumes the resulting chunks.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Start downloading the given content node.
    async fn download_content(
        &self,
        content: &MediaMessage,
        kind: MediaKind,
    ) -> Result<ByteStream, TakeshiError>;
}
