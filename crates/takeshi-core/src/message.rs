//! Inbound WhatsApp message model.
//!
//! Mirrors the JSON shape produced by the WhatsApp Web client library
//! (camelCase keys, every payload optional). Only the fields the bot reads
//! are modelled; unknown keys are ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Stub type emitted when a participant joins a group.
pub const GROUP_PARTICIPANT_ADD: u32 = 27;
/// Stub type emitted when a participant leaves a group.
pub const GROUP_PARTICIPANT_LEAVE: u32 = 32;

/// Whether a message stub type is a group join or leave event.
pub fn is_add_or_leave(stub_type: u32) -> bool {
    matches!(stub_type, GROUP_PARTICIPANT_ADD | GROUP_PARTICIPANT_LEAVE)
}

/// A raw inbound message as delivered by the protocol client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebMessage {
    #[serde(default)]
    pub key: MessageKey,
    #[serde(default)]
    pub message: Option<MessageContent>,
    #[serde(default)]
    pub push_name: Option<String>,
    #[serde(default)]
    pub message_stub_type: Option<u32>,
    #[serde(default)]
    pub message_stub_parameters: Vec<String>,
}

/// Addressing information for a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageKey {
    /// Chat the message belongs to (user or group JID).
    #[serde(default)]
    pub remote_jid: Option<String>,
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub id: Option<String>,
    /// Sender inside a group chat, possibly with a `:<device>` suffix.
    #[serde(default)]
    pub participant: Option<String>,
}

/// The payload of a message. At most a few of these are set at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageContent {
    #[serde(default)]
    pub conversation: Option<String>,
    #[serde(default)]
    pub extended_text_message: Option<ExtendedTextMessage>,
    #[serde(default)]
    pub image_message: Option<MediaMessage>,
    #[serde(default)]
    pub video_message: Option<MediaMessage>,
    #[serde(default)]
    pub audio_message: Option<MediaMessage>,
    #[serde(default)]
    pub document_message: Option<MediaMessage>,
    #[serde(default)]
    pub sticker_message: Option<MediaMessage>,
}

/// Text message with formatting or reply context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedTextMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub context_info: Option<ContextInfo>,
}

/// Reply/quote context attached to an extended text message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    /// Author of the quoted message.
    #[serde(default)]
    pub participant: Option<String>,
    #[serde(default)]
    pub stanza_id: Option<String>,
    #[serde(default)]
    pub quoted_message: Option<Box<MessageContent>>,
}

/// Content node describing a media attachment.
///
/// The download-relevant fields are opaque to the bot and handed back to the
/// protocol client unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMessage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub direct_path: Option<String>,
    #[serde(default)]
    pub media_key: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub file_length: Option<u64>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub seconds: Option<u32>,
}

/// Where the command text of a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPayload<'a> {
    Conversation(&'a str),
    ExtendedText(&'a str),
    ImageCaption(&'a str),
    VideoCaption(&'a str),
    None,
}

impl<'a> TextPayload<'a> {
    /// The text, if any.
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Self::Conversation(t)
            | Self::ExtendedText(t)
            | Self::ImageCaption(t)
            | Self::VideoCaption(t) => Some(t),
            Self::None => None,
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|t| !t.is_empty())
}

impl MessageContent {
    /// Select the text payload. Plain text wins over extended text, which
    /// wins over image captions, which win over video captions.
    pub fn text_payload(&self) -> TextPayload<'_> {
        let extended = self
            .extended_text_message
            .as_ref()
            .and_then(|e| non_empty(&e.text));
        let image = self.image_message.as_ref().and_then(|m| non_empty(&m.caption));
        let video = self.video_message.as_ref().and_then(|m| non_empty(&m.caption));

        match (non_empty(&self.conversation), extended, image, video) {
            (Some(t), _, _, _) => TextPayload::Conversation(t),
            (None, Some(t), _, _) => TextPayload::ExtendedText(t),
            (None, None, Some(t), _) => TextPayload::ImageCaption(t),
            (None, None, None, Some(t)) => TextPayload::VideoCaption(t),
            (None, None, None, None) => TextPayload::None,
        }
    }

    /// Reply context of the extended text message, if present.
    pub fn context_info(&self) -> Option<&ContextInfo> {
        self.extended_text_message
            .as_ref()
            .and_then(|e| e.context_info.as_ref())
    }

    /// The quoted message this one replies to, if present.
    pub fn quoted_message(&self) -> Option<&MessageContent> {
        self.context_info()
            .and_then(|c| c.quoted_message.as_deref())
    }

    /// The media node of the given kind carried directly by this payload.
    pub fn media(&self, kind: MediaKind) -> Option<&MediaMessage> {
        match kind {
            MediaKind::Image => self.image_message.as_ref(),
            MediaKind::Video => self.video_message.as_ref(),
            MediaKind::Audio => self.audio_message.as_ref(),
            MediaKind::Document => self.document_message.as_ref(),
            MediaKind::Sticker => self.sticker_message.as_ref(),
        }
    }
}

impl WebMessage {
    /// Build a plain-text message, mostly useful for tests and the CLI.
    pub fn from_text(remote_jid: &str, text: &str) -> Self {
        Self {
            key: MessageKey {
                remote_jid: Some(remote_jid.to_string()),
                ..Default::default()
            },
            message: Some(MessageContent {
                conversation: Some(text.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn text_payload(&self) -> TextPayload<'_> {
        self.message
            .as_ref()
            .map_or(TextPayload::None, MessageContent::text_payload)
    }
}

/// Media attachment kinds the protocol client can download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    Sticker,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Sticker => "sticker",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "document" => Ok(Self::Document),
            "sticker" => Ok(Self::Sticker),
            other => Err(format!("unknown media kind: {other}")),
        }
    }
}
