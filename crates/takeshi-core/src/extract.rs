//! Turn an inbound message into a normalized command descriptor.

use serde::Serialize;

use crate::jid::strip_device_suffix;
use crate::message::WebMessage;
use crate::text::{format_command, split_by_characters, strip_prefixes};

/// Normalized view of a message as a bot command.
///
/// Every field is empty when the message carries no text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    /// First character of the command token, whether or not it is a
    /// configured prefix.
    pub prefix: Option<char>,
    /// Normalized command word (lowercase ASCII letters and digits).
    pub command_name: String,
    pub args: Vec<String>,
    /// Everything after the command token, unsplit.
    pub full_args: String,
    pub full_message: String,
    pub is_reply: bool,
    pub remote_jid: Option<String>,
    pub reply_jid: Option<String>,
    pub user_jid: Option<String>,
}

impl CommandDescriptor {
    /// Whether the source message carried any text.
    pub fn has_text(&self) -> bool {
        !self.full_message.is_empty()
    }

    /// Whether the message starts with one of `prefixes`.
    pub fn has_prefix(&self, prefixes: &[char]) -> bool {
        self.prefix.is_some_and(|p| prefixes.contains(&p))
    }
}

/// Extract command data from a raw message. Never fails.
pub fn extract_data_from_message(
    message: &WebMessage,
    prefixes: &[char],
    separators: &[char],
) -> CommandDescriptor {
    let Some(full_message) = message.text_payload().text() else {
        return CommandDescriptor::default();
    };

    let context = message.message.as_ref().and_then(|m| m.context_info());
    let is_reply = context.is_some_and(|c| c.quoted_message.is_some());
    let reply_jid = context
        .and_then(|c| c.participant.as_deref())
        .map(strip_device_suffix);
    let user_jid = message.key.participant.as_deref().map(strip_device_suffix);

    let mut tokens = full_message.split(' ');
    let command = tokens.next().unwrap_or_default();
    let full_args = tokens.collect::<Vec<_>>().join(" ");

    CommandDescriptor {
        prefix: command.chars().next(),
        command_name: format_command(strip_prefixes(command, prefixes)),
        args: split_by_characters(&full_args, separators),
        full_args,
        full_message: full_message.to_string(),
        is_reply,
        remote_jid: message.key.remote_jid.clone(),
        reply_jid,
        user_jid,
    }
}
