//! WhatsApp JID helpers.

use crate::text::only_numbers;

/// Server suffix for group chats.
pub const GROUP_SERVER: &str = "@g.us";
/// Server suffix for personal chats.
pub const USER_SERVER: &str = "@s.whatsapp.net";

/// Whether the JID addresses a group chat.
pub fn is_group(remote_jid: &str) -> bool {
    remote_jid.ends_with(GROUP_SERVER)
}

/// Build a personal JID from a phone number in any format.
pub fn to_user_jid(number: &str) -> String {
    format!("{}{USER_SERVER}", only_numbers(number))
}

/// Remove `:<digits>` device segments (e.g. `5511:12@s.whatsapp.net` becomes
/// `5511@s.whatsapp.net`). A colon not followed by a digit is kept.
pub fn strip_device_suffix(jid: &str) -> String {
    let mut out = String::with_capacity(jid.len());
    let mut chars = jid.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek().is_some_and(char::is_ascii_digit) {
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_group() {
        assert!(is_group("123@g.us"));
        assert!(!is_group("123@s.whatsapp.net"));
    }

    #[test]
    fn test_to_user_jid() {
        assert_eq!(to_user_jid("+55 11 99999-0000"), "5511999990000@s.whatsapp.net");
    }

    #[test]
    fn test_strip_device_suffix() {
        assert_eq!(
            strip_device_suffix("5511999990000:12@s.whatsapp.net"),
            "5511999990000@s.whatsapp.net"
        );
        assert_eq!(
            strip_device_suffix("5511999990000:3@s.whatsapp.net"),
            "5511999990000@s.whatsapp.net"
        );
        assert_eq!(strip_device_suffix("123@g.us"), "123@g.us");
        assert_eq!(strip_device_suffix("a:b@x"), "a:b@x");
    }
}
