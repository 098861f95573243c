//! Static help menu.

use chrono::NaiveDateTime;
use takeshi_core::config::BotConfig;

/// Shown while a slow command is working.
pub const WAIT_MESSAGE: &str = "Carregando dados...";

/// Menu sections: (title, commands, closing emoji).
const SECTIONS: &[(&str, &[&str], &str)] = &[
    ("DONO", &["get-id", "off", "on"], "🌌"),
    (
        "ADMINS",
        &[
            "abrir",
            "anti-link (1/0)",
            "auto-responder (1/0)",
            "ban",
            "exit (1/0)",
            "fechar",
            "hidetag",
            "limpar",
            "promover",
            "rebaixar",
            "revelar",
            "welcome (1/0)",
        ],
        "⭐",
    ),
    (
        "PRINCIPAL",
        &[
            "attp",
            "cep",
            "exemplos-de-mensagens",
            "get-lid",
            "google-search",
            "perfil",
            "ping",
            "raw-message",
            "sticker",
            "to-image",
            "ttp",
            "yt-search",
        ],
        "🚀",
    ),
    (
        "DOWNLOADS",
        &["play-audio", "play-video", "tik-tok", "yt-mp3", "yt-mp4"],
        "🎶",
    ),
    (
        "BRINCADEIRAS",
        &["abracar", "beijar", "jantar", "lutar", "matar", "socar"],
        "🎡",
    ),
    (
        "IA",
        &["gemini", "ia-sticker", "pixart", "stable-diffusion-turbo"],
        "🚀",
    ),
    ("CANVAS", &["bolsonaro", "cadeia", "inverter", "rip"], "❇"),
];

/// Render the help menu for the given bot settings and local time.
pub fn menu_message(bot: &BotConfig, now: NaiveDateTime) -> String {
    let prefix = bot.display_prefix();
    let mut out = format!(
        "╭━━⪩ BEM VINDO! ⪨━━\n\
         ▢\n\
         ▢ • {name}\n\
         ▢ • Data: {date}\n\
         ▢ • Hora: {time}\n\
         ▢ • Prefixo: {prefix}\n\
         ▢ • Versão: {version}\n\
         ▢\n\
         ╰━━─「🪐」─━━",
        name = bot.name,
        date = now.format("%d/%m/%Y"),
        time = now.format("%H:%M:%S"),
        version = env!("CARGO_PKG_VERSION"),
    );

    for (title, commands, emoji) in SECTIONS {
        out.push_str(&format!("\n\n╭━━⪩ {title} ⪨━━\n▢\n"));
        for cmd in *commands {
            out.push_str(&format!("▢ • {prefix}{cmd}\n"));
        }
        out.push_str(&format!("▢\n╰━━─「{emoji}」─━━"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_menu_header() {
        let bot = BotConfig {
            name: "Takeshi Bot".into(),
            prefix: "!".into(),
            ..Default::default()
        };
        let menu = menu_message(&bot, at(9, 5, 3));
        assert!(menu.starts_with("╭━━⪩ BEM VINDO! ⪨━━"));
        assert!(menu.contains("▢ • Takeshi Bot\n"));
        assert!(menu.contains("▢ • Data: 07/03/2024\n"));
        assert!(menu.contains("▢ • Hora: 09:05:03\n"));
        assert!(menu.contains("▢ • Prefixo: !\n"));
        assert!(menu.contains(&format!("Versão: {}", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn test_menu_sections_use_prefix() {
        let bot = BotConfig::default();
        let menu = menu_message(&bot, at(0, 0, 0));
        for title in ["DONO", "ADMINS", "PRINCIPAL", "DOWNLOADS", "BRINCADEIRAS", "IA", "CANVAS"] {
            assert!(menu.contains(&format!("╭━━⪩ {title} ⪨━━")), "missing {title}");
        }
        assert!(menu.contains("▢ • /anti-link (1/0)\n"));
        assert!(menu.contains("▢ • /rip\n"));
        assert!(menu.ends_with("╰━━─「❇」─━━"));
    }
}
