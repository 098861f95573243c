//! Command manifest parsing.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use takeshi_core::error::TakeshiError;
use takeshi_core::text::format_command;

/// A loaded command definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    /// Manifest `name`, or the file stem when absent.
    pub name: String,
    pub description: String,
    /// Usage line shown to users (e.g. `/ban @membro`).
    pub usage: Option<String>,
    /// Alias list. `None` when the manifest has no usable `commands` array.
    pub aliases: Option<Vec<String>>,
    /// Key of the registered handler that runs this command.
    pub handler: String,
    /// Manifest file this definition was read from.
    pub path: PathBuf,
}

impl CommandDefinition {
    /// Build a definition in code (static registration).
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            usage: None,
            aliases: Some(aliases.iter().map(|a| a.to_string()).collect()),
            handler: name.to_string(),
            path: PathBuf::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_handler(mut self, handler: &str) -> Self {
        self.handler = handler.to_string();
        self
    }

    /// Whether `command_name` (already normalized) matches one of the aliases.
    /// `None` when the alias set is unusable.
    pub fn matches(&self, command_name: &str) -> Option<bool> {
        let aliases = self.aliases.as_ref()?;
        Some(aliases.iter().any(|a| format_command(a) == command_name))
    }

    /// File name used in diagnostics.
    pub fn file_label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.toml", self.name))
    }
}

/// Raw manifest as written on disk.
#[derive(Debug, Deserialize, Default)]
struct RawManifest {
    name: Option<String>,
    #[serde(default)]
    description: String,
    usage: Option<String>,
    commands: Option<toml::Value>,
    handler: Option<String>,
}

/// Keep `commands` only when it is a non-empty array of strings.
fn alias_list(value: Option<toml::Value>) -> Option<Vec<String>> {
    let toml::Value::Array(items) = value? else {
        return None;
    };
    let aliases: Option<Vec<String>> = items
        .into_iter()
        .map(|v| match v {
            toml::Value::String(s) => Some(s),
            _ => None,
        })
        .collect();
    aliases.filter(|a| !a.is_empty())
}

/// Parse a manifest's content. `path` supplies the fallback name.
pub(crate) fn parse_manifest(content: &str, path: &Path) -> Result<CommandDefinition, TakeshiError> {
    let raw: RawManifest = toml::from_str(content)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    let name = raw.name.filter(|n| !n.trim().is_empty()).unwrap_or(stem);
    let handler = raw.handler.unwrap_or_else(|| name.clone());

    Ok(CommandDefinition {
        name,
        description: raw.description,
        usage: raw.usage,
        aliases: alias_list(raw.commands),
        handler,
        path: path.to_path_buf(),
    })
}

/// Read and parse a manifest file.
pub(crate) fn load_manifest(path: &Path) -> Result<CommandDefinition, TakeshiError> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let content = r#"
            name = "ban"
            description = "Remove um membro do grupo"
            usage = "/ban @membro"
            commands = ["ban", "banir", "kick"]
            handler = "admin-ban"
        "#;
        let def = parse_manifest(content, Path::new("/cmds/admin/ban.toml")).unwrap();
        assert_eq!(def.name, "ban");
        assert_eq!(def.aliases.as_deref().unwrap(), ["ban", "banir", "kick"]);
        assert_eq!(def.handler, "admin-ban");
        assert_eq!(def.usage.as_deref(), Some("/ban @membro"));
        assert_eq!(def.file_label(), "ban.toml");
    }

    #[test]
    fn test_name_and_handler_default_to_file_stem() {
        let def = parse_manifest(r#"commands = ["ping"]"#, Path::new("x/ping.toml")).unwrap();
        assert_eq!(def.name, "ping");
        assert_eq!(def.handler, "ping");
        assert_eq!(def.description, "");
    }

    #[test]
    fn test_unusable_alias_sets() {
        for content in [
            r#"name = "a""#,
            r#"commands = "ban""#,
            r#"commands = []"#,
            r#"commands = ["ban", 3]"#,
        ] {
            let def = parse_manifest(content, Path::new("a.toml")).unwrap();
            assert!(def.aliases.is_none(), "content: {content}");
            assert_eq!(def.matches("ban"), None);
        }
    }

    #[test]
    fn test_matches_normalizes_aliases() {
        let def = CommandDefinition::new("anti-link", &["Anti-Link", "antilink"]);
        assert_eq!(def.matches("antilink"), Some(true));
        assert_eq!(def.matches("link"), Some(false));

        let def = CommandDefinition::new("abracar", &["abraçar"]);
        assert_eq!(def.matches("abracar"), Some(true));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = parse_manifest("commands = [", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, TakeshiError::Toml(_)));
    }
}
