//! Serde default values for configuration fields.

pub(super) fn default_name() -> String {
    "Takeshi Bot".to_string()
}

pub(super) fn default_prefix() -> String {
    "/".to_string()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_commands_dir() -> String {
    "commands".to_string()
}

pub(super) fn default_temp_dir() -> String {
    "assets/temp".to_string()
}

pub(super) fn default_assets_dir() -> String {
    "assets".to_string()
}

pub(super) fn default_arg_separators() -> Vec<char> {
    vec!['\\', '|', '/']
}

pub(super) fn default_stale_after_minutes() -> i64 {
    5
}
