//! Text normalization helpers for command names and arguments.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Normalize a command word: lowercase, strip accents, keep ASCII letters
/// and digits only.
///
/// `"Exemplo-2!"` becomes `"exemplo2"`, `"açaí"` becomes `"acai"`.
pub fn format_command(text: &str) -> String {
    only_letters_and_numbers(&remove_accents(text.to_lowercase().trim()))
}

/// Decompose to NFD and drop combining marks.
pub fn remove_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Keep ASCII letters and digits only.
pub fn only_letters_and_numbers(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Keep ASCII digits only.
pub fn only_numbers(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Split on any of `separators`, trimming each piece and dropping empties.
pub fn split_by_characters(text: &str, separators: &[char]) -> Vec<String> {
    text.split(|c: char| separators.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Remove every leading character that belongs to `prefixes`.
///
/// `"!!cmd"` with prefixes `['!']` becomes `"cmd"`.
pub fn strip_prefixes<'a>(token: &'a str, prefixes: &[char]) -> &'a str {
    token.trim_start_matches(|c: char| prefixes.contains(&c))
}
