//! Casing helpers for field display-name fallbacks.

/// `"max_tokens"` -> `"Max Tokens"`.
pub fn title_case(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"max_tokens"` -> `"Max tokens"`.
pub fn normal_case(name: &str) -> String {
    capitalize(&name.replace('_', " ").to_lowercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
