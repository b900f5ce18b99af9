//! Text canonicalization shared by extraction, voting and prefix matching

/// Lower-case `text`, trim it and squeeze every whitespace run to one space.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
