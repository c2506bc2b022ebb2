//! Class and module names rendered as lowercase, separator-delimited slugs.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used for URL segments.
pub const DEFAULT_SEPARATOR: char = '-';

/// Temporary word boundary. Cannot appear in a Rust or config identifier.
const BOUNDARY: &str = "\u{0}";

/// A letter followed by a capitalised word: `CTagging` -> `C|Tagging`, `HTTPServer` -> `HTTP|Server`.
static WORD_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z])([A-Z][a-z]+)").expect("valid word regex"));

/// A lowercase letter or digit followed by an uppercase one: `userId` -> `user|Id`.
static CASE_CHANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid case regex"));

/// Converts `name` into a slug using [`DEFAULT_SEPARATOR`].
///
/// `ExampleRoutableChildren` becomes `example-routable-children`, `CTagging_Default`
/// becomes `c-tagging-default`. Already slugified input is returned unchanged.
pub fn slugify(name: &str) -> String {
    slugify_with(name, DEFAULT_SEPARATOR)
}

/// Converts `name` into a slug delimited by `separator`.
///
/// Existing `_` and `-` delimiters are normalised to `separator`, so the
/// conversion is idempotent for either separator.
pub fn slugify_with(name: &str, separator: char) -> String {
    if name.is_empty() {
        return String::new();
    }

    let marked = WORD_START.replace_all(name, format!("${{1}}{BOUNDARY}${{2}}").as_str());
    let marked = CASE_CHANGE.replace_all(&marked, format!("${{1}}{BOUNDARY}${{2}}").as_str());

    marked
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            '\u{0}' | '_' | '-' => separator,
            other => other,
        })
        .collect()
}
