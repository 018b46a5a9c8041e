//! Comparison keys for reply text.
//!
//! The page shows a reply with decorations the backend text does not carry
//! (speaker label, model name, copy buttons, fences). Both sides are reduced
//! to their ASCII letters before comparing.

use std::fmt;

/// Normalised text used only for equality between page and backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SanitizedKey(String);

impl SanitizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SanitizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduce `text` to its comparison key. Order of the steps matters.
///
/// The key is a fixed point: `sanitize(sanitize(x).as_str()) == sanitize(x)`.
pub fn sanitize(text: &str) -> SanitizedKey {
    let text = text.replace('`', "");
    let text = text.replace("ChatGPT said:", "");
    let text = text.replace(PRODUCT_NAME, "");
    // "4o-mini" never survives the "4o" pass; it ends up as "mini".
    let text = text.replace("4o", "");
    let text = text.replace("4o-mini", "");
    let text = text.replace("Copy code", "");
    let text = text.replace(' ', "");
    let mut key: String = text.chars().filter(char::is_ascii_alphabetic).collect();
    // Dropping separators can join "Chat" and "GPT" back together.
    while key.contains(PRODUCT_NAME) {
        key = key.replace(PRODUCT_NAME, "");
    }
    SanitizedKey(key)
}

const PRODUCT_NAME: &str = "ChatGPT";
