//! Class-based syntax highlighting for fenced code.
//!
//! Emits `<span class="hljs-…">` markup so the host page's stylesheet
//! colours it; unknown languages fall back to the plain-text grammar.

use once_cell::sync::OnceCell;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::render::escape_html;

static SYNTAXES: OnceCell<SyntaxSet> = OnceCell::new();

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

fn syntax_set() -> &'static SyntaxSet {
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

/// Grammar for a fence's language token: by token, then extension, then
/// name (case-insensitive).
pub fn find_syntax<'a>(ps: &'a SyntaxSet, lang: &str) -> Option<&'a SyntaxReference> {
    let lang = lang.trim();
    if lang.is_empty() {
        return None;
    }
    ps.find_syntax_by_token(lang)
        .or_else(|| ps.find_syntax_by_extension(lang))
        .or_else(|| {
            ps.syntaxes()
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(lang))
        })
}

#[cfg(test)]
pub(crate) fn is_known_language(lang: &str) -> bool {
    find_syntax(syntax_set(), lang).is_some()
}

/// Highlight `code` as `lang`, or as plain text when `lang` is unknown.
/// Whitespace is preserved exactly.
pub fn highlight_code(code: &str, lang: &str) -> String {
    let ps = syntax_set();
    let syntax = find_syntax(ps, lang).unwrap_or_else(|| ps.find_syntax_plain_text());
    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, ps, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
            log::warn!("Highlighting {} failed, emitting plain text: {}", syntax.name, e);
            return escape_html(code);
        }
    }
    generator.finalize()
}
