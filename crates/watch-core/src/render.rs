//! Markdown renderer.
//!
//! Turns raw reply text into the HTML fragment spliced into the page:
//! GitHub-flavoured markdown with visible line breaks, fenced code as a
//! titled panel with a copy button, and lightly styled inline code and
//! paragraphs. Rendering never fails; whatever the grammar cannot parse
//! comes out as escaped text.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::highlight::highlight_code;

pub const COPY_ICON: &str = r#"<svg width="24" height="24" viewBox="0 0 24 24" fill="none"><path fill-rule="evenodd" clip-rule="evenodd" d="M7 5C7 3.34315 8.34315 2 10 2H19C20.6569 2 22 3.34315 22 5V14C22 15.6569 20.6569 17 19 17H17V19C17 20.6569 15.6569 22 14 22H5C3.34315 22 2 20.6569 2 19V10C2 8.34315 3.34315 7 5 7H7V5ZM9 7H14C15.6569 7 17 8.34315 17 10V15H19C19.5523 15 20 14.5523 20 14V5C20 4.44772 19.5523 4 19 4H10C9.44772 4 9 4.44772 9 5V7ZM5 9C4.44772 9 4 9.44772 4 10V19C4 19.5523 4.44772 20 5 20H14C14.5523 20 15 19.5523 15 19V10C15 9.44772 14.5523 9 14 9H5Z" fill="currentColor"></path></svg>"#;

pub const COPY_LABEL: &str = "Copy code";
pub const COPIED_LABEL: &str = "Copied!";

/// Handles of one rendered code panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyControl {
    pub index: usize,
    pub button_id: String,
    pub code_id: String,
    pub language: String,
}

impl CopyControl {
    pub fn new(index: usize, language: impl Into<String>) -> Self {
        Self {
            index,
            button_id: format!("{}-copy-button", index),
            code_id: format!("{}-code", index),
            language: language.into(),
        }
    }
}

/// Output of [`render_markdown`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReply {
    pub html: String,
    /// One per fenced block, in document order
    pub copy_controls: Vec<CopyControl>,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render `text` to HTML. The first code panel is addressed by
/// `block_index`, later ones by the following indices.
pub fn render_markdown(text: &str, block_index: usize) -> RenderedReply {
    let mut copy_controls: Vec<CopyControl> = Vec::new();
    let mut events: Vec<Event<'_>> = Vec::new();
    // (language, accumulated body) while inside a code block
    let mut open_block: Option<(String, String)> = None;

    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => fence_language(&info).to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                open_block = Some((language, String::new()));
            }
            Event::Text(t) if open_block.is_some() => {
                if let Some((_, body)) = open_block.as_mut() {
                    body.push_str(&t);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, body)) = open_block.take() {
                    let control = CopyControl::new(block_index + copy_controls.len(), language);
                    events.push(Event::Html(code_panel(&body, &control).into()));
                    copy_controls.push(control);
                }
            }
            Event::Code(code) => {
                events.push(Event::InlineHtml(
                    format!(
                        r#"<code class="bg-token-surface-primary rounded px-1.5 py-0.5">{}</code>"#,
                        escape_html(&code)
                    )
                    .into(),
                ));
            }
            Event::Start(Tag::Paragraph) => {
                events.push(Event::Html(CowStr::Borrowed(r#"<p class="mb-4">"#)));
            }
            Event::End(TagEnd::Paragraph) => {
                events.push(Event::Html(CowStr::Borrowed("</p>\n")));
            }
            Event::SoftBreak => events.push(Event::HardBreak),
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, events.into_iter());
    RenderedReply {
        html: out,
        copy_controls,
    }
}

/// Inner HTML of a copy button showing `label`
pub fn copy_button_label(label: &str) -> String {
    format!("{}<span>{}</span>", COPY_ICON, escape_html(label))
}

/// First word of a fence info string: "rust,ignore" and "python title=x"
/// both name their language first.
fn fence_language(info: &str) -> &str {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or("")
}

fn code_panel(body: &str, control: &CopyControl) -> String {
    let lang = escape_html(&control.language);
    format!(
        concat!(
            r#"<pre class="!overflow-visible">"#,
            r#"<div class="contain-inline-size rounded-md border-[0.5px] border-token-border-medium relative bg-token-sidebar-surface-primary dark:bg-gray-950">"#,
            r#"<div class="flex absolute top-0 w-full items-center text-token-text-secondary px-4 py-2 text-xs font-sans justify-between rounded-t-md h-9 bg-token-sidebar-surface-primary dark:bg-token-main-surface-secondary select-none">"#,
            r#"<p>{lang}</p>"#,
            r#"<button id="{button_id}" class="flex gap-1 items-center select-none py-1">{label}</button>"#,
            r#"</div>"#,
            r#"<div class="overflow-y-auto p-4 flex" dir="ltr">"#,
            r#"<code class="!whitespace-pre hljs language-{lang}" id="{code_id}">{code}</code>"#,
            r#"</div></div></pre>"#,
            "\n",
        ),
        lang = lang,
        button_id = control.button_id,
        label = copy_button_label(COPY_LABEL),
        code_id = control.code_id,
        code = highlight_code(body, &control.language),
    )
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
