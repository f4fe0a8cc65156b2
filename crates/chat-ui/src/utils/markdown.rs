use crate::config::MarkdownConfig;
use crate::styles::{CURSOR_PLACEHOLDER, INLINE_CODE, MARKDOWN_PARAGRAPH};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// A fenced or indented code block, rendered by `CodeBlock` in its slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeSnippet {
    pub language: String,
    pub code: String,
}

/// Markdown rendered to one HTML document.
///
/// Each code block is left as an empty slot element carrying
/// [`MarkdownConfig::CODE_BLOCK_SLOT`] with its index into `code_blocks`, so
/// the surrounding lists and quotes stay intact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    pub html: String,
    pub code_blocks: Vec<CodeSnippet>,
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_MATH);
    options
}

/// Render markdown for a chat bubble.
///
/// Paragraphs get the chat paragraph spacing, inline code is rendered in place,
/// and raw HTML in the source is escaped rather than passed through.
pub fn parse_markdown(source: &str) -> RenderedMarkdown {
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut code_blocks = Vec::new();
    let mut code: Option<(String, String)> = None;

    for event in Parser::new_ext(source, parser_options()) {
        if let Some((_, text)) = code.as_mut() {
            match event {
                Event::Text(value) => text.push_str(&value),
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, text)) = code.take() {
                        events.push(code_slot(language, &text, &mut code_blocks));
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => language_tag(&info),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((language, String::new()));
            }
            Event::Start(Tag::Paragraph) => {
                events.push(Event::Html(CowStr::from(format!(
                    "<p class=\"{MARKDOWN_PARAGRAPH}\">"
                ))));
            }
            Event::End(TagEnd::Paragraph) => events.push(Event::Html(CowStr::from("</p>"))),
            Event::Code(value) if &*value == MarkdownConfig::CURSOR_GLYPH => {
                events.push(Event::Html(CowStr::from(cursor_markup())));
            }
            Event::Code(value) => {
                events.push(Event::Html(CowStr::from(format!(
                    "<code class=\"{INLINE_CODE}\">"
                ))));
                events.push(Event::Text(CowStr::from(unwrap_cursor(&value))));
                events.push(Event::Html(CowStr::from("</code>")));
            }
            Event::Html(value) | Event::InlineHtml(value) => events.push(Event::Text(value)),
            other => events.push(other),
        }
    }

    // An unterminated fence while streaming still renders as a code block
    if let Some((language, text)) = code.take() {
        events.push(code_slot(language, &text, &mut code_blocks));
    }

    let mut rendered = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut rendered, events.into_iter());
    RenderedMarkdown {
        html: rendered,
        code_blocks,
    }
}

/// Cursor placeholder for a cursor-only block, otherwise a numbered slot
fn code_slot(language: String, text: &str, code_blocks: &mut Vec<CodeSnippet>) -> Event<'static> {
    let code = text.strip_suffix('\n').unwrap_or(text);
    if code == MarkdownConfig::CURSOR_GLYPH {
        return Event::Html(CowStr::from(cursor_markup()));
    }

    let index = code_blocks.len();
    code_blocks.push(CodeSnippet {
        language,
        code: unwrap_cursor(code),
    });
    Event::Html(CowStr::from(format!(
        "<div {}=\"{index}\"></div>",
        MarkdownConfig::CODE_BLOCK_SLOT
    )))
}

/// Streaming producers sometimes emit the cursor wrapped in backticks
fn unwrap_cursor(code: &str) -> String {
    let wrapped = format!("`{}`", MarkdownConfig::CURSOR_GLYPH);
    code.replace(&wrapped, MarkdownConfig::CURSOR_GLYPH)
}

fn cursor_markup() -> String {
    format!(
        "<span class=\"{CURSOR_PLACEHOLDER}\">{}</span>",
        MarkdownConfig::CURSOR_GLYPH
    )
}

/// Language tag from a fence info string: the leading word characters of its first token
pub fn language_tag(info: &str) -> String {
    info.split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
