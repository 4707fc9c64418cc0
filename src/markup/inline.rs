//! Inline scanner for the card markup dialect.
//!
//! A single left-to-right pass. At every cursor position the rules in
//! [`RULES`] are tried in priority order and the first match wins; when none
//! matches, one character is appended to the pending plain-text run. Tokens
//! never nest, and a construct that fails to match is left as literal text,
//! so no input character is ever dropped.

use crate::model::CardId;

/// Destination of a `[text](target)` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// `http://` or `https://` URL, opened outside the application.
    External(String),
    /// Cross-reference to another card in the deck.
    Card(CardId),
}

impl LinkTarget {
    fn classify(raw: &str) -> Option<Self> {
        if is_external_url(raw) {
            Some(LinkTarget::External(raw.to_string()))
        } else {
            CardId::new(raw).ok().map(LinkTarget::Card)
        }
    }

    /// Raw target as written in the source.
    pub fn as_str(&self) -> &str {
        match self {
            LinkTarget::External(url) => url,
            LinkTarget::Card(id) => id.as_str(),
        }
    }
}

/// True for targets that leave the application.
pub fn is_external_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// A classified fragment of one rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    /// Text shown verbatim, including unmatched markup characters.
    PlainText(String),
    /// `**text**`.
    Bold(String),
    /// `*text*` outside a `**` run.
    Italic(String),
    /// `` `code` ``, contents never parsed.
    Code(String),
    /// Forced visual break from a literal `\n\n`.
    ParagraphBreak,
    /// `[text](target)` to another card or an external URL.
    Link { text: String, target: LinkTarget },
    /// `![alt](src)`, opened in the image overlay.
    Image { alt: String, src: String },
    /// `[![alt](src)](href)`, an image that opens `href` externally.
    LinkedImage { alt: String, src: String, href: String },
}

impl InlineSpan {
    /// Markup that produced this span, byte for byte.
    pub fn source_text(&self) -> String {
        match self {
            InlineSpan::PlainText(text) => text.clone(),
            InlineSpan::Bold(text) => format!("**{text}**"),
            InlineSpan::Italic(text) => format!("*{text}*"),
            InlineSpan::Code(text) => format!("`{text}`"),
            InlineSpan::ParagraphBreak => "\n\n".to_string(),
            InlineSpan::Link { text, target } => format!("[{text}]({})", target.as_str()),
            InlineSpan::Image { alt, src } => format!("![{alt}]({src})"),
            InlineSpan::LinkedImage { alt, src, href } => format!("[![{alt}]({src})]({href})"),
        }
    }

    /// Text a reader sees, without markup.
    pub fn visible_text(&self) -> &str {
        match self {
            InlineSpan::PlainText(text)
            | InlineSpan::Bold(text)
            | InlineSpan::Italic(text)
            | InlineSpan::Code(text)
            | InlineSpan::Link { text, .. } => text,
            InlineSpan::ParagraphBreak => "\n",
            InlineSpan::Image { alt, .. } | InlineSpan::LinkedImage { alt, .. } => alt,
        }
    }
}

/// Successful rule match: the span and how many bytes of input it covers.
struct Matched {
    span: InlineSpan,
    consumed: usize,
}

/// A rule receives the remaining input and the character just before it.
type Matcher = fn(&str, Option<char>) -> Option<Matched>;

/// Matcher rules, highest priority first.
const RULES: [Matcher; 7] = [
    match_linked_image,
    match_image,
    match_link,
    match_code,
    match_bold,
    match_italic,
    match_paragraph_break,
];

/// Parse one line of markup into inline spans.
///
/// Never fails: anything unrecognised is returned as [`InlineSpan::PlainText`],
/// with adjacent plain characters merged into a single span.
pub fn parse_inline(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut cursor = 0;
    let mut prev: Option<char> = None;

    while cursor < line.len() {
        let rest = &line[cursor..];

        if let Some(matched) = RULES.iter().find_map(|rule| rule(rest, prev)) {
            flush_plain(&mut plain, &mut spans);
            prev = rest[..matched.consumed].chars().next_back();
            cursor += matched.consumed;
            spans.push(matched.span);
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        plain.push(ch);
        prev = Some(ch);
        cursor += ch.len_utf8();
    }

    flush_plain(&mut plain, &mut spans);
    spans
}

fn flush_plain(plain: &mut String, spans: &mut Vec<InlineSpan>) {
    if !plain.is_empty() {
        spans.push(InlineSpan::PlainText(std::mem::take(plain)));
    }
}

/// Split `input` (which must start with `open`) at the first `close`.
///
/// Returns the text between the delimiters and the input following `close`.
fn delimited(input: &str, open: char, close: char) -> Option<(&str, &str)> {
    let body = input.strip_prefix(open)?;
    let end = body.find(close)?;
    Some((&body[..end], &body[end + close.len_utf8()..]))
}

fn consumed(rest: &str, after: &str) -> usize {
    rest.len() - after.len()
}

/// `![alt](src)`: alt may be empty, src may not.
fn image_parts(input: &str) -> Option<(&str, &str, &str)> {
    let after_bang = input.strip_prefix('!')?;
    let (alt, after_alt) = delimited(after_bang, '[', ']')?;
    let (src, after) = delimited(after_alt, '(', ')')?;
    if src.is_empty() {
        return None;
    }
    Some((alt, src, after))
}

fn match_linked_image(rest: &str, _prev: Option<char>) -> Option<Matched> {
    let inner = rest.strip_prefix('[')?;
    let (alt, src, after_image) = image_parts(inner)?;
    let after_bracket = after_image.strip_prefix(']')?;
    let (href, after) = delimited(after_bracket, '(', ')')?;
    if href.is_empty() {
        return None;
    }
    Some(Matched {
        span: InlineSpan::LinkedImage {
            alt: alt.to_string(),
            src: src.to_string(),
            href: href.to_string(),
        },
        consumed: consumed(rest, after),
    })
}

fn match_image(rest: &str, _prev: Option<char>) -> Option<Matched> {
    let (alt, src, after) = image_parts(rest)?;
    Some(Matched {
        span: InlineSpan::Image {
            alt: alt.to_string(),
            src: src.to_string(),
        },
        consumed: consumed(rest, after),
    })
}

fn match_link(rest: &str, _prev: Option<char>) -> Option<Matched> {
    let (text, after_text) = delimited(rest, '[', ']')?;
    let (target, after) = delimited(after_text, '(', ')')?;
    if text.is_empty() || target.is_empty() {
        return None;
    }
    Some(Matched {
        span: InlineSpan::Link {
            text: text.to_string(),
            target: LinkTarget::classify(target)?,
        },
        consumed: consumed(rest, after),
    })
}

fn match_code(rest: &str, _prev: Option<char>) -> Option<Matched> {
    let (code, after) = delimited(rest, '`', '`')?;
    if code.is_empty() {
        return None;
    }
    Some(Matched {
        span: InlineSpan::Code(code.to_string()),
        consumed: consumed(rest, after),
    })
}

fn match_bold(rest: &str, _prev: Option<char>) -> Option<Matched> {
    let body = rest.strip_prefix("**")?;
    let end = body.find('*')?;
    if end == 0 {
        return None;
    }
    let after = body[end..].strip_prefix("**")?;
    Some(Matched {
        span: InlineSpan::Bold(body[..end].to_string()),
        consumed: consumed(rest, after),
    })
}

fn match_italic(rest: &str, prev: Option<char>) -> Option<Matched> {
    if prev == Some('*') {
        return None;
    }
    let body = rest.strip_prefix('*')?;
    if body.starts_with('*') {
        return None;
    }
    let end = body.find('*')?;
    if end == 0 {
        return None;
    }
    let after = &body[end + 1..];
    if after.starts_with('*') {
        return None;
    }
    Some(Matched {
        span: InlineSpan::Italic(body[..end].to_string()),
        consumed: consumed(rest, after),
    })
}

fn match_paragraph_break(rest: &str, _prev: Option<char>) -> Option<Matched> {
    rest.starts_with("\n\n").then_some(Matched {
        span: InlineSpan::ParagraphBreak,
        consumed: 2,
    })
}
