//! Line classification for card bodies.
//!
//! Each line is classified on its own (no state carries between lines) and its
//! text is handed to [`parse_inline`]. Whitespace-only lines produce no block.

use super::inline::{parse_inline, InlineSpan};

const BULLET_PREFIX: &str = "- ";
const NESTED_BULLET_PREFIX: &str = "  - ";

/// How a body line is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Plain line of text.
    Paragraph,
    /// `- item`
    Bullet,
    /// Two spaces then `- item`.
    NestedBullet,
    /// `3. item`; the number is kept verbatim, never re-sequenced.
    Numbered { number: String, separator: char },
}

impl BlockKind {
    /// Source prefix consumed by the classifier.
    fn source_prefix(&self) -> String {
        match self {
            BlockKind::Paragraph => String::new(),
            BlockKind::Bullet => BULLET_PREFIX.to_string(),
            BlockKind::NestedBullet => NESTED_BULLET_PREFIX.to_string(),
            BlockKind::Numbered { number, separator } => format!("{number}.{separator}"),
        }
    }
}

/// One rendered body line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    spans: Vec<InlineSpan>,
}

impl Block {
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn spans(&self) -> &[InlineSpan] {
        &self.spans
    }

    /// The exact source line this block was parsed from.
    pub fn source_line(&self) -> String {
        let mut line = self.kind.source_prefix();
        for span in &self.spans {
            line.push_str(&span.source_text());
        }
        line
    }

    /// Text content without markers or markup.
    pub fn visible_text(&self) -> String {
        self.spans.iter().map(InlineSpan::visible_text).collect()
    }
}

/// Render a whole card body into blocks, in source line order.
pub fn render_blocks(body: &str) -> Vec<Block> {
    body.split('\n').filter_map(parse_block_line).collect()
}

/// Classify a single line. Returns `None` for empty or whitespace-only lines.
pub fn parse_block_line(line: &str) -> Option<Block> {
    if line.trim().is_empty() {
        return None;
    }

    let (kind, rest) = if let Some(rest) = line.strip_prefix(BULLET_PREFIX) {
        (BlockKind::Bullet, rest)
    } else if let Some(rest) = line.strip_prefix(NESTED_BULLET_PREFIX) {
        (BlockKind::NestedBullet, rest)
    } else if let Some((number, separator, rest)) = split_numbered(line) {
        (
            BlockKind::Numbered {
                number: number.to_string(),
                separator,
            },
            rest,
        )
    } else {
        (BlockKind::Paragraph, line)
    };

    Some(Block {
        kind,
        spans: parse_inline(rest),
    })
}

/// Match `<digits>.<whitespace>` at the start of the line.
fn split_numbered(line: &str) -> Option<(&str, char, &str)> {
    let digits_end = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }

    let after_digits = line[digits_end..].strip_prefix('.')?;
    let separator = after_digits.chars().next().filter(|c| c.is_whitespace())?;
    Some((
        &line[..digits_end],
        separator,
        &after_digits[separator.len_utf8()..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(body: &str) -> Vec<BlockKind> {
        render_blocks(body).into_iter().map(|b| b.kind).collect()
    }

    #[test]
    fn classifies_each_line_kind() {
        let body = "Intro line\n- bullet\n  - nested\n12. twelfth";
        assert_eq!(
            kinds(body),
            vec![
                BlockKind::Paragraph,
                BlockKind::Bullet,
                BlockKind::NestedBullet,
                BlockKind::Numbered {
                    number: "12".to_string(),
                    separator: ' ',
                },
            ]
        );
    }

    #[test]
    fn bullet_text_excludes_marker() {
        let blocks = render_blocks("- **CLEAR framework:** Context");
        assert_eq!(
            blocks[0].spans(),
            &[
                InlineSpan::Bold("CLEAR framework:".to_string()),
                InlineSpan::PlainText(" Context".to_string()),
            ]
        );
    }

    #[test]
    fn nested_bullet_strips_four_char_prefix() {
        let blocks = render_blocks("  - developer agent");
        assert_eq!(blocks[0].visible_text(), "developer agent");
    }

    #[test]
    fn three_space_indent_is_paragraph() {
        assert_eq!(kinds("   - custom agents?"), vec![BlockKind::Paragraph]);
    }

    #[test]
    fn empty_and_whitespace_lines_are_skipped() {
        assert_eq!(
            kinds("first\n\n   \n\t\nsecond"),
            vec![BlockKind::Paragraph, BlockKind::Paragraph]
        );
    }

    #[test]
    fn numbers_are_not_resequenced() {
        let blocks = render_blocks("1. one\n5. five\n2. two");
        let numbers: Vec<_> = blocks
            .iter()
            .map(|b| match b.kind() {
                BlockKind::Numbered { number, .. } => number.clone(),
                other => panic!("expected numbered, got {:?}", other),
            })
            .collect();
        assert_eq!(numbers, vec!["1", "5", "2"]);
    }

    #[test]
    fn number_without_space_is_paragraph() {
        assert_eq!(kinds("2024.was a year"), vec![BlockKind::Paragraph]);
        assert_eq!(
            kinds("1. -> 5. directly"),
            vec![BlockKind::Numbered {
                number: "1".to_string(),
                separator: ' ',
            }]
        );
    }

    #[test]
    fn dash_without_space_is_paragraph() {
        assert_eq!(kinds("-not a bullet"), vec![BlockKind::Paragraph]);
    }

    #[test]
    fn source_lines_reconstruct_body_without_blank_lines() {
        let body = "Para with **bold**\n\n- item [link](rag)\n  - sub `code`\n3.\ttabbed\n   \nlast";
        let rebuilt: Vec<String> = render_blocks(body).iter().map(Block::source_line).collect();
        let expected: Vec<&str> = body.split('\n').filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(rebuilt, expected);
    }
}
