//! Rendering of parsed card markup into ratatui lines.
//!
//! Interactive spans are numbered in reading order through
//! [`InlineSpan::interaction`], the same walk the state layer uses, so the
//! highlighted element is always the one Enter activates.

use super::styles::CardStyles;
use crate::markup::{Block, BlockKind, InlineSpan, LinkTarget};
use crate::model::CardId;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const BULLET: &str = "• ";
const NESTED_BULLET: &str = "    ◦ ";

/// A styled run tagged with the interactive element it belongs to.
type TaggedSpan = (Span<'static>, Option<usize>);

/// Cells one interactive element covers on a wrapped row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHit {
    /// Row within the wrapped body, before scrolling.
    pub row: usize,
    /// First column, relative to the body's left edge.
    pub x: u16,
    pub width: u16,
    /// Index into the body's interactive elements.
    pub element: usize,
}

/// Body lines already wrapped to a fixed width.
///
/// Rendered without ratatui's own wrapping, so [`WrappedBody::elements`]
/// matches what is drawn cell for cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedBody {
    pub lines: Vec<Line<'static>>,
    pub elements: Vec<ElementHit>,
}

/// Render blocks to lines.
///
/// `focused` is an index into the body's interactive elements; pass `None`
/// for non-interactive renders such as grid previews.
pub fn render_body(
    blocks: &[Block],
    styles: CardStyles,
    resolves: impl Fn(&CardId) -> bool,
    focused: Option<usize>,
) -> Vec<Line<'static>> {
    tagged_lines(blocks, styles, resolves, focused)
        .into_iter()
        .map(|line| Line::from(line.into_iter().map(|(span, _)| span).collect::<Vec<_>>()))
        .collect()
}

/// Render blocks and word-wrap them to `width` columns, recording where each
/// interactive element lands.
pub fn wrap_body(
    blocks: &[Block],
    styles: CardStyles,
    resolves: impl Fn(&CardId) -> bool,
    focused: Option<usize>,
    width: u16,
) -> WrappedBody {
    let width = usize::from(width.max(1));
    let mut body = WrappedBody::default();

    for line in tagged_lines(blocks, styles, resolves, focused) {
        for row in wrap_cells(&cells_of(&line), width) {
            let (spans, hits) = assemble_row(&row, body.lines.len());
            body.elements.extend(hits);
            body.lines.push(Line::from(spans));
        }
    }
    body
}

fn tagged_lines(
    blocks: &[Block],
    styles: CardStyles,
    resolves: impl Fn(&CardId) -> bool,
    focused: Option<usize>,
) -> Vec<Vec<TaggedSpan>> {
    let mut lines = Vec::with_capacity(blocks.len());
    let mut element = 0usize;

    for block in blocks {
        let (marker, continuation) = marker_for(block.kind());
        let mut current: Vec<TaggedSpan> = Vec::new();
        if !marker.is_empty() {
            current.push((Span::styled(marker.clone(), styles.list_marker()), None));
        }

        for span in block.spans() {
            if *span == InlineSpan::ParagraphBreak {
                lines.push(std::mem::take(&mut current));
                lines.push(Vec::new());
                if !continuation.is_empty() {
                    current.push((Span::raw(continuation.clone()), None));
                }
                continue;
            }

            let base = span_style(span, styles, &resolves);
            let tag = span.interaction(&resolves).map(|_| element);
            let style = if tag.is_some() && focused == Some(element) {
                base.patch(styles.focused())
            } else {
                base
            };
            if tag.is_some() {
                element += 1;
            }
            current.push((Span::styled(display_text(span), style), tag));
        }

        lines.push(current);
    }
    lines
}

/// List marker and the indent continuing lines use.
fn marker_for(kind: &BlockKind) -> (String, String) {
    match kind {
        BlockKind::Paragraph => (String::new(), String::new()),
        BlockKind::Bullet => (BULLET.to_string(), " ".repeat(BULLET.width())),
        BlockKind::NestedBullet => (NESTED_BULLET.to_string(), " ".repeat(NESTED_BULLET.width())),
        BlockKind::Numbered { number, .. } => {
            let marker = format!("{number}. ");
            let indent = " ".repeat(marker.width());
            (marker, indent)
        }
    }
}

fn span_style(span: &InlineSpan, styles: CardStyles, resolves: &impl Fn(&CardId) -> bool) -> Style {
    match span {
        InlineSpan::PlainText(_) | InlineSpan::ParagraphBreak => Style::default(),
        InlineSpan::Bold(_) => styles.bold(),
        InlineSpan::Italic(_) => styles.italic(),
        InlineSpan::Code(_) => styles.code(),
        InlineSpan::Link {
            target: LinkTarget::Card(id),
            ..
        } => {
            if resolves(id) {
                styles.card_link()
            } else {
                styles.inactive_link()
            }
        }
        InlineSpan::Link {
            target: LinkTarget::External(_),
            ..
        }
        | InlineSpan::LinkedImage { .. } => styles.external_link(),
        InlineSpan::Image { .. } => styles.image(),
    }
}

fn display_text(span: &InlineSpan) -> String {
    match span {
        InlineSpan::Image { alt, .. } => format!("[image: {alt}]"),
        InlineSpan::LinkedImage { alt, .. } => format!("[{alt}]"),
        other => other.visible_text().to_string(),
    }
}

/// Rows `lines` occupy when word-wrapped to `width` columns.
pub fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| {
            let cells: Vec<Cell> = line
                .spans
                .iter()
                .flat_map(|span| span.content.chars().map(|ch| Cell::new(ch, span.style, None)))
                .collect();
            wrap_cells(&cells, width).len()
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    style: Style,
    element: Option<usize>,
}

impl Cell {
    fn new(ch: char, style: Style, element: Option<usize>) -> Self {
        Self { ch, style, element }
    }

    fn width(self) -> usize {
        self.ch.width().unwrap_or(0)
    }
}

fn cells_of(line: &[TaggedSpan]) -> Vec<Cell> {
    line.iter()
        .flat_map(|(span, tag)| span.content.chars().map(|ch| Cell::new(ch, span.style, *tag)))
        .collect()
}

/// Greedy word wrap on single spaces.
///
/// A word that does not fit starts a new row and the space before it is
/// dropped; words wider than a row are broken across rows. Always yields at
/// least one row.
fn wrap_cells(cells: &[Cell], width: usize) -> Vec<Vec<Cell>> {
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new()];
    let mut used = 0usize;
    let mut row_start = true;

    let mut separator: Option<Cell> = None;
    let mut words: Vec<(Option<Cell>, &[Cell])> = Vec::new();
    let mut start = 0;
    for (i, cell) in cells.iter().enumerate() {
        if cell.ch == ' ' {
            words.push((separator, &cells[start..i]));
            separator = Some(*cell);
            start = i + 1;
        }
    }
    words.push((separator, &cells[start..]));

    for (separator, word) in words {
        let word_width: usize = word.iter().map(|cell| cell.width()).sum();
        let needed = if row_start { word_width } else { used + 1 + word_width };
        let current = rows.len() - 1;

        if needed <= width {
            if let (false, Some(space)) = (row_start, separator) {
                rows[current].push(space);
            }
            rows[current].extend_from_slice(word);
            used = needed;
            row_start = false;
            continue;
        }

        if !row_start {
            rows.push(Vec::new());
            used = 0;
        }
        for cell in word {
            if used + cell.width() > width && used > 0 {
                rows.push(Vec::new());
                used = 0;
            }
            if let Some(row) = rows.last_mut() {
                row.push(*cell);
            }
            used += cell.width();
        }
        row_start = false;
    }
    rows
}

/// Group a wrapped row back into spans and collect element hits.
fn assemble_row(row: &[Cell], row_index: usize) -> (Vec<Span<'static>>, Vec<ElementHit>) {
    let mut spans = Vec::new();
    let mut hits: Vec<ElementHit> = Vec::new();
    let mut x = 0usize;
    let mut i = 0;

    while i < row.len() {
        let (style, element) = (row[i].style, row[i].element);
        let run_end = row[i..]
            .iter()
            .position(|cell| cell.style != style || cell.element != element)
            .map_or(row.len(), |offset| i + offset);
        let run = &row[i..run_end];
        let text: String = run.iter().map(|cell| cell.ch).collect();
        let run_width: usize = run.iter().map(|cell| cell.width()).sum();

        if let Some(element) = element {
            let to_u16 = |value: usize| u16::try_from(value).unwrap_or(u16::MAX);
            match hits.last_mut() {
                Some(last) if last.element == element && usize::from(last.x + last.width) == x => {
                    last.width = last.width.saturating_add(to_u16(run_width));
                }
                _ => hits.push(ElementHit {
                    row: row_index,
                    x: to_u16(x),
                    width: to_u16(run_width),
                    element,
                }),
            }
        }

        spans.push(Span::styled(text, style));
        x += run_width;
        i = run_end;
    }
    (spans, hits)
}
