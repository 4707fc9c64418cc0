//! Column distribution for the card grid.
//!
//! The grid shows 1-4 columns depending on viewport width. Cards are assigned
//! to columns by one of two policies:
//!
//! - [`ColumnPolicy::RoundRobin`]: card `i` goes to column `i % k`. Columns
//!   differ in length by at most one and reading them row by row gives deck
//!   order back. This is the default.
//! - [`ColumnPolicy::ShortestFirst`]: each card goes to the column with the
//!   smallest accumulated weight (body length plus a fixed overhead), leftmost
//!   on ties. Columns come out closer in rendered height, at the cost of the
//!   row-by-row reading order.
//!
//! Both are recomputed from scratch on every column-count change.

use crate::model::Card;
use std::str::FromStr;

/// Viewport width breakpoints in pixels: below `limit` use `columns`.
const BREAKPOINTS_PX: [(u32, usize); 3] = [(768, 1), (1024, 2), (1536, 3)];

/// Columns used above the last breakpoint.
pub const MAX_COLUMNS: usize = 4;

/// Weight added per card under shortest-first packing (title, badge, borders).
const CARD_WEIGHT_OVERHEAD: usize = 80;

/// Number of grid columns, always in `1..=MAX_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnCount(usize);

impl ColumnCount {
    /// Validated constructor.
    pub fn new(columns: usize) -> Option<Self> {
        (1..=MAX_COLUMNS).contains(&columns).then_some(Self(columns))
    }

    /// Responsive column count for a viewport width in pixels.
    pub fn for_viewport_width(width_px: u32) -> Self {
        let columns = BREAKPOINTS_PX
            .iter()
            .find(|(limit, _)| width_px < *limit)
            .map_or(MAX_COLUMNS, |(_, columns)| *columns);
        Self(columns)
    }

    /// Responsive column count for a terminal `cells` wide, each cell
    /// `cell_width_px` pixels.
    pub fn for_terminal_width(cells: u16, cell_width_px: u16) -> Self {
        Self::for_viewport_width(u32::from(cells) * u32::from(cell_width_px))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Policy for assigning cards to columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnPolicy {
    #[default]
    RoundRobin,
    ShortestFirst,
}

impl ColumnPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnPolicy::RoundRobin => "round-robin",
            ColumnPolicy::ShortestFirst => "shortest-first",
        }
    }
}

/// Error for an unrecognised policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown column policy '{0}' (expected 'round-robin' or 'shortest-first')")]
pub struct UnknownColumnPolicy(pub String);

impl FromStr for ColumnPolicy {
    type Err = UnknownColumnPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round-robin" => Ok(ColumnPolicy::RoundRobin),
            "shortest-first" => Ok(ColumnPolicy::ShortestFirst),
            other => Err(UnknownColumnPolicy(other.to_string())),
        }
    }
}

/// Direction of a selection move inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMove {
    Up,
    Down,
    Left,
    Right,
}

/// Deck indices per column, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAssignment {
    columns: Vec<Vec<usize>>,
}

impl ColumnAssignment {
    /// Assign `cards` to `count` columns under `policy`.
    pub fn distribute(cards: &[Card], count: ColumnCount, policy: ColumnPolicy) -> Self {
        let columns = match policy {
            ColumnPolicy::RoundRobin => round_robin(cards.len(), count.get()),
            ColumnPolicy::ShortestFirst => {
                let weights: Vec<usize> = cards
                    .iter()
                    .map(|card| card.body().chars().count() + CARD_WEIGHT_OVERHEAD)
                    .collect();
                shortest_first(&weights, count.get())
            }
        };
        Self { columns }
    }

    pub fn columns(&self) -> &[Vec<usize>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Longest column length.
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// `(column, row)` of a deck index.
    pub fn locate(&self, index: usize) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(column, items)| {
            items
                .iter()
                .position(|&item| item == index)
                .map(|row| (column, row))
        })
    }

    /// Deck index at `(column, row)`.
    pub fn at(&self, column: usize, row: usize) -> Option<usize> {
        self.columns.get(column)?.get(row).copied()
    }

    /// Deck index reached by moving from `index`; stays put at the edges.
    pub fn neighbor(&self, index: usize, direction: GridMove) -> usize {
        let Some((column, row)) = self.locate(index) else {
            return index;
        };

        let target = match direction {
            GridMove::Up => row.checked_sub(1).and_then(|r| self.at(column, r)),
            GridMove::Down => self.at(column, row + 1),
            GridMove::Left => column
                .checked_sub(1)
                .and_then(|c| self.clamped_at(c, row)),
            GridMove::Right => self.clamped_at(column + 1, row),
        };
        target.unwrap_or(index)
    }

    fn clamped_at(&self, column: usize, row: usize) -> Option<usize> {
        let items = self.columns.get(column)?;
        let last = items.len().checked_sub(1)?;
        items.get(row.min(last)).copied()
    }
}

/// Indices `0..n` dealt into `k` columns: item `i` goes to column `i % k`.
pub fn round_robin(n: usize, k: usize) -> Vec<Vec<usize>> {
    let k = k.max(1);
    let mut columns = vec![Vec::with_capacity(n.div_ceil(k)); k];
    for index in 0..n {
        columns[index % k].push(index);
    }
    columns
}

/// Greedy shortest-column packing: each item goes to the column with the
/// smallest total weight so far, leftmost on ties.
pub fn shortest_first(weights: &[usize], k: usize) -> Vec<Vec<usize>> {
    let k = k.max(1);
    let mut columns = vec![Vec::new(); k];
    let mut totals = vec![0usize; k];

    for (index, &weight) in weights.iter().enumerate() {
        let mut lightest = 0;
        for column in 1..k {
            if totals[column] < totals[lightest] {
                lightest = column;
            }
        }
        columns[lightest].push(index);
        totals[lightest] += weight;
    }
    columns
}
