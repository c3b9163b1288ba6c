//! Forward/backward search over the buffer.
//!
//! Both modes prefer an active line. A match on a bypassed line is remembered
//! and used only when no active line matches further along.

use super::buffer::{LineBuffer, LineState};
use super::text;
use crate::Rule;
use crate::item::ItemSnapshot;

/// Where a search landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// An active line matched and no bypassed match came before it.
    Found { row: usize, col: usize },
    /// An active line matched after at least one bypassed match was passed.
    FoundAfterSkippingInactive { row: usize, col: usize },
    /// Only bypassed lines matched; this is the first of them.
    FoundOnlyInactive { row: usize, col: usize },
    NotFound,
}

impl SearchOutcome {
    pub fn position(self) -> Option<(usize, usize)> {
        match self {
            SearchOutcome::Found { row, col }
            | SearchOutcome::FoundAfterSkippingInactive { row, col }
            | SearchOutcome::FoundOnlyInactive { row, col } => Some((row, col)),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Next line, after or before `from`, whose rule matches `item`. Column is 0.
pub fn search_item(buffer: &LineBuffer, from: usize, forward: bool, item: &ItemSnapshot) -> SearchOutcome {
    let name = item.match_name();
    scan(buffer, from, forward, |line, _| {
        let rule = Rule::parse(line, false)?;
        rule.matches(item, &name).then_some(0)
    })
}

/// Next line, after or before `from`, containing `needle`. Condition lines are skipped.
pub fn search_text(buffer: &LineBuffer, from: usize, forward: bool, needle: &str) -> SearchOutcome {
    scan(buffer, from, forward, |line, state| {
        if state.contains(LineState::EXPRESSION) {
            return None;
        }
        line.find(needle).map(|byte| text::col_at(line, byte))
    })
}

fn scan(
    buffer: &LineBuffer,
    from: usize,
    forward: bool,
    hit: impl Fn(&str, LineState) -> Option<usize>,
) -> SearchOutcome {
    let len = buffer.len();
    let step = |row: usize| if forward { Some(row + 1).filter(|&next| next < len) } else { row.checked_sub(1) };

    let mut bypassed: Option<(usize, usize)> = None;
    let mut row = from;
    while let Some(next) = step(row) {
        row = next;
        let state = buffer.state(row);
        let Some(col) = hit(buffer.line(row), state) else {
            continue;
        };
        if !state.contains(LineState::BYPASS) {
            return match bypassed {
                Some(_) => SearchOutcome::FoundAfterSkippingInactive { row, col },
                None => SearchOutcome::Found { row, col },
            };
        }
        bypassed.get_or_insert((row, col));
    }

    match bypassed {
        Some((row, col)) => SearchOutcome::FoundOnlyInactive { row, col },
        None => SearchOutcome::NotFound,
    }
}
