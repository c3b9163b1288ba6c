//! The document: lines plus one state byte per line.

use crate::api::PlayerContext;
use crate::expr;
use crate::session::AUTOREGISTER_HEADER;

bitflags::bitflags! {
    /// Per-line state, recomputed from the `?:` lines above each line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LineState: u8 {
        /// The governing condition is false.
        const BYPASS       = 1 << 0;
        /// The line itself is a `?:` condition.
        const EXPRESSION   = 1 << 1;
        /// Inside the auto-registered block, which is purged later.
        const AUTOREGISTER = 1 << 2;
    }
}

/// Lines and their states. Never empty.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
    states: Vec<LineState>,
}

impl LineBuffer {
    pub fn new(mut lines: Vec<String>) -> Self {
        if lines.is_empty() {
            lines.push(String::new());
        }
        let states = vec![LineState::empty(); lines.len()];
        Self { lines, states }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", String::as_str)
    }

    pub fn line_mut(&mut self, row: usize) -> &mut String {
        &mut self.lines[row]
    }

    pub fn state(&self, row: usize) -> LineState {
        self.states.get(row).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, row: usize, text: String) {
        self.lines.insert(row, text);
        self.states.insert(row, LineState::empty());
    }

    /// Remove `row`. The last remaining line is emptied instead.
    pub fn remove(&mut self, row: usize) -> String {
        if self.lines.len() == 1 {
            return std::mem::take(&mut self.lines[0]);
        }
        self.states.remove(row);
        self.lines.remove(row)
    }

    /// Replace `row` with `lines`.
    pub fn splice(&mut self, row: usize, lines: Vec<String>) {
        let count = lines.len();
        self.lines.splice(row..=row, lines);
        self.states.splice(row..=row, std::iter::repeat_n(LineState::empty(), count));
    }

    pub fn replace_all(&mut self, lines: Vec<String>) {
        *self = Self::new(lines);
    }

    /// Recompute every line state. Returns true when any state changed.
    ///
    /// A `?:` line sets the bypass state of itself and every following line up
    /// to the next `?:` line. The auto-register header marks itself and
    /// everything after it.
    pub fn refresh_states(&mut self, context: &PlayerContext) -> bool {
        let mut carried = LineState::empty();
        let mut changed = false;

        for (row, line) in self.lines.iter().enumerate() {
            if line == AUTOREGISTER_HEADER {
                carried.insert(LineState::AUTOREGISTER);
            }
            let state = match expr::condition(line) {
                Some(condition) => {
                    let value = context.eval(condition);
                    carried.set(LineState::BYPASS, expr::is_false(&value));
                    tracing::trace!(row, value = value.as_str(), "condition line");
                    carried | LineState::EXPRESSION
                }
                None => carried,
            };
            if self.states[row] != state {
                self.states[row] = state;
                changed = true;
            }
        }
        changed
    }
}
