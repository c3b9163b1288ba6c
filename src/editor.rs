//! Line editor for rule files.
//!
//! The editor owns the document, the cursor and mark, the yank ring and the
//! search state. A front-end turns key presses into [`Command`]s, hands them to
//! [`Editor::apply`], and after each one reads back what to redraw
//! ([`Editor::take_dirty`]) and what to tell the player
//! ([`Editor::take_status`]).
//!
//! ```text
//!  key ──▶ Command ──▶ Editor::apply ──┬──▶ LineBuffer (lines + states)
//!                      (dispatch.rs)   ├──▶ YankRing
//!                                      ├──▶ search (rule match / substring)
//!                                      └──▶ Dirty + Status for the renderer
//! ```
//!
//! Line states are recomputed after every edit: a `?:` line switches the
//! lines below it on or off, and bypassed lines are skipped by searches unless
//! nothing else matches.

#[path = "editor/buffer.rs"]
mod buffer;
#[path = "editor/command.rs"]
mod command;
#[path = "editor/dispatch.rs"]
mod dispatch;
#[path = "editor/search.rs"]
mod search;
#[path = "editor/text.rs"]
mod text;
#[path = "editor/yank.rs"]
mod yank;

pub use buffer::LineState;
pub use command::{Command, Motion};
pub use search::SearchOutcome;
pub use yank::YankRing;

use crate::api::{Options, PlayerContext};
use crate::item::ItemSnapshot;
use crate::session::AUTOREGISTER_HEADER;
use buffer::LineBuffer;

/// What the renderer has to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dirty {
    #[default]
    Nothing,
    Line(usize),
    Everything,
}

impl Dirty {
    fn merge(self, other: Dirty) -> Dirty {
        match (self, other) {
            (Dirty::Nothing, d) | (d, Dirty::Nothing) => d,
            (Dirty::Line(a), Dirty::Line(b)) if a == b => Dirty::Line(a),
            _ => Dirty::Everything,
        }
    }
}

/// Messages for the player, produced by the last command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotFound,
    NoSearchTarget,
    /// Found, after passing matches in bypassed lines.
    SkippedInactive,
    /// Only a bypassed line matched; the cursor is on it.
    FoundOnlyInactive,
    NothingDestroyed,
    /// The buffer or the line is full.
    CapacityReached,
}

/// What the front-end should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit { save: bool },
    ShowHelp,
}

pub struct Editor {
    buffer: LineBuffer,
    cx: usize,
    cy: usize,
    /// Anchor of the selection: (row, col).
    mark: Option<(usize, usize)>,
    /// First visible row.
    upper: usize,
    yank: YankRing,
    dirty: Dirty,
    status: Option<Status>,
    changed: bool,
    /// Text as last loaded or saved, for revert.
    saved: Vec<String>,
    last_was_kill: bool,
    search_str: Option<String>,
    search_item: Option<ItemSnapshot>,
    last_destroyed: Option<ItemSnapshot>,
    context: PlayerContext,
    options: Options,
}

impl Editor {
    pub fn new(lines: Vec<String>, mut context: PlayerContext, options: Options) -> Self {
        context.autoregister |= lines.iter().any(|line| line == AUTOREGISTER_HEADER);
        let mut editor = Self {
            buffer: LineBuffer::new(lines.clone()),
            cx: 0,
            cy: 0,
            mark: None,
            upper: 0,
            yank: YankRing::default(),
            dirty: Dirty::Everything,
            status: None,
            changed: false,
            saved: lines,
            last_was_kill: false,
            search_str: None,
            search_item: None,
            last_destroyed: None,
            context,
            options,
        };
        editor.buffer.refresh_states(&editor.context);
        editor
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    pub fn line(&self, row: usize) -> &str {
        self.buffer.line(row)
    }

    pub fn line_state(&self, row: usize) -> LineState {
        self.buffer.state(row)
    }

    /// Cursor as (row, col), with the column clamped to the line.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cy, self.col())
    }

    pub fn mark(&self) -> Option<(usize, usize)> {
        self.mark
    }

    /// First visible row and number of visible rows.
    pub fn viewport(&self) -> (usize, usize) {
        (self.upper, self.options.page_rows)
    }

    pub fn yank(&self) -> &YankRing {
        &self.yank
    }

    /// True when the text differs from what was last loaded or saved.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Record that the current text has been written out.
    pub fn mark_saved(&mut self) {
        self.saved = self.buffer.lines().to_vec();
        self.changed = false;
    }

    pub fn set_last_destroyed(&mut self, item: ItemSnapshot) {
        self.last_destroyed = Some(item);
    }

    /// Redraw hint accumulated since the last call.
    pub fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }

    /// Message from the last command, if any.
    pub fn take_status(&mut self) -> Option<Status> {
        self.status.take()
    }

    // --- Internal helpers ---

    fn col(&self) -> usize {
        self.cx.min(text::len(self.buffer.line(self.cy)))
    }

    fn touch(&mut self, dirty: Dirty) {
        self.dirty = self.dirty.merge(dirty);
    }

    /// Marked rows, or just the cursor row.
    fn block_rows(&self) -> (usize, usize) {
        match self.mark {
            Some((my, _)) => (my.min(self.cy), my.max(self.cy)),
            None => (self.cy, self.cy),
        }
    }
}
