//! The editor's command catalogue.
//!
//! [`Command`] is what a front-end sends. Most commands map to one method on
//! the editor. Commands that are defined in terms of others (delete-char is
//! "step forward, then backspace") are written as [`Plan`]s: small trees of
//! primitive [`Step`]s joined by sequencing combinators, run by the dispatcher
//! without re-entering it.

use crate::flags::Flag;
use crate::item::ItemSnapshot;
use crate::Action;

/// Cursor motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

impl Motion {
    /// Vertical motions keep the remembered column even past a short line.
    pub fn is_vertical(self) -> bool {
        matches!(self, Motion::Up | Motion::Down | Motion::PageUp | Motion::PageDown)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    QuitDiscard,
    QuitSave,
    /// Throw away every change since the text was loaded or last saved.
    Revert,
    Help,
    Move(Motion),
    Cut,
    Copy,
    Paste,
    /// Set the mark at the cursor, or clear it.
    ToggleMark,
    /// Kill to end of line; at end of line, kill the line break. Repeated
    /// kills accumulate in the yank ring.
    KillLine,
    DeleteChar,
    Backspace,
    /// Split the line at the cursor.
    Return,
    Insert(char),
    /// Set the search string and search forward.
    SearchString(String),
    SearchForward,
    SearchBackward,
    /// Set the search item and search forward.
    SearchItem(ItemSnapshot),
    SearchDestroyed,
    /// Insert the rule for an item above the cursor line.
    InsertItem(ItemSnapshot),
    /// Insert a destroy rule for the last destroyed item above the cursor line.
    InsertDestroyed,
    /// Insert a `?:` block for the current race, class and level.
    InsertConditional,
    InsertMacro { trigger: String, action: String },
    InsertKeymap { mode: u8, key: String, action: String },
    /// Switch the current rule to a policy, or toggle `DISPLAY`. Switching to
    /// the policy it already has returns it to pick-up.
    ToggleAction(Action),
    ToggleKeyword(Flag),
}

/// Primitive edits used by composite commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    /// Move right one column, wrapping to the next line. Fails at the very end.
    StepForward,
    /// Delete before the cursor, joining with the previous line at column 0.
    Backspace,
    /// Kill from the cursor to end of line. Fails when already at the end.
    KillToLineEnd,
    /// Record a line break in the yank ring.
    YankLineBreak,
}

/// A composite command.
#[derive(Debug)]
pub(super) enum Plan {
    Do(Step),
    /// Run the second plan only if the first applied. If the second does not
    /// apply, the cursor goes back to where it was.
    Then(&'static Plan, &'static Plan),
    /// Run the second plan only if the first did not apply.
    OrElse(&'static Plan, &'static Plan),
}

pub(super) static BACKSPACE: Plan = Plan::Do(Step::Backspace);

pub(super) static DELETE_CHAR: Plan = Plan::Then(&Plan::Do(Step::StepForward), &BACKSPACE);

pub(super) static KILL_LINE: Plan =
    Plan::OrElse(&Plan::Do(Step::KillToLineEnd), &Plan::Then(&DELETE_CHAR, &Plan::Do(Step::YankLineBreak)));

impl Command {
    /// The plan for a composite command.
    pub(super) fn plan(&self) -> Option<&'static Plan> {
        match self {
            Command::Backspace => Some(&BACKSPACE),
            Command::DeleteChar => Some(&DELETE_CHAR),
            Command::KillLine => Some(&KILL_LINE),
            _ => None,
        }
    }

    /// Commands that edit text; these drop the mark before running.
    pub(super) fn clears_mark(&self) -> bool {
        matches!(
            self,
            Command::Paste
                | Command::KillLine
                | Command::DeleteChar
                | Command::Backspace
                | Command::Return
                | Command::Insert(_)
                | Command::InsertItem(_)
                | Command::InsertDestroyed
                | Command::InsertConditional
                | Command::InsertMacro { .. }
                | Command::InsertKeymap { .. }
        )
    }
}
