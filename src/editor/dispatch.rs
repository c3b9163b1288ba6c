//! Command dispatch.

use super::command::{Command, Motion, Plan, Step};
use super::search::{self, SearchOutcome};
use super::text;
use super::{Dirty, Editor, Outcome, Status};
use crate::flags::Flag;
use crate::item::ItemSnapshot;
use crate::{Action, Rule};

/// The text a cut or copy works on.
enum Region {
    /// Whole rows, inclusive.
    Rows(usize, usize),
    /// Columns `from..to` of one row.
    Span { row: usize, from: usize, to: usize },
}

impl Editor {
    /// Run one command.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let killing = command == Command::KillLine;
        if killing && !self.last_was_kill {
            self.yank.clear();
        }
        self.last_was_kill = killing;

        if !matches!(command, Command::Move(motion) if motion.is_vertical()) {
            self.cx = self.col();
        }
        if command.clears_mark() && self.mark.take().is_some() {
            self.touch(Dirty::Everything);
        }

        let before = (self.cy, self.cx, self.upper);
        let outcome = self.dispatch(command);
        self.scroll_to_cursor();

        let (cy, cx, upper) = before;
        if upper != self.upper || (self.mark.is_some() && (cy, cx) != (self.cy, self.cx)) {
            self.touch(Dirty::Everything);
        }
        outcome
    }

    fn dispatch(&mut self, command: Command) -> Outcome {
        if let Some(plan) = command.plan() {
            self.run(plan);
            return Outcome::Continue;
        }

        match command {
            Command::QuitDiscard => return Outcome::Quit { save: false },
            Command::QuitSave => return Outcome::Quit { save: true },
            Command::Help => return Outcome::ShowHelp,
            Command::Revert => self.revert(),
            Command::Move(motion) => self.motion(motion),
            Command::Cut => self.cut(),
            Command::Copy => {
                let region = self.take_region();
                self.copy(&region);
            }
            Command::Paste => self.paste(),
            Command::ToggleMark => match self.mark.take() {
                Some(_) => self.touch(Dirty::Everything),
                None => {
                    self.mark = Some((self.cy, self.cx));
                    self.touch(Dirty::Line(self.cy));
                }
            },
            Command::Return => self.split_line(),
            Command::Insert(ch) => self.insert_char(ch),
            Command::SearchString(needle) => {
                self.search_str = (!needle.is_empty()).then_some(needle);
                self.search_item = None;
                self.search(true);
            }
            Command::SearchForward => self.search(true),
            Command::SearchBackward => self.search(false),
            Command::SearchItem(item) => {
                self.search_item = Some(item);
                self.search_str = None;
                self.search(true);
            }
            Command::SearchDestroyed => {
                if let Some(item) = self.destroyed() {
                    self.search_item = Some(item);
                    self.search_str = None;
                    self.search(true);
                }
            }
            Command::InsertItem(item) => {
                let rule = Rule::from_item(&item, &item.match_name());
                self.insert_lines(vec![rule.to_line()], (0, 0));
            }
            Command::InsertDestroyed => {
                if let Some(item) = self.destroyed() {
                    let mut rule = Rule::from_item(&item, &item.match_name());
                    rule.action.set_policy(Action::DESTROY);
                    self.insert_lines(vec![rule.to_line()], (0, 0));
                }
            }
            Command::InsertConditional => {
                let condition = format!(
                    "?:[AND [EQU $RACE {}] [EQU $CLASS {}] [GEQ $LEVEL {:02}]]",
                    self.context.race, self.context.class, self.context.level
                );
                self.insert_lines(vec![condition, "?:1".to_string()], (1, 0));
            }
            Command::InsertMacro { trigger, action } => {
                self.insert_lines(vec![format!("P:{trigger}"), format!("A:{action}")], (1, 2));
            }
            Command::InsertKeymap { mode, key, action } => {
                self.insert_lines(vec![format!("C:{mode}:{key}"), format!("A:{action}")], (1, 2));
            }
            Command::ToggleAction(action) => self.toggle_action(action),
            Command::ToggleKeyword(flag) => self.toggle_keyword(flag),
            Command::KillLine | Command::DeleteChar | Command::Backspace => {}
        }
        Outcome::Continue
    }

    fn run(&mut self, plan: &Plan) -> bool {
        match plan {
            Plan::Do(step) => self.step(*step),
            Plan::Then(first, second) => {
                let cursor = (self.cy, self.cx);
                if !self.run(first) {
                    return false;
                }
                let applied = self.run(second);
                if !applied {
                    (self.cy, self.cx) = cursor;
                }
                applied
            }
            Plan::OrElse(first, second) => self.run(first) || self.run(second),
        }
    }

    fn step(&mut self, step: Step) -> bool {
        let len = text::len(self.buffer.line(self.cy));
        match step {
            Step::StepForward => {
                if self.cx < len {
                    self.cx += 1;
                } else if self.cy < self.buffer.last_row() {
                    self.cy += 1;
                    self.cx = 0;
                } else {
                    return false;
                }
                true
            }
            Step::Backspace => self.backspace(),
            Step::KillToLineEnd => {
                if self.cx >= len {
                    return false;
                }
                let line = self.buffer.line_mut(self.cy);
                let tail = text::split_at(line, self.cx).1.to_string();
                text::remove(line, self.cx, len);
                self.yank.push_text(tail);
                self.edited(Dirty::Line(self.cy));
                true
            }
            Step::YankLineBreak => {
                self.yank.push_line_break();
                true
            }
        }
    }

    // --- Editing ---

    /// Mark the text changed and recompute line states.
    fn edited(&mut self, dirty: Dirty) {
        self.changed = true;
        self.touch(dirty);
        if self.buffer.refresh_states(&self.context) {
            self.touch(Dirty::Everything);
        }
    }

    fn refuse(&mut self) {
        tracing::debug!(row = self.cy, lines = self.buffer.len(), "edit refused, capacity reached");
        self.status = Some(Status::CapacityReached);
    }

    fn backspace(&mut self) -> bool {
        if self.cx > 0 {
            text::remove(self.buffer.line_mut(self.cy), self.cx - 1, self.cx);
            self.cx -= 1;
            self.edited(Dirty::Line(self.cy));
            return true;
        }
        if self.cy == 0 {
            return false;
        }

        let prev_len = text::len(self.buffer.line(self.cy - 1));
        if prev_len + text::len(self.buffer.line(self.cy)) > self.options.max_line_len {
            self.refuse();
            return false;
        }
        let line = self.buffer.remove(self.cy);
        self.cy -= 1;
        self.cx = prev_len;
        self.buffer.line_mut(self.cy).push_str(&line);
        self.edited(Dirty::Everything);
        true
    }

    fn insert_char(&mut self, ch: char) {
        let line = self.buffer.line_mut(self.cy);
        if text::len(line) >= self.options.max_line_len {
            self.refuse();
            return;
        }
        text::insert(line, self.cx, ch);
        self.cx += 1;
        self.edited(Dirty::Line(self.cy));
    }

    fn split_line(&mut self) {
        if self.buffer.len() >= self.options.max_lines {
            self.refuse();
            return;
        }
        let line = self.buffer.line_mut(self.cy);
        let tail = line.split_off(text::byte_at(line, self.cx));
        self.cy += 1;
        self.cx = 0;
        self.buffer.insert(self.cy, tail);
        self.edited(Dirty::Everything);
    }

    /// Insert `lines` above the cursor row and put the cursor at `cursor`,
    /// relative to the first inserted line.
    fn insert_lines(&mut self, lines: Vec<String>, cursor: (usize, usize)) {
        if self.buffer.len() + lines.len() > self.options.max_lines {
            self.refuse();
            return;
        }
        for (offset, line) in lines.into_iter().enumerate() {
            self.buffer.insert(self.cy + offset, line);
        }
        self.cy += cursor.0;
        self.cx = cursor.1;
        self.edited(Dirty::Everything);
    }

    fn revert(&mut self) {
        self.buffer.replace_all(self.saved.clone());
        self.buffer.refresh_states(&self.context);
        self.cx = 0;
        self.cy = 0;
        self.upper = 0;
        self.mark = None;
        self.changed = false;
        self.touch(Dirty::Everything);
    }

    // --- Cut, copy, paste ---

    /// The marked region, or the cursor row when nothing is marked. Clears the mark.
    fn take_region(&mut self) -> Region {
        let len = text::len(self.buffer.line(self.cy));
        match self.mark.take() {
            None => {
                self.cx = 0;
                Region::Rows(self.cy, self.cy)
            }
            Some((my, _)) if my != self.cy => Region::Rows(my.min(self.cy), my.max(self.cy)),
            Some((_, mx)) => {
                let from = mx.min(self.cx);
                let to = mx.max(self.cx).min(len);
                if from == 0 && to == len {
                    Region::Rows(self.cy, self.cy)
                } else {
                    Region::Span { row: self.cy, from, to }
                }
            }
        }
    }

    fn copy(&mut self, region: &Region) {
        match *region {
            Region::Rows(first, last) => {
                let lines = self.buffer.lines()[first..=last].to_vec();
                self.yank.set_lines(lines);
            }
            Region::Span { row, from, to } => {
                let span = text::slice(self.buffer.line(row), from, to).to_string();
                self.yank.set_span(span);
            }
        }
        self.touch(Dirty::Everything);
    }

    fn cut(&mut self) {
        let region = self.take_region();
        self.copy(&region);
        match region {
            Region::Rows(first, last) => {
                for row in (first..=last).rev() {
                    if row == self.buffer.last_row() {
                        self.buffer.line_mut(row).clear();
                    } else {
                        self.buffer.remove(row);
                    }
                }
                self.cy = first;
                self.cx = 0;
            }
            Region::Span { row, from, to } => {
                text::remove(self.buffer.line_mut(row), from, to);
                self.cx = from;
            }
        }
        self.edited(Dirty::Everything);
    }

    fn paste(&mut self) {
        if self.yank.is_empty() {
            return;
        }
        let segments = self.yank.segments();
        let eol = self.yank.ends_with_newline();
        let breaks = segments.len() - 1 + usize::from(eol);
        if self.buffer.len() + breaks > self.options.max_lines {
            self.refuse();
            return;
        }

        let (head, rest) = text::split_at(self.buffer.line(self.cy), self.cx);
        let rest = rest.to_string();
        let mut current = head.to_string();
        let mut pieces = Vec::with_capacity(breaks + 1);
        for (index, segment) in segments.iter().enumerate() {
            current.push_str(segment);
            if index + 1 < segments.len() || eol {
                pieces.push(std::mem::take(&mut current));
            }
        }

        let row = self.cy + pieces.len();
        let col = text::len(&current);
        current.push_str(&rest);
        pieces.push(current);

        self.buffer.splice(self.cy, pieces);
        self.cy = row;
        self.cx = col;
        self.edited(Dirty::Everything);
    }

    // --- Motion ---

    fn motion(&mut self, motion: Motion) {
        let len = text::len(self.buffer.line(self.cy));
        let last = self.buffer.last_row();
        let page = self.options.page_rows.max(1);
        match motion {
            Motion::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = text::len(self.buffer.line(self.cy));
                }
            }
            Motion::Right => {
                if self.cx < len {
                    self.cx += 1;
                } else if self.next_row_or_append() {
                    self.cy += 1;
                    self.cx = 0;
                }
            }
            Motion::Up => self.cy = self.cy.saturating_sub(1),
            Motion::Down => {
                if self.next_row_or_append() {
                    self.cy += 1;
                }
            }
            Motion::LineStart => self.cx = 0,
            Motion::LineEnd => self.cx = len,
            Motion::PageUp => {
                self.cy = self.cy.saturating_sub(page);
                self.upper = self.upper.saturating_sub(page);
            }
            Motion::PageDown => {
                self.cy = (self.cy + page).min(last);
                self.upper = (self.upper + page).min(last);
            }
            Motion::Top => (self.cy, self.cx) = (0, 0),
            Motion::Bottom => (self.cy, self.cx) = (last, 0),
        }
    }

    /// True when a row exists below the cursor, appending an empty one if the
    /// cursor is on a non-empty last line and there is room.
    fn next_row_or_append(&mut self) -> bool {
        if self.cy < self.buffer.last_row() {
            return true;
        }
        if self.buffer.line(self.cy).is_empty() || self.buffer.len() >= self.options.max_lines {
            return false;
        }
        self.buffer.insert(self.buffer.len(), String::new());
        self.buffer.refresh_states(&self.context);
        self.touch(Dirty::Everything);
        true
    }

    fn scroll_to_cursor(&mut self) {
        let height = self.options.page_rows.max(1);
        if self.cy < self.upper {
            self.upper = self.cy;
        } else if self.cy >= self.upper + height {
            self.upper = self.cy + 1 - height;
        }
    }

    // --- Search ---

    fn destroyed(&mut self) -> Option<ItemSnapshot> {
        if self.last_destroyed.is_none() {
            self.status = Some(Status::NothingDestroyed);
        }
        self.last_destroyed.clone()
    }

    fn search(&mut self, forward: bool) {
        let outcome = if let Some(item) = &self.search_item {
            search::search_item(&self.buffer, self.cy, forward, item)
        } else if let Some(needle) = &self.search_str {
            search::search_text(&self.buffer, self.cy, forward, needle)
        } else {
            self.status = Some(Status::NoSearchTarget);
            return;
        };
        tracing::debug!(?outcome, forward, "search");

        self.status = match outcome {
            SearchOutcome::Found { .. } => None,
            SearchOutcome::FoundAfterSkippingInactive { .. } => Some(Status::SkippedInactive),
            SearchOutcome::FoundOnlyInactive { .. } => Some(Status::FoundOnlyInactive),
            SearchOutcome::NotFound => Some(Status::NotFound),
        };
        if let Some((row, col)) = outcome.position() {
            self.cy = row;
            self.cx = col;
        }
    }

    // --- Rule toggles ---

    fn toggle_action(&mut self, action: Action) {
        if action != Action::DISPLAY && (action.contains(Action::DISPLAY) || !action.has_single_policy()) {
            tracing::debug!(?action, "toggle needs one policy bit or display alone");
            return;
        }
        let line = self.buffer.line(self.cy);
        let Some(mut rule) = Rule::parse(line, false) else {
            return;
        };
        let old_len = text::len(line);

        if action == Action::DISPLAY {
            rule.action.toggle(Action::DISPLAY);
        } else if rule.action.policy() == action.policy() {
            rule.action.set_policy(Action::PICKUP);
        } else {
            rule.action.set_policy(action);
        }

        let new_line = rule.to_line();
        let new_len = text::len(&new_line);
        self.cx = (self.cx + new_len).saturating_sub(old_len);
        *self.buffer.line_mut(self.cy) = new_line;
        self.edited(Dirty::Line(self.cy));
    }

    fn toggle_keyword(&mut self, flag: Flag) {
        let (first, last) = self.block_rows();
        // Decided by the first row that parses.
        let mut adding: Option<bool> = None;

        for row in first..=last {
            let Some(mut rule) = Rule::parse(self.buffer.line(row), adding.is_none()) else {
                continue;
            };
            let add = *adding.get_or_insert(!rule.flags.contains(flag));
            if let Some(group) = flag.group() {
                rule.flags.clear_group(group);
            }
            if add {
                rule.flags.insert(flag);
            } else {
                rule.flags.remove(flag);
            }
            *self.buffer.line_mut(row) = rule.to_line();
        }

        if adding.is_some() {
            self.edited(Dirty::Everything);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Options, PlayerContext};
    use crate::editor::LineState;
    use crate::item::ItemKind;

    fn editor(lines: &[&str]) -> Editor {
        let lines = lines.iter().map(|l| l.to_string()).collect();
        let mut editor = Editor::new(lines, PlayerContext::default(), Options::default());
        editor.take_dirty();
        editor
    }

    fn run(editor: &mut Editor, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            editor.apply(command);
        }
    }

    fn down(n: usize) -> Vec<Command> {
        vec![Command::Move(Motion::Down); n]
    }

    #[test]
    fn cut_rows_and_paste_back() {
        let lines = ["l1", "l2", "l3", "l4", "l5"];
        let mut ed = editor(&lines);
        run(&mut ed, down(1));
        run(&mut ed, [Command::ToggleMark]);
        run(&mut ed, down(2));
        run(&mut ed, [Command::Cut]);
        assert_eq!(ed.lines(), ["l1", "l5"]);
        assert_eq!(ed.yank().segments(), ["l2", "l3", "l4"]);
        assert!(ed.yank().ends_with_newline());
        assert_eq!(ed.cursor(), (1, 0));

        run(&mut ed, [Command::Paste]);
        assert_eq!(ed.lines(), lines);
        assert_eq!(ed.cursor(), (4, 0));

        run(&mut ed, [Command::Move(Motion::Top), Command::Move(Motion::Down), Command::Paste]);
        assert_eq!(ed.lines(), ["l1", "l2", "l3", "l4", "l2", "l3", "l4", "l5"]);
    }

    #[test]
    fn copy_without_mark_takes_the_line() {
        let mut ed = editor(&["rings", "boots"]);
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::Copy]);
        assert_eq!(ed.cursor(), (0, 0));
        assert_eq!(ed.yank().segments(), ["rings"]);
        run(&mut ed, [Command::Move(Motion::Down), Command::Paste]);
        assert_eq!(ed.lines(), ["rings", "rings", "boots"]);
        assert!(ed.is_changed());
    }

    #[test]
    fn span_copy_and_paste_inside_a_line() {
        let mut ed = editor(&["good rings", "x"]);
        run(&mut ed, [Command::ToggleMark]);
        run(&mut ed, vec![Command::Move(Motion::Right); 5]);
        run(&mut ed, [Command::Copy]);
        assert_eq!(ed.yank().segments(), ["good "]);
        assert!(!ed.yank().ends_with_newline());
        run(&mut ed, [Command::Move(Motion::Down), Command::Move(Motion::LineStart), Command::Paste]);
        assert_eq!(ed.line(1), "good x");
        assert_eq!(ed.cursor(), (1, 5));
    }

    #[test]
    fn cutting_the_last_line_leaves_it_empty() {
        let mut ed = editor(&["a", "b"]);
        run(&mut ed, [Command::Move(Motion::Bottom), Command::Cut]);
        assert_eq!(ed.lines(), ["a", ""]);
    }

    #[test]
    fn kill_line_accumulates() {
        let mut ed = editor(&["abc def", "ghi", "jkl"]);
        run(&mut ed, vec![Command::Move(Motion::Right); 4]);
        run(&mut ed, [Command::KillLine, Command::KillLine, Command::KillLine]);
        assert_eq!(ed.lines(), ["abc ", "jkl"]);
        assert_eq!(ed.yank().segments(), ["def", "ghi"]);
        assert!(!ed.yank().ends_with_newline());

        // Any other command ends the accumulation.
        run(&mut ed, [Command::Move(Motion::LineStart), Command::KillLine]);
        assert_eq!(ed.yank().segments(), ["abc "]);
    }

    #[test]
    fn delete_char_joins_lines_and_stops_at_the_end() {
        let mut ed = editor(&["ab", "cd"]);
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::DeleteChar]);
        assert_eq!(ed.lines(), ["abcd"]);
        assert_eq!(ed.cursor(), (0, 2));
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::DeleteChar]);
        assert_eq!(ed.lines(), ["abcd"]);
        run(&mut ed, [Command::Backspace]);
        assert_eq!(ed.lines(), ["abc"]);
    }

    #[test]
    fn typing_and_return() {
        let mut ed = editor(&[""]);
        run(&mut ed, "ringsboots".chars().map(Command::Insert));
        assert_eq!(ed.take_dirty(), Dirty::Line(0));
        run(&mut ed, vec![Command::Move(Motion::Left); 5]);
        run(&mut ed, [Command::Return]);
        assert_eq!(ed.lines(), ["rings", "boots"]);
        assert_eq!(ed.cursor(), (1, 0));
        assert_eq!(ed.take_dirty(), Dirty::Everything);
    }

    #[test]
    fn plain_motion_is_not_dirty() {
        let mut ed = editor(&["one", "two", ""]);
        run(&mut ed, [Command::Move(Motion::Down), Command::Move(Motion::LineEnd)]);
        assert_eq!(ed.take_dirty(), Dirty::Nothing);
        run(&mut ed, [Command::ToggleMark]);
        assert_eq!(ed.take_dirty(), Dirty::Line(1));
        run(&mut ed, [Command::Move(Motion::Up)]);
        assert_eq!(ed.take_dirty(), Dirty::Everything);
    }

    #[test]
    fn moving_past_the_end_appends_once() {
        let mut ed = editor(&["rings"]);
        run(&mut ed, [Command::Move(Motion::Down)]);
        assert_eq!(ed.lines(), ["rings", ""]);
        run(&mut ed, [Command::Move(Motion::Down), Command::Move(Motion::Right)]);
        assert_eq!(ed.lines(), ["rings", ""]);
        assert_eq!(ed.cursor(), (1, 0));
    }

    fn limited(lines: &[&str], options: Options) -> Editor {
        let lines = lines.iter().map(|l| l.to_string()).collect();
        let mut editor = Editor::new(lines, PlayerContext::default(), options);
        editor.take_dirty();
        editor
    }

    #[test]
    fn refused_delete_char_keeps_the_cursor() {
        let mut ed = limited(&["abc", "de"], Options { max_line_len: 4, ..Options::default() });
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::DeleteChar]);
        assert_eq!(ed.take_status(), Some(Status::CapacityReached));
        assert_eq!(ed.lines(), ["abc", "de"]);
        assert_eq!(ed.cursor(), (0, 3));
    }

    #[test]
    fn kill_line_without_a_join_yanks_nothing() {
        let mut ed = editor(&["abc"]);
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::KillLine]);
        assert!(ed.yank().is_empty());
        run(&mut ed, [Command::Paste]);
        assert_eq!(ed.lines(), ["abc"]);
        assert!(!ed.is_changed());

        let mut ed = limited(&["abc", "de"], Options { max_line_len: 4, ..Options::default() });
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::KillLine]);
        assert_eq!(ed.take_status(), Some(Status::CapacityReached));
        assert!(ed.yank().is_empty());
        assert_eq!(ed.cursor(), (0, 3));
    }

    #[test]
    fn paste_past_the_line_limit_is_refused() {
        let mut ed = limited(&["a", "b", "c"], Options { max_lines: 3, ..Options::default() });
        run(&mut ed, [Command::Copy, Command::Paste]);
        assert_eq!(ed.take_status(), Some(Status::CapacityReached));
        assert_eq!(ed.lines(), ["a", "b", "c"]);
        assert_eq!(ed.cursor(), (0, 0));
        assert!(!ed.is_changed());
    }

    #[test]
    fn backspace_join_past_the_length_limit_is_refused() {
        let mut ed = limited(&["abc", "de"], Options { max_line_len: 4, ..Options::default() });
        run(&mut ed, [Command::Move(Motion::Down), Command::Backspace]);
        assert_eq!(ed.take_status(), Some(Status::CapacityReached));
        assert_eq!(ed.lines(), ["abc", "de"]);
        assert_eq!(ed.cursor(), (1, 0));
        assert!(!ed.is_changed());
    }

    #[test]
    fn buffer_limit_is_respected() {
        let opts = Options { max_lines: 2, max_line_len: 3, page_rows: 20 };
        let mut ed = Editor::new(vec!["abc".into(), "d".into()], PlayerContext::default(), opts);
        run(&mut ed, [Command::Move(Motion::Down), Command::Move(Motion::Down)]);
        assert_eq!(ed.lines().len(), 2);
        run(&mut ed, [Command::Return]);
        assert_eq!(ed.take_status(), Some(Status::CapacityReached));
        run(&mut ed, [Command::Move(Motion::Top), Command::Insert('x')]);
        assert_eq!(ed.take_status(), Some(Status::CapacityReached));
        assert_eq!(ed.line(0), "abc");
    }

    #[test]
    fn vertical_motion_remembers_the_column() {
        let mut ed = editor(&["long line", "ab", "long line"]);
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::Move(Motion::Down)]);
        assert_eq!(ed.cursor(), (1, 2));
        run(&mut ed, [Command::Move(Motion::Down)]);
        assert_eq!(ed.cursor(), (2, 9));
    }

    #[test]
    fn page_motion_scrolls_the_viewport() {
        let lines: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        let opts = Options { page_rows: 10, ..Options::default() };
        let mut ed = Editor::new(lines, PlayerContext::default(), opts);
        ed.take_dirty();
        run(&mut ed, [Command::Move(Motion::PageDown)]);
        assert_eq!(ed.cursor(), (10, 0));
        assert_eq!(ed.viewport(), (10, 10));
        assert_eq!(ed.take_dirty(), Dirty::Everything);
        run(&mut ed, [Command::Move(Motion::Bottom)]);
        assert_eq!(ed.viewport(), (40, 10));
    }

    #[test]
    fn search_skips_bypassed_lines() {
        let mut ed = editor(&["# rules", "?:[EQU $CLASS Mage]", "~rings", "?:1", "!rings"]);
        let ring = ItemSnapshot::new("Ring of Protection", ItemKind::Ring);
        run(&mut ed, [Command::SearchItem(ring)]);
        assert_eq!(ed.cursor(), (4, 0));
        assert_eq!(ed.take_status(), Some(Status::SkippedInactive));

        run(&mut ed, [Command::SearchBackward]);
        assert_eq!(ed.cursor(), (2, 0));
        assert_eq!(ed.take_status(), Some(Status::FoundOnlyInactive));
    }

    #[test]
    fn text_search_and_missing_target() {
        let mut ed = editor(&["rings", "boots of speed", "cloaks"]);
        run(&mut ed, [Command::SearchForward]);
        assert_eq!(ed.take_status(), Some(Status::NoSearchTarget));
        run(&mut ed, [Command::SearchString("speed".into())]);
        assert_eq!(ed.cursor(), (1, 9));
        assert_eq!(ed.take_status(), None);
        run(&mut ed, [Command::SearchForward]);
        assert_eq!(ed.take_status(), Some(Status::NotFound));
        assert_eq!(ed.cursor(), (1, 9));
    }

    #[test]
    fn editing_a_condition_updates_states() {
        let mut ed = editor(&["?:1", "rings"]);
        assert_eq!(ed.line_state(1), LineState::empty());
        run(&mut ed, [Command::Move(Motion::Right), Command::Move(Motion::Right), Command::DeleteChar]);
        run(&mut ed, [Command::Insert('0')]);
        assert_eq!(ed.line(0), "?:0");
        assert_eq!(ed.line_state(1), LineState::BYPASS);
        assert_eq!(ed.take_dirty(), Dirty::Everything);
    }

    #[test]
    fn toggle_action_cycles_policy() {
        let mut ed = editor(&["good rings"]);
        run(&mut ed, [Command::Move(Motion::LineEnd), Command::ToggleAction(Action::DESTROY)]);
        assert_eq!(ed.line(0), "!good rings");
        assert_eq!(ed.cursor(), (0, 11));
        run(&mut ed, [Command::ToggleAction(Action::DESTROY)]);
        assert_eq!(ed.line(0), "good rings");
        run(&mut ed, [Command::ToggleAction(Action::DISPLAY), Command::ToggleAction(Action::QUERY)]);
        assert_eq!(ed.line(0), "(;good rings");
    }

    #[test]
    fn toggle_action_rejects_ambiguous_masks() {
        let mut ed = editor(&["good rings"]);
        run(&mut ed, [Command::ToggleAction(Action::empty())]);
        run(&mut ed, [Command::ToggleAction(Action::DESTROY | Action::LEAVE)]);
        run(&mut ed, [Command::ToggleAction(Action::QUERY | Action::DISPLAY)]);
        assert_eq!(ed.line(0), "good rings");
        assert!(!ed.is_changed());
    }

    #[test]
    fn toggle_keyword_over_marked_rows() {
        let mut ed = editor(&["rings", "# note", "average boots"]);
        run(&mut ed, [Command::ToggleMark]);
        run(&mut ed, down(2));
        run(&mut ed, [Command::ToggleKeyword(Flag::Good)]);
        assert_eq!(ed.lines(), ["good rings", "# note", "good boots"]);

        run(&mut ed, [Command::ToggleKeyword(Flag::Weapons)]);
        assert_eq!(ed.lines(), ["good weapons", "# note", "good weapons"]);

        run(&mut ed, [Command::ToggleKeyword(Flag::Weapons)]);
        assert_eq!(ed.lines(), ["good:", "# note", "good:"]);
    }

    #[test]
    fn insert_templates() {
        let ctx = PlayerContext { race: "Dwarf".into(), class: "Priest".into(), level: 5, ..PlayerContext::default() };
        let mut ed = Editor::new(vec!["rings".into()], ctx, Options::default());
        run(&mut ed, [Command::InsertConditional]);
        assert_eq!(ed.lines(), ["?:[AND [EQU $RACE Dwarf] [EQU $CLASS Priest] [GEQ $LEVEL 05]]", "?:1", "rings"]);
        assert_eq!(ed.cursor(), (1, 0));

        run(&mut ed, [Command::Move(Motion::Bottom)]);
        run(&mut ed, [Command::InsertKeymap { mode: 0, key: "^X".into(), action: "\\e".into() }]);
        assert_eq!(ed.lines()[2..], ["C:0:^X", "A:\\e", "rings"]);
        assert_eq!(ed.cursor(), (3, 2));
    }

    #[test]
    fn destroyed_item_commands() {
        let mut ed = editor(&["rings"]);
        run(&mut ed, [Command::InsertDestroyed]);
        assert_eq!(ed.take_status(), Some(Status::NothingDestroyed));

        ed.set_last_destroyed(ItemSnapshot::new("Potion of Salt Water", ItemKind::Potion));
        run(&mut ed, [Command::InsertDestroyed]);
        assert_eq!(ed.lines(), ["!^potion of salt water", "rings"]);
        run(&mut ed, [Command::Move(Motion::Down), Command::SearchDestroyed]);
        assert_eq!(ed.take_status(), Some(Status::NotFound));
        run(&mut ed, [Command::SearchBackward]);
        assert_eq!(ed.cursor(), (0, 0));
    }

    #[test]
    fn revert_and_outcomes() {
        let mut ed = editor(&["rings"]);
        run(&mut ed, [Command::Insert('x')]);
        assert!(ed.is_changed());
        assert_eq!(ed.apply(Command::Revert), Outcome::Continue);
        assert_eq!(ed.lines(), ["rings"]);
        assert!(!ed.is_changed());
        assert_eq!(ed.apply(Command::QuitSave), Outcome::Quit { save: true });
        assert_eq!(ed.apply(Command::Help), Outcome::ShowHelp);
    }
}
