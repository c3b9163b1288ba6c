//! Autopick rule engine.
//!
//! A rule file is a list of one-line directives telling the game what to do with
//! items found in the dungeon: pick them up, destroy them, leave them on the
//! floor or ask first. This crate parses those lines into [`Rule`]s, writes them
//! back out, matches them against items, evaluates the `?:` conditional lines
//! that switch blocks of rules on and off, and provides the line editor used to
//! author rule files in game.
//!
//! ```
//! use autopick::{Action, Rule};
//! use autopick::flags::Flag;
//!
//! let rule = Rule::parse("!average weapons", false).unwrap();
//! assert!(rule.action.contains(Action::DESTROY));
//! assert!(rule.flags.contains(Flag::Average));
//! assert_eq!(rule.to_line(), "!average weapons");
//! ```

#[macro_use]
mod macros;
mod api;
pub mod editor;
mod engine;
mod error;
pub mod expr;
pub mod flags;
pub mod item;
pub mod keywords;
pub mod rule_file;
mod rule_set;
mod session;

pub use api::{Options, PlayerContext};
pub use editor::{Command, Dirty, Editor, Motion, Outcome, SearchOutcome, Status};
pub use engine::{is_foreign_line, matches, parse_rule, rule_from_item, serialize_rule};
pub use error::Error;
pub use item::{ItemSnapshot, ItemView};
pub use rule_set::RuleSet;
pub use session::{Registration, Session};

use crate::flags::FlagSet;

// --- Rule record --------------------------------------------------------------

bitflags::bitflags! {
    /// What to do with a matching item.
    ///
    /// Exactly one of the policy bits (`PICKUP`, `DESTROY`, `LEAVE`, `QUERY`) is
    /// set; `DISPLAY` is independent and controls whether matches are shown on
    /// the overview map.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Action: u8 {
        const PICKUP  = 1 << 0;
        const DESTROY = 1 << 1;
        const LEAVE   = 1 << 2;
        const QUERY   = 1 << 3;
        const DISPLAY = 1 << 4;

        const POLICY = Self::PICKUP.bits() | Self::DESTROY.bits() | Self::LEAVE.bits() | Self::QUERY.bits();
    }
}

impl Action {
    /// Replace the policy bit, keeping `DISPLAY` as it was. A mask without
    /// exactly one policy bit leaves the action unchanged.
    pub fn set_policy(&mut self, policy: Action) {
        if !policy.has_single_policy() {
            return;
        }
        self.remove(Action::POLICY);
        self.insert(policy & Action::POLICY);
    }

    /// True when exactly one policy bit is set.
    pub fn has_single_policy(self) -> bool {
        self.policy().bits().count_ones() == 1
    }

    pub fn policy(self) -> Action {
        self & Action::POLICY
    }
}

impl Default for Action {
    fn default() -> Self {
        Action::PICKUP | Action::DISPLAY
    }
}

/// One parsed autopick line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    pub action: Action,
    pub flags: FlagSet,
    /// Threshold for "more than N dice"; meaningful only with `Flag::MoreDice`.
    pub dice: u8,
    /// Threshold for "more bonus than N"; meaningful only with `Flag::MoreBonus`.
    pub bonus: u8,
    /// Name pattern. Empty matches any name; a leading `^` anchors the match at
    /// the start of the item name.
    pub name: String,
    /// Text to inscribe on matched items.
    pub inscription: Option<String>,
}

impl Rule {
    /// Parse one rule line. See [`parse_rule`].
    pub fn parse(line: &str, allow_empty: bool) -> Option<Rule> {
        engine::parse_rule(line, allow_empty)
    }

    /// Canonical source line for this rule. See [`serialize_rule`].
    pub fn to_line(&self) -> String {
        engine::serialize_rule(self)
    }

    /// Match against `item`, whose lower-cased display name is `item_name`.
    pub fn matches(&self, item: &dyn ItemView, item_name: &str) -> bool {
        engine::matches(self, item, item_name)
    }

    /// Reverse-engineer a rule that selects `item`. See [`rule_from_item`].
    pub fn from_item(item: &dyn ItemView, item_name: &str) -> Rule {
        engine::rule_from_item(item, item_name)
    }

    /// True when the name pattern must match from the start of the item name.
    pub fn is_anchored(&self) -> bool {
        self.name.starts_with('^')
    }
}
