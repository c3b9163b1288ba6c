use crate::api::{Options, PlayerContext};
use crate::editor::Editor;
use crate::item::ItemSnapshot;
use crate::rule_set::RuleSet;
use crate::{Action, Rule};

/// Header line that opens the auto-registered block of a rule file.
pub const AUTOREGISTER_HEADER: &str = "?:$AUTOREGISTER";

const AUTOREGISTER_WARNING: [&str; 2] = [
    "# *Warning!* The lines below will be deleted later.",
    "# Keep it by cut & paste if you need these lines for future characters.",
];

/// Result of [`Session::auto_register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// A destroy rule already covers the item.
    AlreadyDestroyed,
    /// A rule with another policy covers the item; nothing was added.
    Refused,
    /// A destroy rule was added. `lines` must be appended to the rule file.
    Added { lines: Vec<String> },
}

/// One character's autopick state: the active rules, the character snapshot
/// the `?:` lines are evaluated against, and the last destroyed item.
#[derive(Debug, Clone)]
pub struct Session {
    context: PlayerContext,
    rules: RuleSet,
    last_destroyed: Option<ItemSnapshot>,
}

impl Session {
    /// Start a session over rule-file text. No item has been destroyed yet.
    pub fn new(text: &str, mut context: PlayerContext) -> Self {
        context.autoregister = text.lines().any(|line| line == AUTOREGISTER_HEADER);
        let rules = RuleSet::from_text(text, &context);
        Self { context, rules, last_destroyed: None }
    }

    pub fn context(&self) -> &PlayerContext {
        &self.context
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn last_destroyed(&self) -> Option<&ItemSnapshot> {
        self.last_destroyed.as_ref()
    }

    /// Remember `item` as the most recently destroyed one.
    pub fn record_destroyed(&mut self, item: &ItemSnapshot) {
        self.last_destroyed = Some(item.clone());
    }

    /// Register `item` for destruction.
    pub fn auto_register(&mut self, item: &ItemSnapshot, item_name: &str) -> Registration {
        if let Some((index, rule)) = self.rules.find(item, item_name) {
            if rule.action.contains(Action::DESTROY) {
                return Registration::AlreadyDestroyed;
            }
            tracing::debug!(index, line = rule.to_line().as_str(), "registration refused by existing rule");
            return Registration::Refused;
        }

        let mut rule = Rule::from_item(item, &item_name.to_lowercase());
        rule.action = Action::DESTROY;

        let mut lines = Vec::new();
        if !self.context.autoregister {
            lines.extend(AUTOREGISTER_WARNING.iter().map(|line| line.to_string()));
            lines.push(AUTOREGISTER_HEADER.to_string());
            self.context.autoregister = true;
        }
        lines.push(rule.to_line());
        tracing::debug!(line = rule.to_line().as_str(), "auto-registered");

        self.rules.push(rule);
        self.record_destroyed(item);
        Registration::Added { lines }
    }

    /// Open an editor over `lines` with this session's context and last destroyed item.
    pub fn editor(&self, lines: Vec<String>, options: Options) -> Editor {
        let mut editor = Editor::new(lines, self.context.clone(), options);
        if let Some(item) = &self.last_destroyed {
            editor.set_last_destroyed(item.clone());
        }
        editor
    }
}
