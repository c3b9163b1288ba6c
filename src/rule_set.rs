use crate::api::PlayerContext;
use crate::expr;
use crate::item::ItemView;
use crate::Rule;

/// The active rules of a rule file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rule-file text.
    ///
    /// Blank lines and `#` comments are skipped. A `?:` line switches the
    /// following lines off when its expression evaluates to `"0"` and back on
    /// otherwise. `%:` includes are not followed. Lines that do not parse are
    /// ignored.
    pub fn from_text(text: &str, context: &PlayerContext) -> Self {
        Self::from_lines(text.lines(), context)
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>, context: &PlayerContext) -> Self {
        let mut rules = Vec::new();
        let mut bypass = false;
        let mut rejected = 0usize;

        for (row, line) in lines.into_iter().enumerate() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(condition) = expr::condition(line) {
                let value = context.eval(condition);
                bypass = expr::is_false(&value);
                tracing::debug!(row, value = value.as_str(), bypass, "condition");
                continue;
            }
            if line.starts_with("%:") {
                tracing::trace!(row, line, "include not followed");
                continue;
            }
            if bypass {
                continue;
            }
            match Rule::parse(line, false) {
                Some(rule) => rules.push(rule),
                None => rejected += 1,
            }
        }

        tracing::debug!(rules = rules.len(), rejected, "rule set loaded");
        Self { rules }
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// First rule matching `item`, with its index. `item_name` is lower-cased here.
    pub fn find(&self, item: &dyn ItemView, item_name: &str) -> Option<(usize, &Rule)> {
        let name = item_name.to_lowercase();
        self.rules.iter().enumerate().find(|(_, rule)| rule.matches(item, &name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Action;
    use crate::item::{ItemKind, ItemSnapshot};

    const FILE: &str = "\
# autopick
~rings
?:[EQU $CLASS Mage]
spellbooks
?:1
!junks
%:extra.prf
#comment
";

    #[test]
    fn conditions_switch_blocks() {
        let warrior = RuleSet::from_text(FILE, &PlayerContext::default());
        assert_eq!(warrior.len(), 2);

        let mage = PlayerContext { class: "Mage".to_string(), ..PlayerContext::default() };
        assert_eq!(RuleSet::from_text(FILE, &mage).len(), 3);
    }

    #[test]
    fn first_match_wins() {
        let rules = RuleSet::from_text("!rings:teleport\n~rings\n", &PlayerContext::default());
        let ring = ItemSnapshot::new("Ring of Teleportation", ItemKind::Ring);

        let (index, rule) = rules.find(&ring, &ring.name).unwrap();
        assert_eq!(index, 0);
        assert_eq!(rule.action.policy(), Action::DESTROY);

        let other = ItemSnapshot::new("Ring of Protection", ItemKind::Ring);
        assert_eq!(rules.find(&other, &other.name).map(|(i, _)| i), Some(1));

        let potion = ItemSnapshot::new("Potion of Speed", ItemKind::Potion);
        assert!(rules.find(&potion, &potion.name).is_none());
    }
}
