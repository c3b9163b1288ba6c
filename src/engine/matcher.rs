//! Rule matcher.
//!
//! A rule matches when every flag it sets holds for the item, its name pattern
//! is found in the item name, and (for "collecting" rules) the item would stack
//! with something already in the pack. Flags are tested in flag order and the
//! first failure ends the test.

use crate::flags::Flag;
use crate::item::{BookRealm, Feeling, ItemKind, ItemView};
use crate::Rule;

/// Test `rule` against `item`. `item_name` is the item's lower-cased display name.
pub fn matches(rule: &Rule, item: &dyn ItemView, item_name: &str) -> bool {
    if let Some(flag) = rule.flags.iter().find(|&flag| !flag_holds(flag, rule, item)) {
        tracing::trace!(?flag, item_name, "predicate failed");
        return false;
    }

    let found = match rule.name.strip_prefix('^') {
        Some(prefix) => item_name.starts_with(prefix),
        None => item_name.contains(rule.name.as_str()),
    };
    if !found {
        tracing::trace!(pattern = rule.name.as_str(), item_name, "name mismatch");
        return false;
    }

    if rule.flags.contains(Flag::Collecting) && !item.stacks_with_inventory() {
        tracing::trace!(item_name, "nothing in the pack to collect into");
        return false;
    }
    true
}

fn flag_holds(flag: Flag, rule: &Rule, item: &dyn ItemView) -> bool {
    let kind = item.kind();
    match flag {
        // Handled after the name test, or always true.
        Flag::All | Flag::Collecting | Flag::Items => true,

        // --- Identification ---
        Flag::Unaware => !item.is_aware(),
        Flag::Unidentified => !item.is_known() && item.feeling().is_none(),
        Flag::Identified => item.is_known(),
        Flag::StarIdentified => item.is_known() && item.is_fully_known(),

        // --- Dice and bonus ---
        Flag::Boosted => {
            // Unidentified quest drops stay unspoiled.
            kind.is_melee_weapon() && item.dice() != item.base_dice() && !(!item.is_known() && item.is_quest_target())
        }
        Flag::MoreDice => item.dice().product() >= u32::from(rule.dice),
        Flag::MoreBonus => item.is_known() && bonus(item) >= i32::from(rule.bonus),

        // --- Quality ---
        Flag::Worthless => item.value() <= 0,
        Flag::Artifact => item.is_known() && item.is_artifact(),
        Flag::Ego => item.is_ego() && (item.is_known() || item.feeling() == Some(Feeling::Excellent)),
        Flag::Good => quality(item, |item| item.to_ac() > 0 || item.to_hit() + item.to_dam() > 0, &[Feeling::Good]),
        Flag::Nameless => quality(
            item,
            |_| true,
            &[Feeling::Average, Feeling::Good, Feeling::Broken, Feeling::Cursed],
        ),
        Flag::Average => quality(
            item,
            |item| {
                !item.is_cursed() && !item.is_broken() && item.to_ac() <= 0 && item.to_hit() + item.to_dam() <= 0
            },
            &[Feeling::Average],
        ),
        Flag::Rare => item.is_rare(),
        Flag::Common => !item.is_rare(),

        // --- Monster remains ---
        Flag::Wanted => kind == ItemKind::Corpse && item.monster().is_some_and(|m| m.wanted),
        Flag::Unique => {
            matches!(kind, ItemKind::Corpse | ItemKind::Statue) && item.monster().is_some_and(|m| m.unique)
        }
        Flag::Human => kind == ItemKind::Corpse && item.monster().is_some_and(|m| m.humanoid),

        // --- Spellbooks ---
        Flag::Unreadable => item.spellbook().is_some_and(|book| !book.readable),
        Flag::Realm1 => item.spellbook().is_some_and(|book| book.realm == BookRealm::First),
        Flag::Realm2 => item.spellbook().is_some_and(|book| book.realm == BookRealm::Second),
        Flag::First => book_position(item, 0),
        Flag::Second => book_position(item, 1),
        Flag::Third => book_position(item, 2),
        Flag::Fourth => book_position(item, 3),

        // --- Nouns ---
        Flag::Weapons => kind.is_weapon(),
        Flag::FavoriteWeapons => item.is_favorite_weapon(),
        Flag::Armors => kind.is_armour(),
        Flag::Missiles => kind.is_ammo(),
        Flag::Devices => kind.is_device(),
        Flag::Lights => kind == ItemKind::Light,
        Flag::Junks => kind.is_junk(),
        Flag::Corpses => matches!(kind, ItemKind::Corpse | ItemKind::Skeleton),
        Flag::Spellbooks => kind == ItemKind::Spellbook,
        Flag::Hafted => kind == ItemKind::Hafted,
        Flag::Shields => kind == ItemKind::Shield,
        Flag::Bows => kind == ItemKind::Bow,
        Flag::Rings => kind == ItemKind::Ring,
        Flag::Amulets => kind == ItemKind::Amulet,
        Flag::Suits => kind.is_body_armour(),
        Flag::Cloaks => kind == ItemKind::Cloak,
        Flag::Helms => matches!(kind, ItemKind::Helm | ItemKind::Crown),
        Flag::Gloves => kind == ItemKind::Gloves,
        Flag::Boots => kind == ItemKind::Boots,
    }
}

/// Primary power when the item has one, else its best combat bonus.
fn bonus(item: &dyn ItemView) -> i32 {
    if item.pval() != 0 { item.pval() } else { item.to_hit().max(item.to_dam()).max(item.to_ac()) }
}

/// Quality tiers apply to equipment only. Identified items are judged by their
/// bonuses, sensed ones by their feeling.
fn quality(item: &dyn ItemView, known: impl Fn(&dyn ItemView) -> bool, sensed: &[Feeling]) -> bool {
    if !item.kind().is_equipment() {
        return false;
    }
    if item.is_known() {
        return item.is_nameless() && known(item);
    }
    item.feeling().is_some_and(|feeling| sensed.contains(&feeling))
}

fn book_position(item: &dyn ItemView, position: u8) -> bool {
    item.spellbook().is_some_and(|book| book.position == position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse_rule;
    use crate::item::{BookInfo, Dice, ItemSnapshot, MonsterOrigin};

    fn check(line: &str, item: &ItemSnapshot) -> bool {
        let rule = parse_rule(line, true).unwrap();
        matches(&rule, item, &item.match_name())
    }

    fn sword() -> ItemSnapshot {
        let mut item = ItemSnapshot::new("Long Sword (2d5)", ItemKind::Sword);
        item.dice = Dice::new(2, 5);
        item.base_dice = Dice::new(2, 5);
        item
    }

    #[test]
    fn name_is_substring_unless_anchored() {
        assert!(check("sword", &sword()));
        assert!(check("^long", &sword()));
        assert!(!check("^sword", &sword()));
    }

    #[test]
    fn boosted_dice_exempts_unknown_quest_drops() {
        let mut item = sword();
        item.dice = Dice::new(3, 5);
        assert!(check("dice boosted weapons", &item));

        item.known = false;
        item.quest_target = true;
        assert!(!check("dice boosted weapons", &item));
        // The dice threshold carries no such exemption.
        assert!(check("more than 15 dice weapons", &item));
    }

    #[test]
    fn bonus_prefers_pval() {
        let mut ring = ItemSnapshot::new("Ring of Speed <+5>", ItemKind::Ring);
        ring.pval = 5;
        ring.to_hit = 20;
        assert!(check("more bonus than 5 rings", &ring));
        assert!(!check("more bonus than 6 rings", &ring));

        let mut blade = sword();
        blade.to_dam = 7;
        assert!(check("more bonus than 7 weapons", &blade));
        blade.known = false;
        assert!(!check("more bonus than 1 weapons", &blade));
    }

    #[test]
    fn quality_uses_feeling_when_unidentified() {
        let mut item = sword();
        item.known = false;
        assert!(!check("average weapons", &item));
        item.feeling = Some(Feeling::Average);
        assert!(check("average weapons", &item));
        assert!(check("nameless weapons", &item));
        assert!(!check("good weapons", &item));
        item.feeling = Some(Feeling::Cursed);
        assert!(check("nameless weapons", &item));
        assert!(!check("average weapons", &item));
    }

    #[test]
    fn quality_uses_bonuses_when_identified() {
        let mut item = sword();
        assert!(check("average weapons", &item));
        item.to_hit = 3;
        assert!(check("good weapons", &item));
        assert!(!check("average weapons", &item));
        item.ego = Some("of Slaying".into());
        assert!(!check("good weapons", &item));
        assert!(check("ego weapons", &item));
    }

    #[test]
    fn quality_never_matches_non_equipment() {
        let potion = ItemSnapshot::new("Potion of Cure Light Wounds", ItemKind::Potion);
        assert!(!check("average", &potion));
        assert!(check("worthless", &ItemSnapshot { value: 0, ..potion }));
    }

    #[test]
    fn corpse_qualifiers() {
        let mut corpse = ItemSnapshot::new("Grip, Farmer Maggot's Dog Corpse", ItemKind::Corpse);
        corpse.monster = Some(MonsterOrigin { unique: true, humanoid: false, wanted: true });
        assert!(check("wanted corpses or skeletons", &corpse));
        assert!(check("unique monster's corpses or skeletons", &corpse));
        assert!(!check("human corpses or skeletons", &corpse));
        let statue = ItemSnapshot { kind: ItemKind::Statue, ..corpse };
        assert!(check("unique monster's junks", &statue));
        assert!(!check("wanted", &statue));
    }

    #[test]
    fn spellbook_realm_and_position() {
        let mut book = ItemSnapshot::new("Magic for Beginners", ItemKind::Spellbook);
        book.book = Some(BookInfo { realm: BookRealm::First, position: 0, readable: true });
        assert!(check("first realm's first spellbooks", &book));
        assert!(!check("second realm's spellbooks", &book));
        assert!(!check("second spellbooks", &book));
        assert!(!check("unreadable spellbooks", &book));
    }

    #[test]
    fn collecting_needs_a_stack() {
        let mut item = ItemSnapshot::new("Flask of Oil", ItemKind::Flask);
        assert!(!check("collecting items", &item));
        item.stacks = true;
        assert!(check("collecting items", &item));
    }
}
