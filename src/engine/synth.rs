//! Build a rule that selects a given item.
//!
//! Used when a destroyed item is auto-registered and when the editor inserts
//! the rule for an item the player picked. The result is as specific as the
//! player's knowledge allows: identification state, quality, corpse and book
//! qualifiers, and a category noun, plus an anchored name pattern unless the
//! flags alone already describe the item well enough.

use crate::flags::{Flag, FlagSet};
use crate::item::{BookRealm, Feeling, ItemKind, ItemView};
use crate::{Action, Rule};

pub fn rule_from_item(item: &dyn ItemView, item_name: &str) -> Rule {
    let kind = item.kind();
    let mut flags = FlagSet::empty();
    let mut name_pattern: Option<String> = None;
    // Whether the item's own name should become the pattern.
    let mut use_item_name = true;

    if !item.is_aware() {
        flags.insert(Flag::Unaware);
    } else if !item.is_known() {
        match item.feeling() {
            None => flags.insert(Flag::Unidentified),
            Some(Feeling::Average | Feeling::Good) => flags.insert(Flag::Nameless),
            Some(Feeling::Broken | Feeling::Cursed) => {
                flags.insert(Flag::Nameless);
                flags.insert(Flag::Worthless);
            }
            Some(Feeling::Terrible | Feeling::Worthless) => flags.insert(Flag::Worthless),
            Some(Feeling::Excellent) => flags.insert(Flag::Ego),
            Some(Feeling::Uncursed) => flags.insert(Flag::Average),
            Some(Feeling::Special) => {}
        }
    } else if item.is_ego() {
        if kind.is_weapon() || kind.is_armour() || kind.is_ammo() {
            // The ego title says more than the base name.
            name_pattern = item.ego_name().map(str::to_lowercase);
            use_item_name = false;
            if !item.is_rare() {
                flags.insert(Flag::Common);
            }
        }
        flags.insert(Flag::Ego);
    } else if item.is_artifact() {
        flags.insert(Flag::Artifact);
    } else if kind.is_equipment() {
        flags.insert(Flag::Nameless);
    }

    if kind.is_melee_weapon() && item.dice() != item.base_dice() {
        flags.insert(Flag::Boosted);
    }

    if let Some(monster) = item.monster() {
        if kind == ItemKind::Corpse && monster.wanted {
            flags.remove(Flag::Worthless);
            flags.insert(Flag::Wanted);
        }
        if matches!(kind, ItemKind::Corpse | ItemKind::Statue) && monster.unique {
            flags.insert(Flag::Unique);
        }
        if kind == ItemKind::Corpse && monster.humanoid {
            flags.insert(Flag::Human);
        }
    }

    if let Some(book) = item.spellbook() {
        if !book.readable {
            flags.insert(Flag::Unreadable);
        }
        match book.realm {
            BookRealm::First => {
                flags.insert(Flag::Realm1);
                use_item_name = false;
            }
            BookRealm::Second => {
                flags.insert(Flag::Realm2);
                use_item_name = false;
            }
            BookRealm::Other => {}
        }
        match book.position {
            0 => flags.insert(Flag::First),
            1 => flags.insert(Flag::Second),
            2 => flags.insert(Flag::Third),
            3 => flags.insert(Flag::Fourth),
            _ => {}
        }
    }

    if let Some(noun) = noun_for(kind) {
        flags.insert(noun);
    }

    let name = if use_item_name { format!("^{}", item_name.to_lowercase()) } else { name_pattern.unwrap_or_default() };

    Rule {
        action: Action::default(),
        flags,
        dice: 0,
        bonus: 0,
        name,
        inscription: item.inscription().map(str::to_string),
    }
}

fn noun_for(kind: ItemKind) -> Option<Flag> {
    let noun = match kind {
        _ if kind.is_ammo() => Flag::Missiles,
        ItemKind::Scroll | ItemKind::Staff | ItemKind::Wand | ItemKind::Rod => Flag::Devices,
        ItemKind::Light => Flag::Lights,
        ItemKind::Skeleton | ItemKind::Bottle | ItemKind::Junk | ItemKind::Statue => Flag::Junks,
        ItemKind::Corpse => Flag::Corpses,
        ItemKind::Spellbook => Flag::Spellbooks,
        _ if kind.is_melee_weapon() => Flag::Weapons,
        ItemKind::Shield => Flag::Shields,
        ItemKind::Bow => Flag::Bows,
        ItemKind::Ring => Flag::Rings,
        ItemKind::Amulet => Flag::Amulets,
        _ if kind.is_body_armour() => Flag::Suits,
        ItemKind::Cloak => Flag::Cloaks,
        ItemKind::Helm | ItemKind::Crown => Flag::Helms,
        ItemKind::Gloves => Flag::Gloves,
        ItemKind::Boots => Flag::Boots,
        _ => return None,
    };
    Some(noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{matches, serialize_rule};
    use crate::item::{BookInfo, ItemSnapshot, MonsterOrigin};

    #[test]
    fn plain_potion_is_anchored_by_name() {
        let item = ItemSnapshot::new("Potion of Sleep", ItemKind::Potion);
        let rule = rule_from_item(&item, &item.match_name());
        assert_eq!(serialize_rule(&rule), "^potion of sleep");
        assert!(matches(&rule, &item, &item.match_name()));
    }

    #[test]
    fn nameless_equipment_keeps_the_kind_name() {
        let item = ItemSnapshot::new("Dagger (1d4)", ItemKind::Sword);
        let rule = rule_from_item(&item, &item.match_name());
        assert_eq!(serialize_rule(&rule), "nameless weapons:^dagger (1d4)");
        assert!(matches(&rule, &item, &item.match_name()));

        let mut blade = ItemSnapshot::new("Long Sword (2d5) (+9,+9)", ItemKind::Sword);
        blade.to_hit = 9;
        blade.to_dam = 9;
        assert!(!matches(&rule, &blade, &blade.match_name()));
    }

    #[test]
    fn unaware_item_is_not_also_unidentified() {
        let mut item = ItemSnapshot::new("Cloudy Potion", ItemKind::Potion);
        item.aware = false;
        item.known = false;
        let rule = rule_from_item(&item, &item.match_name());
        assert!(rule.flags.contains(Flag::Unaware));
        assert!(!rule.flags.contains(Flag::Unidentified));
        assert_eq!(serialize_rule(&rule), "unaware ^cloudy potion");
    }

    #[test]
    fn ego_armour_uses_ego_name() {
        let mut item = ItemSnapshot::new("Leather Boots of Slow Descent", ItemKind::Boots);
        item.ego = Some("of Slow Descent".into());
        let rule = rule_from_item(&item, &item.match_name());
        assert_eq!(serialize_rule(&rule), "common ego boots:of slow descent");
        assert!(matches(&rule, &item, &item.match_name()));
    }

    #[test]
    fn sensed_broken_is_nameless_and_worthless() {
        let mut item = ItemSnapshot::new("Broken Dagger", ItemKind::Sword);
        item.known = false;
        item.feeling = Some(Feeling::Broken);
        let rule = rule_from_item(&item, &item.match_name());
        assert!(rule.flags.contains(Flag::Nameless));
        assert!(rule.flags.contains(Flag::Worthless));
        assert_eq!(rule.name, "^broken dagger");
    }

    #[test]
    fn wanted_corpse_is_not_worthless() {
        let mut item = ItemSnapshot::new("Bullroarer Corpse", ItemKind::Corpse);
        item.known = false;
        item.feeling = Some(Feeling::Worthless);
        item.monster = Some(MonsterOrigin { unique: true, humanoid: true, wanted: true });
        let rule = rule_from_item(&item, &item.match_name());
        assert!(!rule.flags.contains(Flag::Worthless));
        for flag in [Flag::Wanted, Flag::Unique, Flag::Human, Flag::Corpses] {
            assert!(rule.flags.contains(flag), "{flag:?}");
        }
    }

    #[test]
    fn realm_books_match_by_flags() {
        let mut item = ItemSnapshot::new("Magic for Beginners", ItemKind::Spellbook);
        item.book = Some(BookInfo { realm: BookRealm::First, position: 0, readable: true });
        let rule = rule_from_item(&item, &item.match_name());
        assert_eq!(serialize_rule(&rule), "first realm's first spellbooks");
    }

    #[test]
    fn inscription_is_carried_over() {
        let mut item = ItemSnapshot::new("Flask of Oil", ItemKind::Flask);
        item.inscription = Some("@v1".into());
        let rule = rule_from_item(&item, &item.match_name());
        assert_eq!(serialize_rule(&rule), "^flask of oil#@v1");
    }
}
