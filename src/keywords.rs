//! Keyword table: the vocabulary of a rule line.
//!
//! The table is ordered canonically; the serializer emits keywords in this order
//! and the parser looks them up by longest prefix. Entries are split by the
//! phase in which the parser accepts them:
//!
//! ```text
//! Adjective   repeated, any order      "identified", "good", "rare", ...
//! Threshold   prefix + N [+ suffix]     "more than 10 dice", "more bonus than 5"
//! PreNoun     at most once, before noun "artifact"
//! Noun        at most once              "weapons", "rings", ...
//! ```

use crate::flags::Flag;
use once_cell::sync::Lazy;

/// Where a keyword may appear in a rule line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Adjective,
    /// The keyword text is a prefix; a one- or two-digit number and then the
    /// given suffix (possibly empty) follow it.
    Threshold(&'static str),
    PreNoun,
    Noun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub text: &'static str,
    pub flag: Flag,
    pub slot: Slot,
}

const fn adj(text: &'static str, flag: Flag) -> Keyword {
    Keyword { text, flag, slot: Slot::Adjective }
}

const fn noun(text: &'static str, flag: Flag) -> Keyword {
    Keyword { text, flag, slot: Slot::Noun }
}

pub const KEY_DICE: &str = " dice";
pub const KEY_ARTIFACT: &str = "artifact";

/// Canonical keyword order.
pub static KEYWORDS: &[Keyword] = &[
    adj("all", Flag::All),
    adj("collecting", Flag::Collecting),
    adj("unaware", Flag::Unaware),
    adj("unidentified", Flag::Unidentified),
    adj("identified", Flag::Identified),
    adj("*identified*", Flag::StarIdentified),
    adj("dice boosted", Flag::Boosted),
    Keyword { text: "more than", flag: Flag::MoreDice, slot: Slot::Threshold(KEY_DICE) },
    Keyword { text: "more bonus than", flag: Flag::MoreBonus, slot: Slot::Threshold("") },
    adj("unreadable", Flag::Unreadable),
    adj("first realm's", Flag::Realm1),
    adj("second realm's", Flag::Realm2),
    adj("first", Flag::First),
    adj("second", Flag::Second),
    adj("third", Flag::Third),
    adj("fourth", Flag::Fourth),
    adj("wanted", Flag::Wanted),
    adj("unique monster's", Flag::Unique),
    adj("human", Flag::Human),
    adj("worthless", Flag::Worthless),
    adj("good", Flag::Good),
    adj("nameless", Flag::Nameless),
    adj("average", Flag::Average),
    adj("rare", Flag::Rare),
    adj("common", Flag::Common),
    adj("ego", Flag::Ego),
    Keyword { text: KEY_ARTIFACT, flag: Flag::Artifact, slot: Slot::PreNoun },
    noun("items", Flag::Items),
    noun("weapons", Flag::Weapons),
    noun("favorite weapons", Flag::FavoriteWeapons),
    noun("armors", Flag::Armors),
    noun("missiles", Flag::Missiles),
    noun("magical devices", Flag::Devices),
    noun("lights", Flag::Lights),
    noun("junks", Flag::Junks),
    noun("corpses or skeletons", Flag::Corpses),
    noun("spellbooks", Flag::Spellbooks),
    noun("hafted weapons", Flag::Hafted),
    noun("shields", Flag::Shields),
    noun("missile shooters", Flag::Bows),
    noun("rings", Flag::Rings),
    noun("amulets", Flag::Amulets),
    noun("suits", Flag::Suits),
    noun("cloaks", Flag::Cloaks),
    noun("helms", Flag::Helms),
    noun("gloves", Flag::Gloves),
    noun("boots", Flag::Boots),
];

/// Adjective and threshold keywords, longest text first.
static ADJECTIVES_BY_LENGTH: Lazy<Vec<&'static Keyword>> = Lazy::new(|| {
    by_length(|k| matches!(k.slot, Slot::Adjective | Slot::Threshold(_)))
});

/// Noun keywords, longest text first.
static NOUNS_BY_LENGTH: Lazy<Vec<&'static Keyword>> = Lazy::new(|| by_length(|k| k.slot == Slot::Noun));

fn by_length(filter: impl Fn(&Keyword) -> bool) -> Vec<&'static Keyword> {
    let mut list: Vec<&'static Keyword> = KEYWORDS.iter().filter(|k| filter(k)).collect();
    // Stable sort keeps canonical order among equal lengths.
    list.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
    list
}

/// Look up the keyword that sets `flag`.
pub fn keyword_for(flag: Flag) -> Option<&'static Keyword> {
    KEYWORDS.iter().find(|k| k.flag == flag)
}

/// Adjective/threshold keywords that prefix `input`, longest first.
pub fn adjective_candidates(input: &str) -> impl Iterator<Item = &'static Keyword> + '_ {
    ADJECTIVES_BY_LENGTH.iter().copied().filter(move |k| input.starts_with(k.text))
}

/// The longest noun keyword that prefixes `input`.
pub fn longest_noun(input: &str) -> Option<&'static Keyword> {
    NOUNS_BY_LENGTH.iter().copied().find(|k| input.starts_with(k.text))
}

/// True when `input` begins with any keyword text.
pub fn starts_with_keyword(input: &str) -> bool {
    KEYWORDS.iter().any(|k| input.starts_with(k.text))
}

/// Consume `key` at the front of `input`, plus one trailing space if present.
pub fn match_key<'a>(input: &'a str, key: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(key)?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_flag_has_exactly_one_keyword() {
        for flag in Flag::ALL_FLAGS {
            let count = KEYWORDS.iter().filter(|k| k.flag == flag).count();
            assert_eq!(count, 1, "{flag:?}");
        }
    }

    #[test]
    fn longest_adjective_wins() {
        let first = adjective_candidates("first realm's spellbooks").next().unwrap();
        assert_eq!(first.flag, Flag::Realm1);
        let first = adjective_candidates("first spellbooks").next().unwrap();
        assert_eq!(first.flag, Flag::First);
    }

    #[test]
    fn noun_lookup_prefers_longer_text() {
        assert_eq!(longest_noun("hafted weapons:mace").map(|k| k.flag), Some(Flag::Hafted));
        assert_eq!(longest_noun("weapons").map(|k| k.flag), Some(Flag::Weapons));
        assert_eq!(longest_noun("sword"), None);
    }

    #[test]
    fn match_key_consumes_single_space() {
        assert_eq!(match_key("good  sword", "good"), Some(" sword"));
        assert_eq!(match_key("good:sword", "good"), Some(":sword"));
        assert_eq!(match_key("bad", "good"), None);
    }
}
