//! Predicate flags carried by a [`Rule`](crate::Rule).
//!
//! Every keyword a rule line can contain sets one named bit. Bits are stored in
//! two 32-bit words keyed by the [`Flag`] discriminant, which leaves room for
//! sixty-four bits while the vocabulary uses fewer than fifty.
//!
//! Some flags are mutually exclusive in the editor (setting "identified" clears
//! "unaware", picking the "rings" noun clears "boots"). The parser itself does not
//! enforce this for adjectives; exclusivity is applied by
//! [`FlagSet::insert_exclusive`], which the keyword toggle uses.
//!
//! ```text
//! word 0: bits  0..31   identification, quality, rarity, thresholds, books
//! word 1: bits 32..63   category nouns (items .. boots)
//! ```

use std::fmt;

/// One named predicate bit.
///
/// Discriminants are stable: they are the bit positions inside a [`FlagSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Flag {
    All = 0,
    Unaware = 1,
    Unidentified = 2,
    Identified = 3,
    StarIdentified = 4,
    Collecting = 5,
    Artifact = 6,
    Ego = 7,
    Good = 10,
    Nameless = 11,
    Average = 12,
    Worthless = 13,
    Rare = 14,
    Common = 15,
    Boosted = 16,
    MoreDice = 17,
    MoreBonus = 18,
    Wanted = 19,
    Unique = 20,
    Human = 21,
    Unreadable = 22,
    Realm1 = 23,
    Realm2 = 24,
    First = 25,
    Second = 26,
    Third = 27,
    Fourth = 28,
    Items = 32,
    Weapons = 33,
    FavoriteWeapons = 34,
    Armors = 35,
    Missiles = 36,
    Devices = 37,
    Lights = 38,
    Junks = 39,
    Corpses = 40,
    Spellbooks = 41,
    Hafted = 42,
    Shields = 43,
    Bows = 44,
    Rings = 45,
    Amulets = 46,
    Suits = 47,
    Cloaks = 48,
    Helms = 49,
    Gloves = 50,
    Boots = 51,
}

/// Groups of flags where at most one member should be set at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagGroup {
    /// unaware / unidentified / identified / *identified*
    Identification,
    /// artifact / ego / good / nameless / average
    Quality,
    /// rare / common
    Rarity,
    /// Object category nouns.
    Noun,
}

const IDENTIFICATION: &[Flag] = &[Flag::Unaware, Flag::Unidentified, Flag::Identified, Flag::StarIdentified];
const QUALITY: &[Flag] = &[Flag::Artifact, Flag::Ego, Flag::Good, Flag::Nameless, Flag::Average];
const RARITY: &[Flag] = &[Flag::Rare, Flag::Common];

/// Category nouns in keyword-table order.
pub const NOUNS: &[Flag] = &[
    Flag::Items,
    Flag::Weapons,
    Flag::FavoriteWeapons,
    Flag::Armors,
    Flag::Missiles,
    Flag::Devices,
    Flag::Lights,
    Flag::Junks,
    Flag::Corpses,
    Flag::Spellbooks,
    Flag::Hafted,
    Flag::Shields,
    Flag::Bows,
    Flag::Rings,
    Flag::Amulets,
    Flag::Suits,
    Flag::Cloaks,
    Flag::Helms,
    Flag::Gloves,
    Flag::Boots,
];

impl FlagGroup {
    pub fn members(self) -> &'static [Flag] {
        match self {
            FlagGroup::Identification => IDENTIFICATION,
            FlagGroup::Quality => QUALITY,
            FlagGroup::Rarity => RARITY,
            FlagGroup::Noun => NOUNS,
        }
    }
}

impl Flag {
    /// Every flag, in discriminant order.
    pub const ALL_FLAGS: [Flag; 47] = [
        Flag::All,
        Flag::Unaware,
        Flag::Unidentified,
        Flag::Identified,
        Flag::StarIdentified,
        Flag::Collecting,
        Flag::Artifact,
        Flag::Ego,
        Flag::Good,
        Flag::Nameless,
        Flag::Average,
        Flag::Worthless,
        Flag::Rare,
        Flag::Common,
        Flag::Boosted,
        Flag::MoreDice,
        Flag::MoreBonus,
        Flag::Wanted,
        Flag::Unique,
        Flag::Human,
        Flag::Unreadable,
        Flag::Realm1,
        Flag::Realm2,
        Flag::First,
        Flag::Second,
        Flag::Third,
        Flag::Fourth,
        Flag::Items,
        Flag::Weapons,
        Flag::FavoriteWeapons,
        Flag::Armors,
        Flag::Missiles,
        Flag::Devices,
        Flag::Lights,
        Flag::Junks,
        Flag::Corpses,
        Flag::Spellbooks,
        Flag::Hafted,
        Flag::Shields,
        Flag::Bows,
        Flag::Rings,
        Flag::Amulets,
        Flag::Suits,
        Flag::Cloaks,
        Flag::Helms,
        Flag::Gloves,
        Flag::Boots,
    ];

    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// The exclusive group this flag belongs to, if any.
    pub fn group(self) -> Option<FlagGroup> {
        [FlagGroup::Identification, FlagGroup::Quality, FlagGroup::Rarity, FlagGroup::Noun]
            .into_iter()
            .find(|group| group.members().contains(&self))
    }

    pub fn is_noun(self) -> bool {
        self.bit() >= Flag::Items.bit()
    }
}

/// Fixed-size two-word bit set keyed by [`Flag`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlagSet {
    words: [u32; 2],
}

impl FlagSet {
    pub const fn empty() -> Self {
        FlagSet { words: [0, 0] }
    }

    #[inline]
    fn locate(flag: Flag) -> (usize, u32) {
        let bit = flag.bit() as usize;
        (bit / 32, 1u32 << (bit % 32))
    }

    pub fn contains(&self, flag: Flag) -> bool {
        let (word, mask) = Self::locate(flag);
        self.words[word] & mask != 0
    }

    pub fn insert(&mut self, flag: Flag) {
        let (word, mask) = Self::locate(flag);
        self.words[word] |= mask;
    }

    pub fn remove(&mut self, flag: Flag) {
        let (word, mask) = Self::locate(flag);
        self.words[word] &= !mask;
    }

    /// Clear every sibling in `flag`'s exclusive group, then set `flag`.
    pub fn insert_exclusive(&mut self, flag: Flag) {
        if let Some(group) = flag.group() {
            self.clear_group(group);
        }
        self.insert(flag);
    }

    pub fn clear_group(&mut self, group: FlagGroup) {
        for member in group.members() {
            self.remove(*member);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words == [0, 0]
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// The noun flag currently set, if any.
    pub fn noun(&self) -> Option<Flag> {
        NOUNS.iter().copied().find(|f| self.contains(*f))
    }

    /// Iterate set flags in discriminant order.
    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL_FLAGS.iter().copied().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut set = FlagSet::empty();
        for flag in iter {
            set.insert(flag);
        }
        set
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
