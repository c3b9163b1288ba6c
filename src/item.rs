//! Read-only view of a dungeon item, as the matcher sees it.
//!
//! The item model itself (object kinds, ego tables, monster races, the player's
//! pack) lives outside this crate. [`ItemView`] is the capability it exposes;
//! [`ItemSnapshot`] is a plain owned implementation used by the editor (an item
//! picked for "search by item" has to outlive the prompt that chose it), by the
//! CLI and by tests.

/// Broad object class, fine-grained enough to answer every category noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemKind {
    Sword,
    Hafted,
    Polearm,
    Digging,
    Bow,
    Shot,
    Arrow,
    Bolt,
    Shield,
    SoftArmor,
    HardArmor,
    DragonArmor,
    Cloak,
    Helm,
    Crown,
    Gloves,
    Boots,
    Ring,
    Amulet,
    Light,
    Scroll,
    Potion,
    Staff,
    Wand,
    Rod,
    Food,
    Flask,
    Spellbook,
    Corpse,
    Skeleton,
    Statue,
    Bottle,
    Junk,
    Chest,
    #[default]
    Other,
}

impl ItemKind {
    pub fn is_melee_weapon(self) -> bool {
        matches!(self, ItemKind::Sword | ItemKind::Hafted | ItemKind::Polearm | ItemKind::Digging)
    }

    /// Melee weapons and missile launchers.
    pub fn is_weapon(self) -> bool {
        self.is_melee_weapon() || self == ItemKind::Bow
    }

    pub fn is_ammo(self) -> bool {
        matches!(self, ItemKind::Shot | ItemKind::Arrow | ItemKind::Bolt)
    }

    pub fn is_armour(self) -> bool {
        matches!(
            self,
            ItemKind::Shield
                | ItemKind::SoftArmor
                | ItemKind::HardArmor
                | ItemKind::DragonArmor
                | ItemKind::Cloak
                | ItemKind::Helm
                | ItemKind::Crown
                | ItemKind::Gloves
                | ItemKind::Boots
        )
    }

    /// Anything that can be wielded, worn or fired.
    pub fn is_equipment(self) -> bool {
        self.is_weapon()
            || self.is_ammo()
            || self.is_armour()
            || matches!(self, ItemKind::Ring | ItemKind::Amulet | ItemKind::Light)
    }

    pub fn is_device(self) -> bool {
        matches!(self, ItemKind::Scroll | ItemKind::Staff | ItemKind::Wand | ItemKind::Rod)
    }

    pub fn is_junk(self) -> bool {
        matches!(self, ItemKind::Skeleton | ItemKind::Bottle | ItemKind::Junk | ItemKind::Statue)
    }

    pub fn is_body_armour(self) -> bool {
        matches!(self, ItemKind::SoftArmor | ItemKind::HardArmor | ItemKind::DragonArmor)
    }
}

/// Pseudo-identification result for an item that was sensed but not identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feeling {
    Terrible,
    Worthless,
    Cursed,
    Broken,
    Average,
    Good,
    Excellent,
    Special,
    Uncursed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dice {
    pub count: u8,
    pub sides: u8,
}

impl Dice {
    pub const fn new(count: u8, sides: u8) -> Self {
        Dice { count, sides }
    }

    pub fn product(self) -> u32 {
        u32::from(self.count) * u32::from(self.sides)
    }
}

/// Facts about the monster a corpse, skeleton or statue came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonsterOrigin {
    pub unique: bool,
    /// Person, humanoid or troll-like races.
    pub humanoid: bool,
    /// Currently on the bounty list.
    pub wanted: bool,
}

/// Which of the player's realms a spellbook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookRealm {
    First,
    Second,
    #[default]
    Other,
}

/// Spellbook facts, already resolved against the current player.
///
/// Classes that can read every realm report `BookRealm::Other` so that the
/// "first realm's" / "second realm's" keywords never match for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookInfo {
    pub realm: BookRealm,
    /// Position of the book inside its realm, 0 for the first book.
    pub position: u8,
    pub readable: bool,
}

/// Item query capability consumed by the matcher and by rule synthesis.
pub trait ItemView {
    fn kind(&self) -> ItemKind;
    /// Flavour is known (the player knows what kind of object this is).
    fn is_aware(&self) -> bool;
    /// Identified.
    fn is_known(&self) -> bool;
    /// *Identified*: every property is known.
    fn is_fully_known(&self) -> bool;
    /// Sensed feeling, if the item was pseudo-identified.
    fn feeling(&self) -> Option<Feeling>;
    fn dice(&self) -> Dice;
    /// Dice of the object kind before any enchantment.
    fn base_dice(&self) -> Dice;
    fn pval(&self) -> i32;
    fn to_hit(&self) -> i32;
    fn to_dam(&self) -> i32;
    fn to_ac(&self) -> i32;
    /// Shop value as the player currently perceives it.
    fn value(&self) -> i64;
    fn is_ego(&self) -> bool;
    fn is_artifact(&self) -> bool;
    fn is_rare(&self) -> bool;
    fn is_cursed(&self) -> bool;
    fn is_broken(&self) -> bool;
    fn ego_name(&self) -> Option<&str>;
    /// The active quest's designated drop.
    fn is_quest_target(&self) -> bool;
    /// One of the class's favourite weapon kinds.
    fn is_favorite_weapon(&self) -> bool;
    fn monster(&self) -> Option<MonsterOrigin>;
    fn spellbook(&self) -> Option<BookInfo>;
    fn inscription(&self) -> Option<&str>;
    /// Some other pack slot already holds an item this one would stack with.
    fn stacks_with_inventory(&self) -> bool;

    fn is_nameless(&self) -> bool {
        !self.is_ego() && !self.is_artifact()
    }
}

/// Owned item facts plus the item's display name (without flavour or plural).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemSnapshot {
    pub name: String,
    pub kind: ItemKind,
    pub aware: bool,
    pub known: bool,
    pub fully_known: bool,
    pub feeling: Option<Feeling>,
    pub dice: Dice,
    pub base_dice: Dice,
    pub pval: i32,
    pub to_hit: i32,
    pub to_dam: i32,
    pub to_ac: i32,
    pub value: i64,
    pub ego: Option<String>,
    pub artifact: bool,
    pub rare: bool,
    pub cursed: bool,
    pub broken: bool,
    pub quest_target: bool,
    pub favorite: bool,
    pub monster: Option<MonsterOrigin>,
    pub book: Option<BookInfo>,
    pub inscription: Option<String>,
    pub stacks: bool,
}

impl ItemSnapshot {
    /// An aware, identified, unremarkable item of `kind` worth a little gold.
    pub fn new(name: &str, kind: ItemKind) -> Self {
        ItemSnapshot { name: name.to_string(), kind, aware: true, known: true, value: 10, ..Default::default() }
    }

    /// Lower-cased display name, the form the matcher expects.
    pub fn match_name(&self) -> String {
        self.name.to_lowercase()
    }
}

impl ItemView for ItemSnapshot {
    fn kind(&self) -> ItemKind {
        self.kind
    }
    fn is_aware(&self) -> bool {
        self.aware
    }
    fn is_known(&self) -> bool {
        self.known
    }
    fn is_fully_known(&self) -> bool {
        self.fully_known
    }
    fn feeling(&self) -> Option<Feeling> {
        self.feeling
    }
    fn dice(&self) -> Dice {
        self.dice
    }
    fn base_dice(&self) -> Dice {
        self.base_dice
    }
    fn pval(&self) -> i32 {
        self.pval
    }
    fn to_hit(&self) -> i32 {
        self.to_hit
    }
    fn to_dam(&self) -> i32 {
        self.to_dam
    }
    fn to_ac(&self) -> i32 {
        self.to_ac
    }
    fn value(&self) -> i64 {
        self.value
    }
    fn is_ego(&self) -> bool {
        self.ego.is_some()
    }
    fn is_artifact(&self) -> bool {
        self.artifact
    }
    fn is_rare(&self) -> bool {
        self.rare
    }
    fn is_cursed(&self) -> bool {
        self.cursed
    }
    fn is_broken(&self) -> bool {
        self.broken
    }
    fn ego_name(&self) -> Option<&str> {
        self.ego.as_deref()
    }
    fn is_quest_target(&self) -> bool {
        self.quest_target
    }
    fn is_favorite_weapon(&self) -> bool {
        self.favorite
    }
    fn monster(&self) -> Option<MonsterOrigin> {
        self.monster
    }
    fn spellbook(&self) -> Option<BookInfo> {
        self.book
    }
    fn inscription(&self) -> Option<&str> {
        self.inscription.as_deref()
    }
    fn stacks_with_inventory(&self) -> bool {
        self.stacks
    }
}
