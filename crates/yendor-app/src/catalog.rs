// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::{Category, Record};

/// The fixed reference dataset, grouped by category. Built once at startup
/// and read-only for the life of the process. Record order within a category
/// is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Record>,
    monsters: Vec<Record>,
    commands: Vec<Record>,
    dungeon_features: Vec<Record>,
    symbols: Vec<Record>,
}

fn item(name: &str, symbol: char, description: &str) -> Record {
    Record::Item {
        name: name.to_owned(),
        symbol,
        description: description.to_owned(),
    }
}

fn monster(name: &str, symbol: char, level: i32, description: &str) -> Record {
    Record::Monster {
        name: name.to_owned(),
        symbol,
        level,
        description: description.to_owned(),
    }
}

fn command(keys: &str, action: &str) -> Record {
    Record::Command {
        keys: keys.to_owned(),
        action: action.to_owned(),
    }
}

fn feature(symbol: char, name: &str, description: &str) -> Record {
    Record::Feature {
        symbol,
        name: name.to_owned(),
        description: description.to_owned(),
    }
}

fn map_symbol(glyph: char, meaning: &str) -> Record {
    Record::Symbol {
        glyph,
        meaning: meaning.to_owned(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Records for one category, in display order. Constant time, never fails.
    pub fn records(&self, category: Category) -> &[Record] {
        match category {
            Category::Items => &self.items,
            Category::Monsters => &self.monsters,
            Category::Commands => &self.commands,
            Category::DungeonFeatures => &self.dungeon_features,
            Category::Symbols => &self.symbols,
        }
    }

    pub fn new() -> Self {
        Self {
            items: vec![
                item(
                    "Amulet of Yendor",
                    '"',
                    "The main objective of the game. Retrieve this from the Wizard of Yendor.",
                ),
                item(
                    "Long Sword",
                    ')',
                    "Damage: 1d8. A standard weapon for Knights and Valkyries.",
                ),
                item(
                    "Elven Dagger",
                    ')',
                    "Damage: 1d5. A light, quick weapon that does extra damage to orcs.",
                ),
                item(
                    "Wand of Death",
                    '/',
                    "Fires a ray that can instantly kill most monsters. Very rare.",
                ),
                item(
                    "Magic Lamp",
                    '(',
                    "Can be rubbed to summon a djinni for a wish. Also provides light.",
                ),
                item(
                    "Scroll of Enchant Armor",
                    '?',
                    "Increases the enchantment of worn armor by +1.",
                ),
                item(
                    "Scroll of Enchant Weapon",
                    '?',
                    "Increases the enchantment of wielded weapon by +1.",
                ),
                item(
                    "Ring of Teleport Control",
                    '=',
                    "Allows controlled teleportation when teleporting.",
                ),
                item(
                    "Speed Boots",
                    '[',
                    "Increase movement speed, allowing for more actions per turn.",
                ),
                item(
                    "Potion of Healing",
                    '!',
                    "Restores 1d8 HP and may cure sickness.",
                ),
                item(
                    "Potion of Full Healing",
                    '!',
                    "Restores all HP and cures sickness.",
                ),
                item(
                    "Lizard Corpse",
                    '%',
                    "Can be eaten to cure petrification and confusion. Doesn't rot.",
                ),
                item(
                    "Bag of Holding",
                    '(',
                    "Reduces the weight of items stored inside it. Can hold many items.",
                ),
                item(
                    "Cloak of Magic Resistance",
                    '[',
                    "Provides magic resistance, protecting from some insta-death attacks.",
                ),
                item(
                    "Luckstone",
                    '*',
                    "Increases luck when carried. Gray stones can be luckstones.",
                ),
            ],
            monsters: vec![
                monster(
                    "Grid Bug",
                    'x',
                    0,
                    "A weak monster that can only move in cardinal directions.",
                ),
                monster(
                    "Floating Eye",
                    'e',
                    2,
                    "Can paralyze you if you attack it in melee. Safe to kill with ranged attacks.",
                ),
                monster(
                    "Lich",
                    'L',
                    11,
                    "Powerful undead spellcaster. Can cast spells and summon monsters.",
                ),
                monster(
                    "Mind Flayer",
                    'h',
                    9,
                    "Can attack with mind blast to reduce intelligence and wisdom.",
                ),
                monster(
                    "Dragon",
                    'D',
                    15,
                    "Powerful monster with breath weapon. Different colors have different abilities.",
                ),
                monster(
                    "Purple Worm",
                    'w',
                    15,
                    "Can swallow you whole. Very dangerous at higher levels.",
                ),
                monster(
                    "Minotaur",
                    'H',
                    15,
                    "Always follows you through mazes and corridors. Strong in melee.",
                ),
                monster(
                    "Wizard of Yendor",
                    '@',
                    30,
                    "Primary antagonist who guards the Amulet of Yendor. Can steal items and teleport.",
                ),
                monster(
                    "Shopkeeper",
                    '@',
                    12,
                    "Runs shops. Extremely powerful if angered.",
                ),
                monster(
                    "Watch Captain",
                    '@',
                    10,
                    "Leader of the watch. Will attack if you're marked as a wanted criminal.",
                ),
            ],
            commands: vec![
                command("hjkl or arrow keys", "Move in cardinal directions"),
                command("yubn", "Move diagonally"),
                command(",", "Pick up an item"),
                command(".", "Rest one turn"),
                command("s", "Search surroundings"),
                command("i", "Show inventory"),
                command("e", "Eat something"),
                command("q", "Quaff (drink) a potion"),
                command("r", "Read a scroll or book"),
                command("w", "Wield a weapon"),
                command("W", "Wear armor"),
                command("T", "Take off armor"),
                command("d", "Drop an item"),
                command("D", "Drop multiple items"),
                command("t", "Throw an item"),
                command("a", "Apply (use) a tool"),
                command("z", "Zap a wand"),
                command("Z", "Cast a spell"),
                command("#", "Extended command (followed by command name)"),
                command("#offer", "Sacrifice a corpse on an altar"),
                command("#dip", "Dip an item into something"),
                command("#enhance", "View/enhance weapon skills"),
                command("#pray", "Pray to your god for help"),
                command("^", "Show trap under cursor"),
                command(";", "Show remembered monster type at cursor"),
                command(":", "Look at what's on the ground"),
                command("/", "Show known monster types"),
                command("\\", "Show known object types"),
                command("?", "Help menu"),
                command("S", "Save and exit the game"),
            ],
            dungeon_features: vec![
                feature('<', "Staircase up", "Leads to the previous dungeon level."),
                feature('>', "Staircase down", "Leads to the next dungeon level."),
                feature(
                    '_',
                    "Altar",
                    "Can be used to sacrifice corpses, identify B/U/C status of items.",
                ),
                feature('#', "Corridor", "A passage between rooms."),
                feature('.', "Floor", "Empty floor tile."),
                feature(
                    '{',
                    "Fountain",
                    "Can be dipped into or quaffed from with varying effects.",
                ),
                feature(
                    '}',
                    "Water",
                    "Can be dangerous if you're not waterproof or can't swim.",
                ),
                feature(
                    '\\',
                    "Throne",
                    "Can be sat on for random effects, sometimes good.",
                ),
                feature(
                    '^',
                    "Trap",
                    "Various traps with different effects. Can be disarmed.",
                ),
                feature('|', "Wall", "Solid wall, blocks movement."),
                feature('-', "Wall", "Solid wall, blocks movement."),
                feature('+', "Door", "Can be opened, closed, locked, or broken."),
                feature(
                    '$',
                    "Gold piece",
                    "Currency used for buying items in shops.",
                ),
            ],
            symbols: vec![
                map_symbol('@', "Player or human monster"),
                map_symbol('a', "Ant or other insect"),
                map_symbol('b', "Blob"),
                map_symbol('c', "Canine (dog, wolf, etc.)"),
                map_symbol('d', "Canid (fox, jackal, etc.)"),
                map_symbol('e', "Eye or sphere"),
                map_symbol('f', "Feline or cat"),
                map_symbol('g', "Gremlin or goblin"),
                map_symbol('h', "Humanoid, dwarf, or mind flayer"),
                map_symbol('i', "Imp or minor demon"),
                map_symbol('j', "Jelly"),
                map_symbol('k', "Kobold"),
                map_symbol('l', "Leprechaun"),
                map_symbol('m', "Mimic"),
                map_symbol('n', "Nymph"),
                map_symbol('o', "Orc"),
                map_symbol('p', "Piercer"),
                map_symbol('q', "Quadruped"),
                map_symbol('r', "Rodent"),
                map_symbol('s', "Spider or centipede"),
                map_symbol('t', "Trapper or lurker above"),
                map_symbol('u', "Unicorn or horse"),
                map_symbol('v', "Vortex"),
                map_symbol('w', "Worm"),
                map_symbol('x', "Xan or other mythical/fantastic insect"),
                map_symbol('y', "Yellow light or other light source"),
                map_symbol('z', "Zruty"),
                map_symbol('A', "Angelic being"),
                map_symbol('B', "Bat or bird"),
                map_symbol('C', "Centaur"),
                map_symbol('D', "Dragon"),
                map_symbol('E', "Elemental"),
                map_symbol('F', "Fungus or mold"),
                map_symbol('G', "Gnome"),
                map_symbol('H', "Giant humanoid"),
                map_symbol('J', "Jabberwock"),
                map_symbol('K', "Kop (Keystone Kops)"),
                map_symbol('L', "Lich"),
                map_symbol('M', "Mummy"),
                map_symbol('N', "Naga"),
                map_symbol('O', "Ogre"),
                map_symbol('P', "Pudding or Ooze"),
                map_symbol('Q', "Quantum mechanic"),
                map_symbol('R', "Rust monster"),
                map_symbol('S', "Snake"),
                map_symbol('T', "Troll"),
                map_symbol('U', "Umber hulk"),
                map_symbol('V', "Vampire"),
                map_symbol('W', "Wraith or ghost"),
                map_symbol('X', "Xorn"),
                map_symbol('Y', "Apelike creature"),
                map_symbol('Z', "Zombie"),
                map_symbol('!', "Potion"),
                map_symbol('"', "Amulet"),
                map_symbol('#', "Iron bars or corridor"),
                map_symbol('$', "Gold piece"),
                map_symbol('%', "Food or corpse"),
                map_symbol('(', "Tool"),
                map_symbol(')', "Weapon"),
                map_symbol('*', "Gem or rock"),
                map_symbol('[', "Armor"),
                map_symbol('=', "Ring"),
                map_symbol('?', "Scroll"),
                map_symbol('/', "Wand"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::model::{Category, Record};

    #[test]
    fn every_category_is_populated() {
        let catalog = Catalog::new();
        for category in Category::ALL {
            assert!(
                !catalog.records(category).is_empty(),
                "empty category {category:?}"
            );
        }
    }

    #[test]
    fn category_sizes_match_reference_data() {
        let catalog = Catalog::new();
        assert_eq!(catalog.records(Category::Items).len(), 15);
        assert_eq!(catalog.records(Category::Monsters).len(), 10);
        assert_eq!(catalog.records(Category::Commands).len(), 30);
        assert_eq!(catalog.records(Category::DungeonFeatures).len(), 13);
        assert_eq!(catalog.records(Category::Symbols).len(), 64);
    }

    #[test]
    fn records_carry_the_variant_of_their_category() {
        let catalog = Catalog::new();
        assert!(
            catalog
                .records(Category::Items)
                .iter()
                .all(|record| matches!(record, Record::Item { .. }))
        );
        assert!(
            catalog
                .records(Category::Commands)
                .iter()
                .all(|record| matches!(record, Record::Command { .. }))
        );
        assert!(
            catalog
                .records(Category::Symbols)
                .iter()
                .all(|record| matches!(record, Record::Symbol { .. }))
        );
    }

    #[test]
    fn first_item_is_the_amulet() {
        let catalog = Catalog::new();
        let Record::Item { name, symbol, .. } = &catalog.records(Category::Items)[0] else {
            panic!("expected an item record");
        };
        assert_eq!(name, "Amulet of Yendor");
        assert_eq!(*symbol, '"');
    }
}
