// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Items,
    Monsters,
    Commands,
    DungeonFeatures,
    Symbols,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Items,
        Self::Monsters,
        Self::Commands,
        Self::DungeonFeatures,
        Self::Symbols,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Items => "Items",
            Self::Monsters => "Monsters",
            Self::Commands => "Commands",
            Self::DungeonFeatures => "Dungeon Features",
            Self::Symbols => "Symbols",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "items" => Some(Self::Items),
            "monsters" => Some(Self::Monsters),
            "commands" => Some(Self::Commands),
            "dungeon_features" => Some(Self::DungeonFeatures),
            "symbols" => Some(Self::Symbols),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Monsters => "monsters",
            Self::Commands => "commands",
            Self::DungeonFeatures => "dungeon_features",
            Self::Symbols => "symbols",
        }
    }

    /// The category after `self` in `ALL` order, wrapping at the end.
    pub fn next(self) -> Self {
        self.rotate(1)
    }

    /// The category before `self` in `ALL` order, wrapping at the start.
    pub fn prev(self) -> Self {
        self.rotate(-1)
    }

    fn rotate(self, delta: isize) -> Self {
        let current = Self::ALL
            .iter()
            .position(|category| *category == self)
            .unwrap_or(0) as isize;
        let len = Self::ALL.len() as isize;
        Self::ALL[(current + delta).rem_euclid(len) as usize]
    }
}

/// One catalog entry. The variant carries the category-specific field set, so
/// searchable-field selection dispatches on the tag rather than on field
/// presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    Item {
        name: String,
        symbol: char,
        description: String,
    },
    Monster {
        name: String,
        symbol: char,
        level: i32,
        description: String,
    },
    Command {
        keys: String,
        action: String,
    },
    Feature {
        symbol: char,
        name: String,
        description: String,
    },
    Symbol {
        glyph: char,
        meaning: String,
    },
}

impl Record {
    /// Case-insensitive substring test against this record's searchable
    /// fields. `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        match self {
            Self::Item {
                name, description, ..
            }
            | Self::Monster {
                name, description, ..
            }
            | Self::Feature {
                name, description, ..
            } => contains(name) || contains(description),
            Self::Command { keys, action } => contains(keys) || contains(action),
            Self::Symbol { glyph, meaning } => {
                contains(&glyph.to_string()) || contains(meaning)
            }
        }
    }

    /// One-line list representation, shaped per category.
    pub fn list_line(&self) -> String {
        match self {
            Self::Item { name, symbol, .. } | Self::Feature { symbol, name, .. } => {
                format!("{symbol} {name}")
            }
            Self::Monster {
                name,
                symbol,
                level,
                ..
            } => format!("{symbol} {name} (Level {level})"),
            Self::Command { keys, action } => format!("{keys} - {action}"),
            Self::Symbol { glyph, meaning } => format!("{glyph} - {meaning}"),
        }
    }

    /// Long-form text for the detail pane. Commands and symbols carry no
    /// description; their rows already show everything there is.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Item { description, .. }
            | Self::Monster { description, .. }
            | Self::Feature { description, .. } => Some(description),
            Self::Command { .. } | Self::Symbol { .. } => None,
        }
    }
}
