use std::collections::BTreeMap;

use strum_macros::{Display, EnumString};

/// Known RAM layouts that can be watched.
#[derive(Debug, Display, EnumString, Copy, Clone, Eq, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum WatchPreset {
    #[strum(to_string = "none")]
    Disabled,
    SuperMarioBros,
}

impl Default for WatchPreset {
    fn default() -> Self {
        Self::SuperMarioBros
    }
}

const SUPER_MARIO_BROS: [(u16, &str); 23] = [
    (0x075A, "Player Lives"),
    (0x07ED, "Coins"),
    (0x075F, "World Number"),
    (0x0760, "Level Number"),
    (0x071C, "Horizontal Scroll"),
    // normal, game over, ...
    (0x000E, "Game Mode State"),
    // 0 while on the ground
    (0x001D, "Jumping State"),
    (0x0086, "Vertical Velocity"),
    // 0 small, 1 big, 2 fire
    (0x00B5, "Mario State"),
    (0x0756, "Time Units"),
    (0x0757, "Time Tens"),
    (0x0758, "Time Hundreds"),
    (0x0747, "Enemy State Array"),
    (0x0433, "Sprite X Positions"),
    (0x0434, "Sprite Y Positions"),
    (0x0700, "Score Units"),
    (0x0701, "Score Tens"),
    (0x0702, "Score Hundreds"),
    (0x0703, "Score Thousands"),
    (0x0704, "Score Ten Thousands"),
    (0x0705, "Score Hundred Thousands"),
    (0x0706, "Score Millions"),
    (0x0045, "Power-Up State"),
];

/// Labels for RAM addresses whose writes get traced.
///
/// Keys are raw CPU addresses, so a write through a RAM mirror is not
/// reported.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WatchList {
    entries: BTreeMap<u16, &'static str>,
}

impl WatchList {
    pub fn from_preset(preset: WatchPreset) -> Self {
        match preset {
            WatchPreset::Disabled => Self::default(),
            WatchPreset::SuperMarioBros => SUPER_MARIO_BROS.into_iter().collect(),
        }
    }

    pub fn observe(&self, address: u16, value: u8) -> Option<WatchHit> {
        self.entries.get(&address).map(|&label| WatchHit {
            label,
            address,
            value,
        })
    }

    pub fn label(&self, address: u16) -> Option<&'static str> {
        self.entries.get(&address).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &'static str)> + '_ {
        self.entries.iter().map(|(&a, &l)| (a, l))
    }
}

impl FromIterator<(u16, &'static str)> for WatchList {
    fn from_iter<T: IntoIterator<Item = (u16, &'static str)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WatchHit {
    pub label: &'static str,
    pub address: u16,
    pub value: u8,
}

impl std::fmt::Display for WatchHit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} changed to: {}", self.label, self.value)
    }
}
