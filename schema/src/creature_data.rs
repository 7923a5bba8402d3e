use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Rarity tier of a species, as reported by the species-data service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag: &'static str = self.into();
        write!(f, "{}", tag)
    }
}

/// Battle-relevant base stats of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub health: u8,
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        self.health as u16 + self.attack as u16 + self.defense as u16 + self.speed as u16
    }

    /// Stats paired with their field names, in declaration order.
    pub fn named(&self) -> [(&'static str, u8); 4] {
        [
            ("health", self.health),
            ("attack", self.attack),
            ("defense", self.defense),
            ("speed", self.speed),
        ]
    }
}
