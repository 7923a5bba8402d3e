use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Elemental category of a creature or a move.
///
/// Tags parse case-insensitively from their lowercase names (`"fire"`, `"Ghost"`),
/// which is also the form they take on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Element {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Steel,
    Dark,
    Fairy,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag: &'static str = self.into();
        write!(f, "{}", tag)
    }
}

impl Element {
    /// Multiplier for a single attacking element against a single defending element.
    ///
    /// Returns: 2.0 = Super Effective, 1.0 = Neutral, 0.5 = Not Very Effective, 0.0 = No Effect.
    /// The table is sparse and asymmetric: any pair not listed here is neutral.
    pub fn effectiveness(attacking: Element, defending: Element) -> f64 {
        use Element::*;

        match (attacking, defending) {
            // Fire
            (Fire, Grass) | (Fire, Ice) => 2.0,
            (Fire, Water) | (Fire, Fire) => 0.5,

            // Water
            (Water, Fire) | (Water, Ground) => 2.0,
            (Water, Grass) | (Water, Water) => 0.5,

            // Grass
            (Grass, Water) | (Grass, Ground) => 2.0,
            (Grass, Fire) | (Grass, Grass) => 0.5,

            // Electric
            (Electric, Water) | (Electric, Flying) => 2.0,
            (Electric, Grass) | (Electric, Electric) => 0.5,
            (Electric, Ground) => 0.0,

            // Ice
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) => 2.0,
            (Ice, Fire) => 0.5,

            // Fighting
            (Fighting, Normal) | (Fighting, Ice) => 2.0,
            (Fighting, Flying) => 0.5,

            // Poison
            (Poison, Grass) => 2.0,
            (Poison, Ground) => 0.5,

            // Ground
            (Ground, Fire) | (Ground, Electric) => 2.0,
            (Ground, Grass) => 0.5,

            // Flying
            (Flying, Grass) | (Flying, Fighting) => 2.0,
            (Flying, Electric) => 0.5,

            // Psychic
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,

            // Bug
            (Bug, Grass) | (Bug, Psychic) => 2.0,
            (Bug, Fire) => 0.5,

            // Rock
            (Rock, Fire) | (Rock, Ice) => 2.0,
            (Rock, Fighting) => 0.5,

            // Ghost
            (Ghost, Psychic) | (Ghost, Ghost) => 2.0,

            // Dragon
            (Dragon, Dragon) => 2.0,

            _ => 1.0,
        }
    }

    /// Combined multiplier of `attacking` against every defending element.
    pub fn effectiveness_against(attacking: Element, defending: &[Element]) -> f64 {
        defending
            .iter()
            .map(|&defender| Self::effectiveness(attacking, defender))
            .product()
    }

    pub fn is_immune(attacking: Element, defending: Element) -> bool {
        Self::effectiveness(attacking, defending) == 0.0
    }
}
