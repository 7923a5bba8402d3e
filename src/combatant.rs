//! Battle-relevant snapshots supplied by the caller for each engine call.
//!
//! The engine never owns a creature record: callers build a [`Combatant`] from
//! whatever they store, hand it in, and apply the returned deltas themselves.

use crate::errors::{check_fraction, check_range, ValidationError, ValidationResult};
use schema::{BaseStats, Element, Rarity};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 100;
pub const MIN_BASE_STAT: u8 = 1;
pub const MAX_BASE_STAT: u8 = 255;
pub const MAX_MOVE_POWER: u16 = 250;

/// A creature as seen by the damage resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Display name, only used for narrative text.
    #[serde(default)]
    pub name: Option<String>,
    pub level: u8,
    pub stats: BaseStats,
    /// One or two elements. Order matters for nothing but readability.
    pub elements: Vec<Element>,
    pub rarity: Rarity,
}

impl Combatant {
    pub fn new(level: u8, stats: BaseStats, elements: Vec<Element>, rarity: Rarity) -> Self {
        Self {
            name: None,
            level,
            stats,
            elements,
            rarity,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn has_element(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    /// Name for narrative text, falling back to a generic noun.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("The creature")
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_level("level", self.level)?;
        for (field, value) in self.stats.named() {
            check_range(field, value, MIN_BASE_STAT, MAX_BASE_STAT)?;
        }
        if self.elements.is_empty() || self.elements.len() > 2 {
            return Err(ValidationError::ElementCount {
                field: "elements",
                count: self.elements.len(),
            });
        }
        check_distinct("elements", &self.elements)
    }
}

/// A move as the damage resolver needs it. The move is assumed to have hit;
/// accuracy is carried for callers that roll it themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub name: String,
    pub element: Element,
    pub power: u16,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
}

fn default_accuracy() -> f64 {
    1.0
}

impl MoveDescriptor {
    pub fn new(name: impl Into<String>, element: Element, power: u16) -> Self {
        Self {
            name: name.into(),
            element,
            power,
            accuracy: default_accuracy(),
        }
    }

    /// The move used when a creature has nothing else to pick from.
    pub fn tackle() -> Self {
        Self::new("Tackle", Element::Normal, 40)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "move.name" });
        }
        check_range("move.power", self.power, 0, MAX_MOVE_POWER)?;
        check_fraction("move.accuracy", self.accuracy)?;
        Ok(())
    }
}

pub(crate) fn validate_level(field: &'static str, level: u8) -> ValidationResult<u8> {
    check_range(field, level, MIN_LEVEL, MAX_LEVEL)
}

/// Parses an element tag such as `"fire"`.
pub fn parse_element(tag: &str) -> ValidationResult<Element> {
    Element::from_str(tag.trim()).map_err(|_| ValidationError::UnknownElement(tag.to_string()))
}

/// Parses a rarity tier such as `"legendary"`.
pub fn parse_rarity(tag: &str) -> ValidationResult<Rarity> {
    Rarity::from_str(tag.trim()).map_err(|_| ValidationError::UnknownRarity(tag.to_string()))
}

/// Parses a list of element tags, enforcing the 1..=2 count.
pub fn parse_elements(field: &'static str, tags: &[String]) -> ValidationResult<Vec<Element>> {
    if tags.is_empty() || tags.len() > 2 {
        return Err(ValidationError::ElementCount {
            field,
            count: tags.len(),
        });
    }
    let elements = tags
        .iter()
        .map(|tag| parse_element(tag))
        .collect::<ValidationResult<Vec<_>>>()?;
    check_distinct(field, &elements)?;
    Ok(elements)
}

/// Looks up the effectiveness multiplier for tag inputs, e.g. `"electric"`
/// against `["ground", "flying"]`.
pub fn effectiveness_of_tags(
    attack_tag: &str,
    defender_field: &'static str,
    defender_tags: &[String],
) -> ValidationResult<f64> {
    let attack = parse_element(attack_tag)?;
    let defenders = parse_elements(defender_field, defender_tags)?;
    Ok(Element::effectiveness_against(attack, &defenders))
}

// A repeated element would square its effectiveness.
fn check_distinct(field: &'static str, elements: &[Element]) -> ValidationResult<()> {
    match elements {
        [first, second] if first == second => Err(ValidationError::DuplicateElement {
            field,
            element: *first,
        }),
        _ => Ok(()),
    }
}
