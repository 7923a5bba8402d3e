use crate::battle::rng::ScriptedRandom;
use crate::combatant::Combatant;
use crate::errors::ValidationResult;
use schema::{BaseStats, Element, Rarity};

/// A builder for test combatants with even stats and a single element.
///
/// # Example
/// ```ignore
/// let charmander = TestCombatantBuilder::new(Element::Fire, 10)
///     .with_name("Charmander")
///     .with_attack(52)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: Option<String>,
    level: u8,
    stats: BaseStats,
    elements: Vec<Element>,
    rarity: Rarity,
}

impl TestCombatantBuilder {
    /// Creates a builder for a common creature with every base stat at 50.
    pub fn new(element: Element, level: u8) -> Self {
        Self {
            name: None,
            level,
            stats: BaseStats {
                health: 50,
                attack: 50,
                defense: 50,
                speed: 50,
            },
            elements: vec![element],
            rarity: Rarity::Common,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Replaces the element list, e.g. for dual-element creatures.
    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_attack(mut self, attack: u8) -> Self {
        self.stats.attack = attack;
        self
    }

    pub fn with_defense(mut self, defense: u8) -> Self {
        self.stats.defense = defense;
        self
    }

    pub fn build(self) -> Combatant {
        let combatant = Combatant::new(self.level, self.stats, self.elements, self.rarity);
        match self.name {
            Some(name) => combatant.with_name(name),
            None => combatant,
        }
    }
}

/// Draws that never crit and land the random factor mid-range (0.925).
pub fn no_crit_rng() -> ScriptedRandom {
    ScriptedRandom::new(vec![0.5])
}

/// Helper function to assert that a Result is Ok and return the value.
pub fn assert_ok<T>(result: ValidationResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
