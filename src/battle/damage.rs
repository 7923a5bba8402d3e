use crate::battle::rng::{uniform_between, RandomSource};
use crate::combatant::{Combatant, MoveDescriptor};
use crate::errors::ValidationResult;
use schema::Element;
use serde::{Deserialize, Serialize};

pub const CRITICAL_HIT_MESSAGE: &str = "A critical hit!";
pub const SUPER_EFFECTIVE_MESSAGE: &str = "It's super effective!";
pub const NOT_VERY_EFFECTIVE_MESSAGE: &str = "It's not very effective...";
pub const NO_EFFECT_MESSAGE: &str = "It doesn't affect the opponent...";

/// A critical hit always doubles damage; only its chance is tunable.
pub const CRITICAL_MULTIPLIER: f64 = 2.0;

/// Tunable multipliers and probabilities for damage resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageRules {
    /// Chance that a hit is critical (1/16).
    pub critical_chance: f64,
    /// Same-element attack bonus.
    pub stab_multiplier: f64,
    pub random_factor_min: f64,
    pub random_factor_max: f64,
}

impl Default for DamageRules {
    fn default() -> Self {
        Self {
            critical_chance: 0.0625,
            stab_multiplier: 1.5,
            random_factor_min: 0.85,
            random_factor_max: 1.0,
        }
    }
}

/// Result of a single resolved hit. The caller subtracts `damage` from its
/// own record of the defender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub damage: u32,
    pub effectiveness: f64,
    pub critical: bool,
    pub message: String,
}

impl DamageOutcome {
    pub fn is_super_effective(&self) -> bool {
        self.effectiveness > 1.0
    }

    pub fn is_immune(&self) -> bool {
        self.effectiveness == 0.0
    }
}

/// Resolves move damage. Holds only its rules, so it is cheap to copy and
/// safe to share between callers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageResolver {
    rules: DamageRules,
}

impl DamageResolver {
    pub fn new(rules: DamageRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &DamageRules {
        &self.rules
    }

    /// Computes the damage `move_used` deals from `attacker` to `defender`,
    /// assuming the move already hit.
    ///
    /// Draw order: critical hit, then the random factor. Immune targets
    /// consume no draws and take 0 damage.
    pub fn resolve(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        move_used: &MoveDescriptor,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> ValidationResult<DamageOutcome> {
        attacker.validate()?;
        defender.validate()?;
        move_used.validate()?;

        let effectiveness = Element::effectiveness_against(move_used.element, &defender.elements);
        if effectiveness == 0.0 {
            tracing::debug!(
                move_name = %move_used.name,
                element = %move_used.element,
                "defender is immune"
            );
            return Ok(DamageOutcome {
                damage: 0,
                effectiveness,
                critical: false,
                message: NO_EFFECT_MESSAGE.to_string(),
            });
        }

        let base = calculate_base_damage(
            attacker.level,
            move_used.power,
            attacker.stats.attack,
            defender.stats.defense,
        );
        let stab = self.stab_multiplier(attacker, move_used.element);
        let critical = roll_critical_hit(self.rules.critical_chance, rng);
        let critical_multiplier = if critical {
            CRITICAL_MULTIPLIER
        } else {
            1.0
        };
        let random_factor = uniform_between(
            rng,
            "damage random factor",
            self.rules.random_factor_min,
            self.rules.random_factor_max,
        );

        let raw = base * effectiveness * stab * critical_multiplier * random_factor;
        let damage = (raw.floor() as u32).max(1);

        tracing::debug!(
            move_name = %move_used.name,
            base,
            effectiveness,
            stab,
            critical,
            random_factor,
            damage,
            "resolved damage"
        );

        Ok(DamageOutcome {
            damage,
            effectiveness,
            critical,
            message: damage_message(damage, effectiveness, critical),
        })
    }

    fn stab_multiplier(&self, attacker: &Combatant, move_element: Element) -> f64 {
        if attacker.has_element(move_element) {
            self.rules.stab_multiplier
        } else {
            1.0
        }
    }
}

/// Resolves damage with the default rules.
pub fn resolve_damage(
    attacker: &Combatant,
    defender: &Combatant,
    move_used: &MoveDescriptor,
    rng: &mut (impl RandomSource + ?Sized),
) -> ValidationResult<DamageOutcome> {
    DamageResolver::default().resolve(attacker, defender, move_used, rng)
}

/// Level/power/attack/defense part of the damage formula, before any multiplier.
/// Formula: (2 * level / 5 + 2) * power * attack / defense / 50 + 2
pub fn calculate_base_damage(level: u8, power: u16, attack: u8, defense: u8) -> f64 {
    let level = level as f64;
    let power = power as f64;
    let attack = attack as f64;
    let defense = defense as f64;

    (2.0 * level / 5.0 + 2.0) * power * attack / defense / 50.0 + 2.0
}

/// Rolls for a critical hit. One draw, always.
pub fn roll_critical_hit(chance: f64, rng: &mut (impl RandomSource + ?Sized)) -> bool {
    rng.next_unit("critical hit") < chance
}

/// Builds the battle-log line for a hit. Critical and effectiveness phrases
/// stack; the plain damage line only appears when neither applies.
pub fn damage_message(damage: u32, effectiveness: f64, critical: bool) -> String {
    if effectiveness == 0.0 {
        return NO_EFFECT_MESSAGE.to_string();
    }

    let mut parts = Vec::new();
    if critical {
        parts.push(CRITICAL_HIT_MESSAGE.to_string());
    }
    if effectiveness > 1.0 {
        parts.push(SUPER_EFFECTIVE_MESSAGE.to_string());
    } else if effectiveness < 1.0 {
        parts.push(NOT_VERY_EFFECTIVE_MESSAGE.to_string());
    }
    if parts.is_empty() {
        parts.push(format!("Dealt {} damage!", damage));
    }
    parts.join(" ")
}
