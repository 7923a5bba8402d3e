use crate::battle::rng::RandomSource;
use crate::errors::{check_fraction, ValidationResult};
use schema::Rarity;
use serde::{Deserialize, Serialize};

/// Base capture rates per rarity tier and the clamp applied to the final rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureRules {
    pub common: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub legendary: f64,
    /// How much a full health bar suppresses the base rate.
    pub health_weight: f64,
    pub min_rate: f64,
    pub max_rate: f64,
}

impl Default for CaptureRules {
    fn default() -> Self {
        Self {
            common: 0.80,
            uncommon: 0.60,
            rare: 0.40,
            legendary: 0.10,
            health_weight: 0.5,
            min_rate: 0.05,
            max_rate: 0.95,
        }
    }
}

impl CaptureRules {
    pub fn base_rate(&self, rarity: Rarity) -> f64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Uncommon => self.uncommon,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub capture_rate: f64,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CaptureResolver {
    rules: CaptureRules,
}

impl CaptureResolver {
    pub fn new(rules: CaptureRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CaptureRules {
        &self.rules
    }

    /// Calculate the capture probability.
    /// Formula: clamp(base_rate * (1 - health_weight * health_fraction), min_rate, max_rate)
    pub fn capture_rate(&self, rarity: Rarity, health_fraction: f64) -> ValidationResult<f64> {
        let health_fraction = check_fraction("health_fraction", health_fraction)?;
        let health_modifier = 1.0 - self.rules.health_weight * health_fraction;
        let rate = self.rules.base_rate(rarity) * health_modifier;
        Ok(rate.clamp(self.rules.min_rate, self.rules.max_rate))
    }

    /// Calculates the rate and rolls once for success.
    pub fn resolve(
        &self,
        rarity: Rarity,
        health_fraction: f64,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> ValidationResult<CaptureOutcome> {
        let capture_rate = self.capture_rate(rarity, health_fraction)?;
        let success = roll_capture_success(capture_rate, rng);

        tracing::debug!(%rarity, health_fraction, capture_rate, success, "resolved capture");

        Ok(CaptureOutcome {
            capture_rate,
            success,
            message: capture_message(capture_rate, success),
        })
    }
}

/// Capture probability with the default rules.
pub fn capture_rate(rarity: Rarity, health_fraction: f64) -> ValidationResult<f64> {
    CaptureResolver::default().capture_rate(rarity, health_fraction)
}

/// Attempts a capture with the default rules.
pub fn resolve_capture(
    rarity: Rarity,
    health_fraction: f64,
    rng: &mut (impl RandomSource + ?Sized),
) -> ValidationResult<CaptureOutcome> {
    CaptureResolver::default().resolve(rarity, health_fraction, rng)
}

/// Roll for capture success. Returns true if the draw lands under the rate.
pub fn roll_capture_success(capture_rate: f64, rng: &mut (impl RandomSource + ?Sized)) -> bool {
    rng.next_unit("capture roll") < capture_rate
}

pub fn capture_message(capture_rate: f64, success: bool) -> String {
    let percent = capture_rate * 100.0;
    if success {
        format!(
            "Gotcha! The creature was caught! (Capture rate: {:.1}%)",
            percent
        )
    } else {
        format!(
            "Oh no! The creature broke free! (Capture rate: {:.1}%)",
            percent
        )
    }
}

/// Get a descriptive capture rate band for display purposes
pub fn capture_rate_description(capture_rate: f64) -> &'static str {
    match capture_rate {
        r if r >= 0.8 => "Excellent",
        r if r >= 0.6 => "Good",
        r if r >= 0.4 => "Fair",
        r if r >= 0.2 => "Poor",
        _ => "Very Poor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::ScriptedRandom;
    use crate::errors::ValidationError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[rstest]
    #[case(Rarity::Common, 1.0, 0.40)]
    #[case(Rarity::Common, 0.0, 0.80)]
    #[case(Rarity::Uncommon, 0.5, 0.45)]
    #[case(Rarity::Rare, 0.2, 0.36)]
    #[case(Rarity::Legendary, 0.0, 0.10)]
    #[case(Rarity::Legendary, 1.0, 0.05)]
    fn test_capture_rate_table(
        #[case] rarity: Rarity,
        #[case] health_fraction: f64,
        #[case] expected: f64,
    ) {
        let rate = capture_rate(rarity, health_fraction).unwrap();
        assert!(approx(rate, expected), "{} != {}", rate, expected);
    }

    #[test]
    fn test_capture_rate_is_clamped_to_upper_bound() {
        let generous = CaptureResolver::new(CaptureRules {
            common: 1.0,
            ..CaptureRules::default()
        });
        assert_eq!(generous.capture_rate(Rarity::Common, 0.0), Ok(0.95));
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.01)]
    #[case(f64::INFINITY)]
    fn test_health_fraction_outside_unit_interval(#[case] health_fraction: f64) {
        let err = capture_rate(Rarity::Rare, health_fraction).unwrap_err();
        assert_eq!(err.field(), "health_fraction");
    }

    #[test]
    fn test_rejects_nan_health() {
        assert_eq!(
            capture_rate(Rarity::Rare, f64::NAN),
            Err(ValidationError::NotFinite {
                field: "health_fraction"
            })
        );
    }

    #[test]
    fn test_resolve_uses_one_draw() {
        // Rate for a common creature at full health is 0.40.
        let mut rng = ScriptedRandom::new(vec![0.39, 0.41]);

        let caught = resolve_capture(Rarity::Common, 1.0, &mut rng).unwrap();
        assert!(caught.success);
        assert_eq!(
            caught.message,
            "Gotcha! The creature was caught! (Capture rate: 40.0%)"
        );

        let escaped = resolve_capture(Rarity::Common, 1.0, &mut rng).unwrap();
        assert!(!escaped.success);
        assert_eq!(
            escaped.message,
            "Oh no! The creature broke free! (Capture rate: 40.0%)"
        );
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn test_capture_rate_descriptions() {
        assert_eq!(capture_rate_description(0.95), "Excellent");
        assert_eq!(capture_rate_description(0.6), "Good");
        assert_eq!(capture_rate_description(0.45), "Fair");
        assert_eq!(capture_rate_description(0.25), "Poor");
        assert_eq!(capture_rate_description(0.05), "Very Poor");
    }
}
