use crate::battle::damage::{resolve_damage, DamageResolver, DamageRules};
use crate::battle::rng::{ScriptedRandom, SeededRandom};
use crate::battle::tests::common::{assert_ok, no_crit_rng, TestCombatantBuilder};
use crate::combatant::MoveDescriptor;
use crate::narrative::{narrate, FallbackNarrator, NarrativeRequest};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use schema::Element;

const ALL_ELEMENTS: [Element; 18] = [
    Element::Normal,
    Element::Fire,
    Element::Water,
    Element::Grass,
    Element::Electric,
    Element::Ice,
    Element::Fighting,
    Element::Poison,
    Element::Ground,
    Element::Flying,
    Element::Psychic,
    Element::Bug,
    Element::Rock,
    Element::Ghost,
    Element::Dragon,
    Element::Steel,
    Element::Dark,
    Element::Fairy,
];

fn ember() -> MoveDescriptor {
    MoveDescriptor::new("Ember", Element::Fire, 40)
}

#[test]
fn test_fire_against_grass_is_super_effective() {
    // Arrange
    let charmander = TestCombatantBuilder::new(Element::Fire, 10)
        .with_name("Charmander")
        .build();
    let bulbasaur = TestCombatantBuilder::new(Element::Grass, 10).build();
    let rattata = TestCombatantBuilder::new(Element::Normal, 10).build();

    // Act
    let vs_grass = assert_ok(resolve_damage(
        &charmander,
        &bulbasaur,
        &ember(),
        &mut no_crit_rng(),
    ));
    let vs_normal = assert_ok(resolve_damage(
        &charmander,
        &rattata,
        &ember(),
        &mut no_crit_rng(),
    ));

    // Assert
    // base 6.8, STAB 1.5, random factor 0.925
    assert_eq!(vs_grass.effectiveness, 2.0);
    assert_eq!(vs_grass.damage, 18);
    assert!(vs_grass.message.contains("super effective"));
    assert!(!vs_grass.critical);

    assert_eq!(vs_normal.effectiveness, 1.0);
    assert_eq!(vs_normal.damage, 9);
    assert_eq!(vs_normal.message, "Dealt 9 damage!");
    assert!(vs_grass.damage > vs_normal.damage);

    let request = NarrativeRequest::commentary(&charmander, &bulbasaur, &ember(), &vs_grass);
    assert_eq!(
        narrate(&FallbackNarrator, &request),
        "Charmander used Ember! It dealt 18 damage!"
    );
}

#[test]
fn test_critical_hit_doubles_damage() {
    let charmander = TestCombatantBuilder::new(Element::Fire, 10).build();
    let rattata = TestCombatantBuilder::new(Element::Normal, 10).build();
    // crit roll, then random factor
    let mut rng = ScriptedRandom::new(vec![0.0, 0.5]);

    let outcome = assert_ok(resolve_damage(&charmander, &rattata, &ember(), &mut rng));

    assert!(outcome.critical);
    assert_eq!(outcome.damage, 18);
    assert_eq!(outcome.message, "A critical hit!");
    assert_eq!(rng.consumed(), 2);
}

#[test]
fn test_immune_defender_takes_nothing_and_consumes_no_draws() {
    let pikachu = TestCombatantBuilder::new(Element::Electric, 30).build();
    let geodude = TestCombatantBuilder::new(Element::Rock, 30)
        .with_elements(vec![Element::Rock, Element::Ground])
        .build();
    let thunderbolt = MoveDescriptor::new("Thunderbolt", Element::Electric, 90);
    let mut rng = ScriptedRandom::new(vec![0.0]);

    let outcome = assert_ok(resolve_damage(&pikachu, &geodude, &thunderbolt, &mut rng));

    assert_eq!(outcome.damage, 0);
    assert_eq!(outcome.effectiveness, 0.0);
    assert!(!outcome.critical);
    assert_eq!(outcome.message, "It doesn't affect the opponent...");
    assert_eq!(rng.consumed(), 0);
}

#[test]
fn test_weakest_hit_still_deals_one() {
    let weakling = TestCombatantBuilder::new(Element::Normal, 1)
        .with_attack(1)
        .build();
    let wall = TestCombatantBuilder::new(Element::Water, 1)
        .with_elements(vec![Element::Water, Element::Fire])
        .with_defense(255)
        .build();
    let spark = MoveDescriptor::new("Spark", Element::Fire, 1);
    let mut rng = ScriptedRandom::new(vec![0.5, 0.0]);

    let outcome = assert_ok(resolve_damage(&weakling, &wall, &spark, &mut rng));

    assert_eq!(outcome.effectiveness, 0.25);
    assert_eq!(outcome.damage, 1);
    assert_eq!(outcome.message, "It's not very effective...");
}

#[test]
fn test_custom_rules_change_the_outcome() {
    let no_stab = DamageResolver::new(DamageRules {
        stab_multiplier: 1.0,
        ..DamageRules::default()
    });
    let charmander = TestCombatantBuilder::new(Element::Fire, 10).build();
    let rattata = TestCombatantBuilder::new(Element::Normal, 10).build();

    let mut rng = no_crit_rng();
    let outcome = assert_ok(no_stab.resolve(&charmander, &rattata, &ember(), &mut rng));

    // 6.8 * 0.925
    assert_eq!(outcome.damage, 6);
}

#[test]
fn test_invalid_inputs_name_their_field() {
    let valid = TestCombatantBuilder::new(Element::Fire, 10).build();
    let mut rng = no_crit_rng();

    let too_young = TestCombatantBuilder::new(Element::Fire, 0).build();
    let err = resolve_damage(&too_young, &valid, &ember(), &mut rng).unwrap_err();
    assert_eq!(err.field(), "level");

    let triple = TestCombatantBuilder::new(Element::Fire, 10)
        .with_elements(vec![Element::Fire, Element::Water, Element::Grass])
        .build();
    let err = resolve_damage(&valid, &triple, &ember(), &mut rng).unwrap_err();
    assert_eq!(err.field(), "elements");

    let feeble = TestCombatantBuilder::new(Element::Fire, 10)
        .with_defense(0)
        .build();
    let err = resolve_damage(&valid, &feeble, &ember(), &mut rng).unwrap_err();
    assert_eq!(err.field(), "defense");

    let overpowered = MoveDescriptor::new("Overheat", Element::Fire, 251);
    let err = resolve_damage(&valid, &valid, &overpowered, &mut rng).unwrap_err();
    assert_eq!(err.field(), "move.power");

    let mut wild = ember();
    wild.accuracy = f64::NAN;
    let err = resolve_damage(&valid, &valid, &wild, &mut rng).unwrap_err();
    assert_eq!(err.field(), "move.accuracy");

    assert_eq!(rng.consumed(), 0);
}

proptest! {
    #[test]
    fn prop_damage_is_positive_unless_immune(
        attacker_level in 1u8..=100,
        defender_level in 1u8..=100,
        attack in 1u8..=255,
        defense in 1u8..=255,
        power in 0u16..=250,
        move_element in proptest::sample::select(ALL_ELEMENTS.to_vec()),
        defender_elements in proptest::collection::vec(
            proptest::sample::select(ALL_ELEMENTS.to_vec()),
            1..=2,
        ),
        seed in any::<u64>(),
    ) {
        let attacker = TestCombatantBuilder::new(Element::Normal, attacker_level)
            .with_attack(attack)
            .build();
        let defender = TestCombatantBuilder::new(Element::Normal, defender_level)
            .with_elements(defender_elements)
            .with_defense(defense)
            .build();
        let strike = MoveDescriptor::new("Strike", move_element, power);

        let mut rng = SeededRandom::new(seed);
        let outcome = resolve_damage(&attacker, &defender, &strike, &mut rng).unwrap();

        if outcome.effectiveness == 0.0 {
            prop_assert_eq!(outcome.damage, 0);
        } else {
            prop_assert!(outcome.damage >= 1);
        }
        if outcome.effectiveness > 1.0 {
            prop_assert!(outcome.message.contains("super effective"));
        }
        if outcome.effectiveness > 0.0 && outcome.effectiveness < 1.0 {
            prop_assert!(outcome.message.contains("not very effective"));
        }
    }
}
