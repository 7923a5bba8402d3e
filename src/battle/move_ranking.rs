use crate::combatant::MoveDescriptor;
use ordered_float::OrderedFloat;
use schema::Element;

/// Heuristic score of a move against the given defending elements.
pub fn score_move(move_used: &MoveDescriptor, opponent_elements: &[Element]) -> f64 {
    move_used.power as f64 * Element::effectiveness_against(move_used.element, opponent_elements)
}

/// Picks the move with the highest positive score, the first such move on ties.
/// Falls back to the first move when nothing scores above zero, e.g. all
/// status moves or an immune opponent. Returns `None` only for an empty list.
pub fn rank_moves<'a>(
    moves: &'a [MoveDescriptor],
    opponent_elements: &[Element],
) -> Option<&'a MoveDescriptor> {
    let first = moves.first()?;
    let best = moves
        .iter()
        .map(|candidate| (candidate, score_move(candidate, opponent_elements)))
        .filter(|(_, score)| *score > 0.0)
        // max_by_key keeps the last maximum, so scan from the back
        .rev()
        .max_by_key(|(_, score)| OrderedFloat(*score))
        .map(|(candidate, _)| candidate);

    let chosen = best.unwrap_or(first);
    tracing::debug!(move_name = %chosen.name, "ranked moves");
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn moveset() -> Vec<MoveDescriptor> {
        vec![
            MoveDescriptor::new("Tackle", Element::Normal, 40),
            MoveDescriptor::new("Ember", Element::Fire, 40),
            MoveDescriptor::new("Water Gun", Element::Water, 40),
        ]
    }

    fn pick<'a>(moves: &'a [MoveDescriptor], opponent: &[Element]) -> Option<&'a str> {
        rank_moves(moves, opponent).map(|chosen| chosen.name.as_str())
    }

    #[test]
    fn test_prefers_super_effective_moves() {
        let moves = moveset();
        assert_eq!(pick(&moves, &[Element::Grass]), Some("Ember"));
        assert_eq!(pick(&moves, &[Element::Fire]), Some("Water Gun"));
    }

    #[test]
    fn test_ties_keep_the_first_move() {
        let moves = moveset();
        assert_eq!(pick(&moves, &[Element::Normal]), Some("Tackle"));
    }

    #[test]
    fn test_power_outweighs_weak_effectiveness() {
        let moves = vec![
            MoveDescriptor::new("Ember", Element::Fire, 40),
            MoveDescriptor::new("Hyper Beam", Element::Normal, 150),
        ];
        assert_eq!(pick(&moves, &[Element::Grass]), Some("Hyper Beam"));
    }

    #[test]
    fn test_nothing_positive_falls_back_to_first() {
        let moves = vec![
            MoveDescriptor::new("Growl", Element::Normal, 0),
            MoveDescriptor::new("Thunder Shock", Element::Electric, 40),
        ];
        assert_eq!(pick(&moves, &[Element::Ground]), Some("Growl"));
        assert_eq!(pick(&[], &[Element::Ground]), None);
    }

    #[test]
    fn test_uses_dual_element_table() {
        let moves = vec![
            MoveDescriptor::new("Thunderbolt", Element::Electric, 90),
            MoveDescriptor::new("Ice Beam", Element::Ice, 90),
        ];
        // ground/flying: electric immune, ice 4x
        let opponent = [Element::Ground, Element::Flying];
        assert_eq!(pick(&moves, &opponent), Some("Ice Beam"));
        assert_eq!(score_move(&moves[0], &opponent), 0.0);
    }
}
