//! Game invariants - sanity checks that detect bugs.
//!
//! These should never trigger in a correctly implemented game. They check
//! that the board, the roster and the threat piles agree with each other.

use std::collections::BTreeSet;

use crate::game::{GameState, ThreatId};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(violations: &mut Vec<InvariantViolation>, message: String) {
    violations.push(InvariantViolation { message });
}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    check_squad(state, &mut violations);
    check_threats(state, &mut violations);
    check_cells(state, &mut violations);
    violations
}

/// Every member in play stands where the grid says it does, on a playable
/// cell; nobody is both in play and fallen.
fn check_squad(state: &GameState, violations: &mut Vec<InvariantViolation>) {
    for &id in &state.squad {
        let Some(member) = state.members.get(id.index()) else {
            violation(violations, format!("Squad id {} has no member", id.0));
            continue;
        };
        if state.grid.squad_at(member.position) != Some(id) {
            violation(
                violations,
                format!("{} thinks it is at {} but the grid disagrees", member.name, member.position),
            );
        }
        if member.position.is_reserved() {
            violation(
                violations,
                format!("{} stands in reserved cell {}", member.name, member.position),
            );
        }
        if state.fallen.contains(&id) {
            violation(violations, format!("{} is both in play and fallen", member.name));
        }
    }

    let on_grid = state.grid.iter().filter(|(_, cell)| cell.squad.is_some()).count();
    if on_grid != state.squad.len() {
        violation(
            violations,
            format!("{} members on the grid but {} in the squad", on_grid, state.squad.len()),
        );
    }
}

/// Each threat is in exactly one of deck, active and inactive, and active
/// threats sit where the grid says they do.
fn check_threats(state: &GameState, violations: &mut Vec<InvariantViolation>) {
    let mut seen: BTreeSet<ThreatId> = BTreeSet::new();
    for &id in state.deck.iter().chain(&state.active).chain(&state.inactive) {
        if !seen.insert(id) {
            violation(violations, format!("Threat {} is in more than one pile", id.0));
        }
    }
    if seen.len() != state.threats.len() {
        violation(
            violations,
            format!(
                "{} threats dealt but {} accounted for in piles",
                state.threats.len(),
                seen.len()
            ),
        );
    }

    for &id in &state.active {
        let Some(threat) = state.threats.get(id.index()) else {
            violation(violations, format!("Active threat {} does not exist", id.0));
            continue;
        };
        if !state.grid.threats_at(threat.position).contains(&id) {
            violation(
                violations,
                format!("{} {} missing from its cell {}", threat.kind, id.0, threat.position),
            );
        }
    }

    let placed: usize = state.grid.iter().map(|(_, cell)| cell.threats.len()).sum();
    if placed != state.active.len() {
        violation(
            violations,
            format!("{} threats on the grid but {} active", placed, state.active.len()),
        );
    }

    for &id in &state.pending {
        if !state.active.contains(&id) {
            violation(violations, format!("Pending threat {} is not active", id.0));
        }
    }
}

/// Threats that cannot overlap never share a cell with each other or with a
/// squad member.
fn check_cells(state: &GameState, violations: &mut Vec<InvariantViolation>) {
    for (coord, cell) in state.grid.iter() {
        let solid = cell
            .threats
            .iter()
            .filter(|&&id| {
                state
                    .threats
                    .get(id.index())
                    .is_some_and(|t| !t.can_overlap_with_squad)
            })
            .count();
        if solid > 1 {
            violation(violations, format!("{solid} blocking threats share cell {coord}"));
        }
        if solid > 0 && cell.squad.is_some() {
            violation(
                violations,
                format!("Blocking threat shares cell {coord} with a squad member"),
            );
        }
    }
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Abilities, Coord, SquadId, SquadMember, Threat, ThreatKind};
    use crate::settings::Settings;

    fn create_valid_game() -> GameState {
        let mut state = GameState::empty(Settings::default());
        state.add_member(SquadMember::new("A", 1, Abilities::LEADER), Coord::new(2, 2));
        state.add_threat(Threat::new(ThreatKind::Infantry1, 3), Coord::new(3, 1));
        state.queue_threat(Threat::new(ThreatKind::MachineGun, 4));
        state
    }

    #[test]
    fn test_valid_game_passes() {
        let game = create_valid_game();
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_new_games_pass() {
        for seed in 0..20 {
            let game = GameState::new(Settings::default(), seed);
            let violations = check_invariants(&game);
            assert!(violations.is_empty(), "seed {seed}: {violations:?}");
        }
    }

    #[test]
    fn test_stale_member_position_detected() {
        let mut game = create_valid_game();
        game.members[0].position = Coord::new(5, 4);
        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("grid disagrees")));
    }

    #[test]
    fn test_ghost_member_on_grid_detected() {
        let mut game = create_valid_game();
        game.grid.place_squad(SquadId(9), Coord::new(6, 4));
        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("members on the grid")));
    }

    #[test]
    fn test_threat_in_two_piles_detected() {
        let mut game = create_valid_game();
        let id = game.active[0];
        game.inactive.push(id);
        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("more than one pile")));
    }

    #[test]
    fn test_lost_threat_detected() {
        let mut game = create_valid_game();
        game.deck.clear();
        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("accounted for")));
    }

    #[test]
    fn test_blocking_threat_with_member_detected() {
        let mut game = create_valid_game();
        let id = game.active[0];
        game.grid.relocate_threat(id, Coord::new(3, 1), Coord::new(2, 2));
        game.threats[id.index()].position = Coord::new(2, 2);
        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1, "{violations:?}");
        assert!(violations[0].message.contains("squad member"));
    }

    #[test]
    fn test_flare_may_share_with_member() {
        let mut game = create_valid_game();
        game.add_threat(Threat::new(ThreatKind::Flare, 2), Coord::new(2, 2));
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let mut game = create_valid_game();
        game.members[0].position = Coord::new(5, 4);
        game.deck.clear();
        let violations = check_invariants(&game);
        assert!(violations.len() >= 2, "{violations:?}");
    }

    #[test]
    #[should_panic(expected = "Game invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let mut game = create_valid_game();
        game.deck.clear();
        assert_invariants(&game);
    }
}
