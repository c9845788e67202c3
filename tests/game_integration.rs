//! Multi-turn integration tests for game mechanics.
//!
//! These tests drive whole games through the public API and check the
//! end-to-end behaviour of setup, the phase cycle and the endgame.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use lucky_seven::game::invariants::check_invariants;
use lucky_seven::game::{bench, Cell, BOOSTED_STRENGTH};
use lucky_seven::soak::{run_game, SoakConfig};
use lucky_seven::{
    Abilities, Controller, Coord, Cue, GameState, Outcome, Phase, Settings, Threat, ThreatKind,
};

fn short_lived(kind: ThreatKind) -> bool {
    matches!(kind, ThreatKind::Mortar | ThreatKind::Flare | ThreatKind::Tank)
}

#[test]
fn test_default_setup_counts() {
    for seed in 0..50 {
        let state = GameState::new(Settings::default(), seed);
        assert_eq!(state.squad.len(), 7, "seed {seed}");
        assert_eq!(
            state.deck.len() + state.active.len() + state.inactive.len(),
            28,
            "seed {seed}"
        );
        assert!(state.inactive.iter().all(|&id| state.threat(id).kind != ThreatKind::Mortar));
        assert_eq!(state.turn, 1);
        assert_eq!(state.phase, Phase::Encounter);
    }
}

#[test]
fn test_default_setup_without_discards() {
    // With no discards at setup the deck and board split the 28 cards.
    let state = (0..200)
        .map(|seed| GameState::new(Settings::default(), seed))
        .find(|s| s.inactive.is_empty())
        .unwrap();
    assert_eq!(state.squad.len(), 7);
    assert_eq!(state.deck.len() + state.active.len(), 28);
}

#[test]
fn test_pacifist_bonus_follows_adjacency() {
    let mut state = GameState::empty(Settings::default());
    state.phase = Phase::Maneuver;
    let roster = bench();
    let pacifist = state.add_member(roster[4], Coord::new(2, 2)).unwrap();
    let hammer = state.add_member(roster[5], Coord::new(3, 2)).unwrap();
    assert!(state.member(hammer).abilities.is_exactly(Abilities::BONUS));
    assert!(state.member(pacifist).abilities.is_exactly(Abilities::PACIFIST));

    state.refresh_modifiers();
    assert_eq!(state.member(hammer).get_strength(), BOOSTED_STRENGTH);

    // Move the hammer out of reach.
    state.click_cell(Coord::new(3, 2));
    assert!(state.click_cell(Coord::new(4, 2)));
    state.refresh_modifiers();
    assert_eq!(state.member(hammer).get_strength(), 1);
}

#[test]
fn test_pacifist_bonus_needs_pacifist_up() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    let pacifist = state.add_member(roster[4], Coord::new(2, 2)).unwrap();
    let anvil = state.add_member(roster[6], Coord::new(2, 3)).unwrap();
    state.member_mut(pacifist).up = false;
    state.refresh_modifiers();
    assert_eq!(state.member(anvil).get_strength(), 1);
}

#[test]
fn test_joker_does_not_grant_bonus() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    state.add_member(roster[7], Coord::new(2, 2));
    let hammer = state.add_member(roster[5], Coord::new(3, 2)).unwrap();
    state.refresh_modifiers();
    assert_eq!(state.member(hammer).get_strength(), 1);
}

#[test]
fn test_full_turn_cycle() {
    let mut tested = 0;
    for seed in 0..40 {
        let mut controller = Controller::new(Settings::default(), seed);
        let start_turn = controller.state().turn;
        let doomed: Vec<_> = controller
            .state()
            .active
            .iter()
            .copied()
            .filter(|&id| short_lived(controller.state().threat(id).kind))
            .collect();

        let mut phases = Vec::new();
        for _ in 0..5 {
            if !controller.on_advance_phase() {
                break;
            }
            phases.push(controller.state().phase);
        }
        if controller.state().is_game_over() {
            continue;
        }

        assert_eq!(
            phases,
            vec![
                Phase::Maneuver,
                Phase::Attack,
                Phase::CounterAttack,
                Phase::WrapUp,
                Phase::Encounter
            ]
        );
        let state = controller.state();
        assert_eq!(state.turn, start_turn + 1);
        for id in doomed {
            assert!(!state.active.contains(&id), "seed {seed}: {} survived", state.threat(id).kind);
            assert!(state.inactive.contains(&id));
        }
        tested += 1;
    }
    assert!(tested > 30);
}

#[test]
fn test_turn_cycle_emits_cues() {
    let mut controller = Controller::new(Settings::default(), 8);
    controller.drain_cues();
    for _ in 0..4 {
        controller.on_advance_phase();
    }
    if controller.state().is_game_over() {
        return;
    }
    let cues = controller.drain_cues();
    let advanced = cues
        .iter()
        .filter(|c| matches!(c, Cue::PhaseAdvanced(_)))
        .count();
    assert_eq!(advanced, 4);
    assert_eq!(cues.last(), Some(&Cue::TurnEnded));
}

#[test]
fn test_tank_never_changes_column() {
    let mut state = GameState::empty(Settings {
        selectable_column_for_encountered_threats: true,
        ..Settings::default()
    });
    let tank = state
        .add_threat(Threat::new(ThreatKind::Tank, 0), Coord::new(0, 2))
        .unwrap();
    state.pending.push(tank);
    for x in 0..7 {
        assert!(!state.can_threat_move_to_column(tank, x));
    }
    state.refresh_pending_columns();
    assert!(state.pending_columns.is_empty());

    assert!(!state.click_cell(Coord::new(3, 2)));
    assert_eq!(state.threat(tank).position, Coord::new(0, 2));
}

#[test]
fn test_tank_clears_row_of_up_members() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    let up = state.add_member(roster[0], Coord::new(4, 3)).unwrap();
    let down = state.add_member(roster[1], Coord::new(6, 3)).unwrap();
    let safe = state.add_member(roster[2], Coord::new(4, 1)).unwrap();
    state.member_mut(down).up = false;
    state.add_threat(Threat::new(ThreatKind::Tank, 0), Coord::new(0, 3));
    state.queue_threat(Threat::new(ThreatKind::Infantry1, 1));
    state.phase = Phase::Attack;

    state.advance_phase();
    state.advance_phase();
    assert_eq!(state.phase, Phase::WrapUp);
    assert!(!state.squad.contains(&up));
    assert!(state.squad.contains(&down));
    assert!(state.squad.contains(&safe));
    assert!(state.active.is_empty());
}

#[test]
fn test_defeated_threat_leaves_in_counter_attack() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    state.add_member(roster[0], Coord::new(2, 2));
    state.add_member(roster[1], Coord::new(3, 3));
    let gun = state
        .add_threat(Threat::new(ThreatKind::Infantry2, 3), Coord::new(3, 2))
        .unwrap();
    state.queue_threat(Threat::new(ThreatKind::Infantry1, 1));
    state.phase = Phase::Attack;

    state.click_cell(Coord::new(2, 2));
    assert!(state.click_cell(Coord::new(3, 2)));
    state.click_cell(Coord::new(3, 3));
    assert!(state.click_cell(Coord::new(3, 2)));
    assert_eq!(state.threat(gun).strength_opposition, 2);

    state.advance_phase();
    assert!(state.inactive.contains(&gun));
    assert!(state.grid.get(Coord::new(3, 2)).is_some_and(Cell::is_empty));
    assert!(state.undodgeable.is_empty());
    state.advance_phase();
    assert_eq!(state.squad.len(), 2);
}

#[test]
fn test_undefeated_infantry_takes_neighbours() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    let near = state.add_member(roster[0], Coord::new(2, 2)).unwrap();
    let far = state.add_member(roster[1], Coord::new(5, 4)).unwrap();
    state.member_mut(near).up = false;
    state.add_threat(Threat::new(ThreatKind::Infantry1, 3), Coord::new(3, 2));
    state.queue_threat(Threat::new(ThreatKind::Infantry1, 1));
    state.phase = Phase::Attack;

    state.advance_phase();
    state.advance_phase();
    assert!(!state.squad.contains(&near), "down members cannot dodge infantry");
    assert!(state.squad.contains(&far));
    assert_eq!(state.outcome, Outcome::InProgress);
}

#[test]
fn test_game_won_when_board_and_deck_clear() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    state.add_member(roster[0], Coord::new(2, 2));
    state.add_member(roster[3], Coord::new(4, 2));
    let inf = state
        .add_threat(Threat::new(ThreatKind::Infantry1, 3), Coord::new(3, 2))
        .unwrap();
    state.phase = Phase::Attack;

    state.click_cell(Coord::new(2, 2));
    assert!(state.click_cell(Coord::new(3, 2)));
    state.advance_phase();

    assert!(state.inactive.contains(&inf));
    assert_eq!(state.outcome, Outcome::Won);
    assert!(state.cues.contains(&Cue::GameWon));
    assert!(!state.advance_phase());
}

#[test]
fn test_final_turns_run_out() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    state.add_member(roster[0], Coord::new(6, 4));
    state.add_threat(Threat::new(ThreatKind::MachineGun, 1), Coord::new(1, 1));
    state.final_turns.in_final_turns = true;
    state.phase = Phase::Attack;

    let mut turns = 0;
    while !state.is_game_over() {
        state.advance_phase();
        if state.phase == Phase::Encounter {
            turns += 1;
        }
        assert!(turns < 10);
    }
    assert_eq!(state.outcome, Outcome::ThreatsRemain);
    assert_eq!(state.final_turns.remaining, 0);
    assert_eq!(state.final_turns.score, 5);
    assert!(state.cues.contains(&Cue::GameLost));
}

#[test]
fn test_squad_eliminated() {
    let mut state = GameState::empty(Settings::default());
    let roster = bench();
    state.add_member(roster[0], Coord::new(2, 2));
    state.add_threat(Threat::new(ThreatKind::Infantry1, 2), Coord::new(2, 1));
    state.queue_threat(Threat::new(ThreatKind::Infantry1, 1));
    state.phase = Phase::Attack;

    state.advance_phase();
    assert_eq!(state.outcome, Outcome::InProgress);
    state.advance_phase();
    assert!(state.squad.is_empty());
    assert_eq!(state.outcome, Outcome::SquadEliminated);
    assert_eq!(state.outcome.code(), -1);
}

#[test]
fn test_random_games_finish_cleanly() {
    let config = SoakConfig::default();
    for seed in 0..100 {
        let result = run_game(seed, &Settings::default(), &config);
        assert!(result.violations.is_empty(), "seed {seed}: {:?}", result.violations);
        assert!(result.outcome.is_over(), "seed {seed} did not finish");
    }
}

#[test]
fn test_variants_keep_invariants() {
    let settings = Settings {
        squad_members_subtraction: 0,
        threat_count_total: 60,
        threat_cannot_attack_at_zero_strength: true,
        final_turns_increase_from_defeated_squad_members: true,
        selectable_column_for_encountered_threats: true,
        ..Settings::default()
    };
    for seed in 0..50 {
        let result = run_game(seed, &settings, &SoakConfig::default());
        assert!(result.violations.is_empty(), "seed {seed}: {:?}", result.violations);
    }
    let state = GameState::new(settings, 3);
    assert!(check_invariants(&state).is_empty());
}
