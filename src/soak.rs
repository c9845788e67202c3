//! Random-input soak runner.
//!
//! Provides a pure function interface: `(seed, settings) -> SoakResult`
//!
//! Plays a whole game through the [`Controller`] by feeding it seeded random
//! inputs (clicks, phase advances, flips, undos) and checks the game
//! invariants after every input. It exists to shake out rule bugs; it does
//! not try to play well.

use rand::{Rng, SeedableRng};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::controller::Controller;
use crate::game::invariants::check_invariants;
use crate::game::{Coord, Outcome, GRID_COLUMNS, GRID_ROWS};
use crate::settings::Settings;

/// Configuration for a soak game.
#[derive(Debug, Clone, Copy)]
pub struct SoakConfig {
    /// Inputs before the game is abandoned.
    pub max_inputs: u32,
    /// Percent chance that an input advances the phase.
    pub advance_percent: u32,
    /// Percent chance that an input is an undo.
    pub undo_percent: u32,
}

impl Default for SoakConfig {
    fn default() -> Self {
        Self {
            max_inputs: 10_000,
            advance_percent: 20,
            undo_percent: 2,
        }
    }
}

/// One input event, as a front-end would deliver it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Click on a cell.
    Click(u8, u8),
    /// Advance the phase.
    Advance,
    /// Undo to the phase start.
    Undo,
    /// Flip the selection up.
    FlipUp,
    /// Flip the selection down.
    FlipDown,
    /// Cancel the selection.
    Cancel,
}

impl Input {
    /// Decode an input from a byte, for fuzzers.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte % 8 {
            0 => Self::Advance,
            1 => Self::Undo,
            2 => Self::FlipUp,
            3 => Self::FlipDown,
            4 => Self::Cancel,
            _ => {
                let cell = byte / 8;
                Self::Click(cell % GRID_COLUMNS, (cell / GRID_COLUMNS) % GRID_ROWS)
            }
        }
    }
}

/// Feed one input to the controller.
pub fn apply_input(controller: &mut Controller, input: Input) {
    match input {
        Input::Click(x, y) => {
            controller.on_cell_clicked(x, y);
        }
        Input::Advance => {
            controller.on_advance_phase();
        }
        Input::Undo => controller.on_undo(),
        Input::FlipUp => {
            controller.on_flip_up();
        }
        Input::FlipDown => {
            controller.on_flip_down();
        }
        Input::Cancel => controller.on_cancel_selection(),
    }
}

/// Final result of a soak game.
#[derive(Debug, Clone, Serialize)]
pub struct SoakResult {
    /// The seed used for this game.
    pub seed: u64,
    /// How the game ended (`InProgress` if abandoned).
    pub outcome: Outcome,
    /// Turn the game ended on.
    pub turns: u32,
    /// Inputs fed.
    pub inputs: u32,
    /// Squad members still in play.
    pub squad_remaining: usize,
    /// Threats defeated or discarded.
    pub threats_cleared: usize,
    /// Final-turns score.
    pub score: i32,
    /// Invariant violations seen (the game stops at the first bad input).
    pub violations: Vec<String>,
}

/// Pick an input biased toward useful actions: selected members usually
/// take one of their legal targets.
fn choose_input(rng: &mut ChaCha8Rng, controller: &Controller, config: &SoakConfig) -> Input {
    let roll = rng.gen_range(0..100);
    if roll < config.advance_percent {
        return Input::Advance;
    }
    if roll < config.advance_percent + config.undo_percent {
        return Input::Undo;
    }

    let selection = &controller.state().selection;
    let targets = if selection.move_targets.is_empty() {
        &selection.attack_targets
    } else {
        &selection.move_targets
    };
    let target = targets.choose(rng).copied();
    if let Some(target) = target.filter(|_| rng.gen_bool(0.6)) {
        return Input::Click(target.x, target.y);
    }

    match rng.gen_range(0..10) {
        0 => Input::FlipUp,
        1 => Input::FlipDown,
        2 => Input::Cancel,
        _ => {
            let state = controller.state();
            let squad_cell = state.squad_members().map(|m| m.position).collect::<Vec<Coord>>();
            match squad_cell.choose(rng) {
                Some(cell) if rng.gen_bool(0.5) => Input::Click(cell.x, cell.y),
                _ => Input::Click(rng.gen_range(0..GRID_COLUMNS), rng.gen_range(0..GRID_ROWS)),
            }
        }
    }
}

/// Play one game with random inputs.
#[must_use]
pub fn run_game(seed: u64, settings: &Settings, config: &SoakConfig) -> SoakResult {
    let mut controller = Controller::new(*settings, seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed_50a4);
    let mut inputs = 0;
    let mut violations = Vec::new();

    while inputs < config.max_inputs && !controller.state().is_game_over() {
        let input = choose_input(&mut rng, &controller, config);
        apply_input(&mut controller, input);
        controller.drain_cues();
        inputs += 1;

        violations.extend(
            check_invariants(controller.state())
                .into_iter()
                .map(|v| format!("after {input:?}: {}", v.message)),
        );
        if !violations.is_empty() {
            tracing::warn!(seed, inputs, "invariant violated during soak");
            break;
        }
    }

    let state = controller.state();
    SoakResult {
        seed,
        outcome: state.outcome,
        turns: state.turn,
        inputs,
        squad_remaining: state.squad.len(),
        threats_cleared: state.inactive.len(),
        score: state.final_turns.score,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soak_game_finishes() {
        let result = run_game(1, &Settings::default(), &SoakConfig::default());
        assert!(result.outcome.is_over(), "{result:?}");
        assert!(result.violations.is_empty(), "{:?}", result.violations);
    }

    #[test]
    fn test_soak_is_deterministic() {
        let a = run_game(77, &Settings::default(), &SoakConfig::default());
        let b = run_game(77, &Settings::default(), &SoakConfig::default());
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.inputs, b.inputs);
        assert_eq!(a.turns, b.turns);
    }

    #[test]
    fn test_input_limit_respected() {
        let config = SoakConfig {
            max_inputs: 5,
            ..SoakConfig::default()
        };
        let result = run_game(1, &Settings::default(), &config);
        assert!(result.inputs <= 5);
    }

    #[test]
    fn test_from_byte_covers_board() {
        let clicks: Vec<Input> = (0..=u8::MAX)
            .map(Input::from_byte)
            .filter(|i| matches!(i, Input::Click(..)))
            .collect();
        assert!(clicks.contains(&Input::Click(0, 0)));
        assert!(clicks.iter().all(|i| match *i {
            Input::Click(x, y) => x < GRID_COLUMNS && y < GRID_ROWS,
            _ => false,
        }));
    }
}
