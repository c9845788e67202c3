//! The game controller.
//!
//! Owns the current [`GameState`] and the undo snapshot, and turns discrete
//! input events into rule actions. Front-ends talk only to the controller.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::game::invariants::assert_invariants;
use crate::game::{Coord, Cue, GameState};
use crate::settings::Settings;

/// Drives one game at a time.
#[derive(Debug, Clone)]
pub struct Controller {
    state: GameState,
    snapshot: GameState,
    seeds: ChaCha8Rng,
}

impl Controller {
    /// Set up a game from `settings` and `seed`.
    ///
    /// Later resets draw their seeds from a stream derived from `seed`, so a
    /// whole session is reproducible.
    #[must_use]
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = GameState::new(settings, seed);
        let snapshot = Self::snapshot_of(&state);
        assert_invariants(&state);
        Self {
            state,
            snapshot,
            seeds: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Settings of the current game.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    /// A cell was clicked.
    pub fn on_cell_clicked(&mut self, x: u8, y: u8) -> bool {
        let changed = self.state.click_cell(Coord::new(x, y));
        self.after_input();
        changed
    }

    /// Advance to the next phase. The new phase becomes the undo point.
    pub fn on_advance_phase(&mut self) -> bool {
        let advanced = self.state.advance_phase();
        if advanced {
            self.snapshot = Self::snapshot_of(&self.state);
        }
        self.after_input();
        advanced
    }

    /// Throw away everything done since the last phase started.
    pub fn on_undo(&mut self) {
        let cues = std::mem::take(&mut self.state.cues);
        self.state = self.snapshot.clone();
        self.state.cues = cues;
        self.state.cues.push(Cue::Undo);
        tracing::debug!(turn = self.state.turn, phase = %self.state.phase, "undo");
        self.after_input();
    }

    /// Start a new game with the same settings and the next seed.
    pub fn on_reset(&mut self) {
        let seed = self.seeds.next_u64();
        let settings = self.state.settings;
        let cues = std::mem::take(&mut self.state.cues);
        self.state = GameState::new(settings, seed);
        self.snapshot = Self::snapshot_of(&self.state);
        let mut fresh = std::mem::replace(&mut self.state.cues, cues);
        self.state.cues.append(&mut fresh);
        self.after_input();
    }

    /// Flip the selected member up.
    pub fn on_flip_up(&mut self) -> bool {
        let changed = self.state.flip_up();
        self.after_input();
        changed
    }

    /// Flip the selected member down.
    pub fn on_flip_down(&mut self) -> bool {
        let changed = self.state.flip_down();
        self.after_input();
        changed
    }

    /// Drop the current selection.
    pub fn on_cancel_selection(&mut self) {
        self.state.cancel_selection();
        self.after_input();
    }

    /// Take all cues produced since the last call.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        self.state.drain_cues()
    }

    fn after_input(&mut self) {
        self.state.refresh_modifiers();
        assert_invariants(&self.state);
    }

    /// Copy of `state` to restore on undo. Cues already emitted are not
    /// replayed.
    fn snapshot_of(state: &GameState) -> GameState {
        let mut snapshot = state.clone();
        snapshot.cues.clear();
        snapshot
    }
}
