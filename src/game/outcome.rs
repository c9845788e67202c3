//! Win/lose evaluation and the final-turn countdown.

use std::fmt;

use serde::Serialize;

use crate::game::{Cue, GameState};

/// Final turns granted when the deck runs out.
pub const FINAL_TURNS: i32 = 2;

/// Final turns a player is expected to need.
pub const FINAL_TURNS_PAR: i32 = 2;

/// Score before penalties.
pub const FINAL_SCORE: i32 = 5;

/// Score change for each final turn taken beyond par.
pub const FINAL_TURN_PENALTY: i32 = -1;

/// How the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// Still being played.
    InProgress,
    /// Deck and board cleared of threats.
    Won,
    /// Every squad member was lost.
    SquadEliminated,
    /// The final turns ran out with threats still on the board.
    ThreatsRemain,
}

impl Outcome {
    /// Numeric code: 0 in progress, 1 won, -1 squad lost, -2 out of time.
    #[must_use]
    pub const fn code(self) -> i8 {
        match self {
            Outcome::InProgress => 0,
            Outcome::Won => 1,
            Outcome::SquadEliminated => -1,
            Outcome::ThreatsRemain => -2,
        }
    }

    /// The game has ended.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The game has ended in a loss.
    #[must_use]
    pub const fn is_loss(self) -> bool {
        matches!(self, Outcome::SquadEliminated | Outcome::ThreatsRemain)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Outcome::InProgress => "in progress",
            Outcome::Won => "won",
            Outcome::SquadEliminated => "lost: squad eliminated",
            Outcome::ThreatsRemain => "lost: threats remain",
        };
        f.write_str(text)
    }
}

/// Endgame bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalTurns {
    /// Turns left once the deck is exhausted.
    pub remaining: i32,
    /// Expected turns; the score suffers once this goes negative.
    pub par: i32,
    /// Running score.
    pub score: i32,
    /// Score change per turn over par.
    pub penalty: i32,
    /// Latched when the Encounter that empties the deck ends.
    pub in_final_turns: bool,
}

impl Default for FinalTurns {
    fn default() -> Self {
        Self {
            remaining: FINAL_TURNS,
            par: FINAL_TURNS_PAR,
            score: FINAL_SCORE,
            penalty: FINAL_TURN_PENALTY,
            in_final_turns: false,
        }
    }
}

impl FinalTurns {
    /// Spend one final turn.
    pub fn tick(&mut self) {
        self.remaining -= 1;
        self.par -= 1;
        if self.par < 0 {
            self.score += self.penalty;
        }
    }
}

/// Decide the outcome from the current state.
///
/// Losing the whole squad always loses. Otherwise the game can only end
/// once the deck is empty: cleared board wins, spent final turns lose.
#[must_use]
pub fn evaluate(state: &GameState) -> Outcome {
    if state.squad.is_empty() {
        return Outcome::SquadEliminated;
    }
    if state.deck.is_empty() {
        if state.active.is_empty() {
            return Outcome::Won;
        }
        if state.final_turns.remaining <= 0 {
            return Outcome::ThreatsRemain;
        }
    }
    Outcome::InProgress
}

impl GameState {
    /// A squad member was lost; grant an extra final turn if enabled and the
    /// deck has not run out yet.
    pub fn increase_final_turns(&mut self) {
        if !self.final_turns.in_final_turns
            && self
                .settings
                .final_turns_increase_from_defeated_squad_members
        {
            self.final_turns.remaining += 1;
            tracing::debug!(
                remaining = self.final_turns.remaining,
                "final turn granted for lost squad member"
            );
        }
    }

    /// Re-evaluate and record the outcome, emitting a cue when it changes.
    pub fn update_outcome(&mut self) {
        let outcome = evaluate(self);
        if outcome == self.outcome {
            return;
        }
        self.outcome = outcome;
        match outcome {
            Outcome::Won => {
                tracing::info!(turn = self.turn, score = self.final_turns.score, "game won");
                self.cues.push(Cue::GameWon);
            }
            Outcome::SquadEliminated | Outcome::ThreatsRemain => {
                tracing::info!(turn = self.turn, %outcome, "game lost");
                self.cues.push(Cue::GameLost);
            }
            Outcome::InProgress => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Abilities, Coord, SquadMember, Threat, ThreatKind};
    use crate::settings::Settings;

    fn state_with_member() -> GameState {
        let mut state = GameState::empty(Settings::default());
        state.add_member(
            SquadMember::new("Test", 1, Abilities::LEADER),
            Coord::new(2, 2),
        );
        state
    }

    #[test]
    fn test_empty_squad_loses() {
        let state = GameState::empty(Settings::default());
        assert_eq!(evaluate(&state), Outcome::SquadEliminated);
    }

    #[test]
    fn test_cleared_board_wins() {
        let state = state_with_member();
        assert_eq!(evaluate(&state), Outcome::Won);
    }

    #[test]
    fn test_deck_remaining_continues() {
        let mut state = state_with_member();
        state.queue_threat(Threat::new(ThreatKind::Infantry1, 3));
        assert_eq!(evaluate(&state), Outcome::InProgress);
    }

    #[test]
    fn test_out_of_final_turns_loses() {
        let mut state = state_with_member();
        state.add_threat(Threat::new(ThreatKind::Infantry1, 4), Coord::new(4, 1));
        assert_eq!(evaluate(&state), Outcome::InProgress);
        state.final_turns.remaining = 0;
        assert_eq!(evaluate(&state), Outcome::ThreatsRemain);
    }

    #[test]
    fn test_tick_applies_penalty_past_par() {
        let mut turns = FinalTurns::default();
        turns.tick();
        turns.tick();
        assert_eq!(turns.score, FINAL_SCORE);
        turns.tick();
        assert_eq!(turns.par, -1);
        assert_eq!(turns.score, FINAL_SCORE + FINAL_TURN_PENALTY);
    }

    #[test]
    fn test_increase_final_turns_is_gated() {
        let mut state = state_with_member();
        state.increase_final_turns();
        assert_eq!(state.final_turns.remaining, FINAL_TURNS);

        state.settings.final_turns_increase_from_defeated_squad_members = true;
        state.increase_final_turns();
        assert_eq!(state.final_turns.remaining, FINAL_TURNS + 1);

        state.final_turns.in_final_turns = true;
        state.increase_final_turns();
        assert_eq!(state.final_turns.remaining, FINAL_TURNS + 1);
    }

    #[test]
    fn test_update_outcome_emits_cue_once() {
        let mut state = state_with_member();
        state.update_outcome();
        state.update_outcome();
        assert_eq!(state.outcome, Outcome::Won);
        assert_eq!(state.cues, vec![Cue::GameWon]);
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(Outcome::InProgress.code(), 0);
        assert_eq!(Outcome::Won.code(), 1);
        assert_eq!(Outcome::SquadEliminated.code(), -1);
        assert_eq!(Outcome::ThreatsRemain.code(), -2);
        assert!(Outcome::ThreatsRemain.is_loss());
        assert!(!Outcome::Won.is_loss());
    }
}
