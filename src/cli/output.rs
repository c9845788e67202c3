//! Output formatting utilities for CLI.

// Stats are small counts; f64 precision loss is irrelevant for display
#![allow(clippy::cast_precision_loss, clippy::format_push_string)]

use lucky_seven::game::{Coord, FinalTurns};
use lucky_seven::soak::SoakResult;
use lucky_seven::view::member_number;
use lucky_seven::{Abilities, GameState, Outcome, Phase, ThreatKind};
use serde::Serialize;

/// JSON-serializable game snapshot.
#[derive(Debug, Serialize)]
pub(super) struct JsonGame {
    /// Random seed used.
    seed: u64,
    /// Current turn.
    turn: u32,
    /// Current phase.
    phase: Phase,
    /// Win/lose state.
    outcome: Outcome,
    /// Endgame countdown and score.
    final_turns: FinalTurns,
    /// Cards left in the threat deck.
    deck: usize,
    /// Cards in the discard pile.
    discarded: usize,
    /// Members in play.
    squad: Vec<JsonMember>,
    /// Names of lost members.
    fallen: Vec<&'static str>,
    /// Threats on the board.
    threats: Vec<JsonThreat>,
}

/// JSON-serializable squad member.
#[derive(Debug, Serialize)]
pub(super) struct JsonMember {
    /// Token number on the board.
    number: u8,
    /// Card name.
    name: &'static str,
    /// Ability flags.
    abilities: Abilities,
    /// Current attack strength.
    strength: u8,
    /// Posture.
    up: bool,
    /// Cell.
    position: Coord,
}

/// JSON-serializable threat.
#[derive(Debug, Serialize)]
pub(super) struct JsonThreat {
    /// Threat kind.
    kind: ThreatKind,
    /// Net strength.
    strength: u8,
    /// Strength committed against it this turn.
    opposition: u8,
    /// Cell.
    position: Coord,
}

impl JsonGame {
    /// Create from a game state.
    pub(super) fn from_state(state: &GameState) -> Self {
        Self {
            seed: state.seed,
            turn: state.turn,
            phase: state.phase,
            outcome: state.outcome,
            final_turns: state.final_turns,
            deck: state.deck.len(),
            discarded: state.inactive.len(),
            squad: state
                .squad
                .iter()
                .map(|&id| {
                    let member = state.member(id);
                    JsonMember {
                        number: member_number(id),
                        name: member.name,
                        abilities: member.abilities,
                        strength: member.get_strength(),
                        up: member.up,
                        position: member.position,
                    }
                })
                .collect(),
            fallen: state.fallen.iter().map(|&id| state.member(id).name).collect(),
            threats: state
                .active_threats()
                .map(|t| JsonThreat {
                    kind: t.kind,
                    strength: t.get_strength(),
                    opposition: t.strength_opposition,
                    position: t.position,
                })
                .collect(),
        }
    }
}

/// Aggregated soak statistics.
#[derive(Debug, Default, Serialize)]
pub(super) struct SoakStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games won.
    wins: u64,
    /// Games lost with the whole squad gone.
    squad_eliminated: u64,
    /// Games lost with threats left when the final turns ran out.
    threats_remain: u64,
    /// Games still running at the input limit.
    abandoned: u64,
    /// Turns across all games.
    total_turns: u64,
    /// Inputs across all games.
    total_inputs: u64,
    /// Final-turns score across won games.
    win_score_sum: i64,
    /// Games that broke an invariant: seed and first message.
    failures: Vec<(u64, String)>,
}

impl SoakStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &SoakResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns);
        self.total_inputs += u64::from(result.inputs);
        match result.outcome {
            Outcome::Won => {
                self.wins += 1;
                self.win_score_sum += i64::from(result.score);
            }
            Outcome::SquadEliminated => self.squad_eliminated += 1,
            Outcome::ThreatsRemain => self.threats_remain += 1,
            Outcome::InProgress => self.abandoned += 1,
        }
        if let Some(message) = result.violations.first() {
            self.failures.push((result.seed, message.clone()));
        }
    }

    /// Merge another thread's stats into these.
    pub(super) fn merge(&mut self, other: Self) {
        self.games_played += other.games_played;
        self.wins += other.wins;
        self.squad_eliminated += other.squad_eliminated;
        self.threats_remain += other.threats_remain;
        self.abandoned += other.abandoned;
        self.total_turns += other.total_turns;
        self.total_inputs += other.total_inputs;
        self.win_score_sum += other.win_score_sum;
        self.failures.extend(other.failures);
    }

    /// Seeds and messages of games that broke an invariant.
    pub(super) fn failures(&self) -> &[(u64, String)] {
        &self.failures
    }

    fn rate(&self, count: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        count as f64 * 100.0 / self.games_played as f64
    }

    fn average(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }
}

/// Format soak stats as human-readable text.
pub(super) fn format_soak_text(stats: &SoakStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Soak Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Outcomes:\n");
    let rows = [
        ("Won", stats.wins),
        ("Squad eliminated", stats.squad_eliminated),
        ("Threats remain", stats.threats_remain),
        ("Abandoned", stats.abandoned),
    ];
    for (label, count) in rows {
        output.push_str(&format!("  {label:<18} {count:>6} ({:.1}%)\n", stats.rate(count)));
    }

    if stats.wins > 0 {
        output.push_str(&format!(
            "\nAverage Winning Score: {:.2}\n",
            stats.win_score_sum as f64 / stats.wins as f64
        ));
    }
    output.push_str(&format!(
        "Average Game Length: {:.1} turns, {:.0} inputs\n",
        stats.average(stats.total_turns),
        stats.average(stats.total_inputs)
    ));

    if stats.failures.is_empty() {
        output.push_str("\nInvariant violations: none\n");
    } else {
        output.push_str(&format!("\nInvariant violations: {} games\n", stats.failures.len()));
        for (seed, message) in stats.failures.iter().take(10) {
            output.push_str(&format!("  seed {seed}: {message}\n"));
        }
    }

    output
}
