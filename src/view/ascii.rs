//! Plain-text board renderer.

// format! with push_str reads better here; the allocations do not matter
#![allow(clippy::format_push_string)]

use crate::game::{Coord, GameState, Phase};
use crate::view::{cell_label, member_number};

/// Render the game to plain text.
///
/// Output format:
/// ```text
/// Turn 3  [Encounter] Maneuver  Attack  Counter-Attack  Wrap Up
/// Deck: 16  Active: 5  Discarded: 3  Final turns: 2 (par 2, score 5)
///
///        0    1    2    3    4    5    6
///   1 |T   |.   |3^  |i   |.   |.   |.   |
///   2 |    |1v  |.   |5^  |G   |.   |.   |
///   ...
///
/// Squad:
///   1 The Leader      down  str 0  at 1,2
///   ...
/// ```
#[must_use]
pub fn render_ascii(state: &GameState) -> String {
    let mut output = String::new();
    render_header(&mut output, state);
    render_board(&mut output, state);
    render_squad(&mut output, state);
    render_threats(&mut output, state);
    if state.is_game_over() {
        output.push_str(&format!("\nGame over: {}\n", state.outcome));
    }
    output
}

fn render_header(output: &mut String, state: &GameState) {
    output.push_str(&format!("Turn {} ", state.turn));
    for phase in Phase::ALL {
        if phase == state.phase {
            output.push_str(&format!(" [{phase}]"));
        } else {
            output.push_str(&format!("  {phase} "));
        }
    }
    output.push('\n');

    let final_turns = &state.final_turns;
    output.push_str(&format!(
        "Deck: {}  Active: {}  Discarded: {}  Final turns: {} (par {}, score {})\n\n",
        state.deck.len(),
        state.active.len(),
        state.inactive.len(),
        final_turns.remaining,
        final_turns.par,
        final_turns.score
    ));
}

fn render_board(output: &mut String, state: &GameState) {
    output.push_str("     ");
    for x in 0..state.grid.columns() {
        output.push_str(&format!(" {x}   "));
    }
    output.push('\n');

    for y in 1..state.grid.rows() {
        output.push_str(&format!("  {y} |"));
        for x in 0..state.grid.columns() {
            output.push_str(&cell_label(state, Coord::new(x, y)));
            output.push('|');
        }
        output.push('\n');
    }
}

fn render_squad(output: &mut String, state: &GameState) {
    output.push_str("\nSquad:\n");
    for &id in &state.squad {
        let member = state.member(id);
        output.push_str(&format!(
            "  {} {:<14} {:<5} str {}  at {}\n",
            member_number(id),
            member.name,
            member.posture_str(),
            member.get_strength(),
            member.position
        ));
    }
    for &id in &state.fallen {
        output.push_str(&format!("  {} {:<14} lost\n", member_number(id), state.member(id).name));
    }
}

fn render_threats(output: &mut String, state: &GameState) {
    if state.active.is_empty() {
        return;
    }
    output.push_str("\nThreats:\n");
    for threat in state.active_threats() {
        output.push_str(&format!(
            "  {} {:<12} str {}  vs {}  at {}\n",
            threat.kind.glyph(),
            threat.kind.name(),
            threat.get_strength(),
            threat.strength_opposition,
            threat.position
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_render_new_game() {
        let state = GameState::new(Settings::default(), 4);
        let text = render_ascii(&state);
        assert!(text.starts_with("Turn 1"));
        assert!(text.contains("[Encounter]"));
        assert!(text.contains("Squad:"));
        let board_rows = text.lines().filter(|l| l.contains(" |")).count();
        assert_eq!(board_rows, 4);
        for member in state.squad_members() {
            assert!(text.contains(member.name));
        }
        assert!(!text.contains("Game over"));
    }
}
