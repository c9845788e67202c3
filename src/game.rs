//! Game layer for The Lucky Seven.
//!
//! Implements the rules of the solo squad-versus-threats card game:
//! - Grid of cells holding squad members and threats
//! - Squad members with abilities, threats with strengths
//! - Turn structure (Encounter, Maneuver, Attack, Counter-Attack, Wrap-Up)
//! - Player actions validated per phase
//! - Win/lose evaluation and the final-turns countdown

mod ability;
mod actions;
mod cue;
mod grid;
pub mod invariants;
mod outcome;
mod phase;
mod placement;
mod setup;
mod spatial;
mod squad;
mod state;
mod threat;

pub use ability::Abilities;
pub use cue::Cue;
pub use grid::{Cell, Coord, Grid, FIRST_PLAYABLE_COLUMN, FIRST_PLAYABLE_ROW, GRID_COLUMNS, GRID_ROWS};
pub use outcome::{
    evaluate, FinalTurns, Outcome, FINAL_SCORE, FINAL_TURNS, FINAL_TURNS_PAR, FINAL_TURN_PENALTY,
};
pub use phase::Phase;
pub use placement::{resolve_overlap, Placement, CENTER_COLUMN};
pub use setup::{build_deck, deal_squad, MAP_CARDS_X, MAP_CARDS_Y, MAX_MAP_CARD_VALUE};
pub use squad::{bench, SquadId, SquadMember, BOOSTED_STRENGTH};
pub use state::{GameState, Selection};
pub use threat::{Threat, ThreatId, ThreatKind};
