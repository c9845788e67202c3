//! Named events for the audio/visual cue dispatcher.
//!
//! The engine pushes cues into [`crate::game::GameState::cues`]; whoever
//! drives the game drains them after each input and maps them to sounds or
//! animations. Nothing in the rules depends on them.

use std::fmt;

use crate::game::{Phase, SquadId, ThreatKind};

/// Something observable happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A new game was set up.
    NewGame,
    /// The phase changed (to the given phase).
    PhaseAdvanced(Phase),
    /// A wrap-up finished and the game goes on.
    TurnEnded,
    /// State was restored to the last phase snapshot.
    Undo,
    /// A squad member was selected.
    SquadSelected(SquadId),
    /// A threat was inspected.
    ThreatSelected(ThreatKind),
    /// A squad member moved to an empty cell.
    SquadMoved,
    /// Two squad members swapped cells.
    SquadSwapped,
    /// A squad member got up.
    FlippedUp,
    /// A squad member went down.
    FlippedDown,
    /// An attack was declared.
    AttackDeclared,
    /// An encountered threat changed column.
    ThreatMoved,
    /// A threat could not be placed and was discarded.
    ThreatDiscarded(ThreatKind),
    /// A threat was defeated by the squad.
    ThreatDefeated(ThreatKind),
    /// A mortar landed.
    MortarStrike,
    /// A squad member was lost.
    SquadMemberLost(SquadId),
    /// All threats were cleared.
    GameWon,
    /// The game was lost.
    GameLost,
}

impl Cue {
    /// Stable event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Cue::NewGame => "new-game",
            Cue::PhaseAdvanced(_) => "phase-advanced",
            Cue::TurnEnded => "turn-ended",
            Cue::Undo => "undo",
            Cue::SquadSelected(_) => "squad-selected",
            Cue::ThreatSelected(_) => "threat-selected",
            Cue::SquadMoved => "squad-moved",
            Cue::SquadSwapped => "squad-swapped",
            Cue::FlippedUp => "flip-up",
            Cue::FlippedDown => "flip-down",
            Cue::AttackDeclared => "attack-declared",
            Cue::ThreatMoved => "threat-moved",
            Cue::ThreatDiscarded(_) => "threat-discarded",
            Cue::ThreatDefeated(_) => "threat-defeated",
            Cue::MortarStrike => "mortar-strike",
            Cue::SquadMemberLost(_) => "squad-member-lost",
            Cue::GameWon => "game-won",
            Cue::GameLost => "game-lost",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
