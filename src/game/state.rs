//! Game state management.

use std::collections::{BTreeSet, VecDeque};

use crate::game::{
    Coord, Cue, FinalTurns, Grid, Outcome, Phase, SquadId, SquadMember, Threat, ThreatId,
    ThreatKind,
};
use crate::settings::Settings;

/// Transient selection state for the current phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Cell of the selected squad member.
    pub cell: Option<Coord>,
    /// Legal destinations for the selected member (Maneuver).
    pub move_targets: Vec<Coord>,
    /// Legal attack targets for the selected member (Attack).
    pub attack_targets: Vec<Coord>,
    /// Threats in the last clicked cell.
    pub threats: Vec<ThreatId>,
    /// Whether the selected member may flip up right now.
    pub can_flip_up: bool,
}

impl Selection {
    /// Drop everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Complete game state.
///
/// Entities live in two arenas (`members`, `threats`) and are referred to
/// everywhere else by index. The roster and threat lists hold ids; the grid
/// holds ids; cloning the state therefore yields a fully consistent copy
/// with no references to re-link.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Configuration this game was set up with.
    pub settings: Settings,
    /// Seed the game was set up from.
    pub seed: u64,
    /// The board.
    pub grid: Grid,
    /// Every squad member dealt this game, indexed by [`SquadId`].
    pub members: Vec<SquadMember>,
    /// Members still in play, in roster order.
    pub squad: Vec<SquadId>,
    /// Members lost to threats, in order of loss.
    pub fallen: Vec<SquadId>,
    /// Every threat dealt this game, indexed by [`ThreatId`].
    pub threats: Vec<Threat>,
    /// Face-down threat deck; the front is drawn next.
    pub deck: VecDeque<ThreatId>,
    /// Threats on the board.
    pub active: Vec<ThreatId>,
    /// Discard pile.
    pub inactive: Vec<ThreatId>,
    /// Threats encountered this turn that may still change column.
    pub pending: Vec<ThreatId>,
    /// Cells the pending threats may move to.
    pub pending_columns: Vec<Coord>,
    /// Current phase.
    pub phase: Phase,
    /// Turn number, starting at 1.
    pub turn: u32,
    /// Player selection.
    pub selection: Selection,
    /// Cells hit by counter-attacks that cannot be dodged.
    pub undodgeable: BTreeSet<Coord>,
    /// Cells hit by counter-attacks that down members dodge.
    pub dodgeable: BTreeSet<Coord>,
    /// Endgame countdown and score.
    pub final_turns: FinalTurns,
    /// Win/lose state.
    pub outcome: Outcome,
    /// Events not yet taken by the cue dispatcher.
    pub cues: Vec<Cue>,
}

impl GameState {
    /// Create a blank game: empty board, no squad, no deck, Encounter of
    /// turn 1. Used as the base for setup and for hand-built positions.
    #[must_use]
    pub fn empty(settings: Settings) -> Self {
        Self {
            settings,
            seed: 0,
            grid: Grid::default(),
            members: Vec::new(),
            squad: Vec::new(),
            fallen: Vec::new(),
            threats: Vec::new(),
            deck: VecDeque::new(),
            active: Vec::new(),
            inactive: Vec::new(),
            pending: Vec::new(),
            pending_columns: Vec::new(),
            phase: Phase::Encounter,
            turn: 1,
            selection: Selection::default(),
            undodgeable: BTreeSet::new(),
            dodgeable: BTreeSet::new(),
            final_turns: FinalTurns::default(),
            outcome: Outcome::InProgress,
            cues: Vec::new(),
        }
    }

    /// Check if the game is over.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Get a squad member by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this state.
    #[must_use]
    pub fn member(&self, id: SquadId) -> &SquadMember {
        &self.members[id.index()]
    }

    /// Get a mutable squad member by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this state.
    pub fn member_mut(&mut self, id: SquadId) -> &mut SquadMember {
        &mut self.members[id.index()]
    }

    /// Get a threat by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this state.
    #[must_use]
    pub fn threat(&self, id: ThreatId) -> &Threat {
        &self.threats[id.index()]
    }

    /// Get a mutable threat by id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not issued by this state.
    pub fn threat_mut(&mut self, id: ThreatId) -> &mut Threat {
        &mut self.threats[id.index()]
    }

    /// Squad member standing at `coord`.
    #[must_use]
    pub fn member_at(&self, coord: Coord) -> Option<SquadId> {
        self.grid.squad_at(coord)
    }

    /// Members in play, in roster order.
    pub fn squad_members(&self) -> impl Iterator<Item = &SquadMember> {
        self.squad.iter().map(|&id| self.member(id))
    }

    /// Threats on the board.
    pub fn active_threats(&self) -> impl Iterator<Item = &Threat> {
        self.active.iter().map(|&id| self.threat(id))
    }

    /// Find a member in play by card name.
    #[must_use]
    pub fn find_member(&self, name: &str) -> Option<SquadId> {
        self.squad
            .iter()
            .copied()
            .find(|&id| self.member(id).name == name)
    }

    /// Add a member to the roster and put it on `coord`.
    ///
    /// Returns `None` (and adds nothing) if the cell already holds a member
    /// or is not playable.
    pub fn add_member(&mut self, mut member: SquadMember, coord: Coord) -> Option<SquadId> {
        if !self.grid.is_playable(coord) || self.grid.squad_at(coord).is_some() {
            return None;
        }
        let id = SquadId(u8::try_from(self.members.len()).ok()?);
        member.position = coord;
        self.members.push(member);
        self.grid.place_squad(id, coord);
        self.squad.push(id);
        Some(id)
    }

    /// Put a threat on the board at `coord` as an active threat, without
    /// any overlap checks.
    pub fn add_threat(&mut self, mut threat: Threat, coord: Coord) -> Option<ThreatId> {
        if !self.grid.in_bounds(coord) {
            return None;
        }
        let id = ThreatId(u16::try_from(self.threats.len()).ok()?);
        threat.position = coord;
        self.threats.push(threat);
        self.grid.place_threat(id, coord);
        self.active.push(id);
        Some(id)
    }

    /// Put a threat at the bottom of the deck.
    pub fn queue_threat(&mut self, threat: Threat) -> Option<ThreatId> {
        let id = ThreatId(u16::try_from(self.threats.len()).ok()?);
        self.threats.push(threat);
        self.deck.push_back(id);
        Some(id)
    }

    /// Remove a member from the roster and the board for good.
    ///
    /// Every loss may extend the final turns (see
    /// [`GameState::increase_final_turns`]).
    pub fn discard_member(&mut self, id: SquadId) {
        let coord = self.member(id).position;
        self.grid.remove_squad(coord);
        self.squad.retain(|&m| m != id);
        self.fallen.push(id);
        tracing::debug!(member = self.member(id).name, %coord, "squad member lost");
        self.cues.push(Cue::SquadMemberLost(id));
        self.increase_final_turns();
    }

    /// Take an active threat off the board into the discard pile.
    pub fn retire_threat(&mut self, id: ThreatId) {
        let coord = self.threat(id).position;
        self.grid.remove_threat(id, coord);
        self.active.retain(|&t| t != id);
        self.pending.retain(|&t| t != id);
        self.inactive.push(id);
    }

    /// Retire every active threat of `kind`.
    pub fn retire_threats_of_kind(&mut self, kind: ThreatKind) -> Vec<ThreatId> {
        let retired: Vec<ThreatId> = self
            .active
            .iter()
            .copied()
            .filter(|&id| self.threat(id).kind == kind)
            .collect();
        for &id in &retired {
            self.retire_threat(id);
        }
        retired
    }

    /// Take all queued cues.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}
