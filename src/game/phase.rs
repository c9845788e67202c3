//! The five-phase turn cycle and the effects of entering each phase.

use std::fmt;

use serde::Serialize;

use crate::game::{
    resolve_overlap, Coord, Cue, GameState, Placement, ThreatId, ThreatKind, FIRST_PLAYABLE_ROW,
};

/// Turn phase, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Phase {
    /// Threats are drawn and placed.
    Encounter,
    /// Squad members move and flip.
    Maneuver,
    /// Squad members declare attacks.
    Attack,
    /// Defeated threats leave; survivors mark the cells they hit.
    CounterAttack,
    /// Hits land; tanks leave; the turn ends.
    WrapUp,
}

impl Phase {
    /// Every phase, in cycle order.
    pub const ALL: [Phase; 5] = [
        Phase::Encounter,
        Phase::Maneuver,
        Phase::Attack,
        Phase::CounterAttack,
        Phase::WrapUp,
    ];

    /// The phase after this one.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Encounter => Phase::Maneuver,
            Phase::Maneuver => Phase::Attack,
            Phase::Attack => Phase::CounterAttack,
            Phase::CounterAttack => Phase::WrapUp,
            Phase::WrapUp => Phase::Encounter,
        }
    }

    /// Position in the cycle, 0 to 4.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Encounter => "Encounter",
            Phase::Maneuver => "Maneuver",
            Phase::Attack => "Attack",
            Phase::CounterAttack => "Counter-Attack",
            Phase::WrapUp => "Wrap Up",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl GameState {
    /// Move to the next phase and apply its entry effects.
    ///
    /// Ignored once the game is over. Entering Encounter starts a new turn.
    pub fn advance_phase(&mut self) -> bool {
        if self.outcome.is_over() {
            tracing::debug!(outcome = %self.outcome, "cannot advance: game is over");
            return false;
        }
        let next = self.phase.next();
        if next == Phase::Encounter {
            self.turn += 1;
        }
        self.cues.push(Cue::PhaseAdvanced(next));
        self.enter_phase(next);
        self.selection.clear();
        self.refresh_modifiers();
        true
    }

    /// Set the phase and run its entry effects.
    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        tracing::debug!(turn = self.turn, %phase, "phase started");
        match phase {
            Phase::Encounter => self.enter_encounter(),
            Phase::Maneuver => self.enter_maneuver(),
            Phase::Attack => self.enter_attack(),
            Phase::CounterAttack => self.enter_counter_attack(),
            Phase::WrapUp => self.enter_wrap_up(),
        }
    }

    fn enter_encounter(&mut self) {
        self.pending.clear();
        self.pending_columns.clear();

        for row in FIRST_PLAYABLE_ROW..self.grid.rows() {
            let Some(id) = self.deck.pop_front() else {
                break;
            };
            self.encounter_threat(id, row);
        }

        if self.settings.selectable_column_for_encountered_threats {
            self.refresh_pending_columns();
        }

        if self.deck.is_empty() && !self.final_turns.in_final_turns {
            self.final_turns.in_final_turns = true;
            tracing::info!(
                turn = self.turn,
                remaining = self.final_turns.remaining,
                "threat deck exhausted, final turns begin"
            );
        }
    }

    /// Place a freshly drawn threat on `row`, resolving any overlap.
    fn encounter_threat(&mut self, id: ThreatId, row: u8) {
        let threat = self.threat_mut(id);
        threat.position.y = row;
        let kind = threat.kind;
        let column = threat.position.x;
        let overlaps = threat.can_overlap_with_squad;

        let mut target = Coord::new(column, row);
        if !overlaps && !self.grid.is_empty(target) {
            match resolve_overlap(&self.grid, column, row) {
                Placement::Shift(coord) => {
                    tracing::debug!(%kind, from = %target, to = %coord, "threat shifted");
                    target = coord;
                }
                Placement::Displace { coord, member } => {
                    tracing::debug!(%kind, at = %coord, "threat displaced a squad member");
                    self.discard_member(member);
                    target = coord;
                }
                Placement::Discard => {
                    tracing::debug!(%kind, row, "no room in row, threat discarded");
                    self.inactive.push(id);
                    self.cues.push(Cue::ThreatDiscarded(kind));
                    return;
                }
            }
        }

        self.threat_mut(id).position = target;
        self.grid.place_threat(id, target);
        self.active.push(id);
        if self.settings.selectable_column_for_encountered_threats {
            self.pending.push(id);
        }
    }

    fn enter_maneuver(&mut self) {
        self.pending.clear();
        self.pending_columns.clear();

        let mortars = self.active_of_kind(ThreatKind::Mortar);
        for id in mortars {
            let target = self.threat(id).position;
            self.strike_mortar(target, true);
            self.retire_threat(id);
        }

        for id in self.active_of_kind(ThreatKind::Flare) {
            let position = self.threat(id).position;
            if let Some(member) = self.grid.squad_at(position) {
                self.member_mut(member).can_move = false;
            }
        }
    }

    fn enter_attack(&mut self) {
        let squad = self.squad.clone();
        for id in squad {
            self.member_mut(id).post_maneuver_reset();
        }
        self.retire_threats_of_kind(ThreatKind::Flare);
    }

    fn enter_counter_attack(&mut self) {
        let skip_zero = self.settings.threat_cannot_attack_at_zero_strength;
        let active = self.active.clone();
        for id in active {
            if self.threat(id).is_defeated() {
                let kind = self.threat(id).kind;
                tracing::debug!(%kind, at = %self.threat(id).position, "threat defeated");
                self.retire_threat(id);
                self.cues.push(Cue::ThreatDefeated(kind));
                continue;
            }

            self.threat_mut(id).post_attack_reset();
            let threat = self.threat(id);
            if skip_zero && threat.get_strength() == 0 {
                continue;
            }
            let position = threat.position;
            let kind = threat.kind;
            match kind {
                ThreatKind::Infantry1 | ThreatKind::Infantry2 => {
                    let cells = self.grid.adjacent(position, false, false);
                    self.undodgeable.extend(cells);
                }
                ThreatKind::MachineGun => {
                    let cells = self.grid.adjacent(position, false, false);
                    self.dodgeable.extend(cells);
                }
                ThreatKind::Tank => {
                    let cells: Vec<Coord> = self.grid.playable_row(position.y).collect();
                    self.dodgeable.extend(cells);
                }
                ThreatKind::Flare | ThreatKind::Mortar => {}
            }
        }

        let squad = self.squad.clone();
        for id in squad {
            self.member_mut(id).post_attack_reset();
        }
        self.update_outcome();
    }

    fn enter_wrap_up(&mut self) {
        let undodgeable = std::mem::take(&mut self.undodgeable);
        for coord in undodgeable {
            if let Some(id) = self.grid.squad_at(coord) {
                self.discard_member(id);
            }
        }
        let dodgeable = std::mem::take(&mut self.dodgeable);
        for coord in dodgeable {
            let exposed = self.grid.squad_at(coord).filter(|&id| self.member(id).up);
            if let Some(id) = exposed {
                self.discard_member(id);
            }
        }

        self.retire_threats_of_kind(ThreatKind::Tank);

        if self.deck.is_empty() && !self.squad.is_empty() {
            self.final_turns.tick();
            tracing::debug!(
                remaining = self.final_turns.remaining,
                score = self.final_turns.score,
                "final turn spent"
            );
        }
        self.update_outcome();
        if !self.outcome.is_over() {
            self.cues.push(Cue::TurnEnded);
        }

        // The last encounters are drawn; lost members no longer buy time.
        if self.deck.len() <= usize::from(self.grid.rows()) && !self.final_turns.in_final_turns {
            self.final_turns.in_final_turns = true;
            tracing::info!(
                turn = self.turn,
                deck = self.deck.len(),
                remaining = self.final_turns.remaining,
                "final turns begin"
            );
        }
    }

    /// Knock down members on `target` and its orthogonal neighbours. A direct
    /// hit also locks the member on `target` for the phase.
    pub(crate) fn strike_mortar(&mut self, target: Coord, direct_hit: bool) {
        tracing::debug!(%target, direct_hit, "mortar strike");
        for coord in self.grid.adjacent(target, true, false) {
            let Some(id) = self.grid.squad_at(coord) else {
                continue;
            };
            let member = self.member_mut(id);
            member.up = false;
            if direct_hit && coord == target {
                member.rotated = true;
                member.can_move = false;
            }
        }
        self.cues.push(Cue::MortarStrike);
    }

    fn active_of_kind(&self, kind: ThreatKind) -> Vec<ThreatId> {
        self.active
            .iter()
            .copied()
            .filter(|&id| self.threat(id).kind == kind)
            .collect()
    }
}
