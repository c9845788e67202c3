//! Player actions.
//!
//! Every action is validated against the current phase and entity state.
//! Illegal actions change nothing and return `false`; the reason is logged
//! at debug level.

use crate::game::{Cell, Coord, Cue, GameState, Phase, SquadId, FIRST_PLAYABLE_COLUMN};

impl GameState {
    /// The member on the selected cell, if any.
    #[must_use]
    pub fn selected_member(&self) -> Option<SquadId> {
        self.selection.cell.and_then(|c| self.grid.squad_at(c))
    }

    /// Handle a click on `coord`.
    ///
    /// Depending on the phase this moves a pending threat (Encounter), moves
    /// or swaps the selected member (Maneuver), or declares an attack
    /// (Attack). Any other click selects the cell. Returns `true` if the
    /// board changed; selection-only clicks return `false`.
    pub fn click_cell(&mut self, coord: Coord) -> bool {
        if !self.grid.in_bounds(coord) {
            tracing::debug!(%coord, "click outside the board");
            return false;
        }
        let threat_moved = self.phase == Phase::Encounter
            && self.settings.selectable_column_for_encountered_threats
            && self.move_pending_threat(coord);
        if threat_moved {
            return true;
        }
        match self.phase {
            Phase::Maneuver if self.selection.move_targets.contains(&coord) => {
                return self.move_selected_to(coord);
            }
            Phase::Attack if self.selection.attack_targets.contains(&coord) => {
                return self.declare_attack(coord);
            }
            _ => {}
        }
        self.select_cell(coord);
        false
    }

    /// Flip the selected member up.
    pub fn flip_up(&mut self) -> bool {
        if !self.can_act_in(Phase::Maneuver) {
            return false;
        }
        let Some(id) = self.selected_member() else {
            tracing::debug!("cannot flip up: nothing selected");
            return false;
        };
        if !self.can_flip_up(id) {
            return false;
        }
        self.member_mut(id).register_flip(true);
        self.cues.push(Cue::FlippedUp);
        self.cancel_selection();
        self.refresh_modifiers();
        true
    }

    /// Flip the selected member down.
    ///
    /// Allowed for an up member who has not acted this phase, or for a
    /// member whose ability lets them duck after moving.
    pub fn flip_down(&mut self) -> bool {
        if !self.can_act_in(Phase::Maneuver) {
            return false;
        }
        let Some(id) = self.selected_member() else {
            tracing::debug!("cannot flip down: nothing selected");
            return false;
        };
        let member = self.member(id);
        if !member.up {
            tracing::debug!(member = member.name, "cannot flip down: already down");
            return false;
        }
        if member.has_been_flipped || (member.rotated && !member.can_flip_down_after_moving()) {
            tracing::debug!(member = member.name, "cannot flip down: already acted");
            return false;
        }
        self.member_mut(id).register_flip(false);
        self.cues.push(Cue::FlippedDown);
        self.cancel_selection();
        self.refresh_modifiers();
        true
    }

    /// Drop the current selection.
    pub fn cancel_selection(&mut self) {
        self.selection.clear();
    }

    /// Mutating actions need a live game in the right phase.
    fn can_act_in(&self, phase: Phase) -> bool {
        if self.outcome.is_over() {
            tracing::debug!(outcome = %self.outcome, "action ignored: game is over");
            return false;
        }
        if self.phase != phase {
            tracing::debug!(current = %self.phase, required = %phase, "action ignored: wrong phase");
            return false;
        }
        true
    }

    fn select_cell(&mut self, coord: Coord) {
        let threats = self.grid.threats_at(coord).to_vec();
        if let Some(id) = self.grid.squad_at(coord) {
            self.selection.clear();
            let member = self.member(id);
            match self.phase {
                Phase::Maneuver => {
                    if member.up && (member.is_movable() || member.can_move_after_moving()) {
                        self.selection.move_targets = self.movement_targets(coord);
                    }
                    self.selection.can_flip_up = self.can_flip_up(id);
                }
                Phase::Attack
                    if (member.up || member.can_attack_when_down())
                        && member.can_attack
                        && !member.is_attacking() =>
                {
                    self.selection.attack_targets =
                        self.attack_targets(coord, member.can_attack_diagonally());
                }
                _ => {}
            }
            self.selection.cell = Some(coord);
            self.cues.push(Cue::SquadSelected(id));
        } else {
            self.cancel_selection();
        }
        for &threat in &threats {
            let kind = self.threat(threat).kind;
            self.cues.push(Cue::ThreatSelected(kind));
        }
        self.selection.threats = threats;
    }

    fn move_selected_to(&mut self, to: Coord) -> bool {
        if !self.can_act_in(Phase::Maneuver) {
            return false;
        }
        let Some(from) = self.selection.cell else {
            return false;
        };
        let Some(mover) = self.grid.squad_at(from) else {
            return false;
        };

        if let Some(other) = self.grid.squad_at(to) {
            if !self.grid.swap_squad(from, to) {
                return false;
            }
            let member = self.member_mut(mover);
            member.register_move();
            member.position = to;
            let member = self.member_mut(other);
            member.register_move();
            member.position = from;
            tracing::debug!(%from, %to, "squad members swapped");
            self.cues.push(Cue::SquadSwapped);
        } else {
            if !self.grid.relocate_squad(from, to) {
                return false;
            }
            let member = self.member_mut(mover);
            member.register_move();
            member.position = to;
            tracing::debug!(%from, %to, "squad member moved");
            self.cues.push(Cue::SquadMoved);
        }

        self.cancel_selection();
        self.refresh_modifiers();
        true
    }

    fn declare_attack(&mut self, target: Coord) -> bool {
        if !self.can_act_in(Phase::Attack) {
            return false;
        }
        let Some(attacker) = self.selected_member() else {
            return false;
        };
        let Some(threat) = self.grid.get(target).and_then(Cell::first_threat) else {
            return false;
        };
        let strength = self.member(attacker).get_strength();
        self.member_mut(attacker).attack_target = Some(target);
        let threat = self.threat_mut(threat);
        threat.strength_opposition = threat.strength_opposition.saturating_add(strength);
        tracing::debug!(%target, strength, opposition = threat.strength_opposition, "attack declared");
        self.cues.push(Cue::AttackDeclared);
        self.cancel_selection();
        true
    }

    /// Move the pending threat of `coord`'s row to `coord`'s column.
    fn move_pending_threat(&mut self, coord: Coord) -> bool {
        if self.outcome.is_over() || coord.x < FIRST_PLAYABLE_COLUMN {
            return false;
        }
        let Some(id) = self
            .pending
            .iter()
            .copied()
            .find(|&t| self.threat(t).position.y == coord.y)
        else {
            return false;
        };
        let from = self.threat(id).position;
        if from.x == coord.x || !self.can_threat_move_to_column(id, coord.x) {
            return false;
        }
        if !self.grid.relocate_threat(id, from, coord) {
            return false;
        }
        self.threat_mut(id).position = coord;
        tracing::debug!(%from, to = %coord, "encountered threat changed column");
        self.cues.push(Cue::ThreatMoved);
        self.refresh_pending_columns();
        self.refresh_modifiers();
        true
    }
}
