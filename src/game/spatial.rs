//! Spatial queries over the game state: movement and attack reach, flip-up
//! support, and the adjacency-derived modifiers.

use crate::game::{Abilities, Coord, GameState, SquadId};

impl GameState {
    /// Squad members on cells adjacent to `coord`.
    #[must_use]
    pub fn adjacent_members(&self, coord: Coord, include_diagonals: bool) -> Vec<SquadId> {
        self.grid
            .adjacent(coord, false, include_diagonals)
            .into_iter()
            .filter_map(|c| self.grid.squad_at(c))
            .collect()
    }

    /// Cells the member at `start` could move to.
    ///
    /// Any neighbouring cell, diagonals included, except cells holding a
    /// threat, cells holding a member who cannot swap (down or already
    /// acted), and diagonals whose two shared orthogonal cells both hold
    /// threats.
    #[must_use]
    pub fn movement_targets(&self, start: Coord) -> Vec<Coord> {
        self.grid
            .adjacent(start, false, true)
            .into_iter()
            .filter(|&c| {
                if self.grid.has_threat(c) {
                    return false;
                }
                if let Some(id) = self.grid.squad_at(c) {
                    let other = self.member(id);
                    if !other.is_movable() || !other.up {
                        return false;
                    }
                }
                if start.is_diagonal_to(c) {
                    let corner_a = Coord::new(c.x, start.y);
                    let corner_b = Coord::new(start.x, c.y);
                    if self.grid.has_threat(corner_a) && self.grid.has_threat(corner_b) {
                        return false;
                    }
                }
                true
            })
            .collect()
    }

    /// Neighbouring cells holding a threat.
    #[must_use]
    pub fn attack_targets(&self, start: Coord, include_diagonals: bool) -> Vec<Coord> {
        self.grid
            .adjacent(start, false, include_diagonals)
            .into_iter()
            .filter(|&c| self.grid.has_threat(c))
            .collect()
    }

    /// Whether the member `id` may flip up now.
    ///
    /// It must be down and not have acted this phase. Then it needs one of:
    /// its own leader ability, an up leader anywhere around it, or an up
    /// member orthogonally next to it.
    #[must_use]
    pub fn can_flip_up(&self, id: SquadId) -> bool {
        let member = self.member(id);
        if member.up {
            tracing::debug!(member = member.name, "cannot flip up: already up");
            return false;
        }
        if member.rotated {
            tracing::debug!(member = member.name, "cannot flip up: already acted");
            return false;
        }
        if member.can_flip_up_without_squad_member() {
            return true;
        }
        let position = member.position;
        let leader_nearby = self.adjacent_members(position, true).into_iter().any(|m| {
            let other = self.member(m);
            other.up && other.abilities.contains(Abilities::LEADER)
        });
        if leader_nearby {
            return true;
        }
        let supported = self
            .adjacent_members(position, false)
            .into_iter()
            .any(|m| self.member(m).up);
        if !supported {
            tracing::debug!(member = member.name, "cannot flip up: no adjacent member is up");
        }
        supported
    }

    /// Recompute derived strength modifiers from the current positions.
    ///
    /// A pure bonus member next to an up pure pacifist is boosted; every
    /// other bonus member is reset. A threat next to an up joker is reduced.
    pub fn refresh_modifiers(&mut self) {
        let squad = self.squad.clone();
        for id in squad {
            let member = self.member(id);
            if !member.abilities.contains(Abilities::BONUS) {
                continue;
            }
            let boosted = member.can_get_pacifist_bonus()
                && self
                    .adjacent_members(member.position, false)
                    .into_iter()
                    .any(|m| self.member(m).grants_pacifist_bonus());
            let member = self.member_mut(id);
            if boosted {
                member.apply_pacifist_bonus();
            } else {
                member.remove_pacifist_bonus();
            }
        }

        let active = self.active.clone();
        for id in active {
            let position = self.threat(id).position;
            let joker_nearby = self.adjacent_members(position, false).into_iter().any(|m| {
                let member = self.member(m);
                member.up && member.abilities.contains(Abilities::JOKER)
            });
            let threat = self.threat_mut(id);
            if joker_nearby {
                threat.set_strength_reduction();
            } else {
                threat.reset_strength_reduction();
            }
        }
    }
}
