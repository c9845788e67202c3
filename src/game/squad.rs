//! Squad member state and ability predicates.

use crate::game::{Abilities, Coord};

/// Strength a `BONUS` member has while an up pacifist is adjacent.
pub const BOOSTED_STRENGTH: u8 = 2;

/// Index of a squad member in the game's member arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SquadId(pub u8);

impl SquadId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A player-controlled unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquadMember {
    /// Unique card name.
    pub name: &'static str,
    /// Current strength (may hold the pacifist bonus).
    pub strength: u8,
    /// Printed strength, restored when the bonus is lost.
    pub original_strength: u8,
    /// Printed abilities.
    pub abilities: Abilities,
    /// Cell the member occupies.
    pub position: Coord,
    /// Posture. Down members cannot move and usually cannot attack.
    pub up: bool,
    /// Acted (moved or flipped) this phase.
    pub rotated: bool,
    /// Movement still possible this phase.
    pub can_move: bool,
    /// Movements left this phase.
    pub movements_remaining: u8,
    /// Movements granted per Maneuver phase.
    pub movements_allowed: u8,
    /// Acted via flip this phase.
    pub has_been_flipped: bool,
    /// Declared attack target for this Attack phase.
    pub attack_target: Option<Coord>,
    /// Whether the member may attack at all.
    pub can_attack: bool,
}

impl SquadMember {
    /// Create an up, unplaced member from its card.
    #[must_use]
    pub fn new(name: &'static str, strength: u8, abilities: Abilities) -> Self {
        let movements_allowed = if abilities.contains(Abilities::SPRINTER) {
            2
        } else {
            1
        };
        Self {
            name,
            strength,
            original_strength: strength,
            abilities,
            position: Coord::new(0, 0),
            up: true,
            rotated: false,
            can_move: true,
            movements_remaining: movements_allowed,
            movements_allowed,
            has_been_flipped: false,
            attack_target: None,
            can_attack: !abilities.contains(Abilities::PACIFIST),
        }
    }

    /// Effective attack strength.
    ///
    /// Zero while down, unless the member can attack while down.
    #[must_use]
    pub fn get_strength(&self) -> u8 {
        if self.up || self.can_attack_when_down() {
            self.strength
        } else {
            0
        }
    }

    /// Record a flip to `up`. Flipping consumes a movement; flipping down
    /// ends all movement for the phase.
    pub fn register_flip(&mut self, up: bool) {
        self.up = up;
        self.register_move();
        self.has_been_flipped = true;
        if !up {
            self.can_move = false;
            self.movements_remaining = 0;
        }
    }

    /// Record one movement.
    pub fn register_move(&mut self) {
        self.rotated = true;
        self.movements_remaining = self.movements_remaining.saturating_sub(1);
        if self.movements_remaining == 0 {
            self.can_move = false;
        }
    }

    /// Restore per-phase movement bookkeeping. Posture is kept.
    pub fn post_maneuver_reset(&mut self) {
        self.rotated = false;
        self.can_move = true;
        self.has_been_flipped = false;
        self.movements_remaining = self.movements_allowed;
    }

    /// Forget this phase's attack declaration.
    pub fn post_attack_reset(&mut self) {
        self.attack_target = None;
    }

    /// Free to move and has not acted yet this phase.
    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.can_move && !self.rotated
    }

    /// Already declared an attack this phase.
    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.attack_target.is_some()
    }

    /// Diagonal cells count as attack targets.
    #[must_use]
    pub fn can_attack_diagonally(&self) -> bool {
        self.abilities.contains(Abilities::DIAGONAL)
    }

    /// Strength is kept while down.
    #[must_use]
    pub fn can_attack_when_down(&self) -> bool {
        self.abilities.contains(Abilities::DUCK)
    }

    /// Up and a pure pacifist (no other ability).
    #[must_use]
    pub fn grants_pacifist_bonus(&self) -> bool {
        self.abilities.is_exactly(Abilities::PACIFIST) && self.up
    }

    /// Up and a pure `BONUS` member.
    #[must_use]
    pub fn can_get_pacifist_bonus(&self) -> bool {
        self.abilities.is_exactly(Abilities::BONUS) && self.up
    }

    /// Raise strength to [`BOOSTED_STRENGTH`].
    pub fn apply_pacifist_bonus(&mut self) {
        self.strength = BOOSTED_STRENGTH;
    }

    /// Restore the printed strength.
    pub fn remove_pacifist_bonus(&mut self) {
        self.strength = self.original_strength;
    }

    /// A second move is allowed right after a first one.
    #[must_use]
    pub fn can_move_after_moving(&self) -> bool {
        self.abilities.contains(Abilities::SPRINTER)
            && self.rotated
            && !self.has_been_flipped
            && self.can_move
            && self.movements_remaining > 0
    }

    /// A flip down is allowed after movement ran out.
    #[must_use]
    pub fn can_flip_down_after_moving(&self) -> bool {
        self.abilities.contains(Abilities::DUCK)
            && self.up
            && self.rotated
            && !self.has_been_flipped
            && !self.can_move
    }

    /// Can get up with nobody around.
    #[must_use]
    pub fn can_flip_up_without_squad_member(&self) -> bool {
        self.abilities.contains(Abilities::LEADER) && !self.has_been_flipped && !self.up
    }

    /// `"up"` or `"down"`.
    #[must_use]
    pub fn posture_str(&self) -> &'static str {
        if self.up { "up" } else { "down" }
    }

    /// Card text.
    #[must_use]
    pub fn description(&self) -> Vec<String> {
        self.abilities.describe(BOOSTED_STRENGTH)
    }
}

/// The full bench of eight squad members, in card order.
#[must_use]
pub fn bench() -> Vec<SquadMember> {
    vec![
        SquadMember::new("The Leader", 1, Abilities::LEADER),
        SquadMember::new("The Athlete", 1, Abilities::SPRINTER),
        SquadMember::new("The Mouse", 1, Abilities::DUCK),
        SquadMember::new("The Natural", 1, Abilities::DIAGONAL),
        SquadMember::new("The Pacifist", 0, Abilities::PACIFIST),
        SquadMember::new("The Hammer", 1, Abilities::BONUS),
        SquadMember::new("The Anvil", 1, Abilities::BONUS),
        SquadMember::new("The Joker", 0, Abilities::JOKER | Abilities::PACIFIST),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(abilities: Abilities) -> SquadMember {
        SquadMember::new("Test", 1, abilities)
    }

    #[test]
    fn test_strength_zero_when_down() {
        let mut m = member(Abilities::LEADER);
        m.up = false;
        assert_eq!(m.get_strength(), 0);

        let mut mouse = member(Abilities::DUCK);
        mouse.up = false;
        assert_eq!(mouse.get_strength(), 1);
    }

    #[test]
    fn test_sprinter_moves_twice() {
        let mut m = member(Abilities::SPRINTER);
        assert_eq!(m.movements_allowed, 2);
        m.register_move();
        assert!(m.can_move);
        assert!(m.can_move_after_moving());
        m.register_move();
        assert!(!m.can_move);
        assert!(!m.can_move_after_moving());
    }

    #[test]
    fn test_flip_down_ends_movement() {
        let mut m = member(Abilities::SPRINTER);
        m.register_flip(false);
        assert!(!m.up);
        assert!(!m.can_move);
        assert_eq!(m.movements_remaining, 0);
        assert!(m.has_been_flipped);
        assert!(m.rotated);
    }

    #[test]
    fn test_post_maneuver_reset_keeps_posture() {
        let mut m = member(Abilities::SPRINTER);
        m.register_flip(false);
        m.post_maneuver_reset();
        assert!(!m.up);
        assert!(!m.rotated);
        assert!(!m.has_been_flipped);
        assert!(m.can_move);
        assert_eq!(m.movements_remaining, 2);
    }

    #[test]
    fn test_mouse_flip_down_after_moving() {
        let mut m = member(Abilities::DUCK);
        assert!(!m.can_flip_down_after_moving());
        m.register_move();
        assert!(m.can_flip_down_after_moving());
        m.register_flip(false);
        assert!(!m.can_flip_down_after_moving());
    }

    #[test]
    fn test_leader_flip_up_alone() {
        let mut m = member(Abilities::LEADER);
        assert!(!m.can_flip_up_without_squad_member());
        m.up = false;
        assert!(m.can_flip_up_without_squad_member());
        m.has_been_flipped = true;
        assert!(!m.can_flip_up_without_squad_member());
    }

    #[test]
    fn test_pacifist_bonus_is_exclusive() {
        let bench = bench();
        let pacifist = &bench[4];
        let joker = &bench[7];
        assert!(pacifist.grants_pacifist_bonus());
        assert!(!joker.grants_pacifist_bonus());
        assert!(!joker.can_attack);
        assert!(bench[5].can_get_pacifist_bonus());
    }

    #[test]
    fn test_bonus_round_trip() {
        let mut hammer = member(Abilities::BONUS);
        hammer.apply_pacifist_bonus();
        assert_eq!(hammer.get_strength(), BOOSTED_STRENGTH);
        hammer.remove_pacifist_bonus();
        assert_eq!(hammer.get_strength(), 1);
    }

    #[test]
    fn test_bench_names_unique() {
        let bench = bench();
        let mut names: Vec<_> = bench.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }
}
