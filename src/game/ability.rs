//! Squad member ability flags.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of abilities printed on a squad member card.
    ///
    /// Bit values match the card numbering so that rosters written as plain
    /// integers (e.g. `80` for the Joker) keep working.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Abilities: u8 {
        /// Can get up alone, and lets diagonal neighbours get up.
        const LEADER = 1;
        /// Two movements per Maneuver phase.
        const SPRINTER = 2;
        /// May flip down after moving, and attacks while down.
        const DUCK = 4;
        /// Attacks diagonally.
        const DIAGONAL = 8;
        /// Never attacks; grants the bonus to adjacent `BONUS` members.
        const PACIFIST = 16;
        /// Boosted strength next to an up pacifist.
        const BONUS = 32;
        /// Lowers the strength of adjacent threats by one.
        const JOKER = 64;
    }
}

impl Abilities {
    /// Check that this set is exactly `ability` and nothing else.
    #[must_use]
    pub fn is_exactly(self, ability: Abilities) -> bool {
        self == ability
    }

    /// Human-readable card text, one line per ability.
    #[must_use]
    pub fn describe(self, boosted_strength: u8) -> Vec<String> {
        let mut lines = Vec::new();
        if self.contains(Self::LEADER) {
            lines.push("Allows diagonally adjacent squad members to get up.".to_string());
            lines.push("Can get up without adjacent squad members.".to_string());
        }
        if self.contains(Self::SPRINTER) {
            lines.push("Can move twice when moving.".to_string());
        }
        if self.contains(Self::DUCK) {
            lines.push("Can flip down after moving.".to_string());
            lines.push("Can attack adjacent threats when down.".to_string());
        }
        if self.contains(Self::DIAGONAL) {
            lines.push("Can attack diagonally.".to_string());
        }
        if self.contains(Self::PACIFIST) {
            lines.push("Cannot attack.".to_string());
        }
        if self.contains(Self::BONUS) {
            lines.push(format!(
                "Has strength {boosted_strength} when the Pacifist is adjacent and up."
            ));
        }
        if self.contains(Self::JOKER) {
            lines.push("Reduces the strength of each adjacent threat by 1.".to_string());
        }
        lines
    }
}
