//! Threat cards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Coord;

/// Index of a threat in the game's threat arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreatId(pub u16);

impl ThreatId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of threat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ThreatKind {
    /// Sweeps its whole row; fixed to column 0; gone after one turn.
    Tank = 0,
    /// Strength 1, hits adjacent cells.
    Infantry1 = 1,
    /// Strength 2, hits adjacent cells.
    Infantry2 = 2,
    /// Strength 3, hits adjacent up members.
    MachineGun = 3,
    /// Pins the member below it for one Maneuver phase.
    Flare = 4,
    /// Knocks down the member below and its neighbours.
    Mortar = 5,
}

impl ThreatKind {
    /// Every kind, in card order.
    pub const ALL: [ThreatKind; 6] = [
        ThreatKind::Tank,
        ThreatKind::Infantry1,
        ThreatKind::Infantry2,
        ThreatKind::MachineGun,
        ThreatKind::Flare,
        ThreatKind::Mortar,
    ];

    /// Printed strength.
    #[must_use]
    pub const fn base_strength(self) -> u8 {
        match self {
            ThreatKind::Tank => 9,
            ThreatKind::Infantry1 => 1,
            ThreatKind::Infantry2 => 2,
            ThreatKind::MachineGun => 3,
            ThreatKind::Flare | ThreatKind::Mortar => 0,
        }
    }

    /// May share a cell with a squad member or another threat.
    #[must_use]
    pub const fn can_overlap_with_squad(self) -> bool {
        matches!(self, ThreatKind::Tank | ThreatKind::Flare | ThreatKind::Mortar)
    }

    /// Card name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ThreatKind::Tank => "Tank",
            ThreatKind::Infantry1 | ThreatKind::Infantry2 => "Infantry",
            ThreatKind::MachineGun => "Machine Gun",
            ThreatKind::Flare => "Flare",
            ThreatKind::Mortar => "Mortar",
        }
    }

    /// Card text.
    #[must_use]
    pub const fn description(self) -> &'static [&'static str] {
        match self {
            ThreatKind::Tank => &[
                "Discard all squad members in this row that are up.",
                "Then discard this card.",
            ],
            ThreatKind::Infantry1 | ThreatKind::Infantry2 => {
                &["Discard all adjacent squad members."]
            }
            ThreatKind::MachineGun => &["Discard all adjacent squad members that are up."],
            ThreatKind::Flare => &[
                "The squad member here may not move.",
                "Other squad members may not move here.",
                "Discard this card at the end of the phase.",
            ],
            ThreatKind::Mortar => &[
                "Flip down and rotate the squad member here.",
                "Then flip down all adjacent squad members.",
                "Finally, discard this card.",
            ],
        }
    }

    /// Single-letter board glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            ThreatKind::Tank => 'T',
            ThreatKind::Infantry1 => 'i',
            ThreatKind::Infantry2 => 'I',
            ThreatKind::MachineGun => 'G',
            ThreatKind::Flare => 'F',
            ThreatKind::Mortar => 'M',
        }
    }
}

impl fmt::Display for ThreatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An enemy card on (or waiting for) the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threat {
    /// Card kind.
    pub kind: ThreatKind,
    /// Cell (row is assigned when encountered).
    pub position: Coord,
    /// Printed strength.
    pub strength: u8,
    /// Strength of the attacks declared against it this Attack phase.
    pub strength_opposition: u8,
    /// Reduction from adjacent jokers. Derived, recomputed on refresh.
    pub strength_reduction: u8,
    /// May share a cell with squad members.
    pub can_overlap_with_squad: bool,
}

impl Threat {
    /// Create a threat of `kind` destined for `column`.
    #[must_use]
    pub fn new(kind: ThreatKind, column: u8) -> Self {
        Self {
            kind,
            position: Coord::new(column, 0),
            strength: kind.base_strength(),
            strength_opposition: 0,
            strength_reduction: 0,
            can_overlap_with_squad: kind.can_overlap_with_squad(),
        }
    }

    /// Attacked with enough force to be removed.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.strength > 0
            && self.strength_opposition > 0
            && self.strength_opposition >= self.get_strength()
    }

    /// Net strength after reductions.
    #[must_use]
    pub fn get_strength(&self) -> u8 {
        if self.strength == 0 {
            return 0;
        }
        self.strength.saturating_sub(self.strength_reduction)
    }

    /// Forget accumulated opposition.
    pub fn post_attack_reset(&mut self) {
        self.strength_opposition = 0;
    }

    /// Apply the joker reduction.
    pub fn set_strength_reduction(&mut self) {
        self.strength_reduction = 1;
    }

    /// Clear the joker reduction.
    pub fn reset_strength_reduction(&mut self) {
        self.strength_reduction = 0;
    }

    /// Locked to its starting column.
    #[must_use]
    pub fn is_fixed_column(&self) -> bool {
        self.kind == ThreatKind::Tank
    }
}
