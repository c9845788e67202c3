//! Game settings.
//!
//! Settings are read once when a game is set up and never mutated by the
//! rules engine. Out-of-range values are clamped here, at the boundary, by
//! [`Settings::normalised`]; the core trusts whatever it is given.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::game::ThreatKind;

/// Most squad members that may be culled at setup (the bench holds eight).
pub const MAX_SQUAD_MEMBERS_SUBTRACTION: u8 = 7;

/// Largest threat deck a game may use.
pub const MAX_THREAT_COUNT_TOTAL: u8 = 60;

/// Most cards of one threat kind in the deck.
pub const MAX_THREAT_COUNT_PER_KIND: u8 = 12;

/// Number of cards of each threat kind put into the deck before shuffling.
///
/// Serialised with the kind's card number as key, `"0"` (Tank) to `"5"`
/// (Mortar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatCounts {
    /// Tanks.
    #[serde(rename = "0")]
    pub tank: u8,
    /// Infantry of strength 1.
    #[serde(rename = "1")]
    pub infantry1: u8,
    /// Infantry of strength 2.
    #[serde(rename = "2")]
    pub infantry2: u8,
    /// Machine guns.
    #[serde(rename = "3")]
    pub machine_gun: u8,
    /// Flares.
    #[serde(rename = "4")]
    pub flare: u8,
    /// Mortars.
    #[serde(rename = "5")]
    pub mortar: u8,
}

impl Default for ThreatCounts {
    fn default() -> Self {
        Self {
            tank: 4,
            infantry1: 6,
            infantry2: 6,
            machine_gun: 6,
            flare: 6,
            mortar: 6,
        }
    }
}

impl ThreatCounts {
    /// Count for one kind.
    #[must_use]
    pub const fn get(&self, kind: ThreatKind) -> u8 {
        match kind {
            ThreatKind::Tank => self.tank,
            ThreatKind::Infantry1 => self.infantry1,
            ThreatKind::Infantry2 => self.infantry2,
            ThreatKind::MachineGun => self.machine_gun,
            ThreatKind::Flare => self.flare,
            ThreatKind::Mortar => self.mortar,
        }
    }

    /// Set the count for one kind.
    pub fn set(&mut self, kind: ThreatKind, count: u8) {
        let slot = match kind {
            ThreatKind::Tank => &mut self.tank,
            ThreatKind::Infantry1 => &mut self.infantry1,
            ThreatKind::Infantry2 => &mut self.infantry2,
            ThreatKind::MachineGun => &mut self.machine_gun,
            ThreatKind::Flare => &mut self.flare,
            ThreatKind::Mortar => &mut self.mortar,
        };
        *slot = count;
    }

    /// Sum over all kinds.
    #[must_use]
    pub fn total(&self) -> u32 {
        ThreatKind::ALL
            .iter()
            .map(|&kind| u32::from(self.get(kind)))
            .sum()
    }
}

/// Configuration for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Settings {
    /// Squad members removed from the shuffled bench at setup.
    pub squad_members_subtraction: u8,
    /// Cap on the threat deck after shuffling.
    pub threat_count_total: u8,
    /// Cards of each kind before the cap is applied.
    pub threat_count_mapping: ThreatCounts,
    /// Threats whose net strength is zero do not counter-attack.
    pub threat_cannot_attack_at_zero_strength: bool,
    /// Each squad member lost before the deck runs out adds a final turn.
    pub final_turns_increase_from_defeated_squad_members: bool,
    /// Encountered threats may be moved to another column before Maneuver.
    pub selectable_column_for_encountered_threats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            squad_members_subtraction: 1,
            threat_count_total: 28,
            threat_count_mapping: ThreatCounts::default(),
            threat_cannot_attack_at_zero_strength: false,
            final_turns_increase_from_defeated_squad_members: false,
            selectable_column_for_encountered_threats: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] if the text is not valid settings JSON.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be read, or
    /// [`SettingsError::Parse`] if its contents are not valid settings JSON.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Serialise as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp every numeric option into its supported range.
    #[must_use]
    pub fn normalised(mut self) -> Self {
        self.squad_members_subtraction = self
            .squad_members_subtraction
            .min(MAX_SQUAD_MEMBERS_SUBTRACTION);
        self.threat_count_total = self.threat_count_total.clamp(1, MAX_THREAT_COUNT_TOTAL);
        for kind in ThreatKind::ALL {
            let count = self.threat_count_mapping.get(kind);
            self.threat_count_mapping
                .set(kind, count.min(MAX_THREAT_COUNT_PER_KIND));
        }
        self
    }
}
