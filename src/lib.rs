// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! The Lucky Seven: a deterministic rules engine for a solo
//! squad-versus-threats tactical card game.
//!
//! A squad of up to eight soldiers holds a small grid while a deck of enemy
//! threats is played against them, one five-phase turn at a time, until the
//! board is cleared or the squad is lost.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │    Front-end (CLI / TUI / soak)     │
//! ├─────────────────────────────────────┤
//! │    Controller (input, undo)         │
//! ├─────────────────────────────────────┤
//! │    Game rules (phases, actions)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! A game is fully determined by its [`Settings`] and seed:
//!
//! ```
//! use lucky_seven::{Controller, Phase, Settings};
//!
//! let mut controller = Controller::new(Settings::default(), 42);
//! assert_eq!(controller.state().phase, Phase::Encounter);
//! controller.on_advance_phase();
//! assert_eq!(controller.state().phase, Phase::Maneuver);
//! ```

pub mod controller;
pub mod error;
pub mod game;
pub mod settings;
pub mod soak;
pub mod view;

pub use controller::Controller;
pub use error::SettingsError;
pub use settings::Settings;

// Re-export key game types at crate root for convenience
pub use game::{
    Abilities, Coord, Cue, GameState, Outcome, Phase, SquadId, SquadMember, Threat, ThreatId,
    ThreatKind,
};
