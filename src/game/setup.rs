//! New-game setup: deal the squad, build the threat deck, and place the
//! squad with the map cards.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::game::{
    bench, Coord, Cue, GameState, Phase, SquadMember, Threat, ThreatKind, FIRST_PLAYABLE_COLUMN,
    FIRST_PLAYABLE_ROW, GRID_COLUMNS,
};
use crate::settings::Settings;

/// Horizontal map cards. The index of the card holding a number is the
/// column (offset by the reserved column) of the squad member with that
/// number.
pub const MAP_CARDS_X: [&[u8]; 6] = [&[2], &[], &[3, 7], &[5, 8], &[4], &[1, 6]];

/// Vertical map cards, read the same way for rows.
pub const MAP_CARDS_Y: [&[u8]; 4] = [&[5, 6], &[1, 2], &[7, 8], &[3, 4]];

/// Highest number printed on a map card.
pub const MAX_MAP_CARD_VALUE: u8 = 8;

/// Shuffle the bench and drop `subtraction` members from the end.
#[must_use]
pub fn deal_squad(rng: &mut ChaCha8Rng, subtraction: u8) -> Vec<SquadMember> {
    let mut members = bench();
    members.shuffle(rng);
    let keep = members.len().saturating_sub(usize::from(subtraction));
    members.truncate(keep);
    members
}

/// Build the shuffled threat deck.
///
/// Card `n` of a kind starts in column `n % 7`, wrapping past the reserved
/// column; tanks always start in column 0. The shuffled deck is cut to the
/// configured total.
#[must_use]
pub fn build_deck(rng: &mut ChaCha8Rng, settings: &Settings) -> Vec<Threat> {
    let mut deck = Vec::new();
    for kind in ThreatKind::ALL {
        for n in 1..=settings.threat_count_mapping.get(kind) {
            let column = if kind == ThreatKind::Tank {
                0
            } else {
                match n % GRID_COLUMNS {
                    0 => FIRST_PLAYABLE_COLUMN,
                    c => c,
                }
            };
            deck.push(Threat::new(kind, column));
        }
    }
    deck.shuffle(rng);
    deck.truncate(usize::from(settings.threat_count_total));
    deck
}

/// Cell named by map-card number `value`.
fn map_card_cell(cards_x: &[&[u8]], cards_y: &[&[u8]], value: u8) -> Option<Coord> {
    let x = cards_x.iter().position(|card| card.contains(&value))?;
    let y = cards_y.iter().position(|card| card.contains(&value))?;
    let x = u8::try_from(x).ok()? + FIRST_PLAYABLE_COLUMN;
    let y = u8::try_from(y).ok()? + FIRST_PLAYABLE_ROW;
    Some(Coord::new(x, y))
}

impl GameState {
    /// Set up a new game.
    ///
    /// The game is fully determined by `settings` and `seed`. On return the
    /// first Encounter has already been played out.
    #[must_use]
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let roster = deal_squad(&mut rng, settings.squad_members_subtraction);
        let deck = build_deck(&mut rng, &settings);

        let mut state = Self::empty(settings);
        state.seed = seed;
        state.cues.push(Cue::NewGame);
        for threat in deck {
            state.queue_threat(threat);
        }

        let mut cards_x = MAP_CARDS_X.to_vec();
        cards_x.shuffle(&mut rng);
        let mut cards_y = MAP_CARDS_Y.to_vec();
        cards_y.shuffle(&mut rng);

        let mut card = 1u8;
        for member in roster {
            let Some(coord) = map_card_cell(&cards_x, &cards_y, card) else {
                break;
            };
            state.add_member(member, coord);
            card += 1;
        }

        // The card after the last member marks the setup mortar; with a full
        // bench it lands on the last member.
        let direct_hit = card > MAX_MAP_CARD_VALUE;
        if let Some(target) = map_card_cell(&cards_x, &cards_y, card.min(MAX_MAP_CARD_VALUE)) {
            state.strike_mortar(target, direct_hit);
        }

        tracing::info!(
            seed,
            squad = state.squad.len(),
            threats = state.deck.len(),
            "new game"
        );
        state.enter_phase(Phase::Encounter);
        state.refresh_modifiers();
        state
    }
}
