#![no_main]

//! Settings parser fuzzer.
//!
//! Any text must either fail to parse or yield settings that, once
//! normalised, set up a consistent game.

use libfuzzer_sys::fuzz_target;
use lucky_seven::game::invariants::check_invariants;
use lucky_seven::{GameState, Settings};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(settings) = Settings::from_json(text) else {
        return;
    };
    let state = GameState::new(settings.normalised(), 0);
    assert!(check_invariants(&state).is_empty());
});
