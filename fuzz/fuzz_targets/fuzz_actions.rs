#![no_main]

//! Player input fuzzer.
//!
//! Feeds arbitrary input sequences to a controller and checks the board,
//! roster and threat piles after every input. Illegal inputs must be
//! ignored, never panic or corrupt the state.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lucky_seven::game::invariants::check_invariants;
use lucky_seven::soak::{apply_input, Input};
use lucky_seven::{Controller, Settings};

/// A fuzzer-generated input event.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzInput {
    Click { x: u8, y: u8 },
    Advance,
    Undo,
    Reset,
    FlipUp,
    FlipDown,
    Cancel,
}

/// Structured input for a fuzzed session.
#[derive(Arbitrary, Debug)]
struct Session {
    seed: u64,
    subtraction: u8,
    selectable_column: bool,
    inputs: Vec<FuzzInput>,
}

fuzz_target!(|session: Session| {
    let settings = Settings {
        squad_members_subtraction: session.subtraction,
        selectable_column_for_encountered_threats: session.selectable_column,
        ..Settings::default()
    }
    .normalised();
    let mut controller = Controller::new(settings, session.seed);

    for input in session.inputs.into_iter().take(2000) {
        match input {
            FuzzInput::Click { x, y } => apply_input(&mut controller, Input::Click(x, y)),
            FuzzInput::Advance => apply_input(&mut controller, Input::Advance),
            FuzzInput::Undo => apply_input(&mut controller, Input::Undo),
            FuzzInput::Reset => controller.on_reset(),
            FuzzInput::FlipUp => apply_input(&mut controller, Input::FlipUp),
            FuzzInput::FlipDown => apply_input(&mut controller, Input::FlipDown),
            FuzzInput::Cancel => apply_input(&mut controller, Input::Cancel),
        }
        controller.drain_cues();

        let violations = check_invariants(controller.state());
        assert!(violations.is_empty(), "after {input:?}: {violations:?}");
    }
});
