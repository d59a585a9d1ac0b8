//! Fuzz target: `Fsm::handle`
//!
//! Maps each input byte to a classified press and drives the state machine,
//! asserting the index bounds, the one-way white LED latch and that ending
//! an episode never touches the outputs.
//!
//! cargo fuzz run fuzz_press_sequence

#![no_main]

use dimmer::config::MAX_BRIGHTNESS_INDEX;
use dimmer::drivers::button::PressEvent;
use dimmer::fsm::context::ControllerState;
use dimmer::fsm::states::build_state_table;
use dimmer::fsm::{Fsm, StateId};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut fsm = Fsm::new(build_state_table(), StateId::Idle);
    let mut ctx = ControllerState::new();
    fsm.start(&mut ctx);

    let mut latched = false;
    for &b in data {
        let event = match b % 3 {
            0 => PressEvent::NotPressed,
            1 => PressEvent::ShortPress,
            _ => PressEvent::LongPress,
        };

        let was_active = fsm.long_press_active();
        let before = ctx.commands;
        let cmds = fsm.handle(&mut ctx, event);

        assert!(ctx.brightness_index <= MAX_BRIGHTNESS_INDEX);
        assert_eq!(ctx.long_press_active, fsm.long_press_active());

        if was_active && !fsm.long_press_active() {
            assert_eq!(ctx.white_fuse_count, 0);
            assert_eq!(cmds.duty, before.duty);
        }

        if latched {
            assert!(ctx.white_latched);
            assert_eq!(cmds.duty, 0);
            assert!(!cmds.white_led_on);
        }
        latched = ctx.white_latched;
    }
});
