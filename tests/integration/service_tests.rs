//! DimmerService driven one classified press at a time: the reference
//! scenarios for toggling, stepping and clamping.

use crate::mock_hw::{RecordingSink, SimBoard};

use dimmer::app::events::AppEvent;
use dimmer::app::service::DimmerService;
use dimmer::config::{BRIGHTNESS_TABLE, POWER_DOWN_SETTLE_MS};
use dimmer::drivers::button::PressEvent::{LongPress, NotPressed, ShortPress};
use dimmer::fsm::StateId;
use dimmer::fsm::context::Direction;
use dimmer::power::SleepMode;

fn make_service() -> (DimmerService, SimBoard, RecordingSink) {
    let (mut board, _) = SimBoard::new(&[]);
    let mut sink = RecordingSink::new();
    let mut svc = DimmerService::new();
    svc.start(&mut board, &mut sink);
    (svc, board, sink)
}

#[test]
fn toggle_off_and_back_on_keeps_index() {
    let (mut svc, mut board, mut sink) = make_service();
    assert_eq!(board.duty, BRIGHTNESS_TABLE[5]);

    let off = svc.handle_press(ShortPress, &mut board, &mut sink);
    assert_eq!(board.duty, 0);
    assert_eq!(off.sleep_mode, SleepMode::PowerDown);
    assert_eq!(off.pre_sleep_delay_ms, POWER_DOWN_SETTLE_MS);

    let on = svc.handle_press(ShortPress, &mut board, &mut sink);
    assert_eq!(board.duty, 32);
    assert_eq!(on.sleep_mode, SleepMode::Idle);
    assert_eq!(svc.controller().brightness_index, 5);
}

#[test]
fn long_press_steps_up_and_release_reverses() {
    let (mut svc, mut board, mut sink) = make_service();

    let cmds = svc.handle_press(LongPress, &mut board, &mut sink);
    assert_eq!(svc.controller().brightness_index, 6);
    assert_eq!(board.duty, 64);
    assert_eq!(cmds.sleep_mode, SleepMode::Idle);
    assert_eq!(svc.state(), StateId::AdjustingBrightness);

    svc.handle_press(NotPressed, &mut board, &mut sink);
    let ctl = svc.controller();
    assert_eq!(ctl.direction, Direction::Down);
    assert!(!ctl.long_press_active);
    assert_eq!(ctl.white_fuse_count, 0);
    assert_eq!(board.duty, 64);
}

#[test]
fn bottom_clamp_holds_index_and_fuse() {
    let (mut svc, mut board, mut sink) = make_service();

    // Up once and release so the next episode ramps down.
    svc.handle_press(LongPress, &mut board, &mut sink);
    svc.handle_press(NotPressed, &mut board, &mut sink);

    // 6 -> 0 takes six steps; two more sit on the clamp.
    for _ in 0..8 {
        svc.handle_press(LongPress, &mut board, &mut sink);
    }
    assert_eq!(svc.controller().brightness_index, 0);
    assert_eq!(svc.controller().white_fuse_count, 0);
    assert_eq!(board.duty, BRIGHTNESS_TABLE[0]);
}

#[test]
fn fuse_counts_only_within_one_episode() {
    let (mut svc, mut board, mut sink) = make_service();

    // Reach the top (fuse 1) then sit there for eight more: fuse 9.
    for _ in 0..11 {
        svc.handle_press(LongPress, &mut board, &mut sink);
    }
    assert_eq!(svc.controller().white_fuse_count, 9);

    // Ending the episode clears the count; the latch never fired.
    svc.handle_press(ShortPress, &mut board, &mut sink);
    assert_eq!(svc.controller().white_fuse_count, 0);
    assert!(!svc.controller().white_latched);
    assert!(board.white);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::WhiteLedLatched)), 0);
}

#[test]
fn repeated_not_pressed_in_idle_is_silent() {
    let (mut svc, mut board, mut sink) = make_service();
    let before = svc.controller().clone();
    sink.events.clear();

    for _ in 0..10 {
        svc.handle_press(NotPressed, &mut board, &mut sink);
    }
    assert_eq!(svc.controller(), &before);
    assert!(sink.events.is_empty());
}
