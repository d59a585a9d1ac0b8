//! Full main-loop runs against the simulated board: debounce and hold
//! timing, ramping while held, the pre-power-down settle and the fuse latch.

use crate::mock_hw::{Halt, SimBoard, run_to_idle};

use dimmer::app::events::AppEvent;
use dimmer::fsm::StateId;
use dimmer::fsm::context::Direction;
use dimmer::power::{SleepMode, WakeOutcome};

fn idle(at: u64) -> Halt {
    Halt { at, mode: SleepMode::Idle }
}

fn power_down(at: u64) -> Halt {
    Halt { at, mode: SleepMode::PowerDown }
}

#[test]
fn untouched_button_parks_in_idle_with_led_lit() {
    let (mut board, mut delay) = SimBoard::new(&[]);
    let (svc, _) = run_to_idle(&mut board, &mut delay);

    assert_eq!(board.duty, 32);
    assert!(board.white);
    assert_eq!(board.halts, vec![idle(0)]);
    assert_eq!(svc.state(), StateId::Idle);
}

#[test]
fn tap_switches_off_and_settles_before_power_down() {
    let (mut board, mut delay) = SimBoard::new(&[(1_000, 1_200)]);
    let (svc, _) = run_to_idle(&mut board, &mut delay);

    // Classified at 1000 + 80 + 400; then 200 ms dark before sleeping.
    assert_eq!(board.duty_log.last(), Some(&(1_480, 0)));
    assert_eq!(board.halts, vec![idle(0), power_down(1_680)]);
    assert!(board.white);
    assert_eq!(svc.controller().brightness_index, 5);
}

#[test]
fn second_tap_restores_previous_brightness() {
    let (mut board, mut delay) = SimBoard::new(&[(1_000, 1_200), (5_000, 5_200)]);
    let (svc, _) = run_to_idle(&mut board, &mut delay);

    assert_eq!(board.duty_log, vec![(0, 32), (1_480, 0), (5_480, 32)]);
    assert_eq!(board.halts, vec![idle(0), power_down(1_680), idle(5_480)]);
    assert_eq!(svc.controller().brightness_index, 5);
}

#[test]
fn holding_ramps_one_step_per_window_until_release() {
    let (mut board, mut delay) = SimBoard::new(&[(1_000, 3_000)]);
    let (svc, sink) = run_to_idle(&mut board, &mut delay);

    assert_eq!(
        board.duty_log,
        vec![(0, 32), (1_480, 64), (1_960, 128), (2_440, 255)]
    );

    // No sleep entry while the episode is open: one halt before the hold,
    // one after it, four bare polls in between.
    assert_eq!(board.halts, vec![idle(0), idle(3_000)]);
    assert_eq!(svc.iterations(), 6);
    assert_eq!(svc.power().skipped(), 0);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Sleeping(_))), 2);
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::Woke {
                outcome: WakeOutcome::Woken,
                ..
            }
        )),
        2
    );

    // Released during the debounce settle: episode ends there.
    let ctl = svc.controller();
    assert_eq!(svc.button().bounces(), 1);
    assert_eq!(ctl.brightness_index, 8);
    assert_eq!(ctl.direction, Direction::Down);
    assert_eq!(ctl.white_fuse_count, 0);
    assert!(!svc.long_press_active());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::EpisodeEnded { .. })), 1);
}

#[test]
fn next_hold_ramps_the_other_way() {
    let (mut board, mut delay) = SimBoard::new(&[(1_000, 1_600), (4_000, 4_600)]);
    let (svc, _) = run_to_idle(&mut board, &mut delay);

    // Up one step, release, then down one step.
    assert_eq!(board.duty_log, vec![(0, 32), (1_480, 64), (4_480, 32)]);
    assert_eq!(svc.controller().brightness_index, 5);
    assert_eq!(svc.controller().direction, Direction::Up);
}

#[test]
fn release_during_output_write_still_ends_the_episode() {
    // Released 2 ms after classification, while the 5 ms duty write is
    // still in flight: the button reads up by the time sleep would start.
    let (board, mut delay) = SimBoard::new(&[(1_000, 1_482), (5_000, 5_600)]);
    let mut board = board.with_write_latency(5);
    let (svc, sink) = run_to_idle(&mut board, &mut delay);

    // Up on the first hold, back down on the second.
    assert_eq!(board.duty_log, vec![(0, 32), (1_480, 64), (5_480, 32)]);
    assert_eq!(board.halts, vec![idle(10), idle(1_490), idle(5_970)]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::EpisodeEnded { .. })), 2);

    let ctl = svc.controller();
    assert_eq!(ctl.brightness_index, 5);
    assert_eq!(ctl.direction, Direction::Up);
    assert_eq!(ctl.white_fuse_count, 0);
    assert!(!svc.long_press_active());
    assert_eq!(svc.iterations(), 5);
}

#[test]
fn bounce_outside_an_episode_changes_nothing() {
    let (mut board, mut delay) = SimBoard::new(&[(1_000, 1_030)]);
    let (svc, _) = run_to_idle(&mut board, &mut delay);

    assert_eq!(board.duty_log, vec![(0, 32)]);
    assert_eq!(board.halts, vec![idle(0), idle(1_080)]);
    assert_eq!(svc.button().bounces(), 1);
    assert_eq!(svc.controller().direction, Direction::Up);
}

#[test]
fn long_hold_at_the_top_blows_the_white_fuse_for_good() {
    let (mut board, mut delay) = SimBoard::new(&[(1_000, 7_000), (9_000, 9_100)]);
    let (svc, sink) = run_to_idle(&mut board, &mut delay);

    // Twelfth long press (index 8 reached on the third) is the tenth at max.
    assert_eq!(board.duty_log.last(), Some(&(6_760, 0)));
    assert!(!board.white);
    assert!(svc.controller().white_latched);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::WhiteLedLatched)), 1);

    // A later tap cannot relight anything; the device goes to power-down.
    assert_eq!(board.duty, 0);
    assert_eq!(board.halts.last(), Some(&power_down(9_480)));
}
