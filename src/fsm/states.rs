//! Concrete state handler functions and table builder.
//!
//! ```text
//!          ShortPress: toggle LED
//!          NotPressed: no-op
//!            ┌────┐
//!            ▼    │
//!          IDLE ──┘ ──[LongPress]──▶ ADJUSTING_BRIGHTNESS ──┐
//!            ▲          (enter: step)          │    ▲       │ LongPress:
//!            │                                 │    └───────┘ step
//!            └──[ShortPress | NotPressed]──────┘
//!                 (exit: flip direction, reset fuse)
//! ```
//!
//! Ending an episode leaves duty and sleep mode exactly as the last step
//! set them.

use log::{debug, info};

use super::context::ControllerState;
use super::{StateDescriptor, StateId};
use crate::config::{
    MAX_BRIGHTNESS_INDEX, MIN_BRIGHTNESS_INDEX, POWER_DOWN_SETTLE_MS, WHITE_FUSE_THRESHOLD,
    duty_for_index,
};
use crate::drivers::button::PressEvent;
use crate::power::SleepMode;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: None,
            on_exit: None,
            on_event: idle_event,
        },
        // Index 1 — AdjustingBrightness
        StateDescriptor {
            id: StateId::AdjustingBrightness,
            name: "AdjustingBrightness",
            on_enter: Some(adjusting_enter),
            on_exit: Some(adjusting_exit),
            on_event: adjusting_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_event(ctx: &mut ControllerState, event: PressEvent) -> Option<StateId> {
    match event {
        PressEvent::NotPressed => None,
        PressEvent::ShortPress => {
            toggle(ctx);
            None
        }
        PressEvent::LongPress => Some(StateId::AdjustingBrightness),
    }
}

/// Short press outside an episode: switch the LED off, or back on at the
/// stored brightness.
fn toggle(ctx: &mut ControllerState) {
    if ctx.led_on() {
        ctx.commands.duty = 0;
        ctx.commands.sleep_mode = SleepMode::PowerDown;
        ctx.commands.pre_sleep_delay_ms = POWER_DOWN_SETTLE_MS;
        info!("LED off");
    } else if ctx.white_latched {
        // Latched: stays dark, so there is nothing for Idle to keep running.
        ctx.commands.sleep_mode = SleepMode::PowerDown;
        debug!("LED on request ignored: fuse latched");
    } else {
        ctx.commands.duty = duty_for_index(ctx.brightness_index);
        ctx.commands.sleep_mode = SleepMode::Idle;
        info!("LED on at index {} (duty {})", ctx.brightness_index, ctx.commands.duty);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ADJUSTING_BRIGHTNESS state — one long-press episode
// ═══════════════════════════════════════════════════════════════════════════

fn adjusting_enter(ctx: &mut ControllerState) {
    ctx.long_press_active = true;
    step_brightness(ctx);
}

fn adjusting_event(ctx: &mut ControllerState, event: PressEvent) -> Option<StateId> {
    match event {
        PressEvent::LongPress => {
            step_brightness(ctx);
            None
        }
        PressEvent::ShortPress | PressEvent::NotPressed => Some(StateId::Idle),
    }
}

fn adjusting_exit(ctx: &mut ControllerState) {
    ctx.direction = ctx.direction.flipped();
    ctx.white_fuse_count = 0;
    ctx.long_press_active = false;
    debug!("episode ended, next ramp {:?}", ctx.direction);
}

/// One ramp step in the current direction.
///
/// Reaching or pushing past the top of the table counts toward the fuse;
/// the bottom clamp does not.
fn step_brightness(ctx: &mut ControllerState) {
    let target = i16::from(ctx.brightness_index) + i16::from(ctx.direction.step());

    if target >= i16::from(MAX_BRIGHTNESS_INDEX) {
        ctx.brightness_index = MAX_BRIGHTNESS_INDEX;
        ctx.white_fuse_count = ctx.white_fuse_count.saturating_add(1);
    } else if target <= i16::from(MIN_BRIGHTNESS_INDEX) {
        ctx.brightness_index = MIN_BRIGHTNESS_INDEX;
    } else {
        // In (MIN, MAX) here, so the narrowing is lossless.
        ctx.brightness_index = target as u8;
    }

    if !ctx.white_latched && ctx.white_fuse_count >= WHITE_FUSE_THRESHOLD {
        ctx.white_latched = true;
        info!("white LED fuse blown after {} steps at max", ctx.white_fuse_count);
    }

    if ctx.white_latched {
        ctx.commands.duty = 0;
        ctx.commands.white_led_on = false;
    } else {
        ctx.commands.duty = duty_for_index(ctx.brightness_index);
    }
    ctx.commands.sleep_mode = SleepMode::Idle;

    debug!(
        "step {:?}: index {} duty {} fuse {}",
        ctx.direction, ctx.brightness_index, ctx.commands.duty, ctx.white_fuse_count
    );
}
