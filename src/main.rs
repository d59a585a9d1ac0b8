//! Dimmer Firmware — Main Entry Point
//!
//! Single-threaded, strictly sequential: classify the button, update the
//! brightness state machine, drive the LEDs, sleep until the next press.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  EspBoard (Button · PWM · WhiteLed · Sleep · Interrupt)        │
//! │  LogEventSink (EventSink)       FreeRtos (DelayNs)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            DimmerService (pure logic)                  │    │
//! │  │  ButtonDriver · FSM · PowerController                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{IOPin as _, OutputPin as _};
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution, config::TimerConfig};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::info;

use dimmer::adapters::hardware::EspBoard;
use dimmer::adapters::log_sink::LogEventSink;
use dimmer::app::service::DimmerService;
use dimmer::drivers::watchdog;
use dimmer::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Dimmer v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // No timeout wake: only the button may resume the CPU.
    watchdog::disable();

    // ── 2. Board bring-up ─────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(pins::RED_PWM_FREQ_HZ.Hz())
            .resolution(Resolution::Bits8),
    )?;
    let red = LedcDriver::new(peripherals.ledc.channel0, timer, peripherals.pins.gpio4)?;

    let mut board = EspBoard::new(
        peripherals.pins.gpio9.downgrade(),
        red,
        peripherals.pins.gpio5.downgrade_output(),
    )?;
    info!(
        "pins: button=GPIO{} red=GPIO{} white=GPIO{}",
        pins::BUTTON_GPIO,
        pins::RED_LED_GPIO,
        pins::WHITE_LED_GPIO
    );

    // ── 3. Main loop ──────────────────────────────────────────
    let mut delay = FreeRtos;
    let mut sink = LogEventSink::new();
    let mut service = DimmerService::new();
    service.start(&mut board, &mut sink);

    loop {
        service.run_once(&mut board, &mut delay, &mut sink);
    }
}
