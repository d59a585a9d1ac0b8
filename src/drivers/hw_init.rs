//! One-shot wake-line setup and the raw light-sleep primitive.
//!
//! Pins and LEDC are owned by `esp-idf-hal` drivers in the board adapter;
//! this module only does what the HAL does not cover: registering the
//! button ISR as a pure wake source and arming GPIO wake around
//! `esp_light_sleep_start()`. Everything here is raw ESP-IDF sys calls.

#[cfg(target_os = "espidf")]
use core::num::NonZeroU32;
#[cfg(target_os = "espidf")]
use std::sync::Arc;

#[cfg(target_os = "espidf")]
use esp_idf_hal::task::notification::Notifier;
#[cfg(target_os = "espidf")]
use esp_idf_sys::*;
#[cfg(target_os = "espidf")]
use log::{debug, info};

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization or sleep entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    SleepConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc)  => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc)  => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::SleepConfigFailed(rc) => write!(f, "light-sleep wake config failed (rc={})", rc),
        }
    }
}

// ── GPIO ISR (wake source) ────────────────────────────────────

/// Button edge handler. Touches nothing the main loop owns: it bumps the
/// wake latch and, if the power controller is listening, unparks the task.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_wake_isr(arg: *mut core::ffi::c_void) {
    if !crate::events::BUTTON_WAKE.signal() {
        return;
    }
    // SAFETY: `arg` is the `Arc<Notifier>` pointer registered in
    // `install_wake_isr`; the board keeps that Arc alive for the whole run.
    let notifier = unsafe { &*(arg as *const Notifier) };
    // SAFETY: called from ISR context, which is what notify_and_yield expects.
    unsafe {
        notifier.notify_and_yield(NonZeroU32::MIN);
    }
}

/// Install the GPIO ISR service and register the button as an any-edge
/// wake source. Call once, after the button pin has been configured as an
/// input with pull-up. The handler stays registered for the whole run.
#[cfg(target_os = "espidf")]
pub fn install_wake_isr(notifier: &Arc<Notifier>) -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler only touches
    // atomics and the notifier, whose Arc outlives the registration.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let ret = gpio_set_intr_type(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

        let ret = gpio_isr_handler_add(
            pins::BUTTON_GPIO,
            Some(button_wake_isr),
            Arc::as_ptr(notifier) as *mut core::ffi::c_void,
        );
        if ret != ESP_OK as i32 { return Err(HwInitError::IsrInstallFailed(ret)); }

        let ret = gpio_intr_enable(pins::BUTTON_GPIO);
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    }

    info!("hw_init: button wake ISR installed on GPIO{}", pins::BUTTON_GPIO);
    Ok(())
}

// ── Light sleep ───────────────────────────────────────────────

/// Switch the button line from edge interrupt to level-low wake.
///
/// The CPU interrupt is masked while armed so a held button cannot storm
/// the level-triggered line before [`disarm_light_sleep_wake`] runs.
#[cfg(target_os = "espidf")]
unsafe fn arm_light_sleep_wake() -> Result<(), HwInitError> {
    unsafe {
        gpio_intr_disable(pins::BUTTON_GPIO);

        let ret = gpio_wakeup_enable(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_LOW_LEVEL);
        if ret != ESP_OK as i32 { return Err(HwInitError::SleepConfigFailed(ret)); }

        let ret = esp_sleep_enable_gpio_wakeup();
        if ret != ESP_OK as i32 { return Err(HwInitError::SleepConfigFailed(ret)); }
    }
    Ok(())
}

/// Undo [`arm_light_sleep_wake`] and restore the any-edge wake interrupt.
#[cfg(target_os = "espidf")]
unsafe fn disarm_light_sleep_wake() {
    unsafe {
        gpio_wakeup_disable(pins::BUTTON_GPIO);
        esp_sleep_disable_wakeup_source(esp_sleep_source_t_ESP_SLEEP_WAKEUP_GPIO);
        gpio_set_intr_type(pins::BUTTON_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        gpio_intr_enable(pins::BUTTON_GPIO);
    }
}

/// Enter light sleep until the button pulls its line low.
///
/// RAM and CPU state are retained; LEDC output stops while asleep. Wake
/// configuration is restored on every path, including failure.
#[cfg(target_os = "espidf")]
pub fn light_sleep() -> Result<(), HwInitError> {
    // SAFETY: called only from the main task between guard acquire and
    // release; the ISR does not touch wake configuration.
    unsafe {
        let armed = arm_light_sleep_wake();
        let ret = if armed.is_ok() { esp_light_sleep_start() } else { ESP_OK as i32 };
        disarm_light_sleep_wake();
        armed?;
        if ret != ESP_OK as i32 {
            return Err(HwInitError::SleepConfigFailed(ret));
        }
    }
    debug!("hw_init: light sleep exited");
    Ok(())
}
