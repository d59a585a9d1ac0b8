//! Task Watchdog Timer (TWDT) shutdown.
//!
//! The dimmer parks indefinitely between presses and has no timer wake, so
//! the TWDT is torn down once at boot instead of being fed.
//! `sdkconfig.defaults` already keeps it from starting; this covers builds
//! that re-enable it.

use esp_idf_sys::*;
use log::{info, warn};

/// Deinitialise the TWDT if it is running.
///
/// Failure is not fatal: the main task never subscribes, so a surviving
/// TWDT only watches the idle tasks, which keep running while we block.
pub fn disable() {
    // SAFETY: called once from main() before the loop starts; the TWDT API
    // is thread-safe.
    let ret = unsafe { esp_task_wdt_deinit() };
    if ret == ESP_OK as i32 {
        info!("Watchdog: disabled");
    } else if ret == ESP_ERR_INVALID_STATE as i32 {
        info!("Watchdog: not running");
    } else {
        warn!("Watchdog: deinit returned {} (left running)", ret);
    }
}
