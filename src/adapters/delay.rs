//! Blocking delay adapter.
//!
//! Implements [`DelayPort`] for the CodeLock control loop.
//!
//! - **`target_os = "espidf"`** — yields to FreeRTOS via
//!   `vTaskDelay`, so the idle scan loop does not starve the IDLE task
//!   (which would trip the task watchdog).
//! - **`not(target_os = "espidf")`** — `std::thread::sleep` for
//!   host-side simulation.

use crate::app::ports::DelayPort;

/// System delay source for the main task.
pub struct SysDelay;

impl Default for SysDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl SysDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayPort for SysDelay {
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
