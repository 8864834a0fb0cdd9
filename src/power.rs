//! Power HAL core
//!
//! Applies interactive transitions and power hints to the cpufreq ceiling
//! and the peripheral suspend attributes. CPU 0 and 1 share a cpufreq
//! policy, so the ceiling is written to both cores on every transition.
//!
//! Sysfs failures are logged and swallowed; the host gets no error signal
//! from these callbacks, and a failed write must not stop the remaining
//! writes of the same transition.

use crate::config::PowerConfig;
use crate::hint::PowerHint;
use crate::sysfs;
use std::sync::Mutex;

/// Cached frequency state, guarded as a whole by one lock
#[derive(Debug)]
struct PowerState {
    /// Low power mode requested by the host
    low_power: bool,
    /// Ceiling to restore when the screen comes back on, in kHz
    scaling_max_khz: u64,
    /// Ceiling to restore when low power mode ends, in kHz
    normal_max_khz: u64,
}

/// Power HAL context
pub struct PowerHal {
    config: PowerConfig,
    state: Mutex<PowerState>,
}

impl PowerHal {
    /// Create a new HAL context. Caches start at the board's normal ceiling
    /// until a live value has been read.
    pub fn new(config: PowerConfig) -> Self {
        let state = PowerState {
            low_power: false,
            scaling_max_khz: config.normal_max_khz,
            normal_max_khz: config.normal_max_khz,
        };

        Self {
            config,
            state: Mutex::new(state),
        }
    }

    /// Seed the remembered ceiling from the live CPU0 value.
    pub fn init(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let low_power = state.low_power;
        self.store_live_max(low_power, &mut state.scaling_max_khz);
        tracing::info!("init: remembered scaling max {} kHz", state.scaling_max_khz);
    }

    /// Apply a screen on/off transition.
    pub fn set_interactive(&self, on: bool) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if !on {
            // Screen off: remember the governor's ceiling, then throttle the
            // CPUs and suspend the peripherals.
            let low_power = state.low_power;
            self.store_live_max(low_power, &mut state.scaling_max_khz);

            self.write_cpu_max(self.config.screen_off_max_khz);
            self.set_peripherals_suspended(true);
        } else if state.low_power {
            // Screen on while the host still wants low power: keep the
            // clamp, leave the peripherals alone.
            let low_power = state.low_power;
            self.store_live_max(low_power, &mut state.scaling_max_khz);

            self.write_cpu_max(self.config.low_power_max_khz);
        } else {
            self.write_cpu_max(state.scaling_max_khz);
            self.set_peripherals_suspended(false);
        }

        tracing::debug!("set_interactive: on={}", on);
    }

    /// Handle a power hint from the host. Only `LowPower` does any work.
    pub fn power_hint(&self, hint: PowerHint, data: bool) {
        match hint {
            PowerHint::Vsync | PowerHint::Interaction => {}
            PowerHint::Launch => {
                tracing::trace!("{} hint", hint.name());
            }
            PowerHint::LowPower => {
                let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

                if data {
                    let low_power = state.low_power;
                    self.store_live_max(low_power, &mut state.normal_max_khz);

                    state.low_power = true;
                    self.write_cpu_max(self.config.low_power_max_khz);
                    tracing::info!("low power mode on, clamped to {} kHz", self.config.low_power_max_khz);
                } else {
                    state.low_power = false;
                    self.write_cpu_max(state.normal_max_khz);
                    tracing::info!("low power mode off, restored {} kHz", state.normal_max_khz);
                }
            }
        }
    }

    /// Whether low power mode is currently active.
    pub fn low_power_mode(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).low_power
    }

    /// Remembered screen-on ceiling, in kHz.
    pub fn remembered_max_khz(&self) -> u64 {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).scaling_max_khz
    }

    /// Read the live CPU0 ceiling into `slot`.
    ///
    /// The live value is skipped when it equals the screen-off ceiling: if
    /// the screen-on callback was missed (rapid power button presses), the
    /// throttled value must not be remembered as "normal". Low power mode
    /// skips the refresh for the same reason.
    fn store_live_max(&self, low_power: bool, slot: &mut u64) {
        if low_power {
            return;
        }

        match sysfs::read_khz(&self.config.cpu0_max_freq_path) {
            Ok(khz) if khz != self.config.screen_off_max_khz => *slot = khz,
            Ok(khz) => {
                tracing::debug!("live max {} kHz is the screen-off ceiling, keeping cache", khz);
            }
            Err(err) => {
                tracing::debug!("could not read live max: {}", err);
            }
        }
    }

    /// Write the ceiling to both CPU cores, continuing past failures.
    fn write_cpu_max(&self, khz: u64) {
        for path in [&self.config.cpu0_max_freq_path, &self.config.cpu1_max_freq_path] {
            if let Err(err) = sysfs::write_khz(path, khz) {
                tracing::error!("{}", err);
            }
        }
    }

    /// Suspend or resume the touch controller and gyro.
    fn set_peripherals_suspended(&self, suspended: bool) {
        let value = if suspended { "1" } else { "0" };
        for path in [&self.config.touch_suspend_path, &self.config.gyro_suspend_path] {
            if let Err(err) = sysfs::write_attr(path, value) {
                tracing::error!("{}", err);
            }
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &PowerConfig {
        &self.config
    }
}
