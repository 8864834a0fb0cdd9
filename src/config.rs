//! HAL configuration
//!
//! Sysfs paths and frequency ceilings, loadable from a TOML file so the same
//! binary can serve minor board revisions. Defaults match the stock P3
//! device tree.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Config file locations, vendor partition first
pub const VENDOR_CONFIG_PATH: &str = "/vendor/etc/p3-power.toml";
pub const SYSTEM_CONFIG_PATH: &str = "/etc/p3-power.toml";

/// Power HAL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// CPU0 frequency ceiling, read to learn the governor's current max and
    /// written on every interactive transition. CPU0 and CPU1 share a
    /// cpufreq policy.
    pub cpu0_max_freq_path: PathBuf,
    pub cpu1_max_freq_path: PathBuf,

    /// mxt1386 touch controller suspend attribute ("0" / "1")
    pub touch_suspend_path: PathBuf,
    /// mpu3050 gyro suspend attribute ("0" / "1")
    pub gyro_suspend_path: PathBuf,

    /// Ceiling applied while the screen is off, in kHz
    pub screen_off_max_khz: u64,
    /// Ceiling applied in low-power mode, in kHz
    pub low_power_max_khz: u64,
    /// Low-power floor, in kHz. Part of the board's frequency table but
    /// referenced by no write path.
    pub low_power_min_khz: u64,
    /// Fallback "normal" ceiling used until a live value has been read
    pub normal_max_khz: u64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            cpu0_max_freq_path: PathBuf::from(
                "/sys/devices/system/cpu/cpu0/cpufreq/scaling_max_freq",
            ),
            cpu1_max_freq_path: PathBuf::from(
                "/sys/devices/system/cpu/cpu1/cpufreq/scaling_max_freq",
            ),
            touch_suspend_path: PathBuf::from(
                "/sys/bus/i2c/drivers/sec_touch/4-004c/mxt1386/suspended",
            ),
            gyro_suspend_path: PathBuf::from(
                "/sys/bus/i2c/drivers/mpu3050/0-0068/mpu3050/suspended",
            ),
            screen_off_max_khz: 456_000,
            low_power_max_khz: 456_000,
            low_power_min_khz: 150_000,
            normal_max_khz: 1_000_000,
        }
    }
}

impl PowerConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Self {
        for candidate in [VENDOR_CONFIG_PATH, SYSTEM_CONFIG_PATH] {
            let path = Path::new(candidate);
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => return config,
                    Err(err) => {
                        tracing::warn!("Ignoring {}: {}", path.display(), err);
                    }
                }
            }
        }

        tracing::warn!("No configuration file found, using board defaults");
        Self::default()
    }

    /// Map every sysfs path under one directory, for development and tests
    /// off-device.
    pub fn rooted(root: &Path) -> Self {
        Self {
            cpu0_max_freq_path: root.join("cpu0_scaling_max_freq"),
            cpu1_max_freq_path: root.join("cpu1_scaling_max_freq"),
            touch_suspend_path: root.join("touch_suspended"),
            gyro_suspend_path: root.join("gyro_suspended"),
            ..Self::default()
        }
    }
}
