//! Power management HAL for the Galaxy Tab 10.1 (P3)
//!
//! Translates the Android power HAL lifecycle callbacks (`init`,
//! `setInteractive`, `powerHint`) into writes to the Tegra 2 cpufreq sysfs
//! nodes and the suspend attributes of the touch controller and gyro.
//!
//! The crate has two faces: a safe core ([`PowerHal`]) that can be driven
//! directly and tested against a fake sysfs tree, and an [`ffi`] module that
//! exports the module descriptor and C callbacks the HAL loader expects.
//!
//! # Example
//!
//! ```no_run
//! use p3_power_hal::{PowerConfig, PowerHal};
//!
//! let hal = PowerHal::new(PowerConfig::default());
//! hal.init();
//! hal.set_interactive(false); // screen off: throttle CPUs, suspend peripherals
//! hal.set_interactive(true);
//! ```

pub mod config;
pub mod ffi;
pub mod hint;
pub mod power;
pub mod sysfs;

pub use config::PowerConfig;
pub use hint::PowerHint;
pub use power::PowerHal;
pub use sysfs::SysfsError;

/// HAL Result type
pub type Result<T> = std::result::Result<T, SysfsError>;
