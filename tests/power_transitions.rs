//! End to end power transition tests against a fake sysfs tree

use p3_power_hal::{PowerConfig, PowerHal, PowerHint};
use std::fs;
use tempfile::tempdir;

fn fake_sysfs(live_max_khz: u64) -> (tempfile::TempDir, PowerConfig) {
    let dir = tempdir().unwrap();
    let config = PowerConfig::rooted(dir.path());

    fs::write(&config.cpu0_max_freq_path, live_max_khz.to_string()).unwrap();
    fs::write(&config.cpu1_max_freq_path, live_max_khz.to_string()).unwrap();
    fs::write(&config.touch_suspend_path, "0").unwrap();
    fs::write(&config.gyro_suspend_path, "0").unwrap();

    (dir, config)
}

#[test]
fn boot_screen_off_screen_on_cycle() {
    // Boot with the governor at 800 MHz, blank the screen, wake it up.
    // The wake must restore the 800 MHz ceiling, not the screen-off value.
    let (_dir, config) = fake_sysfs(800_000);
    let hal = PowerHal::new(config.clone());

    hal.init();

    hal.set_interactive(false);
    assert_eq!(
        fs::read_to_string(&config.cpu0_max_freq_path).unwrap(),
        "456000"
    );
    assert_eq!(fs::read_to_string(&config.touch_suspend_path).unwrap(), "1");
    assert_eq!(fs::read_to_string(&config.gyro_suspend_path).unwrap(), "1");

    hal.set_interactive(true);
    assert_eq!(
        fs::read_to_string(&config.cpu0_max_freq_path).unwrap(),
        "800000"
    );
    assert_eq!(
        fs::read_to_string(&config.cpu1_max_freq_path).unwrap(),
        "800000"
    );
    assert_eq!(fs::read_to_string(&config.touch_suspend_path).unwrap(), "0");
    assert_eq!(fs::read_to_string(&config.gyro_suspend_path).unwrap(), "0");
}

#[test]
fn low_power_cycle_survives_screen_transitions() {
    let (_dir, config) = fake_sysfs(1_000_000);
    let hal = PowerHal::new(config.clone());
    hal.init();

    hal.power_hint(PowerHint::LowPower, true);
    assert!(hal.low_power_mode());
    assert_eq!(
        fs::read_to_string(&config.cpu0_max_freq_path).unwrap(),
        "456000"
    );

    // Screen off and on while clamped: the clamp stays, peripherals stay
    // suspended after wake because the low power wake path skips them
    hal.set_interactive(false);
    hal.set_interactive(true);
    assert_eq!(
        fs::read_to_string(&config.cpu0_max_freq_path).unwrap(),
        "456000"
    );
    assert_eq!(fs::read_to_string(&config.touch_suspend_path).unwrap(), "1");

    hal.power_hint(PowerHint::LowPower, false);
    assert!(!hal.low_power_mode());
    assert_eq!(
        fs::read_to_string(&config.cpu0_max_freq_path).unwrap(),
        "1000000"
    );
}

#[test]
fn repeated_power_button_presses_keep_normal_ceiling() {
    // The screen-on callback can be skipped under rapid power button
    // presses, leaving the throttled value live. The refresh must not adopt
    // it as the remembered normal ceiling.
    let (_dir, config) = fake_sysfs(800_000);
    let hal = PowerHal::new(config.clone());
    hal.init();

    hal.set_interactive(false);
    // Screen-on missed; another screen-off reads the throttled live value
    hal.set_interactive(false);

    hal.set_interactive(true);
    assert_eq!(
        fs::read_to_string(&config.cpu0_max_freq_path).unwrap(),
        "800000"
    );
}
