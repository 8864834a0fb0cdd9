//! Host loader ABI
//!
//! The HAL runtime dlopens this library, locates the well-known `HMI`
//! descriptor symbol and calls the function pointers it carries. Struct
//! layout, tag and version values are dictated by the loader and must match
//! it exactly.
//!
//! The callbacks carry no context pointer of their own, so this module owns
//! the one process-wide [`PowerHal`], created lazily on first use.

use crate::config::PowerConfig;
use crate::hint::PowerHint;
use crate::power::PowerHal;
use libc::{c_char, c_int, c_void};
use std::ffi::CStr;
use std::ptr;
use std::sync::OnceLock;

/// 'HWMT', the loader's module tag
pub const HARDWARE_MODULE_TAG: u32 = 0x4857_4D54;
/// Power module API v0.2
pub const POWER_MODULE_API_VERSION_0_2: u16 = 0x0002;
/// HAL API v1.0
pub const HARDWARE_HAL_API_VERSION: u16 = 0x0100;
/// Module id the loader resolves "power" requests against
pub const POWER_HARDWARE_MODULE_ID: &CStr = c"power";

/// `hw_module_methods_t`
#[repr(C)]
pub struct HwModuleMethods {
    pub open: Option<
        unsafe extern "C" fn(*const HwModule, *const c_char, *mut *mut c_void) -> c_int,
    >,
}

/// `hw_module_t` common header
#[repr(C)]
pub struct HwModule {
    pub tag: u32,
    pub module_api_version: u16,
    pub hal_api_version: u16,
    pub id: *const c_char,
    pub name: *const c_char,
    pub author: *const c_char,
    pub methods: *const HwModuleMethods,
    pub dso: *mut c_void,
    /// Padding to 32 words: the header declares 7 fields, reserved fills
    /// the remaining 32 - 7.
    pub reserved: [u32; 25],
}

/// `power_module_t`: common header plus the three lifecycle callbacks
#[repr(C)]
pub struct PowerModule {
    pub common: HwModule,
    pub init: Option<unsafe extern "C" fn(*mut PowerModule)>,
    pub set_interactive: Option<unsafe extern "C" fn(*mut PowerModule, c_int)>,
    pub power_hint: Option<unsafe extern "C" fn(*mut PowerModule, c_int, *mut c_void)>,
}

// The descriptor is immutable after link time; the pointers reference
// 'static data only.
unsafe impl Sync for PowerModule {}

static METHODS: HwModuleMethods = HwModuleMethods { open: None };

static HAL: OnceLock<PowerHal> = OnceLock::new();

fn hal() -> &'static PowerHal {
    HAL.get_or_init(|| PowerHal::new(PowerConfig::load_default()))
}

/// Install the tracing subscriber once. The loader gives the module no init
/// hook of its own, so logging is set up on the first `init` callback.
fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(false))
        .try_init();
}

unsafe extern "C" fn power_init(_module: *mut PowerModule) {
    setup_logging();
    hal().init();
}

unsafe extern "C" fn power_set_interactive(_module: *mut PowerModule, on: c_int) {
    hal().set_interactive(on != 0);
}

unsafe extern "C" fn power_power_hint(_module: *mut PowerModule, hint: c_int, data: *mut c_void) {
    if let Some(hint) = PowerHint::from_raw(hint) {
        hal().power_hint(hint, !data.is_null());
    }
}

/// Module descriptor resolved by the loader (`HAL_MODULE_INFO_SYM`).
#[unsafe(no_mangle)]
pub static HMI: PowerModule = PowerModule {
    common: HwModule {
        tag: HARDWARE_MODULE_TAG,
        module_api_version: POWER_MODULE_API_VERSION_0_2,
        hal_api_version: HARDWARE_HAL_API_VERSION,
        id: POWER_HARDWARE_MODULE_ID.as_ptr(),
        name: c"P3 Power HAL".as_ptr(),
        author: c"The Android Open Source Project".as_ptr(),
        methods: &METHODS,
        dso: ptr::null_mut(),
        reserved: [0; 25],
    },
    init: Some(power_init),
    set_interactive: Some(power_set_interactive),
    power_hint: Some(power_power_hint),
};
