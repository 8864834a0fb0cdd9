//! Power hint codes
//!
//! Enumerated workload signals delivered by the host through `powerHint`.
//! Raw values follow the power module v0.2 header.

/// Power hint delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerHint {
    /// Vsync pulse is being requested by the framework
    Vsync,
    /// User is interacting with the device
    Interaction,
    /// Low power mode toggle; the payload selects enter/exit
    LowPower,
    /// An application launch is starting
    Launch,
}

impl PowerHint {
    /// Decode the host's raw hint code. Unknown codes return `None` and are
    /// ignored by the dispatcher.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0x1 => Some(PowerHint::Vsync),
            0x2 => Some(PowerHint::Interaction),
            0x5 => Some(PowerHint::LowPower),
            0x8 => Some(PowerHint::Launch),
            _ => None,
        }
    }

    /// Hint name for logging
    pub fn name(&self) -> &'static str {
        match self {
            PowerHint::Vsync => "vsync",
            PowerHint::Interaction => "interaction",
            PowerHint::LowPower => "low_power",
            PowerHint::Launch => "launch",
        }
    }
}
