//! Memory-Mapped IO Devices.

/// Console output device.
pub mod console;

pub use console::Console;

pub use crate::soc::traits::Device;
