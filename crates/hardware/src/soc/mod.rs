//! System-on-Chip (SoC) Components.
//!
//! The memory system seen by the core: the bus, RAM, the console device and
//! the builder that assembles them from configuration.

/// System builder for assembling SoC components.
pub mod builder;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// System bus interconnect and routing.
pub mod interconnect;

/// Main memory.
pub mod memory;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use builder::System;
pub use interconnect::Bus;
