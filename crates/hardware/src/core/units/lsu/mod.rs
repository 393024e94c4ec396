//! Load/Store Unit (LSU).
//!
//! Performs data-memory accesses for both backends. Addresses are computed as
//! `rs1 + imm`; loads sign- or zero-extend to 32 bits according to the decoded
//! width. An access no device claims becomes a load or store access fault.

use crate::common::error::SimError;
use crate::core::pipeline::signals::MemWidth;
use crate::isa::instruction::Instr;
use crate::soc::interconnect::Bus;

/// Load/Store Unit (LSU) for memory operations.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Effective address of a load or store.
    #[inline]
    pub fn address(instr: &Instr, rs1: u32) -> u32 {
        rs1.wrapping_add(instr.imm)
    }

    /// Reads `width` bytes at `addr` and extends the value to 32 bits.
    pub fn load(bus: &mut Bus, addr: u32, width: MemWidth, signed: bool) -> Result<u32, SimError> {
        let fault = |_| SimError::LoadFault(addr);
        let val = match width {
            MemWidth::Byte => {
                let b = bus.read_u8(addr).map_err(fault)?;
                if signed { b as i8 as i32 as u32 } else { b as u32 }
            }
            MemWidth::Half => {
                let h = bus.read_u16(addr).map_err(fault)?;
                if signed { h as i16 as i32 as u32 } else { h as u32 }
            }
            MemWidth::Word => bus.read_u32(addr).map_err(fault)?,
            MemWidth::Nop => 0,
        };
        Ok(val)
    }

    /// Writes the low `width` bytes of `val` to `addr`.
    pub fn store(bus: &mut Bus, addr: u32, width: MemWidth, val: u32) -> Result<(), SimError> {
        let fault = |_| SimError::StoreFault(addr);
        match width {
            MemWidth::Byte => bus.write_u8(addr, val as u8).map_err(fault),
            MemWidth::Half => bus.write_u16(addr, val as u16).map_err(fault),
            MemWidth::Word => bus.write_u32(addr, val).map_err(fault),
            MemWidth::Nop => Ok(()),
        }
    }

    /// Executes a decoded load or store.
    ///
    /// Returns the loaded value for loads and 0 for stores.
    pub fn execute(bus: &mut Bus, instr: &Instr, rs1: u32, rs2: u32) -> Result<u32, SimError> {
        let addr = Self::address(instr, rs1);
        if instr.ctrl.is_store {
            Self::store(bus, addr, instr.ctrl.width, rs2)?;
            Ok(0)
        } else {
            Self::load(bus, addr, instr.ctrl.width, instr.ctrl.signed_load)
        }
    }
}
