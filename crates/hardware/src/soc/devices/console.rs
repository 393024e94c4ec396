//! Console output device.
//!
//! A single write-only byte register used by programs to print text. Every
//! byte written is appended to a transcript; complete lines are forwarded to
//! the host's stdout when echoing is enabled.
//!
//! # Registers
//!
//! * `0x00`: Transmit (Write Only). The low byte of any write is emitted.
//!   Reads return 0.

use std::io::{self, Write};

use crate::soc::devices::Device;

/// Size of the console's MMIO window in bytes.
const CONSOLE_WINDOW: u32 = 0x10;

/// Console device structure.
#[derive(Debug)]
pub struct Console {
    /// Base physical address of the device.
    base_addr: u32,
    /// Bytes written since the last newline.
    line: Vec<u8>,
    /// Everything the program has printed.
    transcript: Vec<u8>,
    /// Forward completed lines to stdout.
    echo: bool,
}

impl Console {
    /// Creates a new console at `base_addr`.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - The base physical address.
    /// * `echo` - Whether completed lines are printed to stdout.
    pub fn new(base_addr: u32, echo: bool) -> Self {
        Self {
            base_addr,
            line: Vec::new(),
            transcript: Vec::new(),
            echo,
        }
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.transcript).into_owned()
    }

    /// Prints any partial line still buffered.
    pub fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }
        if self.echo {
            let mut out = io::stdout().lock();
            let _ = out.write_all(&self.line);
            let _ = out.flush();
        }
        self.line.clear();
    }

    fn emit(&mut self, byte: u8) {
        self.transcript.push(byte);
        self.line.push(byte);
        if byte == b'\n' {
            self.flush();
        }
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        self.flush();
    }
}

impl Device for Console {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, CONSOLE_WINDOW)
    }

    fn read_u8(&mut self, _offset: u32) -> u8 {
        0
    }
    fn read_u16(&mut self, _offset: u32) -> u16 {
        0
    }
    fn read_u32(&mut self, _offset: u32) -> u32 {
        0
    }

    fn write_u8(&mut self, offset: u32, val: u8) {
        if offset == 0 {
            self.emit(val);
        }
    }

    fn write_u16(&mut self, offset: u32, val: u16) {
        self.write_u8(offset, val as u8);
    }

    fn write_u32(&mut self, offset: u32, val: u32) {
        self.write_u8(offset, val as u8);
    }

    fn as_console(&self) -> Option<&Console> {
        Some(self)
    }
}
