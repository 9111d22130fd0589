//! MT29F16G08 transport over the external-memory-bus controller of the
//! Milandr 1986VE1T, in NAND mode.
//!
//! [`EbcNandIo`] implements [`romanesco_core::NandIo`] with memory-mapped
//! accesses: commands are decoded by the controller from the window
//! address an access lands in, so each bus operation is a volatile load or
//! store at a fixed, opcode-encoding location.
//!
//! ```no_run
//! use romanesco_core::{NandAddress, NandDriver, PARAMETER_PAGE_BYTES};
//! use romanesco_mdr1986ve1t::{EbcNandIo, NandTimings};
//!
//! # fn main() -> Result<(), romanesco_core::NandIoError> {
//! let io = unsafe { EbcNandIo::new(NandTimings::MHZ120) };
//! let mut nand = NandDriver::new(io);
//! nand.init()?;
//!
//! let mut page = [0u8; PARAMETER_PAGE_BYTES];
//! nand.read_parameter_page(&mut page)?;
//!
//! let status = nand.erase_block(NandAddress::new(0x0020_0000))?;
//! assert!(status.is_pass());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod ebc;
pub mod regs;

pub use ebc::{EbcNandIo, NandTimings};
