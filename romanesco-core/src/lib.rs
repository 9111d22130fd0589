//! Chip-level transport for a Micron MT29F16G08x parallel NAND, portable
//! over any bus access that can drive its command/address/data protocol.
//!
//! The hardware side lives in a companion crate implementing [`NandIo`];
//! everything here runs on the host as well, so the command sequencing can
//! be tested against simulated silicon.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod address;
pub mod command;
pub mod driver;
pub mod io;
pub mod status;

pub use address::{NandAddress, PAGES_PER_BLOCK, PARAMETER_PAGE_BYTES};
pub use command::{CommandId, NandCommand};
pub use driver::NandDriver;
pub use io::{NandIo, NandIoError};
pub use status::NandStatus;
