use crate::address::{NandAddress, PARAMETER_PAGE_BYTES};
use crate::command::NandCommand;
use crate::io::{NandIo, NandIoError};
use crate::status::NandStatus;

/// Blocking transport for one NAND chip.
///
/// Owns its bus access exclusively; every operation takes `&mut self` and
/// runs to completion before the next can start, which makes the
/// one-operation-in-flight requirement of the chip structural. Callers on
/// multiple execution contexts must serialize around the single instance
/// themselves.
pub struct NandDriver<IO: NandIo> {
    io: IO,
}

impl<IO: NandIo> NandDriver<IO> {
    pub fn new(io: IO) -> Self {
        Self { io }
    }

    /// Give the bus access back, e.g. to re-run a harness against it.
    pub fn release(self) -> IO {
        self.io
    }

    /// Bring up the bus controller and reset the chip.
    pub fn init(&mut self) -> Result<(), NandIoError> {
        self.io.setup();
        self.io.command(NandCommand::Reset, &[]);
        self.io.wait_ready()?;
        trace!("Reset NAND IC");
        Ok(())
    }

    /// Read the chip status register. Status is available without a
    /// completion wait; the byte is returned uninterpreted.
    pub fn read_status(&mut self) -> NandStatus {
        self.io.command(NandCommand::StatusRead, &[]);
        let mut status = [0x00];
        self.io.read_data(&mut status);
        trace!("Status Read: {:02x}", status[0]);
        NandStatus::from_raw(status[0])
    }

    /// Read the 768 byte parameter page into the front of `page`.
    /// A shorter buffer is rejected before anything reaches the bus.
    pub fn read_parameter_page(&mut self, page: &mut [u8]) -> Result<(), NandIoError> {
        if page.len() < PARAMETER_PAGE_BYTES {
            return Err(NandIoError::InvalidLength);
        }
        self.io.command(NandCommand::ReadParameterPage, &[]);
        self.io.wait_ready()?;
        self.io.read_data(&mut page[..PARAMETER_PAGE_BYTES]);
        trace!("Parameter page read");
        Ok(())
    }

    /// Erase the block containing `address`. Column and page bits are
    /// ignored by the chip during erase addressing, so any address inside
    /// the block selects it. Returns the chip status for the caller to
    /// interpret.
    pub fn erase_block(&mut self, address: NandAddress) -> Result<NandStatus, NandIoError> {
        self.io
            .command(NandCommand::BlockErase, &address.to_row_cycles());
        self.io.wait_ready()?;
        trace!("Erase: address={:08x}", address.raw());
        Ok(self.read_status())
    }

    /// Read `buf.len()` bytes starting at `address`. The chip advances
    /// its column pointer per byte, so sequential reads stay inside the
    /// current page buffer; crossing a page boundary is the caller's
    /// concern.
    pub fn read(&mut self, address: NandAddress, buf: &mut [u8]) -> Result<(), NandIoError> {
        self.io.command(NandCommand::PageRead, &address.to_cycles());
        self.io.wait_ready()?;
        self.io.read_data(buf);
        trace!("Read: address={:08x} len={}", address.raw(), buf.len());
        Ok(())
    }

    /// Program `data` starting at `address`. Every byte but the last is
    /// staged through the plain data path; the final byte goes through
    /// the program-confirm path, which commits the page. An empty `data`
    /// has no final byte to commit and is rejected.
    pub fn write(&mut self, address: NandAddress, data: &[u8]) -> Result<(), NandIoError> {
        let (last, head) = match data.split_last() {
            Some(split) => split,
            None => return Err(NandIoError::InvalidLength),
        };
        self.io
            .command(NandCommand::PageProgram, &address.to_cycles());
        self.io.write_data(head);
        self.io.commit_data(*last);
        self.io.wait_ready()?;
        trace!("Program: address={:08x} len={}", address.raw(), data.len());
        Ok(())
    }
}
