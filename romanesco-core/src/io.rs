use crate::command::NandCommand;

/// Transport-level fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NandIoError {
    /// Controller ready flag did not assert within the poll bound
    Timeout,
    /// Caller-supplied buffer violates an operation precondition
    InvalidLength,
}

impl core::fmt::Display for NandIoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NandIoError::Timeout => write!(f, "ready flag did not assert"),
            NandIoError::InvalidLength => write!(f, "buffer length violates a precondition"),
        }
    }
}

/// Bus access underneath the transport: one method per access shape the
/// controller exposes. The chip decodes a command from *where* an access
/// lands, not from the byte transferred, so implementations map each
/// method onto the matching command/address/data location.
#[cfg_attr(test, mockall::automock)]
pub trait NandIo {
    /// Configure clocks, pins, bus mode and cycle timing. Must run before
    /// any other access.
    fn setup(&mut self);

    /// Issue `command`, driving `address` as its address cycles. Commands
    /// without an address phase pass an empty slice.
    fn command(&mut self, command: NandCommand, address: &[u8]);

    /// Stream `buf.len()` bytes out of the data location. The chip
    /// advances its column pointer on every access.
    fn read_data(&mut self, buf: &mut [u8]);

    /// Stream bytes into the data location without committing them.
    fn write_data(&mut self, data: &[u8]);

    /// Write the final program byte through the confirm location, which
    /// commits the staged page.
    fn commit_data(&mut self, last: u8);

    /// Poll the controller ready flag until it asserts.
    fn wait_ready(&mut self) -> Result<(), NandIoError>;
}
