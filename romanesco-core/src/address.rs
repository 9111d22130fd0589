use bit_field::BitField;
use bitfield::bitfield;

/// Parameter page size exposed by the chip
pub const PARAMETER_PAGE_BYTES: usize = 768;
/// Pages per erase block
pub const PAGES_PER_BLOCK: usize = 2048;
/// Address cycles for a full column + row address phase
pub const FULL_ADDRESS_CYCLES: usize = 5;
/// Address cycles for a row-only (block erase) address phase
pub const ROW_ADDRESS_CYCLES: usize = 3;

/// Logical NAND address
///
/// Read/Program (5 cycles)
/// |              | IO7  | IO6  | IO5  | IO4  | IO3  | IO2  | IO1  | IO0  |
/// | ------------ | ---  | ---  | ---  | ---  | ---  | ---  | ---  | ---  |
/// | First Cycle  | A7   | A6   | A5   | A4   | A3   | A2   | A1   | A0   |
/// | Second Cycle | -    | -    | -    | A12  | A11  | A10  | A9   | A8   |
/// | Third Cycle  | A20  | A19  | A18  | A17  | A16  | A15  | A14  | A13  |
/// | Fourth Cycle | A28  | A27  | A26  | A25  | A24  | A23  | A22  | A21  |
/// | Fifth Cycle  | -    | -    | -    | -    | -    | A31  | A30  | A29  |
///
/// Auto Block Erase (3 cycles)
/// |              | IO7  | IO6  | IO5  | IO4  | IO3  | IO2  | IO1  | IO0  |
/// | ------------ | ---  | ---  | ---  | ---  | ---  | ---  | ---  | ---  |
/// | First Cycle  | A20  | A19  | A18  | A17  | A16  | A15  | A14  | A13  |
/// | Second Cycle | A28  | A27  | A26  | A25  | A24  | A23  | A22  | A21  |
/// | Third Cycle  | -    | -    | -    | -    | -    | A31  | A30  | A29  |
///
/// A12~A0: Column Address (byte offset within the page buffer)
/// A31~A13: Row Address (page, block and plane select)
bitfield! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct NandAddress(u32);
    pub column, set_column: 12, 0;
    pub page, set_page: 20, 13;
    pub block, set_block: 28, 21;
    pub plane, set_plane: 31, 29;
}

impl NandAddress {
    /// Create an address from its raw 32bit value.
    pub fn new(raw: u32) -> Self {
        NandAddress(raw)
    }

    /// Get the raw address.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Pack the address into its 5 bus cycles.
    pub fn to_cycles(&self) -> [u8; FULL_ADDRESS_CYCLES] {
        [
            self.0.get_bits(0..8) as u8,
            self.0.get_bits(8..13) as u8,
            self.0.get_bits(13..21) as u8,
            self.0.get_bits(21..29) as u8,
            self.0.get_bits(29..32) as u8,
        ]
    }

    /// Unpack 5 bus cycles back into an address. Bits beyond the 5bit
    /// second cycle and 3bit fifth cycle are not transferred on the bus
    /// and are ignored here as well.
    pub fn from_cycles(cycles: &[u8; FULL_ADDRESS_CYCLES]) -> Self {
        let mut raw = 0u32;
        raw.set_bits(0..8, cycles[0] as u32);
        raw.set_bits(8..13, (cycles[1] & 0x1f) as u32);
        raw.set_bits(13..21, cycles[2] as u32);
        raw.set_bits(21..29, cycles[3] as u32);
        raw.set_bits(29..32, (cycles[4] & 0x07) as u32);
        NandAddress(raw)
    }

    /// Pack the row address into the 3 cycles driven during block erase.
    /// Column bits never reach the bus for an erase.
    pub fn to_row_cycles(&self) -> [u8; ROW_ADDRESS_CYCLES] {
        [
            self.0.get_bits(13..21) as u8,
            self.0.get_bits(21..29) as u8,
            self.0.get_bits(29..32) as u8,
        ]
    }
}

impl From<u32> for NandAddress {
    fn from(raw: u32) -> Self {
        NandAddress(raw)
    }
}
