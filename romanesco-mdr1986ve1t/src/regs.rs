//! Register blocks touched by the NAND transport, typed with
//! `tock-registers` so field positions and access widths are carried by
//! the types instead of by numeric convention.

use tock_registers::{
    register_bitfields, register_structs,
    registers::ReadWrite,
};

/// Reset/clock controller block
pub const RST_CLK_BASE: usize = 0x4002_0000;
/// GPIO port A block (external bus data lines, chip select on PA15)
pub const PORTA_BASE: usize = 0x400A_8000;
/// GPIO port C block (external bus control lines)
pub const PORTC_BASE: usize = 0x400B_8000;
/// External-memory-bus controller block
pub const EXT_BUS_BASE: usize = 0x400F_0000;
/// External memory window the controller decodes NAND accesses from
pub const NAND_WINDOW_BASE: usize = 0x7700_0000;

register_bitfields![u32,
    /// Peripheral clock gates
    pub PerClock [
        PORTA OFFSET(21) NUMBITS(1) [],
        PORTB OFFSET(22) NUMBITS(1) [],
        PORTC OFFSET(23) NUMBITS(1) [],
        EXT_BUS OFFSET(30) NUMBITS(1) [],
    ],

    /// External bus mode select and state
    pub Control [
        /// Map the external region as ROM
        ROM OFFSET(0) NUMBITS(1) [],
        /// Map the external region as RAM
        RAM OFFSET(1) NUMBITS(1) [],
        /// Map the external region as NAND flash
        NAND OFFSET(2) NUMBITS(1) [],
        /// Bus clock polarity
        CPOL OFFSET(3) NUMBITS(1) [],
        /// Set by hardware once the chip releases busy after a NAND
        /// operation; cleared when the next operation starts
        READY OFFSET(7) NUMBITS(1) [],
    ],

    /// NAND cycle timing, in bus clocks per protocol phase
    pub NandCycles [
        /// t_RC: read cycle time
        TRC OFFSET(0) NUMBITS(4) [],
        /// t_WC: write cycle time
        TWC OFFSET(4) NUMBITS(4) [],
        /// t_REA: read access time
        TREA OFFSET(8) NUMBITS(4) [],
        /// t_WP: write pulse width
        TWP OFFSET(12) NUMBITS(4) [],
        /// t_WHR: write high to read low
        TWHR OFFSET(16) NUMBITS(4) [],
        /// t_ALS: address latch setup
        TALS OFFSET(20) NUMBITS(4) [],
        /// t_RR: ready to read low
        TRR OFFSET(24) NUMBITS(4) [],
    ]
];

register_structs! {
    /// Reset and clock controller, reduced to the peripheral clock gates
    /// this driver touches.
    pub RstClk {
        (0x000 => _reserved0),
        (0x020 => per_clock: ReadWrite<u32, PerClock::Register>),
        (0x024 => @END),
    }
}

register_structs! {
    /// One Milandr GPIO port.
    pub Port {
        (0x000 => rxtx: ReadWrite<u32>),
        (0x004 => oe: ReadWrite<u32>),
        (0x008 => func: ReadWrite<u32>),
        (0x00c => analog: ReadWrite<u32>),
        (0x010 => pull: ReadWrite<u32>),
        (0x014 => pd: ReadWrite<u32>),
        (0x018 => pwr: ReadWrite<u32>),
        (0x01c => gfen: ReadWrite<u32>),
        (0x020 => @END),
    }
}

register_structs! {
    /// External-memory-bus controller.
    pub ExtBus {
        (0x000 => _reserved0),
        (0x050 => control: ReadWrite<u32, Control::Register>),
        (0x054 => nand_cycles: ReadWrite<u32, NandCycles::Register>),
        (0x058 => @END),
    }
}

impl RstClk {
    pub fn per_clock(&self) -> &ReadWrite<u32, PerClock::Register> {
        &self.per_clock
    }
}

impl Port {
    pub fn rxtx(&self) -> &ReadWrite<u32> {
        &self.rxtx
    }
    pub fn oe(&self) -> &ReadWrite<u32> {
        &self.oe
    }
    pub fn func(&self) -> &ReadWrite<u32> {
        &self.func
    }
    pub fn analog(&self) -> &ReadWrite<u32> {
        &self.analog
    }
    pub fn pull(&self) -> &ReadWrite<u32> {
        &self.pull
    }
    pub fn pd(&self) -> &ReadWrite<u32> {
        &self.pd
    }
    pub fn pwr(&self) -> &ReadWrite<u32> {
        &self.pwr
    }
    pub fn gfen(&self) -> &ReadWrite<u32> {
        &self.gfen
    }
}

impl ExtBus {
    pub fn control(&self) -> &ReadWrite<u32, Control::Register> {
        &self.control
    }
    pub fn nand_cycles(&self) -> &ReadWrite<u32, NandCycles::Register> {
        &self.nand_cycles
    }
}
