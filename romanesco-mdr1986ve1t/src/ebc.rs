//! `NandIo` over the external-memory-bus controller.

use romanesco_core::{CommandId, NandCommand, NandIo, NandIoError};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};

use crate::regs;
use crate::regs::{Control, NandCycles, PerClock};

/// Poll bound for the controller ready flag. Covers a worst-case block
/// erase at the 120 MHz bus clock with ample margin.
pub const RETRY_LIMIT_FOR_WAIT_READY: u32 = 10_000_000;

/// PA0..PA7 as external bus data lines (main function)
const PORTA_FUNC_BUS: u32 = 0x5555;
/// PA0..PA7 and PA15 in digital mode
const PORTA_DIGITAL: u32 = 0x80FF;
/// Drive strength for the data lines and chip select
const PORTA_PWR_FAST: u32 = 0xC000_FFFF;
/// PA15 as a plain output (chip select)
const PORTA_CS_OE: u32 = 0x8000;

/// PC0..PC4 as external bus control lines
const PORTC_FUNC_BUS: u32 = 0x0295;
/// PC0..PC4 in digital mode
const PORTC_DIGITAL: u32 = 0x001F;
/// Drive strength for the control lines
const PORTC_PWR_FAST: u32 = 0x03FF;

// The controller decodes a NAND transaction from the window address an
// access lands in: bits [10:3] carry the opcode latched before the
// transfer, bits [18:11] the opcode latched after it, bits [23:19] the
// transaction shape. The transferred byte is an address cycle where the
// shape has an address phase and a don't-care otherwise.
const SHAPE_COMMAND: u32 = 0b00000;
const SHAPE_PARAMETER: u32 = 0b00100;
const SHAPE_DATA: u32 = 0b00101;
const SHAPE_CONFIRM: u32 = 0b00111;
const SHAPE_ERASE: u32 = 0b01110;
const SHAPE_READ: u32 = 0b10110;
const SHAPE_PROGRAM: u32 = 0b10100;

const fn window(shape: u32, first: u8, second: u8) -> usize {
    ((shape << 19) | ((second as u32) << 11) | ((first as u32) << 3)) as usize
}

const RESET_WINDOW: usize = window(SHAPE_COMMAND, CommandId::Reset as u8, 0);
const STATUS_WINDOW: usize = window(SHAPE_COMMAND, CommandId::StatusRead as u8, 0);
const PARAMETER_WINDOW: usize = window(SHAPE_PARAMETER, CommandId::ReadParameterPage as u8, 0);
const DATA_READ_WINDOW: usize = window(SHAPE_DATA, 0, 0);
const DATA_WRITE_WINDOW: usize = window(SHAPE_DATA, 0, CommandId::AutoPageProgramSecond as u8);
const CONFIRM_WINDOW: usize = window(SHAPE_CONFIRM, 0, CommandId::AutoPageProgramSecond as u8);
const ERASE_WINDOW: usize = window(
    SHAPE_ERASE,
    CommandId::AutoBlockEraseFirst as u8,
    CommandId::AutoBlockEraseSecond as u8,
);
const READ_WINDOW: usize = window(
    SHAPE_READ,
    CommandId::ReadFirst as u8,
    CommandId::ReadSecond as u8,
);
const PROGRAM_WINDOW: usize = window(SHAPE_PROGRAM, CommandId::AutoPageProgramFirst as u8, 0);

/// NAND cycle timing in bus clocks, programmed into `NAND_CYCLES`.
///
/// The values are a hardware timing constant for a given bus clock, not
/// something the driver computes; retargeting to a different clock means
/// passing a different set here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NandTimings {
    pub t_rc: u8,
    pub t_wc: u8,
    pub t_rea: u8,
    pub t_wp: u8,
    pub t_whr: u8,
    pub t_als: u8,
    pub t_rr: u8,
}

impl NandTimings {
    /// Timing tuned for a 120 MHz bus clock (encodes as 0x03C8_3588).
    pub const MHZ120: Self = Self {
        t_rc: 0x8,
        t_wc: 0x8,
        t_rea: 0x5,
        t_wp: 0x3,
        t_whr: 0x8,
        t_als: 0xC,
        t_rr: 0x3,
    };

    fn field_value(
        &self,
    ) -> tock_registers::fields::FieldValue<u32, NandCycles::Register> {
        NandCycles::TRC.val(self.t_rc as u32)
            + NandCycles::TWC.val(self.t_wc as u32)
            + NandCycles::TREA.val(self.t_rea as u32)
            + NandCycles::TWP.val(self.t_wp as u32)
            + NandCycles::TWHR.val(self.t_whr as u32)
            + NandCycles::TALS.val(self.t_als as u32)
            + NandCycles::TRR.val(self.t_rr as u32)
    }
}

impl Default for NandTimings {
    fn default() -> Self {
        Self::MHZ120
    }
}

/// Memory-mapped bus access for one MT29F16G08 behind the controller.
///
/// There is exactly one controller and one chip select, so at most one
/// value of this type may exist at a time; the constructors are unsafe
/// for that reason.
pub struct EbcNandIo {
    rst_clk: &'static regs::RstClk,
    porta: &'static regs::Port,
    portc: &'static regs::Port,
    ext_bus: &'static regs::ExtBus,
    window: *mut u8,
    timings: NandTimings,
}

impl EbcNandIo {
    /// Access the controller at its hardware addresses.
    ///
    /// # Safety
    /// The caller must guarantee exclusive use of the external bus
    /// controller, PORTA and PORTC, and that no other instance exists.
    pub unsafe fn new(timings: NandTimings) -> Self {
        Self::from_parts(
            &*(regs::RST_CLK_BASE as *const regs::RstClk),
            &*(regs::PORTA_BASE as *const regs::Port),
            &*(regs::PORTC_BASE as *const regs::Port),
            &*(regs::EXT_BUS_BASE as *const regs::ExtBus),
            regs::NAND_WINDOW_BASE as *mut u8,
            timings,
        )
    }

    /// Assemble from explicit register blocks and window base, letting a
    /// harness aim the transport at plain memory instead of silicon.
    ///
    /// # Safety
    /// The blocks and the window must stay valid and exclusively owned
    /// for the lifetime of the returned value.
    pub unsafe fn from_parts(
        rst_clk: &'static regs::RstClk,
        porta: &'static regs::Port,
        portc: &'static regs::Port,
        ext_bus: &'static regs::ExtBus,
        window: *mut u8,
        timings: NandTimings,
    ) -> Self {
        Self {
            rst_clk,
            porta,
            portc,
            ext_bus,
            window,
            timings,
        }
    }

    fn command_window(&self, command: NandCommand) -> *mut u8 {
        let offset = match command {
            NandCommand::Reset => RESET_WINDOW,
            NandCommand::StatusRead => STATUS_WINDOW,
            NandCommand::ReadParameterPage => PARAMETER_WINDOW,
            NandCommand::PageRead => READ_WINDOW,
            NandCommand::PageProgram => PROGRAM_WINDOW,
            NandCommand::BlockErase => ERASE_WINDOW,
        };
        self.window.wrapping_add(offset)
    }
}

impl NandIo for EbcNandIo {
    fn setup(&mut self) {
        self.rst_clk.per_clock().modify(
            PerClock::PORTA::SET + PerClock::PORTC::SET + PerClock::EXT_BUS::SET,
        );

        // data lines and chip select on PORTA
        self.porta.func().set(self.porta.func().get() | PORTA_FUNC_BUS);
        self.porta
            .analog()
            .set(self.porta.analog().get() | PORTA_DIGITAL);
        self.porta.pwr().set(self.porta.pwr().get() | PORTA_PWR_FAST);
        self.porta.oe().set(self.porta.oe().get() | PORTA_CS_OE);

        // control lines on PORTC
        self.portc.func().set(self.portc.func().get() | PORTC_FUNC_BUS);
        self.portc
            .analog()
            .set(self.portc.analog().get() | PORTC_DIGITAL);
        self.portc.pwr().set(self.portc.pwr().get() | PORTC_PWR_FAST);

        self.ext_bus.control().write(Control::NAND::SET);
        self.ext_bus.nand_cycles().write(self.timings.field_value());

        trace!("External bus configured for NAND");
    }

    fn command(&mut self, command: NandCommand, address: &[u8]) {
        let window = self.command_window(command);
        if address.is_empty() {
            // the window address carries the opcode, the byte is a don't-care
            unsafe { window.write_volatile(0) };
        } else {
            for &cycle in address {
                unsafe { window.write_volatile(cycle) };
            }
        }
        trace!("Command Input: {} cycles={}", command, address.len());
    }

    fn read_data(&mut self, buf: &mut [u8]) {
        let window = self.window.wrapping_add(DATA_READ_WINDOW);
        for byte in buf.iter_mut() {
            *byte = unsafe { window.read_volatile() };
        }
    }

    fn write_data(&mut self, data: &[u8]) {
        let window = self.window.wrapping_add(DATA_WRITE_WINDOW);
        for &byte in data {
            unsafe { window.write_volatile(byte) };
        }
    }

    fn commit_data(&mut self, last: u8) {
        let window = self.window.wrapping_add(CONFIRM_WINDOW);
        unsafe { window.write_volatile(last) };
    }

    fn wait_ready(&mut self) -> Result<(), NandIoError> {
        for _ in 0..RETRY_LIMIT_FOR_WAIT_READY {
            if self.ext_bus.control().is_set(Control::READY) {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        warn!("Wait for Ready: timeout");
        Err(NandIoError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem;
    use std::time::Duration;

    // large enough for the highest window offset; only the tests that
    // exercise window accesses allocate it
    const FULL_WINDOW_BYTES: usize = 0x00C0_0000;

    struct FakeParts {
        rst_clk: &'static regs::RstClk,
        porta: &'static regs::Port,
        portc: &'static regs::Port,
        ext_bus: &'static regs::ExtBus,
        window: *mut u8,
    }

    fn fake_parts_with_window(window_bytes: usize) -> FakeParts {
        FakeParts {
            rst_clk: Box::leak(Box::new(unsafe { mem::zeroed() })),
            porta: Box::leak(Box::new(unsafe { mem::zeroed() })),
            portc: Box::leak(Box::new(unsafe { mem::zeroed() })),
            ext_bus: Box::leak(Box::new(unsafe { mem::zeroed() })),
            window: Box::leak(vec![0u8; window_bytes].into_boxed_slice()).as_mut_ptr(),
        }
    }

    fn fake_parts() -> FakeParts {
        // register-only tests never touch the window
        fake_parts_with_window(0)
    }

    fn fake_io(parts: &FakeParts) -> EbcNandIo {
        unsafe {
            EbcNandIo::from_parts(
                parts.rst_clk,
                parts.porta,
                parts.portc,
                parts.ext_bus,
                parts.window,
                NandTimings::MHZ120,
            )
        }
    }

    struct SendExtBus(*const regs::ExtBus);
    unsafe impl Send for SendExtBus {}

    #[test]
    fn test_window_offsets_match_documented_map() {
        assert_eq!(RESET_WINDOW, 0x0007F8);
        assert_eq!(STATUS_WINDOW, 0x000380);
        assert_eq!(PARAMETER_WINDOW, 0x200760);
        assert_eq!(DATA_READ_WINDOW, 0x280000);
        assert_eq!(DATA_WRITE_WINDOW, 0x288000);
        assert_eq!(CONFIRM_WINDOW, 0x388000);
        assert_eq!(ERASE_WINDOW, 0x768300);
        assert_eq!(READ_WINDOW, 0xB18000);
        assert_eq!(PROGRAM_WINDOW, 0xA00400);

        assert_eq!(regs::NAND_WINDOW_BASE + RESET_WINDOW, 0x7700_07F8);
        assert_eq!(regs::NAND_WINDOW_BASE + READ_WINDOW, 0x77B1_8000);
    }

    #[test]
    fn test_timings_encode_to_documented_constant() {
        let parts = fake_parts();
        parts
            .ext_bus
            .nand_cycles()
            .write(NandTimings::MHZ120.field_value());
        assert_eq!(parts.ext_bus.nand_cycles().get(), 0x03C8_3588);
    }

    #[test]
    fn test_setup_programs_mode_and_timing_from_any_state() {
        let parts = fake_parts();
        // garbage left over from a previous configuration
        parts.ext_bus.control().set(0xFFFF_FFFF);
        parts.ext_bus.nand_cycles().set(0x1234_5678);

        fake_io(&parts).setup();

        assert_eq!(parts.ext_bus.control().get(), 0x0000_0004);
        assert_eq!(parts.ext_bus.nand_cycles().get(), 0x03C8_3588);
    }

    #[test]
    fn test_setup_enables_clocks_and_pins() {
        let parts = fake_parts();
        fake_io(&parts).setup();

        let per_clock = parts.rst_clk.per_clock().get();
        assert_eq!(per_clock, (1 << 21) | (1 << 23) | (1 << 30));

        assert_eq!(parts.porta.func().get(), 0x5555);
        assert_eq!(parts.porta.analog().get(), 0x80FF);
        assert_eq!(parts.porta.pwr().get(), 0xC000_FFFF);
        assert_eq!(parts.porta.oe().get(), 0x8000);

        assert_eq!(parts.portc.func().get(), 0x0295);
        assert_eq!(parts.portc.analog().get(), 0x001F);
        assert_eq!(parts.portc.pwr().get(), 0x03FF);
    }

    #[test]
    fn test_setup_preserves_unrelated_pin_configuration() {
        let parts = fake_parts();
        // PA8 already claimed by another peripheral
        parts.porta.func().set(0x0001_0000);
        fake_io(&parts).setup();
        assert_eq!(parts.porta.func().get(), 0x0001_5555);
    }

    #[test]
    fn test_command_and_data_accesses_land_in_their_windows() {
        let parts = fake_parts_with_window(FULL_WINDOW_BYTES);
        let mut io = fake_io(&parts);

        io.command(NandCommand::PageProgram, &[0x11, 0x02, 0x33, 0x44, 0x05]);
        io.write_data(&[1, 2, 3]);
        io.commit_data(9);
        io.command(NandCommand::BlockErase, &[0xAA, 0xBB, 0x03]);
        io.command(NandCommand::Reset, &[]);

        unsafe {
            // plain memory keeps the last byte stored through each window
            assert_eq!(*parts.window.add(PROGRAM_WINDOW), 0x05);
            assert_eq!(*parts.window.add(DATA_WRITE_WINDOW), 3);
            assert_eq!(*parts.window.add(CONFIRM_WINDOW), 9);
            assert_eq!(*parts.window.add(ERASE_WINDOW), 0x03);
            assert_eq!(*parts.window.add(RESET_WINDOW), 0);
        }
    }

    #[test]
    fn test_read_data_streams_from_the_read_window() {
        let parts = fake_parts_with_window(FULL_WINDOW_BYTES);
        unsafe { *parts.window.add(DATA_READ_WINDOW) = 0x5A };

        let mut buf = [0u8; 4];
        fake_io(&parts).read_data(&mut buf);
        assert_eq!(buf, [0x5A; 4]);
    }

    #[test]
    fn test_wait_ready_returns_immediately_when_ready() {
        let parts = fake_parts();
        parts.ext_bus.control().modify(Control::READY::SET);
        assert_eq!(fake_io(&parts).wait_ready(), Ok(()));
    }

    #[test]
    fn test_wait_ready_times_out_when_ready_never_sets() {
        let parts = fake_parts();
        assert_eq!(fake_io(&parts).wait_ready(), Err(NandIoError::Timeout));
    }

    #[test]
    fn test_wait_ready_polls_until_ready_sets() {
        let parts = fake_parts();
        let ext_bus = SendExtBus(parts.ext_bus as *const _);
        let setter = std::thread::spawn(move || {
            let ext_bus = ext_bus;
            std::thread::sleep(Duration::from_millis(1));
            unsafe { &*ext_bus.0 }.control().modify(Control::READY::SET);
        });

        assert_eq!(fake_io(&parts).wait_ready(), Ok(()));
        setter.join().unwrap();
    }
}
