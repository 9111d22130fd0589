/// NAND IC Command ID
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandId {
    Reset = 0xff,
    StatusRead = 0x70,
    ReadParameterPage = 0xec,
    ReadFirst = 0x00,
    ReadSecond = 0x30,
    AutoPageProgramFirst = 0x80,
    AutoPageProgramSecond = 0x10,
    AutoBlockEraseFirst = 0x60,
    AutoBlockEraseSecond = 0xd0,
}

/// One logical chip transaction, as the transport issues it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NandCommand {
    Reset,
    StatusRead,
    ReadParameterPage,
    PageRead,
    PageProgram,
    BlockErase,
}

impl NandCommand {
    /// Opcode pair driven on the command latch. The second opcode, where
    /// present, closes the address phase (read trigger, erase confirm).
    /// Page program is the exception: its closing opcode travels with the
    /// final data byte through the program-confirm path instead.
    pub fn opcodes(self) -> (CommandId, Option<CommandId>) {
        match self {
            NandCommand::Reset => (CommandId::Reset, None),
            NandCommand::StatusRead => (CommandId::StatusRead, None),
            NandCommand::ReadParameterPage => (CommandId::ReadParameterPage, None),
            NandCommand::PageRead => (CommandId::ReadFirst, Some(CommandId::ReadSecond)),
            NandCommand::PageProgram => (CommandId::AutoPageProgramFirst, None),
            NandCommand::BlockErase => (
                CommandId::AutoBlockEraseFirst,
                Some(CommandId::AutoBlockEraseSecond),
            ),
        }
    }

    /// Address cycles the chip expects for this transaction.
    pub fn address_cycles(self) -> usize {
        match self {
            NandCommand::Reset | NandCommand::StatusRead | NandCommand::ReadParameterPage => 0,
            NandCommand::BlockErase => crate::address::ROW_ADDRESS_CYCLES,
            NandCommand::PageRead | NandCommand::PageProgram => {
                crate::address::FULL_ADDRESS_CYCLES
            }
        }
    }
}
