use bitflags::bitflags;

/// NAND IC Status Output
///
/// | Bit | Description              | Value                      |
/// | --- | ------------------------ | -------------------------- |
/// | 0   | Pass/Fail                | Pass: 0, Fail: 1           |
/// | 1   | Pass/Fail (previous op)  | Pass: 0, Fail: 1           |
/// | 2   | -                        | -                          |
/// | 3   | -                        | -                          |
/// | 4   | -                        | -                          |
/// | 5   | Array Ready/Busy         | Ready: 1, Busy: 0          |
/// | 6   | Ready/Busy               | Ready: 1, Busy: 0          |
/// | 7   | Write Protect            | Not Protect: 1, Protect: 0 |
///
/// The transport hands the byte back uninterpreted; the helpers below are
/// for the caller's use. Unknown bits are retained.
bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct NandStatus: u8 {
        const FAIL = 0b0000_0001;
        const FAIL_PREVIOUS = 0b0000_0010;
        const ARRAY_READY = 0b0010_0000;
        const READY = 0b0100_0000;
        const WRITE_PROTECT_DISABLE = 0b1000_0000;
    }
}

impl NandStatus {
    /// Wrap a status byte as read from the chip, keeping every bit.
    pub fn from_raw(raw: u8) -> Self {
        NandStatus::from_bits_retain(raw)
    }

    /// The status byte exactly as the chip reported it.
    pub fn raw(&self) -> u8 {
        self.bits()
    }

    /// Check if the last operation passed
    pub fn is_pass(&self) -> bool {
        !self.contains(NandStatus::FAIL)
    }

    /// Check if the chip is ready for the next command
    pub fn is_ready(&self) -> bool {
        self.contains(NandStatus::READY)
    }

    /// Check if write protect is enabled
    pub fn is_write_protected(&self) -> bool {
        !self.contains(NandStatus::WRITE_PROTECT_DISABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_with_different_values() {
        let status = NandStatus::from_raw(0b0000_0000);
        assert!(status.is_pass());
        assert!(!status.is_ready());
        assert!(status.is_write_protected());

        let status = NandStatus::from_raw(0b1110_0000);
        assert!(status.is_pass());
        assert!(status.is_ready());
        assert!(!status.is_write_protected());

        let status = NandStatus::from_raw(0b0100_0001);
        assert!(!status.is_pass());
        assert!(status.is_ready());
    }

    #[test]
    fn test_raw_byte_is_preserved() {
        // undefined bits must survive the round trip untouched
        for raw in 0..=u8::MAX {
            assert_eq!(NandStatus::from_raw(raw).raw(), raw);
        }
    }
}
