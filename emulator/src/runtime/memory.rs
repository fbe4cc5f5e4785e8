use std::collections::HashMap;

use crate::constants::{Address, Word};

/// Sparse, byte-addressed memory
///
/// Every byte that was never written reads as zero. Multi-byte values are little-endian and built
/// from the byte accessors, with addresses wrapping around the 32-bit space.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: HashMap<Address, u8>,
}

impl Memory {
    pub fn fetch_byte(&self, address: Address) -> u8 {
        self.cells.get(&address).copied().unwrap_or(0)
    }

    pub fn store_byte(&mut self, address: Address, value: u8) {
        self.cells.insert(address, value);
    }

    pub fn fetch_half(&self, address: Address) -> u16 {
        u16::from_le_bytes([
            self.fetch_byte(address),
            self.fetch_byte(address.wrapping_add(1)),
        ])
    }

    pub fn store_half(&mut self, address: Address, value: u16) {
        for (offset, byte) in (0..).zip(value.to_le_bytes()) {
            self.store_byte(address.wrapping_add(offset), byte);
        }
    }

    pub fn fetch_word(&self, address: Address) -> Word {
        Word::from_le_bytes([
            self.fetch_byte(address),
            self.fetch_byte(address.wrapping_add(1)),
            self.fetch_byte(address.wrapping_add(2)),
            self.fetch_byte(address.wrapping_add(3)),
        ])
    }

    pub fn store_word(&mut self, address: Address, value: Word) {
        for (offset, byte) in (0..).zip(value.to_le_bytes()) {
            self.store_byte(address.wrapping_add(offset), byte);
        }
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Display the words of an address range, both ends included
    pub fn display_range(&self, start: Address, end: Address) -> MemoryRange<'_> {
        MemoryRange {
            memory: self,
            start,
            end,
        }
    }
}

/// Word by word view of a memory range, one line per word
pub struct MemoryRange<'a> {
    memory: &'a Memory,
    start: Address,
    end: Address,
}

impl std::fmt::Display for MemoryRange<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for address in (self.start..=self.end).step_by(4) {
            let word = self.memory.fetch_word(address);
            writeln!(f, "{address:#010x}: {word:#010x} ({})", word as i32)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn unwritten_memory_is_zero_test() {
        let memory = Memory::default();
        assert_eq!(memory.fetch_byte(0x1001_0000), 0);
        assert_eq!(memory.fetch_word(0xffff_fffe), 0);
        assert!(memory.is_empty());
    }

    #[test]
    fn little_endian_test() {
        let mut memory = Memory::default();
        memory.store_word(0x100, 0x1234_5678);
        assert_eq!(memory.fetch_byte(0x100), 0x78);
        assert_eq!(memory.fetch_byte(0x101), 0x56);
        assert_eq!(memory.fetch_byte(0x102), 0x34);
        assert_eq!(memory.fetch_byte(0x103), 0x12);
        assert_eq!(memory.fetch_half(0x100), 0x5678);
        assert_eq!(memory.fetch_half(0x102), 0x1234);
        assert_eq!(memory.len(), 4);
    }

    #[test]
    fn unaligned_access_test() {
        let mut memory = Memory::default();
        memory.store_word(0x101, 0xaabb_ccdd);
        assert_eq!(memory.fetch_word(0x101), 0xaabb_ccdd);
        assert_eq!(memory.fetch_word(0x100), 0xbbcc_dd00);
    }

    #[test]
    fn address_wraps_around_test() {
        let mut memory = Memory::default();
        memory.store_word(0xffff_fffe, 0x1122_3344);
        assert_eq!(memory.fetch_byte(0xffff_fffe), 0x44);
        assert_eq!(memory.fetch_byte(0xffff_ffff), 0x33);
        assert_eq!(memory.fetch_byte(0x0000_0000), 0x22);
        assert_eq!(memory.fetch_byte(0x0000_0001), 0x11);
    }

    #[test]
    fn display_range_test() {
        let mut memory = Memory::default();
        memory.store_word(0x1001_0000, 42);
        memory.store_word(0x1001_0004, 0xffff_fff6);

        insta::assert_snapshot!(memory.display_range(0x1001_0000, 0x1001_0008), @r###"
        0x10010000: 0x0000002a (42)
        0x10010004: 0xfffffff6 (-10)
        0x10010008: 0x00000000 (0)
        "###);
    }

    proptest! {
        #[test]
        fn word_round_trip(address: Address, value: Word) {
            let mut memory = Memory::default();
            memory.store_word(address, value);
            prop_assert_eq!(memory.fetch_word(address), value);
        }

        #[test]
        fn half_round_trip(address: Address, value: u16) {
            let mut memory = Memory::default();
            memory.store_half(address, value);
            prop_assert_eq!(memory.fetch_half(address), value);
        }

        #[test]
        fn word_is_built_from_bytes(address: Address, value: Word) {
            let mut memory = Memory::default();
            memory.store_word(address, value);
            let bytes = [0, 1, 2, 3].map(|offset| memory.fetch_byte(address.wrapping_add(offset)));
            prop_assert_eq!(Word::from_le_bytes(bytes), value);
        }
    }
}
