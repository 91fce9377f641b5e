//! Property-based tests for the 6502 backend.
//!
//! 1. `STA` picks zero-page (2 bytes) below `$100` and absolute (3 bytes)
//!    otherwise, for every 16-bit address
//! 2. `LDA #imm` always encodes to `A9` plus the low byte
//! 3. ROM images are always 4096 bytes with all vectors at `$F000`
//! 4. Address allocation is first-encounter ordered

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use gv_m6502::{assemble, package_rom, AddressMap, CODE_CAPACITY, ROM_SIZE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn sta_addressing_mode_follows_address(addr in any::<u16>()) {
        let bytes = assemble(&[format!("STA ${addr:X}")]).unwrap();
        let [lo, hi] = addr.to_le_bytes();
        if addr < 0x100 {
            prop_assert_eq!(bytes, vec![0x85, lo]);
        } else {
            prop_assert_eq!(bytes, vec![0x8D, lo, hi]);
        }
    }

    #[test]
    fn lda_keeps_low_byte(value in -100_000i64..100_000) {
        let bytes = assemble(&[format!("LDA #{value}")]).unwrap();
        prop_assert_eq!(bytes, vec![0xA9, value.to_le_bytes()[0]]);
    }

    #[test]
    fn rom_shape_is_fixed(code in prop::collection::vec(any::<u8>(), 0..5000)) {
        let rom = package_rom(&code);
        prop_assert_eq!(rom.len(), ROM_SIZE);
        for pair in rom[CODE_CAPACITY..].chunks(2) {
            prop_assert_eq!(pair, &[0x00u8, 0xF0][..]);
        }
        let kept = code.len().min(CODE_CAPACITY);
        prop_assert_eq!(&rom[..kept], &code[..kept]);
        prop_assert!(rom[kept..CODE_CAPACITY].iter().all(|&b| b == 0));
    }

    #[test]
    fn allocation_is_dense_and_ordered(count in 1usize..=128) {
        let mut map = AddressMap::new();
        for i in 0..count {
            let expected = format!("${:02X}", 0x80 + i);
            prop_assert_eq!(map.resolve(&format!("sym{i}")).unwrap(), expected);
        }
        prop_assert_eq!(map.allocated(), count);
    }
}
