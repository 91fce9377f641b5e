//! 4 KiB cartridge image.
//!
//! ```text
//! 0x000 ─ code ─ zero padding ─ 0xFFA: IRQ ─ 0xFFC: RESET ─ 0xFFE: NMI
//! ```
//!
//! All three vectors point at [`LOAD_ADDRESS`], where the cartridge is
//! mapped.

/// Image size in bytes.
pub const ROM_SIZE: usize = 4096;

/// Address the cartridge is mapped at.
pub const LOAD_ADDRESS: u16 = 0xF000;

const VECTOR_BYTES: usize = 6;

/// Room for code before the vector table.
pub const CODE_CAPACITY: usize = ROM_SIZE - VECTOR_BYTES;

/// Build a ROM image from `code`. Code beyond [`CODE_CAPACITY`] is dropped.
pub fn package_rom(code: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; ROM_SIZE];
    let len = code.len().min(CODE_CAPACITY);
    rom[..len].copy_from_slice(&code[..len]);

    let vector = LOAD_ADDRESS.to_le_bytes();
    for slot in rom[CODE_CAPACITY..].chunks_exact_mut(2) {
        slot.copy_from_slice(&vector);
    }
    if code.len() > CODE_CAPACITY {
        tracing::warn!(
            code = code.len(),
            capacity = CODE_CAPACITY,
            "code truncated to fit ROM"
        );
    }
    rom
}
