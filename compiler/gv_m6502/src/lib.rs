//! 6502 reference backend (Atari 2600 memory map).
//!
//! # Pipeline Position
//!
//! ```text
//! MLIR → **lower** → LLIR → **emit** → Final IR
//!      → **encode** → bytes → **rom** → 4 KiB image
//! ```
//!
//! - [`lower`]: symbolic targets → zero-page addresses, assigns →
//!   `load A` / `store A`
//! - [`emit`]: LLIR stream → assembly mnemonics
//! - [`encode`]: mnemonics → opcode bytes
//! - [`rom`]: bytes → cartridge image with interrupt vectors
//!
//! [`Atari2600`] advertises the backend's capability profile.
//!
//! # Limitations
//!
//! Branch and call targets are never resolved to addresses: jumps are
//! dropped at emission and `JSR` lines are not encoded. The image is
//! straight-line code.

mod address;
mod backend;
pub mod emit;
pub mod encode;
pub mod lower;
pub mod rom;

pub use address::{AddressMap, LowerError, TIA_REGISTERS, ZERO_PAGE_BASE};
pub use backend::Atari2600;
pub use emit::emit_program;
pub use encode::{assemble, assemble_program, EncodeError};
pub use lower::lower_program;
pub use rom::{package_rom, CODE_CAPACITY, LOAD_ADDRESS, ROM_SIZE};

/// Encode a final program and package it as a ROM image.
pub fn generate_rom(program: &gv_ir::FinalProgram) -> Result<Vec<u8>, EncodeError> {
    let code = assemble(&program.lines)?;
    Ok(package_rom(&code))
}
