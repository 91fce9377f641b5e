//! Zero-page address allocation.

use gv_diagnostic::{CompileError, ErrorCode};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

/// First address handed to program symbols (start of RIOT RAM).
pub const ZERO_PAGE_BASE: u8 = 0x80;

/// TIA write registers, by name.
pub const TIA_REGISTERS: &[(&str, u8)] = &[
    ("VSYNC", 0x00),
    ("VBLANK", 0x01),
    ("WSYNC", 0x02),
    ("RSYNC", 0x03),
    ("NUSIZ0", 0x04),
    ("NUSIZ1", 0x05),
    ("COLUP0", 0x06),
    ("COLUP1", 0x07),
    ("COLUPF", 0x08),
    ("COLUBK", 0x09),
    ("CTRLPF", 0x0A),
    ("REFP0", 0x0B),
    ("REFP1", 0x0C),
    ("PF0", 0x0D),
    ("PF1", 0x0E),
    ("PF2", 0x0F),
    ("AUDC0", 0x15),
    ("AUDC1", 0x16),
    ("AUDF0", 0x17),
    ("AUDF1", 0x18),
    ("AUDV0", 0x19),
    ("AUDV1", 0x1A),
    ("GRP0", 0x1B),
    ("GRP1", 0x1C),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LowerError {
    #[error("zero-page RAM exhausted: no address left for '{symbol}'")]
    ZeroPageExhausted { symbol: String },
}

impl From<LowerError> for CompileError {
    fn from(err: LowerError) -> Self {
        CompileError::pipeline(ErrorCode::E2003, "Target lowering failed", err.to_string())
    }
}

/// Symbol → address table for one lowering run.
///
/// Names are matched case-insensitively. Hardware registers are fixed;
/// every other symbol gets the next free byte from [`ZERO_PAGE_BASE`] up to
/// `$FF`, in first-encounter order.
#[derive(Clone, Debug)]
pub struct AddressMap {
    symbols: FxHashMap<String, u8>,
    next: u16,
}

impl Default for AddressMap {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressMap {
    pub fn new() -> Self {
        let symbols = TIA_REGISTERS
            .iter()
            .map(|(name, addr)| ((*name).to_string(), *addr))
            .collect();
        AddressMap {
            symbols,
            next: u16::from(ZERO_PAGE_BASE),
        }
    }

    /// Address text for `target` (`$80`), allocating on first use.
    ///
    /// Targets already written as `$`-addresses are returned verbatim.
    pub fn resolve(&mut self, target: &str) -> Result<String, LowerError> {
        if target.starts_with('$') {
            return Ok(target.to_string());
        }

        let key = target.to_ascii_uppercase();
        if let Some(&addr) = self.symbols.get(&key) {
            return Ok(format_address(addr));
        }

        let addr = u8::try_from(self.next).map_err(|_| LowerError::ZeroPageExhausted {
            symbol: target.to_string(),
        })?;
        self.next += 1;
        self.symbols.insert(key, addr);
        trace!(symbol = target, address = addr, "allocated zero-page address");
        Ok(format_address(addr))
    }

    /// Address already bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<u8> {
        self.symbols.get(&name.to_ascii_uppercase()).copied()
    }

    /// Number of program symbols allocated so far (registers excluded).
    pub fn allocated(&self) -> usize {
        usize::from(self.next - u16::from(ZERO_PAGE_BASE))
    }
}

fn format_address(addr: u8) -> String {
    format!("${addr:02X}")
}
