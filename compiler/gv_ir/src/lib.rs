//! GameVM IR - the four intermediate representation levels.
//!
//! Compilation walks strictly downward through these levels:
//!
//! ```text
//! source → HLIR (tree) → MLIR (flat, labeled) → LLIR (target-addressed)
//!        → Final (mnemonics + bytes)
//! ```
//!
//! - [`hlir`]: source-shaped statement trees with per-function capability
//!   requirements
//! - [`mlir`]: one flat instruction list per function, operands as text
//! - [`llir`]: register loads/stores against resolved addresses, plus a
//!   flattened whole-program stream
//! - [`final_ir`]: assembly lines and encoded bytes
//!
//! Alongside the IR this crate defines the capability model
//! ([`CapabilityTier`], [`CapabilityProfile`]) and the [`CompileOptions`]
//! every stage reads.
//!
//! # Design
//!
//! - **Closed instruction sets**: each level's instructions are an enum, so
//!   every pass is forced to handle every variant.
//! - **Values, not mutation**: passes take `&Program` and return a new
//!   program. Nothing in this crate holds interior mutability.

pub mod capability;
pub mod final_ir;
pub mod hlir;
pub mod llir;
pub mod mlir;
pub mod options;
mod span;

pub use capability::{CapabilityProfile, CapabilityTier, ParseTierError};
pub use final_ir::FinalProgram;
pub use hlir::{BinaryOp, Expr, HlConstant, HlFunction, HlModule, HlProgram, Literal, Stmt};
pub use llir::{LlFunction, LlInstr, LlModule, LlProgram, Register};
pub use mlir::{MlArgs, MlFunction, MlInstr, MlModule, MlProgram};
pub use options::{
    CodeGenOptions, CompileOptions, DispatchStrategy, Enforcement, OptLevel, TargetArch,
    UnknownOption,
};
pub use span::Span;
