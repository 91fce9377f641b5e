//! Optimizers for the GameVM compiler.
//!
//! One module per IR level, each a pure `&Program → Program` function
//! gated on [`OptLevel`]:
//!
//! | Level | [`mid`] | [`low`] | [`final_ir`] |
//! |---|---|---|---|
//! | `None` | copy | copy | copy |
//! | `Basic` | fold + dedupe assigns | load/store peephole | drop repeated lines |
//! | `Aggressive` | + unreachable pruning | same as Basic | same as Basic |
//! | `Full` | same as Aggressive | same as Basic | same as Basic |
//!
//! # Scope
//!
//! This is deliberately not a general optimizer: no data-flow analysis,
//! no register allocation, no cross-function work. Every function is
//! optimized on its own and module/function structure is preserved.

pub mod final_ir;
pub mod low;
pub mod mid;

pub use final_ir::optimize_final;
pub use low::optimize_low;
pub use mid::{fold_constants, optimize_mid};

pub use gv_ir::OptLevel;
