//! Low-level peephole optimizer.
//!
//! One rule at Basic and above: a `load R, v` immediately followed by
//! `store R, addr` on the same register drops the load and keeps the store.
//! The flattened stream is re-derived from the optimized functions.

use gv_ir::{LlFunction, LlInstr, LlProgram, OptLevel};
use tracing::debug;

#[tracing::instrument(level = "debug", skip_all, fields(level = %level))]
pub fn optimize_low(program: &LlProgram, level: OptLevel) -> LlProgram {
    if level == OptLevel::None {
        return program.clone();
    }
    program.map_functions(|function| {
        let instrs = peephole(&function.instrs);
        debug!(
            function = %function.name,
            removed = function.instrs.len() - instrs.len(),
            "peephole"
        );
        LlFunction::new(function.name.clone(), instrs)
    })
}

fn peephole(instrs: &[LlInstr]) -> Vec<LlInstr> {
    let mut out = Vec::with_capacity(instrs.len());
    for (i, instr) in instrs.iter().enumerate() {
        if let (LlInstr::Load { reg, .. }, Some(LlInstr::Store { reg: next_reg, .. })) =
            (instr, instrs.get(i + 1))
        {
            if reg == next_reg {
                continue;
            }
        }
        out.push(instr.clone());
    }
    out
}
