//! Mid-level optimizer.
//!
//! Passes, in order:
//!
//! 1. **Constant folding** (Basic+): `(a op b)` over two integer literals
//!    in an assign source becomes its value, bottom-up
//! 2. **Unreachable pruning** (Aggressive+): after an unconditional branch,
//!    everything up to the next label is dropped
//! 3. **Duplicate-assignment elimination** (Basic+): within a straight-line
//!    run of assigns, only the last assign to each target survives

mod fold;

use gv_ir::{MlFunction, MlInstr, MlProgram, OptLevel};
use rustc_hash::FxHashMap;
use tracing::debug;

pub use fold::fold_constants;

/// Optimize every function of `program` at `level`.
#[tracing::instrument(level = "debug", skip_all, fields(level = %level))]
pub fn optimize_mid(program: &MlProgram, level: OptLevel) -> MlProgram {
    if level == OptLevel::None {
        return program.clone();
    }
    program.map_functions(|function| optimize_function(function, level))
}

/// Optimize one function at `level`.
pub fn optimize_function(function: &MlFunction, level: OptLevel) -> MlFunction {
    if level == OptLevel::None {
        return function.clone();
    }

    let mut instrs: Vec<MlInstr> = function.instrs.iter().map(fold_instr).collect();
    if level >= OptLevel::Aggressive {
        instrs = prune_unreachable(instrs);
    }
    let instrs = eliminate_duplicate_assigns(instrs);

    debug!(
        function = %function.name,
        before = function.instrs.len(),
        after = instrs.len(),
        "optimized function"
    );
    MlFunction::new(function.name.clone(), instrs)
}

fn fold_instr(instr: &MlInstr) -> MlInstr {
    match instr {
        MlInstr::Assign { target, source } => {
            MlInstr::assign(target.clone(), fold_constants(source))
        }
        other => other.clone(),
    }
}

/// Drop everything between an unconditional branch and the next label.
pub fn prune_unreachable(instrs: Vec<MlInstr>) -> Vec<MlInstr> {
    let mut out = Vec::with_capacity(instrs.len());
    let mut reachable = true;
    for instr in instrs {
        if matches!(instr, MlInstr::Label { .. }) {
            reachable = true;
        }
        if !reachable {
            continue;
        }
        reachable = !instr.is_unconditional_branch();
        out.push(instr);
    }
    out
}

/// Keep only the last assign to each target within a straight-line run.
///
/// A run ends at any label, branch or call. Surviving assigns keep their
/// own relative order.
pub fn eliminate_duplicate_assigns(instrs: Vec<MlInstr>) -> Vec<MlInstr> {
    let mut out = Vec::with_capacity(instrs.len());
    let mut run: Vec<Option<MlInstr>> = Vec::new();
    let mut pending: FxHashMap<String, usize> = FxHashMap::default();

    for instr in instrs {
        if let MlInstr::Assign { target, .. } = &instr {
            if let Some(previous) = pending.insert(target.clone(), run.len()) {
                run[previous] = None;
            }
            run.push(Some(instr));
        } else {
            flush(&mut out, &mut run, &mut pending);
            out.push(instr);
        }
    }
    flush(&mut out, &mut run, &mut pending);
    out
}

fn flush(
    out: &mut Vec<MlInstr>,
    run: &mut Vec<Option<MlInstr>>,
    pending: &mut FxHashMap<String, usize>,
) {
    out.extend(run.drain(..).flatten());
    pending.clear();
}

#[cfg(test)]
mod tests;
