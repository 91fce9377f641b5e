//! MLIR → LLIR for the 6502.
//!
//! | MLIR | LLIR |
//! |---|---|
//! | `t := s` | `load A, s` then `store A, addr(t)` |
//! | `label` | `label` |
//! | `call f(args)` | `call f` (arguments are not passed) |
//! | `br t [if c]` | `jump t [if c]` |
//!
//! Addresses come from an [`AddressMap`] created fresh for each call, so
//! two programs never share allocations.

use gv_ir::{LlFunction, LlInstr, LlModule, LlProgram, MlFunction, MlInstr, MlProgram, Register};
use tracing::debug;

use crate::{AddressMap, LowerError};

#[tracing::instrument(level = "debug", skip_all, fields(file = %program.source_file))]
pub fn lower_program(program: &MlProgram) -> Result<LlProgram, LowerError> {
    let mut addresses = AddressMap::new();

    let mut modules = Vec::with_capacity(program.modules.len());
    for module in &program.modules {
        let mut functions = Vec::with_capacity(module.functions.len());
        for function in &module.functions {
            functions.push(lower_function(function, &mut addresses)?);
        }
        modules.push(LlModule {
            name: module.name.clone(),
            functions,
        });
    }

    debug!(symbols = addresses.allocated(), "target lowering complete");
    Ok(LlProgram::new(program.source_file.clone(), modules))
}

fn lower_function(
    function: &MlFunction,
    addresses: &mut AddressMap,
) -> Result<LlFunction, LowerError> {
    let mut instrs = Vec::with_capacity(function.instrs.len() + function.instrs.len() / 2);
    for instr in &function.instrs {
        match instr {
            MlInstr::Assign { target, source } => {
                let address = addresses.resolve(target)?;
                instrs.push(LlInstr::load(Register::A, source.clone()));
                instrs.push(LlInstr::store(Register::A, address));
            }
            MlInstr::Label { name } => instrs.push(LlInstr::label(name.clone())),
            MlInstr::Call { name, .. } => instrs.push(LlInstr::call(name.clone())),
            MlInstr::Branch { target, cond } => {
                instrs.push(LlInstr::jump(target.clone(), cond.clone()));
            }
        }
    }
    Ok(LlFunction::new(function.name.clone(), instrs))
}
