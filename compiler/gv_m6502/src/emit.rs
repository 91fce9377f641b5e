//! LLIR → 6502 assembly mnemonics.
//!
//! Works on the flattened stream, so every function starts with its name
//! as a label. Jumps have no encoding yet; with debug info they are kept as
//! `; JMP` comment lines so listings still show the control flow.

use gv_ir::{CodeGenOptions, FinalProgram, LlInstr, LlProgram};

#[tracing::instrument(level = "debug", skip_all, fields(debug_info = options.debug_info))]
pub fn emit_program(program: &LlProgram, options: &CodeGenOptions) -> FinalProgram {
    let lines = program
        .stream
        .iter()
        .filter_map(|instr| emit_instr(instr, options.debug_info))
        .collect();
    FinalProgram::new(program.source_file.clone(), lines)
}

fn emit_instr(instr: &LlInstr, debug_info: bool) -> Option<String> {
    match instr {
        LlInstr::Load { value, .. } => Some(format!("LDA #{value}")),
        LlInstr::Store { address, .. } => Some(format!("STA {address}")),
        LlInstr::Call { label } => Some(format!("JSR {label}")),
        LlInstr::Label { name } => Some(format!("{name}:")),
        LlInstr::Jump { target, cond } if debug_info => Some(match cond {
            Some(cond) => format!("; JMP {target} IF {cond}"),
            None => format!("; JMP {target}"),
        }),
        LlInstr::Jump { .. } => None,
    }
}
