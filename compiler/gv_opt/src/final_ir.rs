//! Final-IR optimizer: drops a line that repeats the previous one.
//!
//! Comparison is on trimmed text against the last kept line that is not
//! blank and not a `;` comment. Blank and comment lines are always kept and
//! do not reset the comparison. Bytes are copied unchanged.

use gv_ir::{FinalProgram, OptLevel};

pub fn optimize_final(program: &FinalProgram, level: OptLevel) -> FinalProgram {
    if level == OptLevel::None {
        return program.clone();
    }

    let mut lines = Vec::with_capacity(program.lines.len());
    let mut previous: Option<&str> = None;
    for line in &program.lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            lines.push(line.clone());
            continue;
        }
        if previous == Some(trimmed) {
            continue;
        }
        previous = Some(trimmed);
        lines.push(line.clone());
    }

    FinalProgram {
        source_file: program.source_file.clone(),
        lines,
        bytes: program.bytes.clone(),
    }
}
