//! Optimizer effects seen through the whole pipeline.

use gv_ir::MlInstr;
use gvc::{CompileOptions, OptLevel};
use pretty_assertions::assert_eq;

use crate::common::{atari, build, build_ir, SAMPLE};

fn optimized(level: OptLevel) -> CompileOptions {
    CompileOptions {
        optimize: true,
        opt_level: level,
        ..CompileOptions::default()
    }
}

#[test]
fn constants_are_substituted_then_folded() {
    let artifacts = build_ir(SAMPLE, &optimized(OptLevel::Basic));
    let main = &artifacts.mlir.modules[0].functions[1];
    assert_eq!(main.name, "main");
    assert_eq!(main.instrs[0], MlInstr::assign("x", "8"));
    assert!(main
        .instrs
        .contains(&MlInstr::branch_if("while_body_9", "(x < 10)")));

    let flash = &artifacts.mlir.modules[0].functions[0];
    assert_eq!(flash.instrs, [MlInstr::assign("COLUBK", "14")]);
}

#[test]
fn optimizer_level_none_is_a_copy() {
    let off = build_ir(SAMPLE, &CompileOptions::default());
    let none = build_ir(SAMPLE, &optimized(OptLevel::None));
    assert_eq!(off.mlir, none.mlir);
    assert_eq!(off.final_ir.lines, none.final_ir.lines);
    assert_eq!(off.mlir.modules[0].functions[1].instrs[0], MlInstr::assign("x", "(5 + 3)"));
}

#[test]
fn sample_listing_at_full() {
    let artifacts = build(SAMPLE, &optimized(OptLevel::Full));
    assert_eq!(
        artifacts.final_ir.lines,
        [
            "Flash:",
            "STA $09",
            "main:",
            "STA $80",
            "then_1:",
            "STA $81",
            "else_1:",
            "STA $81",
            "endif_1:",
            "while_start_9:",
            "while_body_9:",
            "STA $80",
            "JSR Flash",
            "while_end_9:",
        ]
    );
    assert_eq!(
        &artifacts.code[..10],
        &[0x85, 0x09, 0x85, 0x80, 0x85, 0x81, 0x85, 0x81, 0x85, 0x80]
    );
}

#[test]
fn duplicate_assigns_keep_last_write() {
    let source = "begin COLUBK := 1; COLUPF := 3; COLUBK := 2 end.";
    let artifacts = build_ir(source, &optimized(OptLevel::Basic));
    assert_eq!(
        artifacts.mlir.modules[0].functions[0].instrs,
        [MlInstr::assign("COLUPF", "3"), MlInstr::assign("COLUBK", "2")]
    );
}

#[test]
fn unoptimized_and_optimized_sample_differ_only_in_loads() {
    let result = atari().compile(SAMPLE, ".pas", &optimized(OptLevel::Aggressive));
    assert!(result.success, "{}", result.error_message);

    // Without the optimizer `x := x + 1` reaches the encoder as a load.
    let result = atari().compile(SAMPLE, ".pas", &CompileOptions::default());
    assert!(!result.success);
    assert!(result.error_message.starts_with("Encoding failed: "));
}
