use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gv_diagnostic::ErrorCode;
use gv_ir::{CapabilityTier, MlInstr, OptLevel};
use pretty_assertions::assert_eq;

use super::*;

const STRAIGHT_LINE: &str = "program T; begin COLUBK := $0E; x := 5 end.";

fn strict() -> CompileOptions {
    CompileOptions::default()
}

fn compiler() -> Compiler {
    Compiler::for_target(TargetArch::Atari2600).unwrap()
}

struct CountingMidOptimizer(Arc<AtomicUsize>);

impl MidOptimizer for CountingMidOptimizer {
    fn optimize(&self, program: &MlProgram, level: OptLevel) -> MlProgram {
        self.0.fetch_add(1, Ordering::SeqCst);
        gv_opt::optimize_mid(program, level)
    }
}

struct PanickingLowering;

impl MidToLow for PanickingLowering {
    fn transform(&self, _program: &MlProgram) -> CompileResult<LlProgram> {
        panic!("register file on fire")
    }
}

#[test]
fn compiles_straight_line_program() {
    let result = compiler().compile(STRAIGHT_LINE, ".pas", &strict());
    assert!(result.success, "{}", result.error_message);
    assert_eq!(result.code.len(), gv_m6502::ROM_SIZE);
    // LDA #14; STA $09; LDA #5; STA $80
    assert_eq!(
        &result.code[..8],
        &[0xA9, 0x0E, 0x85, 0x09, 0xA9, 0x05, 0x85, 0x80]
    );
    assert_eq!(result.error_message, "");
    assert_eq!(result.target, TargetArch::Atari2600);
    assert_eq!(result.tier, CapabilityTier::L1);
}

#[test]
fn build_keeps_intermediate_programs() {
    let mut warnings = Vec::new();
    let artifacts = compiler()
        .build(STRAIGHT_LINE, "t.pas", ".pas", &strict(), &mut warnings)
        .unwrap();
    assert_eq!(artifacts.hlir.source_file, "t.pas");
    assert_eq!(artifacts.mlir.source_file, "t.pas");
    assert_eq!(
        artifacts.mlir.modules[0].functions[0].instrs,
        vec![MlInstr::assign("COLUBK", "14"), MlInstr::assign("x", "5")]
    );
    assert_eq!(
        artifacts.final_ir.lines,
        ["main:", "LDA #14", "STA $09", "LDA #5", "STA $80"]
    );
    assert!(warnings.is_empty());
}

#[test]
fn unsupported_extension_fails() {
    let result = compiler().compile(STRAIGHT_LINE, ".py", &strict());
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Unsupported source: no frontend for extension '.py' (expected one of: .pas, .pp)"
    );
    assert!(result.code.is_empty());
}

#[test]
fn parse_errors_become_failed_results() {
    let result = compiler().compile("begin x := end.", ".pas", &strict());
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Parse error at line 1, column 12: expected expression, found `end`"
    );
}

#[test]
fn optimizers_only_run_when_enabled() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stages = Stages {
        mid_optimizer: Box::new(CountingMidOptimizer(Arc::clone(&calls))),
        ..Stages::atari2600()
    };
    let compiler = Compiler::new(stages);

    assert!(compiler.compile(STRAIGHT_LINE, ".pas", &strict()).success);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let options = CompileOptions {
        optimize: true,
        opt_level: OptLevel::Basic,
        ..strict()
    };
    assert!(compiler.compile(STRAIGHT_LINE, ".pas", &options).success);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn stage_panics_are_caught() {
    let stages = Stages {
        mid_to_low: Box::new(PanickingLowering),
        ..Stages::atari2600()
    };
    let result = Compiler::new(stages).compile(STRAIGHT_LINE, ".pas", &strict());
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Compilation failed: register file on fire"
    );
}

#[test]
fn strict_mode_aggregates_request_and_program_violations() {
    let source = "procedure Fx; requires L5; begin end; begin Fx end.";
    let options = CompileOptions {
        tier: CapabilityTier::L2,
        extensions: vec!["Ext.Video.Mode7".to_string()],
        ..strict()
    };
    let result = compiler().compile(source, ".pas", &options);
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Backend capability violations: Requested profile L2 exceeds backend base capability L1; \
         Backend does not support extension 'Ext.Video.Mode7'; Function 'Fx' requires L5"
    );
}

#[test]
fn advisory_warnings_survive_later_failure() {
    // `(x + 1)` is not a constant operand, so encoding fails after validation.
    let source = "procedure Fx; requires L5; begin y := x + 1 end; begin end.";
    let options = CompileOptions {
        enforcement: Enforcement::Advisory,
        ..strict()
    };
    let result = compiler().compile(source, ".pas", &options);
    assert!(!result.success);
    assert!(result.error_message.starts_with("Encoding failed: "));
    assert_eq!(result.warnings, ["Function 'Fx' requires L5"]);
}

#[test]
fn check_runs_front_end_only() {
    let source = "procedure Fx; requires L3; begin y := x + 1 end; begin Fx end.";
    let result = compiler().check(source, "fx.pas", ".pas", &strict());
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Backend capability violations: Function 'Fx' requires L3"
    );

    let source = "procedure Fx; requires L3 via Ext.Math.Fast; begin y := x + 1 end; begin Fx end.";
    let result = compiler().check(source, "fx.pas", ".pas", &strict());
    assert!(result.success, "{}", result.error_message);
    assert!(result.code.is_empty());
}

#[test]
fn other_targets_have_no_backend() {
    for target in [TargetArch::Nes, TargetArch::Genesis, TargetArch::N64] {
        let Err(err) = Compiler::for_target(target) else {
            panic!("{target} should not have a backend");
        };
        assert_eq!(err.code(), ErrorCode::E2001);
    }
}

#[test]
fn missing_file_reports_read_failure() {
    let result = compiler().compile_file("/definitely/not/here.pas", &strict());
    assert!(!result.success);
    assert!(result
        .error_message
        .starts_with("Failed to read source file: "));
    assert_eq!(result.source_file, "/definitely/not/here.pas");
}

#[test]
fn extension_is_taken_from_path() {
    assert_eq!(extension_of(Path::new("game/main.pas")), ".pas");
    assert_eq!(extension_of(Path::new("Makefile")), "");
}

#[test]
fn compiler_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Compiler>();
}
