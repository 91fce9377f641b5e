//! Shared programs and helpers for phase tests.

use gvc::{Artifacts, CompileOptions, Compiler, TargetArch};

/// The language tour program: constants, an extension-gated procedure,
/// `if`/`else` and `while`.
pub const SAMPLE: &str = "\
program Name;
const LIMIT = 10; BG = $0E;
procedure Flash; requires L3 via Ext.Math.Fast;
begin COLUBK := BG end;
begin
  x := 5 + 3;
  if x > 0 then y := 1 else y := 2;
  while x < LIMIT do begin x := x + 1; Flash end
end.
";

/// Only constant operands, so it encodes without optimization.
pub const CONSTANT_ONLY: &str = "\
program Demo;
const BG = $0E;
var x: byte;
begin
  COLUBK := BG;
  x := 200;
  if x > 0 then COLUPF := 1 else COLUPF := 2;
  while x < 10 do x := 300
end.
";

pub fn atari() -> Compiler {
    Compiler::for_target(TargetArch::Atari2600).unwrap()
}

pub fn build(source: &str, options: &CompileOptions) -> Artifacts {
    let mut warnings = Vec::new();
    atari()
        .build(source, "test.pas", ".pas", options, &mut warnings)
        .unwrap_or_else(|e| panic!("build failed: {e}"))
}

pub fn build_ir(source: &str, options: &CompileOptions) -> Artifacts {
    let mut warnings = Vec::new();
    atari()
        .build_ir(source, "test.pas", ".pas", options, &mut warnings)
        .unwrap_or_else(|e| panic!("build failed: {e}"))
}
