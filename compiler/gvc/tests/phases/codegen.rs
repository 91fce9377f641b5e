//! Listings and ROM images from source.

use std::sync::Arc;

use gvc::CompileOptions;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::common::{atari, build, CONSTANT_ONLY};

#[test]
fn listing_follows_control_flow_layout() {
    let artifacts = build(CONSTANT_ONLY, &CompileOptions::default());
    assert_eq!(
        artifacts.final_ir.lines,
        [
            "main:",
            "LDA #14",
            "STA $09",
            "LDA #200",
            "STA $80",
            "then_2:",
            "LDA #1",
            "STA $08",
            "else_2:",
            "LDA #2",
            "STA $08",
            "endif_2:",
            "while_start_10:",
            "while_body_10:",
            "LDA #300",
            "STA $80",
            "while_end_10:",
        ]
    );
    assert_eq!(artifacts.final_ir.source_file, "test.pas");
}

#[test]
fn debug_info_keeps_jumps_as_comments() {
    let options = CompileOptions {
        debug_info: true,
        ..CompileOptions::default()
    };
    let artifacts = build(CONSTANT_ONLY, &options);
    let lines = &artifacts.final_ir.lines;
    assert_eq!(lines[5], "; JMP then_2 IF (x > 0)");
    assert_eq!(lines[6], "; JMP else_2");
    assert!(lines.contains(&"; JMP while_body_10 IF (x < 10)".to_string()));

    // Comments encode to nothing.
    let plain = build(CONSTANT_ONLY, &CompileOptions::default());
    assert_eq!(artifacts.code, plain.code);
}

#[test]
fn rom_image_layout() {
    let result = atari().compile(CONSTANT_ONLY, ".pas", &CompileOptions::default());
    assert!(result.success, "{}", result.error_message);

    let code: [u8; 20] = [
        0xA9, 0x0E, 0x85, 0x09, // COLUBK := 14
        0xA9, 0xC8, 0x85, 0x80, // x := 200
        0xA9, 0x01, 0x85, 0x08, // COLUPF := 1
        0xA9, 0x02, 0x85, 0x08, // COLUPF := 2
        0xA9, 0x2C, 0x85, 0x80, // x := 300 (low byte)
    ];
    let rom = &result.code;
    assert_eq!(rom.len(), 4096);
    assert_eq!(&rom[..20], &code);
    assert!(rom[20..4090].iter().all(|&b| b == 0));
    assert_eq!(&rom[4090..], &[0x00, 0xF0, 0x00, 0xF0, 0x00, 0xF0]);
}

#[test]
fn non_constant_operand_fails_to_encode_without_optimizer() {
    let result = atari().compile(
        "begin x := 1; y := x + 1 end.",
        ".pas",
        &CompileOptions::default(),
    );
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Encoding failed: line 4: unable to parse value '(x + 1)'"
    );
}

#[test]
fn compile_file_reads_and_names_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("demo.pas");
    std::fs::write(&path, CONSTANT_ONLY).unwrap();

    let result = atari().compile_file(&path, &CompileOptions::default());
    assert!(result.success, "{}", result.error_message);
    assert_eq!(result.source_file, path.display().to_string());
    assert_eq!(result.code.len(), 4096);

    let wrong = dir.path().join("demo.txt");
    std::fs::write(&wrong, CONSTANT_ONLY).unwrap();
    let result = atari().compile_file(&wrong, &CompileOptions::default());
    assert!(!result.success);
    assert!(result.error_message.starts_with("Unsupported source: "));
}

#[test]
fn independent_compilations_run_in_parallel() {
    let compiler = Arc::new(atari());
    let expected = compiler
        .compile(CONSTANT_ONLY, ".pas", &CompileOptions::default())
        .code;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let compiler = Arc::clone(&compiler);
                scope.spawn(move || {
                    compiler
                        .compile(CONSTANT_ONLY, ".pas", &CompileOptions::default())
                        .code
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
