//! Capability enforcement through the orchestrator.

use gvc::{CapabilityTier, CompileOptions, Enforcement, ErrorCode, TargetArch};
use pretty_assertions::assert_eq;

use crate::common::{atari, SAMPLE};

const NEEDS_L5: &str = "procedure Boost; requires L5; begin end; begin Boost; COLUBK := 1 end.";

#[test]
fn extension_unlocks_higher_tier_on_l1_backend() {
    let options = CompileOptions {
        optimize: true,
        opt_level: gvc::OptLevel::Basic,
        ..CompileOptions::default()
    };
    let result = atari().compile(SAMPLE, ".pas", &options);
    assert!(result.success, "{}", result.error_message);
    assert!(result.warnings.is_empty());
}

#[test]
fn strict_mode_rejects_unsupported_tier() {
    let result = atari().compile(NEEDS_L5, ".pas", &CompileOptions::default());
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Backend capability violations: Function 'Boost' requires L5"
    );
    assert!(result.code.is_empty());
    assert!(result.warnings.is_empty());

    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.code, ErrorCode::E1001);
    assert_eq!(diagnostic.notes, ["atari2600 provides L1"]);
}

#[test]
fn advisory_mode_compiles_with_warnings() {
    let options = CompileOptions {
        enforcement: Enforcement::Advisory,
        ..CompileOptions::default()
    };
    let result = atari().compile(NEEDS_L5, ".pas", &options);
    assert!(result.success, "{}", result.error_message);
    assert_eq!(result.warnings, ["Function 'Boost' requires L5"]);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.code.len(), 4096);
}

#[test]
fn extension_the_backend_lacks_does_not_help() {
    let source = "procedure Sprites; requires L4 via Ext.Video.Sprites; begin end; begin end.";
    let result = atari().compile(source, ".pas", &CompileOptions::default());
    assert_eq!(
        result.error_message,
        "Backend capability violations: Function 'Sprites' requires L4"
    );

    let source = "procedure Tune; requires L4 via Ext.Snd.Polyphonic; begin end; begin end.";
    let result = atari().compile(source, ".pas", &CompileOptions::default());
    assert!(result.success, "{}", result.error_message);
}

#[test]
fn request_above_backend_is_rejected_even_for_clean_programs() {
    let options = CompileOptions {
        tier: CapabilityTier::L3,
        extensions: vec!["Ext.Math.Fast".to_string(), "Ext.Net.Modem".to_string()],
        ..CompileOptions::default()
    };
    let result = atari().compile("begin end.", ".pas", &options);
    assert!(!result.success);
    assert_eq!(
        result.error_message,
        "Backend capability violations: Requested profile L3 exceeds backend base capability L1; \
         Backend does not support extension 'Ext.Net.Modem'"
    );
    assert_eq!(result.tier, CapabilityTier::L3);

    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E1002, ErrorCode::E1002]);
}

#[test]
fn unsupported_target_has_no_compiler() {
    let Err(err) = gvc::Compiler::for_target(TargetArch::Nes) else {
        panic!("NES has no backend");
    };
    assert_eq!(err.code(), ErrorCode::E2001);
    assert_eq!(
        err.to_string(),
        "Unsupported target: no backend for 'nes' (available: atari2600)"
    );
}

#[test]
fn atari_profile_is_advertised() {
    let profile = atari().capability_profile();
    assert_eq!(profile.base, CapabilityTier::L1);
    assert_eq!(profile.extensions, ["Ext.Math.Fast", "Ext.Snd.Polyphonic"]);
    assert_eq!(profile.injected_tier("Ext.Math.Fast"), Some(CapabilityTier::L3));
}
