use super::*;
use gv_ir::MlModule;
use pretty_assertions::assert_eq;

fn program(instrs: Vec<MlInstr>) -> MlProgram {
    MlProgram {
        source_file: "demo.pas".to_string(),
        modules: vec![MlModule {
            name: "demo".to_string(),
            functions: vec![MlFunction::new("main", instrs)],
        }],
    }
}

fn optimized(instrs: Vec<MlInstr>, level: OptLevel) -> Vec<MlInstr> {
    optimize_mid(&program(instrs), level).modules[0].functions[0]
        .instrs
        .clone()
}

#[test]
fn none_is_a_verbatim_copy() {
    let instrs = vec![
        MlInstr::assign("x", "(5 + 3)"),
        MlInstr::assign("x", "1"),
        MlInstr::jump("end"),
        MlInstr::assign("y", "2"),
    ];
    assert_eq!(optimized(instrs.clone(), OptLevel::None), instrs);
}

#[test]
fn basic_folds_assign_sources() {
    assert_eq!(
        optimized(vec![MlInstr::assign("x", "(5 + 3)")], OptLevel::Basic),
        vec![MlInstr::assign("x", "8")]
    );
}

#[test]
fn basic_does_not_fold_branch_conditions() {
    let instrs = vec![MlInstr::branch_if("then_0", "(1 + 1)")];
    assert_eq!(optimized(instrs.clone(), OptLevel::Basic), instrs);
}

#[test]
fn duplicate_assign_keeps_last() {
    assert_eq!(
        optimized(
            vec![MlInstr::assign("x", "5"), MlInstr::assign("x", "10")],
            OptLevel::Basic
        ),
        vec![MlInstr::assign("x", "10")]
    );
}

#[test]
fn duplicate_assign_keeps_survivor_order() {
    assert_eq!(
        optimized(
            vec![
                MlInstr::assign("x", "1"),
                MlInstr::assign("y", "2"),
                MlInstr::assign("x", "3"),
            ],
            OptLevel::Basic
        ),
        vec![MlInstr::assign("y", "2"), MlInstr::assign("x", "3")]
    );
}

#[test]
fn labels_branches_and_calls_reset_tracking() {
    let instrs = vec![
        MlInstr::assign("x", "1"),
        MlInstr::label("l"),
        MlInstr::assign("x", "2"),
        MlInstr::branch_if("l", "c"),
        MlInstr::assign("x", "3"),
        MlInstr::call("draw", ["x"]),
        MlInstr::assign("x", "4"),
    ];
    assert_eq!(optimized(instrs.clone(), OptLevel::Basic), instrs);
}

#[test]
fn basic_keeps_unreachable_code() {
    let instrs = vec![
        MlInstr::jump("end"),
        MlInstr::assign("y", "2"),
        MlInstr::label("end"),
    ];
    assert_eq!(optimized(instrs.clone(), OptLevel::Basic), instrs);
}

#[test]
fn aggressive_prunes_until_next_label() {
    assert_eq!(
        optimized(
            vec![
                MlInstr::assign("x", "1"),
                MlInstr::jump("end"),
                MlInstr::assign("y", "2"),
                MlInstr::call("draw", Vec::<String>::new()),
                MlInstr::jump("other"),
                MlInstr::label("end"),
                MlInstr::assign("z", "3"),
            ],
            OptLevel::Aggressive
        ),
        vec![
            MlInstr::assign("x", "1"),
            MlInstr::jump("end"),
            MlInstr::label("end"),
            MlInstr::assign("z", "3"),
        ]
    );
}

#[test]
fn conditional_branch_does_not_prune() {
    let instrs = vec![
        MlInstr::branch_if("then_0", "c"),
        MlInstr::assign("y", "2"),
    ];
    assert_eq!(optimized(instrs.clone(), OptLevel::Full), instrs);
}

#[test]
fn full_matches_aggressive() {
    let instrs = vec![
        MlInstr::assign("x", "(2 * 3)"),
        MlInstr::assign("x", "(x + 1)"),
        MlInstr::jump("end"),
        MlInstr::assign("dead", "0"),
        MlInstr::label("end"),
    ];
    assert_eq!(
        optimized(instrs.clone(), OptLevel::Full),
        optimized(instrs, OptLevel::Aggressive)
    );
}

#[test]
fn input_program_is_not_mutated() {
    let input = program(vec![
        MlInstr::assign("x", "(5 + 3)"),
        MlInstr::assign("x", "(1 + 1)"),
    ]);
    let before = input.clone();
    let output = optimize_mid(&input, OptLevel::Aggressive);
    assert_eq!(input, before);
    assert_eq!(output.modules[0].functions[0].instrs, vec![MlInstr::assign("x", "2")]);
}
