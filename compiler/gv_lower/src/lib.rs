//! HLIR → MLIR lowering for the GameVM compiler.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Parse → Capability Check → **Lower (HL→ML)** → Mid Opt → Target Lowering
//! ```
//!
//! # What Happens During Lowering
//!
//! Each function body is flattened into one ordered instruction buffer:
//!
//! 1. **Assignments** become `target := <rendered expression>`. Expressions
//!    are rendered to text (`(x + 1)`, `draw(x, 2)`) and not evaluated.
//!    Identifiers naming a program constant render as the constant's value.
//! 2. **Control flow** becomes labels and branches. Label names carry the
//!    buffer length at the point the statement starts (`then_4`,
//!    `while_start_9`), which keeps them unique within the function.
//! 3. **Blocks** are inlined.
//!
//! Module and function order is preserved. The input program is never
//! modified.

mod render;

use gv_ir::{
    Expr, HlFunction, HlModule, HlProgram, Literal, MlFunction, MlInstr, MlModule, MlProgram, Stmt,
};
use gv_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::debug;

pub use render::render_expr;

/// Program constants by name, for identifier substitution.
pub type ConstantTable<'a> = FxHashMap<&'a str, &'a Literal>;

/// Lower a whole program to mid-level IR.
#[tracing::instrument(level = "debug", skip_all, fields(file = %program.source_file))]
pub fn lower_program(program: &HlProgram) -> MlProgram {
    let constants: ConstantTable<'_> = program
        .constants
        .iter()
        .map(|c| (c.name.as_str(), &c.value))
        .collect();

    MlProgram {
        source_file: program.source_file.clone(),
        modules: program
            .modules
            .iter()
            .map(|module| lower_module(module, &constants))
            .collect(),
    }
}

fn lower_module(module: &HlModule, constants: &ConstantTable<'_>) -> MlModule {
    MlModule {
        name: module.name.clone(),
        functions: module
            .functions
            .iter()
            .map(|function| lower_function(function, constants))
            .collect(),
    }
}

/// Lower one function body.
pub fn lower_function(function: &HlFunction, constants: &ConstantTable<'_>) -> MlFunction {
    let mut lowerer = Lowerer {
        constants,
        instrs: Vec::new(),
    };
    lowerer.lower_stmts(&function.body);
    debug!(
        function = %function.name,
        instrs = lowerer.instrs.len(),
        "lowered function"
    );
    MlFunction::new(function.name.clone(), lowerer.instrs)
}

/// Per-function lowering state: the output buffer.
struct Lowerer<'c, 'a> {
    constants: &'c ConstantTable<'a>,
    instrs: Vec<MlInstr>,
}

impl Lowerer<'_, '_> {
    fn lower_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.lower_stmt(stmt);
        }
    }

    fn lower_stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| match stmt {
            Stmt::Assign { target, value } => {
                let source = render_expr(value, self.constants);
                self.instrs.push(MlInstr::assign(target.clone(), source));
            }
            Stmt::Expr(Expr::Call { callee, args }) => {
                let args = args.iter().map(|a| render_expr(a, self.constants));
                self.instrs.push(MlInstr::call(callee.clone(), args));
            }
            // Only calls have an effect.
            Stmt::Expr(_) => {}
            Stmt::Block(stmts) => self.lower_stmts(stmts),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => self.lower_if(cond, then_branch, else_branch.as_deref()),
            Stmt::While { cond, body } => self.lower_while(cond, body),
        });
    }

    fn lower_if(&mut self, cond: &Expr, then_branch: &[Stmt], else_branch: Option<&[Stmt]>) {
        let n = self.instrs.len();
        let then_label = format!("then_{n}");
        let else_label = format!("else_{n}");
        let endif_label = format!("endif_{n}");

        let cond = render_expr(cond, self.constants);
        self.instrs.push(MlInstr::branch_if(then_label.clone(), cond));

        match else_branch {
            Some(else_branch) if !else_branch.is_empty() => {
                self.instrs.push(MlInstr::jump(else_label.clone()));
                self.instrs.push(MlInstr::label(then_label));
                self.lower_stmts(then_branch);
                self.instrs.push(MlInstr::jump(endif_label.clone()));
                self.instrs.push(MlInstr::label(else_label));
                self.lower_stmts(else_branch);
            }
            _ => {
                self.instrs.push(MlInstr::jump(endif_label.clone()));
                self.instrs.push(MlInstr::label(then_label));
                self.lower_stmts(then_branch);
            }
        }

        self.instrs.push(MlInstr::label(endif_label));
    }

    fn lower_while(&mut self, cond: &Expr, body: &[Stmt]) {
        let n = self.instrs.len();
        let start_label = format!("while_start_{n}");
        let body_label = format!("while_body_{n}");
        let end_label = format!("while_end_{n}");

        let cond = render_expr(cond, self.constants);
        self.instrs.push(MlInstr::label(start_label.clone()));
        self.instrs.push(MlInstr::branch_if(body_label.clone(), cond));
        self.instrs.push(MlInstr::jump(end_label.clone()));
        self.instrs.push(MlInstr::label(body_label));
        self.lower_stmts(body);
        self.instrs.push(MlInstr::jump(start_label));
        self.instrs.push(MlInstr::label(end_label));
    }
}
