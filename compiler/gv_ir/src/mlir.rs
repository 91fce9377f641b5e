//! Mid-level IR: one flat, ordered instruction list per function.
//!
//! Structured control flow is gone by this level. `if` and `while` become
//! labels plus conditional/unconditional branches; nested blocks are inlined.
//! Operands are kept as text rendered from the HLIR expression tree, so the
//! optimizer works on strings like `"(5 + 3)"`.
//!
//! Instruction order is semantically significant and label names are unique
//! within a function.

use std::fmt;

use smallvec::SmallVec;

/// Rendered call arguments. Most calls on the target take at most two.
pub type MlArgs = SmallVec<[String; 2]>;

/// Mid-level instruction.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MlInstr {
    /// Named anchor for branches.
    Label { name: String },
    /// Jump to `target`; taken only when `cond` holds, always when `None`.
    Branch {
        target: String,
        cond: Option<String>,
    },
    /// `target := source`.
    Assign { target: String, source: String },
    /// Call `name` with rendered arguments.
    Call { name: String, args: MlArgs },
}

impl MlInstr {
    pub fn label(name: impl Into<String>) -> Self {
        MlInstr::Label { name: name.into() }
    }

    /// Unconditional branch.
    pub fn jump(target: impl Into<String>) -> Self {
        MlInstr::Branch {
            target: target.into(),
            cond: None,
        }
    }

    /// Branch taken when `cond` holds.
    pub fn branch_if(target: impl Into<String>, cond: impl Into<String>) -> Self {
        MlInstr::Branch {
            target: target.into(),
            cond: Some(cond.into()),
        }
    }

    pub fn assign(target: impl Into<String>, source: impl Into<String>) -> Self {
        MlInstr::Assign {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn call<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MlInstr::Call {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this is a branch with no condition.
    pub fn is_unconditional_branch(&self) -> bool {
        matches!(self, MlInstr::Branch { cond: None, .. })
    }
}

impl fmt::Display for MlInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlInstr::Label { name } => write!(f, "{name}:"),
            MlInstr::Branch { target, cond: None } => write!(f, "  br {target}"),
            MlInstr::Branch {
                target,
                cond: Some(cond),
            } => write!(f, "  br {target} if {cond}"),
            MlInstr::Assign { target, source } => write!(f, "  {target} := {source}"),
            MlInstr::Call { name, args } => write!(f, "  call {name}({})", args.join(", ")),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MlFunction {
    pub name: String,
    pub instrs: Vec<MlInstr>,
}

impl MlFunction {
    pub fn new(name: impl Into<String>, instrs: Vec<MlInstr>) -> Self {
        MlFunction {
            name: name.into(),
            instrs,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MlModule {
    pub name: String,
    pub functions: Vec<MlFunction>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MlProgram {
    pub source_file: String,
    pub modules: Vec<MlModule>,
}

impl MlProgram {
    /// All functions across all modules, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &MlFunction> {
        self.modules.iter().flat_map(|m| m.functions.iter())
    }

    /// Rebuild the program with every function passed through `f`,
    /// keeping module and function order.
    #[must_use]
    pub fn map_functions(&self, mut f: impl FnMut(&MlFunction) -> MlFunction) -> MlProgram {
        MlProgram {
            source_file: self.source_file.clone(),
            modules: self
                .modules
                .iter()
                .map(|module| MlModule {
                    name: module.name.clone(),
                    functions: module.functions.iter().map(&mut f).collect(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for MlProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for module in &self.modules {
            writeln!(f, "module {}", module.name)?;
            for function in &module.functions {
                writeln!(f, "fn {}", function.name)?;
                for instr in &function.instrs {
                    writeln!(f, "{instr}")?;
                }
            }
        }
        Ok(())
    }
}
