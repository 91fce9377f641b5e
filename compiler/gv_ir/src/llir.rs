//! Low-level IR: target-addressed flat instruction lists.
//!
//! Symbolic assignment targets have been resolved to addresses and every
//! assignment is an explicit register load followed by a store. Besides the
//! per-function lists, [`LlProgram::stream`] holds the whole program as one
//! linear stream (`label(fn); <instrs>` per function, in declaration order)
//! for backends that emit a single code section.

use std::fmt;

/// CPU register.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Register {
    /// Accumulator.
    A,
    X,
    Y,
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::A => f.write_str("A"),
            Register::X => f.write_str("X"),
            Register::Y => f.write_str("Y"),
        }
    }
}

/// Low-level instruction.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum LlInstr {
    /// Load immediate `value` (operand text) into `reg`.
    Load { reg: Register, value: String },
    /// Store `reg` to a resolved `address` (e.g. `$80`).
    Store { reg: Register, address: String },
    Call { label: String },
    Label { name: String },
    Jump {
        target: String,
        cond: Option<String>,
    },
}

impl LlInstr {
    pub fn load(reg: Register, value: impl Into<String>) -> Self {
        LlInstr::Load {
            reg,
            value: value.into(),
        }
    }

    pub fn store(reg: Register, address: impl Into<String>) -> Self {
        LlInstr::Store {
            reg,
            address: address.into(),
        }
    }

    pub fn call(label: impl Into<String>) -> Self {
        LlInstr::Call {
            label: label.into(),
        }
    }

    pub fn label(name: impl Into<String>) -> Self {
        LlInstr::Label { name: name.into() }
    }

    pub fn jump(target: impl Into<String>, cond: Option<String>) -> Self {
        LlInstr::Jump {
            target: target.into(),
            cond,
        }
    }
}

impl fmt::Display for LlInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlInstr::Load { reg, value } => write!(f, "  load {reg}, {value}"),
            LlInstr::Store { reg, address } => write!(f, "  store {reg}, {address}"),
            LlInstr::Call { label } => write!(f, "  call {label}"),
            LlInstr::Label { name } => write!(f, "{name}:"),
            LlInstr::Jump { target, cond: None } => write!(f, "  jump {target}"),
            LlInstr::Jump {
                target,
                cond: Some(cond),
            } => write!(f, "  jump {target} if {cond}"),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct LlFunction {
    pub name: String,
    pub instrs: Vec<LlInstr>,
}

impl LlFunction {
    pub fn new(name: impl Into<String>, instrs: Vec<LlInstr>) -> Self {
        LlFunction {
            name: name.into(),
            instrs,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct LlModule {
    pub name: String,
    pub functions: Vec<LlFunction>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct LlProgram {
    pub source_file: String,
    pub modules: Vec<LlModule>,
    /// Every function as `label(name)` + instructions, concatenated.
    pub stream: Vec<LlInstr>,
}

impl LlProgram {
    /// Build a program from its modules, deriving the flattened stream.
    pub fn new(source_file: impl Into<String>, modules: Vec<LlModule>) -> Self {
        let stream = flatten(&modules);
        LlProgram {
            source_file: source_file.into(),
            modules,
            stream,
        }
    }

    /// All functions across all modules, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &LlFunction> {
        self.modules.iter().flat_map(|m| m.functions.iter())
    }

    /// Rebuild with every function passed through `f`; the stream is
    /// re-derived from the result.
    #[must_use]
    pub fn map_functions(&self, mut f: impl FnMut(&LlFunction) -> LlFunction) -> LlProgram {
        let modules = self
            .modules
            .iter()
            .map(|module| LlModule {
                name: module.name.clone(),
                functions: module.functions.iter().map(&mut f).collect(),
            })
            .collect();
        LlProgram::new(self.source_file.clone(), modules)
    }
}

/// Concatenate every function as `label(name); <instrs>`.
fn flatten(modules: &[LlModule]) -> Vec<LlInstr> {
    let len = modules
        .iter()
        .flat_map(|m| m.functions.iter())
        .map(|f| f.instrs.len() + 1)
        .sum();
    let mut stream = Vec::with_capacity(len);
    for function in modules.iter().flat_map(|m| m.functions.iter()) {
        stream.push(LlInstr::label(function.name.clone()));
        stream.extend(function.instrs.iter().cloned());
    }
    stream
}

impl fmt::Display for LlProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.stream {
            writeln!(f, "{instr}")?;
        }
        Ok(())
    }
}
