//! High-level IR: the source-shaped statement tree produced by a frontend.
//!
//! One [`HlProgram`] per compilation unit. Functions keep structured control
//! flow (`if`/`while`/nested blocks); expressions are pure trees. Each
//! function declares the capability tier it needs and, optionally, the
//! extension that can grant that tier instead.

use std::fmt;

use crate::capability::CapabilityTier;

/// Binary operator with its printed source symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// `/`
    Div,
    /// `div` (integer division spelled as a keyword)
    IntDiv,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::IntDiv => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    /// Whether the operator is integer arithmetic (candidate for folding).
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::Div
                | BinaryOp::IntDiv
                | BinaryOp::Mod
        )
    }

    /// Inverse of [`symbol`](Self::symbol).
    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        let op = match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "div" => BinaryOp::IntDiv,
            "mod" => BinaryOp::Mod,
            "=" => BinaryOp::Eq,
            "<>" => BinaryOp::NotEq,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::LtEq,
            ">" => BinaryOp::Gt,
            ">=" => BinaryOp::GtEq,
            "and" => BinaryOp::And,
            "or" => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Literal value.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for Literal {
    /// Printed value as it appears in lowered IR text. Booleans print as
    /// the bytes the target stores for them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(v) => write!(f, "{v}"),
            Literal::Bool(true) => f.write_str("1"),
            Literal::Bool(false) => f.write_str("0"),
            Literal::Str(s) => f.write_str(s),
        }
    }
}

/// Expression tree.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn int(value: i64) -> Expr {
        Expr::Literal(Literal::Int(value))
    }

    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }
}

/// Statement.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Stmt {
    Assign {
        target: String,
        value: Expr,
    },
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// Expression evaluated for its effect (only calls have one).
    Expr(Expr),
    Block(Vec<Stmt>),
}

impl Stmt {
    pub fn assign(target: impl Into<String>, value: Expr) -> Stmt {
        Stmt::Assign {
            target: target.into(),
            value,
        }
    }
}

/// Function with its capability requirement.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct HlFunction {
    pub name: String,
    pub body: Vec<Stmt>,
    pub required_tier: CapabilityTier,
    pub required_extension: Option<String>,
}

impl HlFunction {
    /// Function that needs only the baseline tier.
    pub fn new(name: impl Into<String>, body: Vec<Stmt>) -> Self {
        HlFunction {
            name: name.into(),
            body,
            required_tier: CapabilityTier::L1,
            required_extension: None,
        }
    }

    #[must_use]
    pub fn requires(mut self, tier: CapabilityTier, extension: Option<&str>) -> Self {
        self.required_tier = tier;
        self.required_extension = extension.map(str::to_string);
        self
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct HlModule {
    pub name: String,
    pub functions: Vec<HlFunction>,
}

/// Named compile-time constant (`const LIMIT = 10;`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct HlConstant {
    pub name: String,
    pub value: Literal,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct HlProgram {
    pub source_file: String,
    pub constants: Vec<HlConstant>,
    pub modules: Vec<HlModule>,
}

impl HlProgram {
    /// All functions across all modules, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &HlFunction> {
        self.modules.iter().flat_map(|m| m.functions.iter())
    }

    /// Value of the constant named `name`, if declared.
    pub fn constant(&self, name: &str) -> Option<&Literal> {
        self.constants
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.value)
    }
}

// Textual dump

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Str(s)) => write!(f, "'{s}'"),
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Ident(name) => f.write_str(name),
            Expr::Binary { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Call { callee, args } => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_stmts(f: &mut fmt::Formatter<'_>, stmts: &[Stmt], depth: usize) -> fmt::Result {
    for stmt in stmts {
        write_stmt(f, stmt, depth)?;
    }
    Ok(())
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    let pad = "  ".repeat(depth);
    match stmt {
        Stmt::Assign { target, value } => writeln!(f, "{pad}{target} := {value}"),
        Stmt::Expr(expr) => writeln!(f, "{pad}{expr}"),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            writeln!(f, "{pad}if {cond}")?;
            write_stmts(f, then_branch, depth + 1)?;
            if let Some(else_branch) = else_branch {
                writeln!(f, "{pad}else")?;
                write_stmts(f, else_branch, depth + 1)?;
            }
            writeln!(f, "{pad}end")
        }
        Stmt::While { cond, body } => {
            writeln!(f, "{pad}while {cond}")?;
            write_stmts(f, body, depth + 1)?;
            writeln!(f, "{pad}end")
        }
        Stmt::Block(stmts) => {
            writeln!(f, "{pad}block")?;
            write_stmts(f, stmts, depth + 1)?;
            writeln!(f, "{pad}end")
        }
    }
}

impl fmt::Display for HlProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for constant in &self.constants {
            writeln!(f, "const {} = {}", constant.name, constant.value)?;
        }
        for module in &self.modules {
            writeln!(f, "module {}", module.name)?;
            for function in &module.functions {
                write!(f, "  fn {} [{}", function.name, function.required_tier)?;
                if let Some(ext) = &function.required_extension {
                    write!(f, " via {ext}")?;
                }
                writeln!(f, "]")?;
                write_stmts(f, &function.body, 2)?;
            }
        }
        Ok(())
    }
}
