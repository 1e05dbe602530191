//! Owned program model.
//!
//! The CST is lowered once into these sum types; every later pass works on them.
//! Every node keeps the `TextRange` it came from so diagnostics can point back at source.

mod iron;
mod lower;
mod printer;

#[cfg(test)]
mod iron_tests;
#[cfg(test)]
mod lower_tests;

pub use iron::iron;
pub use lower::lower;
pub use printer::ProgramPrinter;

use rowan::TextRange;

/// Index of a flow in `Program::flows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlowId(u32);

impl FlowId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Program-unique identity of one call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(u32);

impl CallId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub flows: Vec<FlowDef>,
    pub builds: Vec<Build>,
}

impl Program {
    pub fn flow(&self, id: FlowId) -> &FlowDef {
        &self.flows[id.index()]
    }

    pub fn flow_ids(&self) -> impl Iterator<Item = FlowId> {
        (0..self.flows.len() as u32).map(FlowId)
    }

    /// Flow lookup by name. The last declaration wins.
    pub fn find_flow(&self, name: &str) -> Option<FlowId> {
        self.flows
            .iter()
            .rposition(|f| f.name == name)
            .map(|i| FlowId(i as u32))
    }

    /// Build lookup by name. The last declaration wins.
    pub fn find_build(&self, name: &str) -> Option<&Build> {
        self.builds.iter().rev().find(|b| b.name.name == name)
    }
}

/// A declared name with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowDef {
    pub name: String,
    pub name_range: TextRange,
    pub range: TextRange,
    /// Rank parameters, `( .. )`.
    pub symbols: Vec<Ident>,
    /// Scalar parameters, `[ .. ]`.
    pub args: Vec<Ident>,
    pub body: Vec<Stmt>,
}

impl FlowDef {
    /// Value of the last `return` in the body.
    pub fn return_stmt(&self) -> Option<&Expr> {
        self.body.iter().rev().find_map(|stmt| match stmt {
            Stmt::Return { value, .. } => Some(value),
            _ => None,
        })
    }

    pub fn symbol_index(&self, name: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s.name == name)
    }

    pub fn arg_index(&self, name: &str) -> Option<usize> {
        self.args.iter().position(|a| a.name == name)
    }

    pub fn is_parameter(&self, name: &str) -> bool {
        self.symbol_index(name).is_some() || self.arg_index(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        target: Expr,
        value: Expr,
        range: TextRange,
    },
    Let(LetStmt),
    Return {
        value: Expr,
        range: TextRange,
    },
}

impl Stmt {
    pub fn range(&self) -> TextRange {
        match self {
            Stmt::Assign { range, .. } | Stmt::Return { range, .. } => *range,
            Stmt::Let(l) => l.range,
        }
    }
}

/// `let Flow a, b [init];`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub flow: Ident,
    pub handles: Vec<Ident>,
    pub init: Vec<Expr>,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarKind {
    /// Local variable, bound by its first mention.
    #[default]
    Free,
    /// Declared rank parameter.
    Symbol,
    /// Declared scalar parameter.
    Arg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    pub name: String,
    pub kind: VarKind,
    pub range: TextRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_int(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(_) => None,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    MatMul,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::MatMul => "@",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(Var),
    Num {
        value: Number,
        range: TextRange,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        range: TextRange,
    },
    Neg {
        operand: Box<Expr>,
        range: TextRange,
    },
    /// `base.attr`; the member is kept as a full expression so the checker can reject it.
    Attr {
        base: Box<Expr>,
        attr: Box<Expr>,
        range: TextRange,
    },
    Call(Call),
    Tuple {
        elements: Vec<Expr>,
        range: TextRange,
    },
}

impl Expr {
    pub fn range(&self) -> TextRange {
        match self {
            Expr::Var(v) => v.range,
            Expr::Call(c) => c.range,
            Expr::Num { range, .. }
            | Expr::Binary { range, .. }
            | Expr::Neg { range, .. }
            | Expr::Attr { range, .. }
            | Expr::Tuple { range, .. } => *range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub name_range: TextRange,
    pub args: Vec<Expr>,
    pub id: CallId,
    pub range: TextRange,
}

/// `build flow name { x => [3, N]; }`
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    pub name: Ident,
    pub flow: Ident,
    pub specs: Vec<ShapeSpec>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub param: Ident,
    pub dims: Vec<DimSpec>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimSpec {
    Known(usize),
    /// Build-local symbolic axis; equal names denote the same size.
    Named(String),
}
