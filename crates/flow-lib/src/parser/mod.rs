//! Flow source to a lossless rowan tree.
//!
//! Every parse yields a complete tree, with `Error` nodes where input was
//! skipped. Binary, attribute and call nodes are opened at a checkpoint once
//! the operator after their left operand is seen. Statements resynchronize
//! at `;`, `}` and item keywords.
//!
//! Exhausting exec or recursion fuel aborts the parse with an [`Error`](crate::Error).

pub mod ast;
pub mod cst;
pub mod lexer;
pub mod printer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod cst_tests;
#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    AssignStmt, AttrExpr, BinaryExpr, BuildDef, CallExpr, Expr, FlowDef, LetStmt, Literal,
    NameRef, Root, ShapeSpec, Stmt,
};

pub use core::Parser;
pub use lexer::lex;
pub use printer::CstPrinter;

use crate::PassResult;

/// Green tree of one source file. Syntax errors travel separately.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
    fuel_used: u32,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("tree is rooted at Root")
    }

    /// Tokens consumed; zero when no exec limit was set.
    pub fn exec_fuel_consumed(&self) -> u32 {
        self.fuel_used
    }
}

pub fn parse(source: &str) -> PassResult<Parse> {
    parse_with_parser(Parser::new(source, lex(source)))
}

pub(crate) fn parse_with_parser(mut parser: Parser) -> PassResult<Parse> {
    parser.parse_root();
    let (green, diagnostics, fuel_used) = parser.finish()?;
    Ok((Parse { green, fuel_used }, diagnostics))
}
