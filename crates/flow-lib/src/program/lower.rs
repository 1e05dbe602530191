//! CST to program model.
//!
//! Lowering is total over well-formed trees. Pieces missing because of parse
//! errors are dropped silently; the parser has already reported them.

use std::collections::HashMap;

use rowan::TextRange;

use super::{
    BinaryOp, Build, Call, CallId, DimSpec, Expr, FlowDef, Ident, LetStmt, Number, Program,
    ShapeSpec, Stmt, Var, VarKind,
};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast;
use crate::parser::cst::{SyntaxKind, SyntaxToken};

/// Converts the typed CST into an owned `Program`.
#[tracing::instrument(skip_all)]
pub fn lower(root: &ast::Root) -> (Program, Diagnostics) {
    let mut lowering = Lowering::default();
    let mut program = Program::default();

    for node in root.as_cst().children() {
        if let Some(flow) = ast::FlowDef::cast(node.clone()) {
            if let Some(flow) = lowering.flow(&flow) {
                program.flows.push(flow);
            }
        } else if let Some(build) = ast::BuildDef::cast(node)
            && let Some(build) = lowering.build(&build)
        {
            program.builds.push(build);
        }
    }

    tracing::debug!(
        flows = program.flows.len(),
        builds = program.builds.len(),
        calls = lowering.next_call,
        "lowered program"
    );
    (program, lowering.diag)
}

#[derive(Default)]
struct Lowering {
    diag: Diagnostics,
    next_call: u32,
    declared: HashMap<String, TextRange>,
}

fn ident(token: &SyntaxToken) -> Ident {
    Ident {
        name: token.text().to_string(),
        range: token.text_range(),
    }
}

impl Lowering {
    fn flow(&mut self, flow: &ast::FlowDef) -> Option<FlowDef> {
        let name = ident(&flow.name()?);

        if let Some(previous) = self.declared.insert(name.name.clone(), name.range) {
            self.diag
                .report(DiagnosticKind::ShadowedFlow, name.range)
                .message(&name.name)
                .related_to("previously declared here", previous)
                .emit();
        }

        let symbols = flow
            .symbols()
            .map(|list| list.names().map(|t| ident(&t)).collect())
            .unwrap_or_default();
        let args = flow
            .args()
            .map(|list| list.names().map(|t| ident(&t)).collect())
            .unwrap_or_default();
        let body = flow
            .body()
            .map(|body| body.stmts().filter_map(|s| self.stmt(&s)).collect())
            .unwrap_or_default();

        Some(FlowDef {
            name: name.name,
            name_range: name.range,
            range: flow.as_cst().text_range(),
            symbols,
            args,
            body,
        })
    }

    fn stmt(&mut self, stmt: &ast::Stmt) -> Option<Stmt> {
        let range = stmt.as_cst().text_range();
        match stmt {
            ast::Stmt::Let(l) => {
                let flow = ident(&l.flow_name()?);
                let handles: Vec<_> = l.handles().map(|t| ident(&t)).collect();
                if handles.is_empty() {
                    return None;
                }
                let init = l
                    .init()
                    .map(|init| init.exprs().filter_map(|e| self.expr(&e)).collect())
                    .unwrap_or_default();
                Some(Stmt::Let(LetStmt {
                    flow,
                    handles,
                    init,
                    range,
                }))
            }
            ast::Stmt::Assign(a) => {
                let target = self.expr(&a.target()?)?;
                let value = self.expr(&a.value()?)?;
                Some(Stmt::Assign {
                    target,
                    value,
                    range,
                })
            }
            ast::Stmt::Return(r) => {
                let value = self.expr(&r.value()?)?;
                Some(Stmt::Return { value, range })
            }
        }
    }

    fn expr(&mut self, expr: &ast::Expr) -> Option<Expr> {
        let range = expr.as_cst().text_range();
        let lowered = match expr {
            ast::Expr::Name(n) => {
                let token = n.token()?;
                Expr::Var(Var {
                    name: token.text().to_string(),
                    kind: VarKind::Free,
                    range,
                })
            }
            ast::Expr::Literal(l) => Expr::Num {
                value: self.number(&l.token()?)?,
                range,
            },
            ast::Expr::Binary(b) => {
                let op = binary_op(b.op()?.kind())?;
                let lhs = self.expr(&b.lhs()?)?;
                let rhs = self.expr(&b.rhs()?)?;
                Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    range,
                }
            }
            ast::Expr::Neg(n) => Expr::Neg {
                operand: Box::new(self.expr(&n.operand()?)?),
                range,
            },
            ast::Expr::Attr(a) => {
                let base = self.expr(&a.base()?)?;
                let attr = self.expr(&a.member()?)?;
                Expr::Attr {
                    base: Box::new(base),
                    attr: Box::new(attr),
                    range,
                }
            }
            ast::Expr::Call(c) => {
                let name = ident(&c.name()?);
                let args: Vec<_> = c.args().filter_map(|e| self.expr(&e)).collect();
                let id = CallId::from_raw(self.next_call);
                self.next_call += 1;
                Expr::Call(Call {
                    name: name.name,
                    name_range: name.range,
                    args,
                    id,
                    range,
                })
            }
            ast::Expr::Paren(p) => self.expr(&p.inner()?)?,
            ast::Expr::Tuple(t) => Expr::Tuple {
                elements: t.elements().filter_map(|e| self.expr(&e)).collect(),
                range,
            },
        };
        Some(lowered)
    }

    fn number(&mut self, token: &SyntaxToken) -> Option<Number> {
        let text = token.text();
        let is_float = text.contains(['.', 'e', 'E']);
        let parsed = if is_float {
            text.parse::<f64>().ok().map(Number::Float)
        } else {
            text.parse::<i64>().ok().map(Number::Int)
        };
        if parsed.is_none() {
            self.diag
                .report(DiagnosticKind::InvalidNumber, token.text_range())
                .message(format!("`{text}` does not fit in 64 bits"))
                .emit();
        }
        parsed
    }

    fn build(&mut self, build: &ast::BuildDef) -> Option<Build> {
        let flow = ident(&build.flow_name()?);
        let name = ident(&build.name()?);
        let specs = build.specs().filter_map(|s| self.shape_spec(&s)).collect();
        Some(Build {
            name,
            flow,
            specs,
            range: build.as_cst().text_range(),
        })
    }

    fn shape_spec(&mut self, spec: &ast::ShapeSpec) -> Option<ShapeSpec> {
        let param = ident(&spec.name()?);
        let dims = spec
            .dims()?
            .items()
            .filter_map(|item| self.dim(&item))
            .collect();
        Some(ShapeSpec {
            param,
            dims,
            range: spec.as_cst().text_range(),
        })
    }

    fn dim(&mut self, item: &ast::Expr) -> Option<DimSpec> {
        match item {
            ast::Expr::Name(n) => Some(DimSpec::Named(n.token()?.text().to_string())),
            ast::Expr::Literal(l) => {
                let token = l.token()?;
                let text = token.text();
                if text.contains(['.', 'e', 'E']) {
                    self.diag
                        .report(DiagnosticKind::InvalidDimension, token.text_range())
                        .message("axis sizes are whole numbers")
                        .emit();
                    return None;
                }
                match text.parse::<usize>() {
                    Ok(n) => Some(DimSpec::Known(n)),
                    Err(_) => {
                        self.diag
                            .report(DiagnosticKind::InvalidNumber, token.text_range())
                            .message(format!("`{text}` is too large for an axis size"))
                            .emit();
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    let op = match kind {
        SyntaxKind::Plus => BinaryOp::Add,
        SyntaxKind::Minus => BinaryOp::Sub,
        SyntaxKind::Star => BinaryOp::Mul,
        SyntaxKind::Slash => BinaryOp::Div,
        SyntaxKind::Caret => BinaryOp::Pow,
        SyntaxKind::At => BinaryOp::MatMul,
        _ => return None,
    };
    Some(op)
}
