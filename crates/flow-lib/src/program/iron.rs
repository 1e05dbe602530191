//! Identifier classification ("ironing").
//!
//! After this pass every `Var` in a flow body knows whether it names a declared
//! rank parameter, a declared scalar parameter, or a free variable.
//! Inference relies on this and does not re-check it.

use super::{Expr, FlowDef, Program, Stmt, VarKind};

#[tracing::instrument(skip_all)]
pub fn iron(program: &mut Program) {
    for flow in &mut program.flows {
        iron_flow(flow);
    }
}

fn iron_flow(flow: &mut FlowDef) {
    let mut body = std::mem::take(&mut flow.body);
    let classify = |name: &str| {
        if flow.symbol_index(name).is_some() {
            VarKind::Symbol
        } else if flow.arg_index(name).is_some() {
            VarKind::Arg
        } else {
            VarKind::Free
        }
    };

    for stmt in &mut body {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                iron_expr(target, &classify);
                iron_expr(value, &classify);
            }
            Stmt::Let(l) => {
                for e in &mut l.init {
                    iron_expr(e, &classify);
                }
            }
            Stmt::Return { value, .. } => iron_expr(value, &classify),
        }
    }
    flow.body = body;
}

fn iron_expr(expr: &mut Expr, classify: &impl Fn(&str) -> VarKind) {
    match expr {
        Expr::Var(v) => v.kind = classify(&v.name),
        Expr::Num { .. } => {}
        Expr::Binary { lhs, rhs, .. } => {
            iron_expr(lhs, classify);
            iron_expr(rhs, classify);
        }
        Expr::Neg { operand, .. } => iron_expr(operand, classify),
        Expr::Attr { base, attr, .. } => {
            iron_expr(base, classify);
            iron_expr(attr, classify);
        }
        Expr::Call(call) => {
            for arg in &mut call.args {
                iron_expr(arg, classify);
            }
        }
        Expr::Tuple { elements, .. } => {
            for e in elements {
                iron_expr(e, classify);
            }
        }
    }
}
