//! Semantic checker.
//!
//! Validates what inference takes for granted: scoping, attribute names,
//! call targets and their arity, single-valued returns and assignment targets.
//! Statements are walked top to bottom; an assignment's target enters scope
//! only after its value has been checked.

mod error;


pub use error::{CheckError, CheckErrorKind};

use std::collections::HashSet;

use crate::infer::Attribute;
use crate::program::{Expr, FlowId, Program, Stmt, VarKind};
use crate::resolve::SubflowTables;

/// Checks `root` and every flow it reaches through `let`, each once.
#[tracing::instrument(skip_all, fields(flow = %program.flow(root).name))]
pub fn check_flow(
    program: &Program,
    subflows: &SubflowTables,
    root: FlowId,
) -> Result<(), CheckError> {
    Checker {
        program,
        subflows,
        visited: HashSet::new(),
    }
    .flow(root)
}

struct Checker<'a> {
    program: &'a Program,
    subflows: &'a SubflowTables,
    visited: HashSet<FlowId>,
}

/// Position of the walk inside one flow.
struct Scope<'a> {
    flow: FlowId,
    stmt: usize,
    names: HashSet<&'a str>,
}

impl<'a> Scope<'a> {
    fn error(&self, kind: CheckErrorKind, range: rowan::TextRange) -> CheckError {
        CheckError {
            kind,
            range,
            flow: self.flow,
            handle: None,
        }
    }
}

impl<'a> Checker<'a> {
    fn flow(&mut self, id: FlowId) -> Result<(), CheckError> {
        if !self.visited.insert(id) {
            return Ok(());
        }
        let flow = self.program.flow(id);
        let names = flow
            .symbols
            .iter()
            .chain(&flow.args)
            .map(|p| p.name.as_str())
            .collect();
        let mut scope = Scope {
            flow: id,
            stmt: 0,
            names,
        };

        for (i, stmt) in flow.body.iter().enumerate() {
            scope.stmt = i;
            self.stmt(&mut scope, stmt)?;
        }
        tracing::trace!(flow = %flow.name, "checked");
        Ok(())
    }

    fn stmt(&mut self, scope: &mut Scope<'a>, stmt: &'a Stmt) -> Result<(), CheckError> {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                self.expr(scope, value)?;
                match target {
                    Expr::Var(v) if v.kind != VarKind::Arg => {
                        scope.names.insert(&v.name);
                    }
                    Expr::Var(v) => {
                        let detail = format!("`{}` is a scalar parameter", v.name);
                        return Err(scope.error(CheckErrorKind::InvalidAssignment(detail), v.range));
                    }
                    other => {
                        let detail = "expected a variable".to_string();
                        return Err(
                            scope.error(CheckErrorKind::InvalidAssignment(detail), other.range())
                        );
                    }
                }
            }
            Stmt::Let(l) => {
                for e in &l.init {
                    self.expr(scope, e)?;
                }
                if self.program.find_flow(&l.flow.name).is_none() {
                    return Err(scope.error(
                        CheckErrorKind::UnknownFlow(l.flow.name.clone()),
                        l.flow.range,
                    ));
                }
            }
            Stmt::Return { value, .. } => {
                if let Expr::Tuple { elements, range } = value {
                    return Err(scope.error(CheckErrorKind::MultiValueReturn(elements.len()), *range));
                }
                self.expr(scope, value)?;
            }
        }
        Ok(())
    }

    fn expr(&mut self, scope: &mut Scope<'a>, expr: &'a Expr) -> Result<(), CheckError> {
        match expr {
            Expr::Var(v) => {
                if !scope.names.contains(v.name.as_str()) {
                    return Err(scope.error(
                        CheckErrorKind::UnknownIdentifier(v.name.clone()),
                        v.range,
                    ));
                }
            }
            Expr::Num { .. } => {}
            Expr::Binary { lhs, rhs, .. } => {
                self.expr(scope, lhs)?;
                self.expr(scope, rhs)?;
            }
            Expr::Neg { operand, .. } => self.expr(scope, operand)?,
            Expr::Attr { base, attr, .. } => {
                self.expr(scope, base)?;
                let name = match attr.as_ref() {
                    Expr::Var(v) => &v.name,
                    Expr::Call(c) => &c.name,
                    other => {
                        return Err(scope.error(CheckErrorKind::InvalidAttribute, other.range()));
                    }
                };
                if Attribute::from_name(name).is_none() {
                    return Err(scope.error(
                        CheckErrorKind::UnknownAttribute(name.clone()),
                        attr.range(),
                    ));
                }
            }
            Expr::Call(call) => {
                let entry = self.subflows.of(scope.flow).lookup(&call.name, scope.stmt);
                let Some((callee, handle_range)) =
                    entry.and_then(|entry| Some((entry.flow?, entry.handle_range)))
                else {
                    return Err(scope.error(
                        CheckErrorKind::UnknownSubFlow(call.name.clone()),
                        call.name_range,
                    ));
                };
                for arg in &call.args {
                    self.expr(scope, arg)?;
                }
                let expected = self.program.flow(callee).symbols.len();
                if call.args.len() != expected {
                    let kind = CheckErrorKind::ArityMismatch {
                        handle: call.name.clone(),
                        expected,
                        found: call.args.len(),
                    };
                    let mut err = scope.error(kind, call.range);
                    err.handle = Some(handle_range);
                    return Err(err);
                }
                self.flow(callee)?;
            }
            Expr::Tuple { elements, .. } => {
                for e in elements {
                    self.expr(scope, e)?;
                }
            }
        }
        Ok(())
    }
}
