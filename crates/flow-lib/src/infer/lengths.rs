//! Rank inference.
//!
//! Walks a flow body in textual order and gives every value a length. Calls are
//! inferred on demand: the callee body runs under a fresh sub-context stored
//! under the call site.
//!
//! Values carry lengths only. Axes given by a build stay on their own bindings
//! and enter the computation in the shape pass.

use super::attrs::Member;
use super::context::{Binding, Context};
use super::error::{AtRange, InferError, InferErrorKind};
use super::shape::{Rank, Shape};
use super::table::Tables;
use super::unify::consolidate_length;
use crate::program::{Call, Expr, FlowDef, FlowId, Program, Stmt};
use crate::resolve::SubflowTables;

#[derive(Debug, Clone, Copy)]
struct Frame {
    flow: FlowId,
    /// Statement being inferred; `let`s before it are visible.
    stmt: usize,
}

pub(crate) struct LengthPass<'a> {
    program: &'a Program,
    subflows: &'a SubflowTables,
    tables: &'a mut Tables,
    frames: Vec<Frame>,
}

impl<'a> LengthPass<'a> {
    pub(crate) fn new(
        program: &'a Program,
        subflows: &'a SubflowTables,
        tables: &'a mut Tables,
    ) -> Self {
        Self {
            program,
            subflows,
            tables,
            frames: Vec::new(),
        }
    }

    /// Infers the flow of `ctx` into `ctx`.
    pub(crate) fn run(&mut self, ctx: &mut Context) -> Result<(), InferError> {
        let program = self.program;
        let flow = program.flow(ctx.flow());
        self.frames.push(Frame {
            flow: ctx.flow(),
            stmt: 0,
        });
        let result = self.body(ctx, flow);
        self.frames.pop();
        result
    }

    fn body(&mut self, ctx: &mut Context, flow: &'a FlowDef) -> Result<(), InferError> {
        for (i, stmt) in flow.body.iter().enumerate() {
            if let Some(frame) = self.frames.last_mut() {
                frame.stmt = i;
            }
            self.stmt(ctx, stmt)?;
        }
        tracing::trace!(flow = %flow.name, bindings = ctx.bindings().count(), "lengths inferred");
        Ok(())
    }

    fn stmt(&mut self, ctx: &mut Context, stmt: &'a Stmt) -> Result<(), InferError> {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                let shape = self.expr(ctx, value)?;
                // Other targets are rejected by the checker.
                if let Expr::Var(v) = target {
                    ctx.bind(&v.name, shape);
                }
            }
            Stmt::Let(_) => {}
            Stmt::Return { value, range } => {
                let shape = self.expr(ctx, value)?;
                let output = match (ctx.output(), shape) {
                    (Some(previous), Some(shape)) => Some(
                        consolidate_length(self.tables, Some(previous), Some(&shape))
                            .at(*range)?,
                    ),
                    (previous, shape) => shape.or_else(|| previous.cloned()),
                };
                ctx.set_output(output);
            }
        }
        Ok(())
    }

    fn expr(&mut self, ctx: &mut Context, expr: &'a Expr) -> Result<Option<Shape>, InferError> {
        match expr {
            Expr::Var(v) => {
                if let Some(binding) = ctx.lookup(&v.name) {
                    return Ok(binding.shape().map(|s| Shape::with_rank(s.length)));
                }
                let shape = Shape::with_rank(Rank::Var(self.tables.define_shape_length()));
                ctx.bind(&v.name, Some(shape.clone()));
                Ok(Some(shape))
            }
            Expr::Num { .. } => Ok(None),
            Expr::Binary {
                lhs, rhs, range, ..
            } => {
                let l = self.expr(ctx, lhs)?;
                let r = self.expr(ctx, rhs)?;
                let shape = consolidate_length(self.tables, l.as_ref(), r.as_ref()).at(*range)?;
                for operand in [lhs, rhs] {
                    if let Expr::Var(v) = operand.as_ref()
                        && matches!(ctx.lookup(&v.name), None | Some(Binding::Unconstrained))
                    {
                        ctx.bind(&v.name, Some(shape.clone()));
                    }
                }
                Ok(Some(shape))
            }
            Expr::Neg { operand, .. } => self.expr(ctx, operand),
            Expr::Attr { base, attr, .. } => {
                let member = Member::parse(attr)?;
                let operand = self.expr(ctx, base)?;
                member.length(operand).map(Some)
            }
            Expr::Call(call) => self.call(ctx, call),
            Expr::Tuple { elements, .. } => {
                for e in elements {
                    self.expr(ctx, e)?;
                }
                Ok(None)
            }
        }
    }

    fn call(&mut self, ctx: &mut Context, call: &'a Call) -> Result<Option<Shape>, InferError> {
        let callee = self.resolve(call)?;
        let args = call
            .args
            .iter()
            .map(|arg| self.expr(ctx, arg))
            .collect::<Result<Vec<_>, _>>()?;

        let def = self.program.flow(callee);
        let sub = ctx.subcontext(call.id, callee, def, args);
        self.run(sub)?;
        Ok(sub.output().cloned())
    }

    /// The flow a call site runs, as registered by a preceding `let`.
    fn resolve(&self, call: &Call) -> Result<FlowId, InferError> {
        let unknown = || {
            InferError::new(
                InferErrorKind::UnknownSubFlow(call.name.clone()),
                call.name_range,
            )
        };
        let frame = self.frames.last().ok_or_else(unknown)?;
        let callee = self
            .subflows
            .of(frame.flow)
            .lookup(&call.name, frame.stmt)
            .and_then(|entry| entry.flow)
            .ok_or_else(unknown)?;

        if self.frames.iter().any(|f| f.flow == callee) {
            let name = self.program.flow(callee).name.clone();
            return Err(InferError::new(
                InferErrorKind::RecursiveCall(name),
                call.range,
            ));
        }
        Ok(callee)
    }
}
