//! Axis inference.
//!
//! Runs after the length pass and after seeding. Same traversal, but operators
//! now merge shapes axis by axis and calls reuse the sub-context the length
//! pass stored under the call site.

use rowan::TextRange;

use super::attrs::Member;
use super::context::{Binding, Context};
use super::error::{AtRange, InferError, InferErrorKind};
use super::shape::Shape;
use super::table::Tables;
use super::unify::{UnifyError, consolidate_shape, unify_axis};
use crate::program::{BinaryOp, Call, Expr, Program, Stmt};

pub(crate) struct ShapePass<'a> {
    program: &'a Program,
    tables: &'a mut Tables,
}

impl<'a> ShapePass<'a> {
    pub(crate) fn new(program: &'a Program, tables: &'a mut Tables) -> Self {
        Self { program, tables }
    }

    pub(crate) fn run(&mut self, ctx: &mut Context) -> Result<(), InferError> {
        let program = self.program;
        let flow = program.flow(ctx.flow());
        for stmt in &flow.body {
            self.stmt(ctx, stmt)?;
        }
        tracing::trace!(flow = %flow.name, "shapes inferred");
        Ok(())
    }

    fn stmt(&mut self, ctx: &mut Context, stmt: &'a Stmt) -> Result<(), InferError> {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                let shape = self.expr(ctx, value)?;
                if let Expr::Var(v) = target {
                    ctx.bind(&v.name, shape);
                }
            }
            Stmt::Let(_) => {}
            Stmt::Return { value, range } => {
                let shape = self.expr(ctx, value)?;
                let output =
                    consolidate_shape(self.tables, ctx.output(), shape.as_ref()).at(*range)?;
                ctx.set_output(output);
            }
        }
        Ok(())
    }

    fn expr(&mut self, ctx: &mut Context, expr: &'a Expr) -> Result<Option<Shape>, InferError> {
        match expr {
            Expr::Var(v) => Ok(ctx.shape_of(&v.name).cloned()),
            Expr::Num { .. } => Ok(None),
            Expr::Binary {
                op: BinaryOp::MatMul,
                lhs,
                rhs,
                range,
            } => {
                let l = self.expr(ctx, lhs)?;
                let r = self.expr(ctx, rhs)?;
                self.matmul(l, r, *range).map(Some)
            }
            Expr::Binary {
                lhs, rhs, range, ..
            } => {
                let l = self.expr(ctx, lhs)?;
                let r = self.expr(ctx, rhs)?;
                let shape = consolidate_shape(self.tables, l.as_ref(), r.as_ref()).at(*range)?;
                for operand in [lhs, rhs] {
                    if let Expr::Var(v) = operand.as_ref()
                        && matches!(ctx.lookup(&v.name), None | Some(Binding::Unconstrained))
                    {
                        ctx.bind(&v.name, shape.clone());
                    }
                }
                Ok(shape)
            }
            Expr::Neg { operand, .. } => self.expr(ctx, operand),
            Expr::Attr { base, attr, .. } => {
                let member = Member::parse(attr)?;
                let operand = self.expr(ctx, base)?;
                member.shape(operand).map(Some)
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
        let args = call
            .args
            .iter()
            .map(|arg| self.expr(ctx, arg))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(sub) = ctx.call_mut(call.id) else {
            return Err(InferError::new(
                InferErrorKind::UninferredCall(call.name.clone()),
                call.range,
            ));
        };
        let def = self.program.flow(sub.flow());
        for ((symbol, arg), expr) in def.symbols.iter().zip(args).zip(&call.args) {
            let merged =
                consolidate_shape(self.tables, sub.shape_of(&symbol.name), arg.as_ref())
                    .at(expr.range())?;
            sub.bind(&symbol.name, merged);
        }
        self.run(sub)?;
        Ok(sub.output().cloned())
    }

    /// Batched matrix product: `[..batch, n, k] @ [..batch, k, m] -> [..batch, n, m]`.
    fn matmul(
        &mut self,
        lhs: Option<Shape>,
        rhs: Option<Shape>,
        range: TextRange,
    ) -> Result<Shape, InferError> {
        let lhs = matrix_operand(lhs, "left", range)?;
        let rhs = matrix_operand(rhs, "right", range)?;
        let (l_batch, l_mat) = lhs.dims.split_at(lhs.dims.len() - 2);
        let (r_batch, r_mat) = rhs.dims.split_at(rhs.dims.len() - 2);
        if l_batch.len() != r_batch.len() {
            let clash = UnifyError::ShapeLengthClash {
                left: lhs.dims.len(),
                right: rhs.dims.len(),
            };
            return Err(InferError::new(clash, range));
        }

        let mut dims = l_batch
            .iter()
            .zip(r_batch)
            .map(|(&a, &b)| unify_axis(self.tables, a, b))
            .collect::<Result<Vec<_>, _>>()
            .at(range)?;
        unify_axis(self.tables, l_mat[1], r_mat[0]).at(range)?;
        dims.push(self.tables.resolve_axis(l_mat[0]));
        dims.push(self.tables.resolve_axis(r_mat[1]));
        Ok(Shape::from_axes(dims))
    }
}

fn matrix_operand(shape: Option<Shape>, side: &str, range: TextRange) -> Result<Shape, InferError> {
    let detail = match shape {
        Some(s) if s.dims.len() >= 2 => return Ok(s),
        Some(s) if s.dims.len() == 1 => format!("{side} operand has 1 axis"),
        Some(s) => format!("{side} operand has {} axes", s.dims.len()),
        None => format!("{side} operand is unshaped"),
    };
    Err(InferError::new(InferErrorKind::MatMulRank(detail), range))
}
