//! Shape and rank inference.
//!
//! Two passes over a flow body share one pair of variable tables:
//!
//! 1. The length pass gives every value a rank, creating a sub-context per call site
//! 2. `seed_shapes` gives every ranked value fresh axis variables
//! 3. The shape pass unifies axes, reusing the sub-contexts from step 1
//! 4. `bake` resolves every axis through the tables
//!
//! Standalone flows only run step 1 (then bake). Builds run all four.

mod attrs;
mod build;
mod context;
mod dump;
mod error;
mod lengths;
mod shape;
mod shapes;
mod table;
mod unify;

#[cfg(test)]
mod attrs_tests;
#[cfg(test)]
mod unify_tests;

pub use attrs::Attribute;
pub use build::infer_build;
pub use context::{Binding, Context};
pub use dump::{ContextPrinter, ContextView};
pub use error::{InferError, InferErrorKind};
pub use shape::{Axis, Rank, Shape};
pub use table::{DimVar, RankVar, Tables, Term, VarKey, VarTable};
pub use unify::{UnifyError, consolidate_length, consolidate_shape, unify_axis, unify_rank};

use crate::program::{FlowId, Program};
use crate::resolve::SubflowTables;

use lengths::LengthPass;

/// Rank inference of one flow with nothing known about its parameters.
#[tracing::instrument(skip_all, fields(flow = %program.flow(flow).name))]
pub fn infer_flow(
    program: &Program,
    subflows: &SubflowTables,
    flow: FlowId,
) -> Result<Context, InferError> {
    let mut tables = Tables::new();
    let mut ctx = Context::new(flow);
    LengthPass::new(program, subflows, &mut tables).run(&mut ctx)?;
    ctx.bake(&tables);
    tracing::debug!(ranks = tables.shape_lengths().len(), "flow inferred");
    Ok(ctx)
}
