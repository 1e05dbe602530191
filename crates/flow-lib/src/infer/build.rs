//! Build-driven inference.
//!
//! A build binds concrete shapes to the parameters of its target flow and runs
//! the full pipeline: lengths, seeding, shapes, bake.

use std::collections::HashMap;

use super::context::Context;
use super::error::{InferError, InferErrorKind};
use super::lengths::LengthPass;
use super::shape::{Axis, Shape};
use super::shapes::ShapePass;
use super::table::{DimVar, Tables};
use crate::program::{Build, DimSpec, Program};
use crate::resolve::SubflowTables;

#[tracing::instrument(skip_all, fields(build = %build.name.name))]
pub fn infer_build(
    program: &Program,
    subflows: &SubflowTables,
    build: &Build,
) -> Result<Context, InferError> {
    let Some(flow_id) = program.find_flow(&build.flow.name) else {
        return Err(InferError::new(
            InferErrorKind::UnknownFlow(build.flow.name.clone()),
            build.flow.range,
        ));
    };
    let flow = program.flow(flow_id);

    let mut tables = Tables::new();
    let mut ctx = Context::new(flow_id);
    let mut named: HashMap<&str, DimVar> = HashMap::new();
    let mut declared: Vec<(&str, Shape)> = Vec::with_capacity(build.specs.len());

    for spec in &build.specs {
        let name = spec.param.name.as_str();
        if !flow.is_parameter(name) {
            return Err(InferError::new(
                InferErrorKind::UnknownParameter(name.to_string()),
                spec.param.range,
            ));
        }
        if ctx.lookup(name).is_some() {
            return Err(InferError::new(
                InferErrorKind::DuplicateShapeSpec(name.to_string()),
                spec.param.range,
            ));
        }
        let dims = spec
            .dims
            .iter()
            .map(|dim| match dim {
                DimSpec::Known(n) => Axis::Known(*n),
                DimSpec::Named(axis) => Axis::Var(
                    *named
                        .entry(axis.as_str())
                        .or_insert_with(|| tables.define_dimension()),
                ),
            })
            .collect();
        let shape = Shape::from_axes(dims);
        ctx.bind(name, Some(shape.clone()));
        declared.push((name, shape));
    }

    LengthPass::new(program, subflows, &mut tables).run(&mut ctx)?;
    ctx.seed_shapes(&mut tables, program)?;
    // The length pass rebinds reassigned parameters; the shape pass starts from the declared axes
    for (name, shape) in declared {
        ctx.bind(name, Some(shape));
    }
    ShapePass::new(program, &mut tables).run(&mut ctx)?;
    ctx.bake(&tables);

    tracing::debug!(
        flow = %flow.name,
        dimensions = tables.dimensions().len(),
        ranks = tables.shape_lengths().len(),
        "build inferred"
    );
    Ok(ctx)
}
