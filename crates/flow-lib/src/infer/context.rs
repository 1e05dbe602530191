//! Inference scopes.
//!
//! A `Context` holds the bindings of one flow invocation. Call sites inside the
//! flow own their callee's context, keyed by `CallId`, so the shape pass finds
//! exactly the sub-context the length pass built. The variable tables live
//! outside the tree and are passed into every operation.

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::error::{InferError, InferErrorKind};
use super::shape::{Axis, Rank, Shape};
use super::table::Tables;
use crate::program::{CallId, FlowDef, FlowId, Program};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Shape(Shape),
    /// Bound to a scalar literal or another value without rank.
    Unconstrained,
}

impl Binding {
    pub fn shape(&self) -> Option<&Shape> {
        match self {
            Binding::Shape(s) => Some(s),
            Binding::Unconstrained => None,
        }
    }
}

impl From<Option<Shape>> for Binding {
    fn from(shape: Option<Shape>) -> Self {
        shape.map_or(Binding::Unconstrained, Binding::Shape)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    flow: FlowId,
    bindings: IndexMap<String, Binding>,
    calls: IndexMap<CallId, Context>,
    output: Option<Shape>,
}

impl Context {
    pub fn new(flow: FlowId) -> Self {
        Self {
            flow,
            bindings: IndexMap::new(),
            calls: IndexMap::new(),
            output: None,
        }
    }

    pub fn flow(&self) -> FlowId {
        self.flow
    }

    pub fn bind(&mut self, name: &str, shape: Option<Shape>) {
        self.bindings.insert(name.to_string(), shape.into());
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn shape_of(&self, name: &str) -> Option<&Shape> {
        self.lookup(name).and_then(Binding::shape)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shape of the flow's return value.
    pub fn output(&self) -> Option<&Shape> {
        self.output.as_ref()
    }

    pub(super) fn set_output(&mut self, shape: Option<Shape>) {
        self.output = shape;
    }

    pub fn call(&self, id: CallId) -> Option<&Context> {
        self.calls.get(&id)
    }

    pub(super) fn call_mut(&mut self, id: CallId) -> Option<&mut Context> {
        self.calls.get_mut(&id)
    }

    pub fn calls(&self) -> impl Iterator<Item = (CallId, &Context)> {
        self.calls.iter().map(|(id, ctx)| (*id, ctx))
    }

    /// Creates the context for a call site and stores it under the call's id.
    ///
    /// Rank parameters of the callee are bound positionally to the argument
    /// shapes. Argument count is not validated here.
    pub fn subcontext(
        &mut self,
        call: CallId,
        callee: FlowId,
        def: &FlowDef,
        args: Vec<Option<Shape>>,
    ) -> &mut Context {
        let mut sub = Context::new(callee);
        for (symbol, shape) in def.symbols.iter().zip(args) {
            sub.bind(&symbol.name, shape);
        }
        match self.calls.entry(call) {
            Entry::Occupied(mut e) => {
                e.insert(sub);
                e.into_mut()
            }
            Entry::Vacant(e) => e.insert(sub),
        }
    }

    /// Gives every shape without axes as many fresh dimensions as its resolved rank.
    ///
    /// Fails when a rank is still unresolved.
    pub fn seed_shapes(&mut self, tables: &mut Tables, program: &Program) -> Result<(), InferError> {
        let flow = program.flow(self.flow);
        for (name, binding) in &mut self.bindings {
            if let Binding::Shape(shape) = binding {
                seed(shape, tables, name, flow)?;
            }
        }
        if let Some(shape) = &mut self.output {
            seed(shape, tables, "return", flow)?;
        }
        for sub in self.calls.values_mut() {
            sub.seed_shapes(tables, program)?;
        }
        Ok(())
    }

    /// Replaces every axis and length by its resolution. Idempotent.
    pub fn bake(&mut self, tables: &Tables) {
        for binding in self.bindings.values_mut() {
            if let Binding::Shape(shape) = binding {
                bake(shape, tables);
            }
        }
        if let Some(shape) = &mut self.output {
            bake(shape, tables);
        }
        for sub in self.calls.values_mut() {
            sub.bake(tables);
        }
    }
}

fn seed(shape: &mut Shape, tables: &mut Tables, name: &str, flow: &FlowDef) -> Result<(), InferError> {
    if shape.is_seeded() {
        return Ok(());
    }
    let Rank::Known(n) = tables.resolve_rank(shape.length) else {
        let kind = InferErrorKind::UnresolvedRank {
            name: name.to_string(),
            flow: flow.name.clone(),
        };
        return Err(InferError::new(kind, flow.name_range));
    };
    shape.length = Rank::Known(n);
    if shape.dims.len() != n {
        shape.dims = (0..n).map(|_| Axis::Var(tables.define_dimension())).collect();
    }
    tracing::trace!(flow = %flow.name, name, rank = n, "seeded");
    Ok(())
}

fn bake(shape: &mut Shape, tables: &Tables) {
    shape.length = tables.resolve_rank(shape.length);
    for axis in &mut shape.dims {
        *axis = tables.resolve_axis(*axis);
    }
}
