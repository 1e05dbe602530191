//! Text and JSON views of an inferred context.

use std::fmt::Write;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use super::context::{Binding, Context};
use crate::program::Program;

pub struct ContextPrinter<'a> {
    program: &'a Program,
    context: &'a Context,
}

impl<'a> ContextPrinter<'a> {
    pub fn new(program: &'a Program, context: &'a Context) -> Self {
        Self { program, context }
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        writeln!(w, "flow {}", self.program.flow(self.context.flow()).name)?;
        self.format_body(self.context, 1, w)
    }

    fn format_body(&self, ctx: &Context, depth: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(depth);
        for (name, binding) in ctx.bindings() {
            match binding {
                Binding::Shape(shape) => writeln!(w, "{prefix}{name}: {shape}")?,
                Binding::Unconstrained => writeln!(w, "{prefix}{name}: unconstrained")?,
            }
        }
        match ctx.output() {
            Some(output) => writeln!(w, "{prefix}return: {output}")?,
            None if self.program.flow(ctx.flow()).return_stmt().is_some() => {
                writeln!(w, "{prefix}return: unconstrained")?
            }
            None => {}
        }
        for (id, sub) in ctx.calls() {
            let callee = &self.program.flow(sub.flow()).name;
            writeln!(w, "{prefix}call #{} {callee}", id.as_u32())?;
            self.format_body(sub, depth + 1, w)?;
        }
        Ok(())
    }
}

/// Serializes a context tree with flow names resolved.
pub struct ContextView<'a> {
    pub program: &'a Program,
    pub context: &'a Context,
}

impl<'a> ContextView<'a> {
    pub fn new(program: &'a Program, context: &'a Context) -> Self {
        Self { program, context }
    }

    fn nested(&self, context: &'a Context) -> Self {
        Self {
            program: self.program,
            context,
        }
    }
}

impl Serialize for Binding {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Binding::Shape(shape) => shape.serialize(s),
            Binding::Unconstrained => s.serialize_none(),
        }
    }
}

struct Bindings<'a>(&'a Context);

impl Serialize for Bindings<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(None)?;
        for (name, binding) in self.0.bindings() {
            map.serialize_entry(name, binding)?;
        }
        map.end()
    }
}

struct Calls<'a>(&'a ContextView<'a>);

impl Serialize for Calls<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(None)?;
        for (id, sub) in self.0.context.calls() {
            map.serialize_entry(&format!("#{}", id.as_u32()), &self.0.nested(sub))?;
        }
        map.end()
    }
}

impl Serialize for ContextView<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let flow = &self.program.flow(self.context.flow()).name;
        let mut state = s.serialize_struct("Context", 4)?;
        state.serialize_field("flow", flow)?;
        state.serialize_field("bindings", &Bindings(self.context))?;
        state.serialize_field("return", &self.context.output())?;
        state.serialize_field("calls", &Calls(self))?;
        state.end()
    }
}
