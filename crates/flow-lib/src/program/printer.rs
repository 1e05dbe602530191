//! S-expression dump of a lowered program.

use std::fmt::Write;

use super::{Build, DimSpec, Expr, FlowDef, Program, Stmt, VarKind};

pub struct ProgramPrinter<'p> {
    program: &'p Program,
}

impl<'p> ProgramPrinter<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        for flow in &self.program.flows {
            format_flow(flow, w)?;
        }
        for build in &self.program.builds {
            format_build(build, w)?;
        }
        Ok(())
    }
}

fn format_flow(flow: &FlowDef, w: &mut impl Write) -> std::fmt::Result {
    write!(w, "flow {}", flow.name)?;
    if !flow.symbols.is_empty() {
        let names: Vec<_> = flow.symbols.iter().map(|s| s.name.as_str()).collect();
        write!(w, " ({})", names.join(", "))?;
    }
    if !flow.args.is_empty() {
        let names: Vec<_> = flow.args.iter().map(|a| a.name.as_str()).collect();
        write!(w, " [{}]", names.join(", "))?;
    }
    writeln!(w)?;

    for stmt in &flow.body {
        w.write_str("  ")?;
        match stmt {
            Stmt::Assign { target, value, .. } => {
                format_expr(target, w)?;
                w.write_str(" = ")?;
                format_expr(value, w)?;
            }
            Stmt::Let(l) => {
                let handles: Vec<_> = l.handles.iter().map(|h| h.name.as_str()).collect();
                write!(w, "let {} {}", l.flow.name, handles.join(", "))?;
                if !l.init.is_empty() {
                    w.write_str(" [")?;
                    format_list(&l.init, w)?;
                    w.write_char(']')?;
                }
            }
            Stmt::Return { value, .. } => {
                w.write_str("return ")?;
                format_expr(value, w)?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

fn format_build(build: &Build, w: &mut impl Write) -> std::fmt::Result {
    writeln!(w, "build {} of {}", build.name.name, build.flow.name)?;
    for spec in &build.specs {
        let dims: Vec<_> = spec
            .dims
            .iter()
            .map(|d| match d {
                DimSpec::Known(n) => n.to_string(),
                DimSpec::Named(name) => name.clone(),
            })
            .collect();
        writeln!(w, "  {} => [{}]", spec.param.name, dims.join(", "))?;
    }
    Ok(())
}

fn format_list(exprs: &[Expr], w: &mut impl Write) -> std::fmt::Result {
    for (i, e) in exprs.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        format_expr(e, w)?;
    }
    Ok(())
}

fn format_expr(expr: &Expr, w: &mut impl Write) -> std::fmt::Result {
    match expr {
        Expr::Var(v) => match v.kind {
            VarKind::Free => write!(w, "{}", v.name),
            VarKind::Symbol => write!(w, "{}:sym", v.name),
            VarKind::Arg => write!(w, "{}:arg", v.name),
        },
        Expr::Num { value, .. } => write!(w, "{value}"),
        Expr::Binary { op, lhs, rhs, .. } => {
            write!(w, "({} ", op.symbol())?;
            format_expr(lhs, w)?;
            w.write_char(' ')?;
            format_expr(rhs, w)?;
            w.write_char(')')
        }
        Expr::Neg { operand, .. } => {
            w.write_str("(neg ")?;
            format_expr(operand, w)?;
            w.write_char(')')
        }
        Expr::Attr { base, attr, .. } => {
            w.write_str("(. ")?;
            format_expr(base, w)?;
            w.write_char(' ')?;
            format_expr(attr, w)?;
            w.write_char(')')
        }
        Expr::Call(call) => {
            write!(w, "(call {}", call.name)?;
            for arg in &call.args {
                w.write_char(' ')?;
                format_expr(arg, w)?;
            }
            w.write_char(')')
        }
        Expr::Tuple { elements, .. } => {
            w.write_str("(tuple ")?;
            format_list(elements, w)?;
            w.write_char(')')
        }
    }
}
