use indoc::indoc;

use super::*;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::parse;

fn lowered(source: &str) -> (Program, Diagnostics) {
    let (parse, diagnostics) = parse(source).expect("no fuel limits set");
    assert!(
        !diagnostics.has_errors(),
        "unexpected parse errors:\n{}",
        diagnostics.render(source)
    );
    lower(&parse.root())
}

fn dump(source: &str) -> String {
    let (program, diagnostics) = lowered(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics");
    ProgramPrinter::new(&program).dump()
}

#[test]
fn expressions() {
    let input = indoc! {r#"
    flow f(x)[y] { z = x + y * 2; return -z.T(0, 1); }
    "#};

    insta::assert_snapshot!(dump(input), @r"
    flow f (x) [y]
      z = (+ x (* y 2))
      return (neg (. z (call T 0 1)))
    ");
}

#[test]
fn parentheses_are_dropped() {
    let input = indoc! {r#"
    flow f { a = (b + c) * d; return (a, b); }
    "#};

    insta::assert_snapshot!(dump(input), @r"
    flow f
      a = (* (+ b c) d)
      return (tuple a, b)
    ");
}

#[test]
fn let_statements() {
    let input = indoc! {r#"
    flow g { let f h, k [1, 2.5]; return h(x); }
    "#};

    insta::assert_snapshot!(dump(input), @r"
    flow g
      let f h, k [1, 2.5]
      return (call h x)
    ");
}

#[test]
fn builds() {
    let input = indoc! {r#"
    build f main { x => [3, N]; y => 4; }
    "#};

    insta::assert_snapshot!(dump(input), @r"
    build main of f
      x => [3, N]
      y => [4]
    ");
}

#[test]
fn numbers_are_typed() {
    let (program, _) = lowered("flow f { a = 7; b = 1e3; }");
    let values: Vec<_> = program.flows[0]
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Assign {
                value: Expr::Num { value, .. },
                ..
            } => Some(*value),
            _ => None,
        })
        .collect();

    assert_eq!(values, [Number::Int(7), Number::Float(1000.0)]);
}

#[test]
fn call_ids_are_program_unique() {
    let input = indoc! {r#"
    flow a { return f(x) + f(y); }
    flow b { return g(z); }
    "#};
    let (program, _) = lowered(input);

    let mut ids = Vec::new();
    for flow in &program.flows {
        match flow.return_stmt() {
            Some(Expr::Binary { lhs, rhs, .. }) => {
                for side in [lhs, rhs] {
                    if let Expr::Call(call) = side.as_ref() {
                        ids.push(call.id.as_u32());
                    }
                }
            }
            Some(Expr::Call(call)) => ids.push(call.id.as_u32()),
            _ => {}
        }
    }

    assert_eq!(ids, [0, 1, 2]);
}

#[test]
fn return_stmt_is_last_return() {
    let (program, _) = lowered("flow f { return a; return b; }");

    let Some(Expr::Var(var)) = program.flows[0].return_stmt() else {
        panic!("expected a variable");
    };
    assert_eq!(var.name, "b");
}

#[test]
fn integer_overflow() {
    let source = "flow f { return 99999999999999999999; }";
    let (program, diagnostics) = lowered(source);

    assert!(program.flows[0].body.is_empty());
    insta::assert_snapshot!(
        diagnostics.printer(source).render_plain(),
        @"error at 16..36: invalid number: `99999999999999999999` does not fit in 64 bits"
    );
}

#[test]
fn fractional_dimension() {
    let source = "build f m { x => [2.5]; }";
    let (program, diagnostics) = lowered(source);

    assert!(program.builds[0].specs[0].dims.is_empty());
    insta::assert_snapshot!(
        diagnostics.printer(source).render_plain(),
        @"error at 18..21: invalid dimension: axis sizes are whole numbers"
    );
}

#[test]
fn shadowed_flow_warns() {
    let source = "flow f { }\nflow f { }";
    let (program, diagnostics) = lowered(source);

    assert!(!diagnostics.has_errors());
    assert_eq!(
        diagnostics.kinds().collect::<Vec<_>>(),
        [DiagnosticKind::ShadowedFlow]
    );
    insta::assert_snapshot!(
        diagnostics.printer(source).render_plain(),
        @"warning at 16..17: flow `f` shadows an earlier declaration (related: previously declared here at 5..6)"
    );
    assert_eq!(program.find_flow("f"), Some(FlowId::from_raw(1)));
    assert_eq!(program.find_flow("g"), None);
}
