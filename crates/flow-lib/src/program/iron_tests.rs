use indoc::indoc;

use super::*;
use crate::parser::parse;

fn ironed(source: &str) -> String {
    let (parse, diagnostics) = parse(source).expect("no fuel limits set");
    assert!(!diagnostics.has_errors(), "unexpected parse errors");
    let (mut program, _) = lower(&parse.root());
    iron(&mut program);
    ProgramPrinter::new(&program).dump()
}

#[test]
fn classifies_parameters_and_free_variables() {
    let input = indoc! {r#"
    flow f(x)[n] { y = x * n + w; return y.T; }
    "#};

    insta::assert_snapshot!(ironed(input), @r"
    flow f (x) [n]
      y = (+ (* x:sym n:arg) w)
      return (. y T)
    ");
}

#[test]
fn reaches_call_arguments_and_let_init() {
    let input = indoc! {r#"
    flow g(a)[k] { let f h [k]; return h(a, b); }
    "#};

    insta::assert_snapshot!(ironed(input), @r"
    flow g (a) [k]
      let f h [k:arg]
      return (call h a:sym b)
    ");
}

#[test]
fn reaches_attribute_operands() {
    let input = indoc! {r#"
    flow g(a) { return (a + 1).shape; }
    "#};

    insta::assert_snapshot!(ironed(input), @r"
    flow g (a)
      return (. (+ a:sym 1) shape)
    ");
}

#[test]
fn rank_parameter_wins_over_scalar_parameter() {
    let input = indoc! {r#"
    flow f(x)[x] { return x; }
    "#};

    insta::assert_snapshot!(ironed(input), @r"
    flow f (x) [x]
      return x:sym
    ");
}

#[test]
fn flows_are_classified_independently() {
    let input = indoc! {r#"
    flow f(x) { return x; }
    flow g { return x; }
    "#};

    insta::assert_snapshot!(ironed(input), @r"
    flow f (x)
      return x:sym
    flow g
      return x
    ");
}
