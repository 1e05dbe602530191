use indoc::indoc;

use super::flow_tests::{build, build_error};
use super::*;

#[test]
fn attribute_names() {
    assert_eq!(Attribute::from_name("T"), Some(Attribute::T));
    assert_eq!(Attribute::from_name("shape"), Some(Attribute::Shape));
    assert_eq!(Attribute::from_name("t"), None);
    for attr in Attribute::ALL {
        assert_eq!(Attribute::from_name(attr.name()), Some(attr));
    }
}

#[test]
fn reductions_and_shape() {
    let input = indoc! {r#"
    flow f(x) { lo = x.min; n = x.len; s = x.shape; return s; }
    build f main { x => [2, 3, 4]; }
    "#};

    insta::assert_snapshot!(build(input, "main"), @r"
    flow f
      x: [2, 3, 4]
      lo: [1]
      n: [1]
      s: [1, 3]
      return: [1, 3]
    ");
}

#[test]
fn default_transpose_swaps_last_two() {
    let input = indoc! {r#"
    flow f(x) { return x.T; }
    build f main { x => [3, 4]; }
    "#};

    insta::assert_snapshot!(build(input, "main"), @r"
    flow f
      x: [3, 4]
      return: [4, 3]
    ");
}

#[test]
fn transpose_with_axes() {
    let input = indoc! {r#"
    flow f(x) { a = x.T(0, -1); b = x.T(0); c = x.T(-3, 1); return a; }
    build f main { x => [2, 3, 4]; }
    "#};

    insta::assert_snapshot!(build(input, "main"), @r"
    flow f
      x: [2, 3, 4]
      a: [4, 3, 2]
      b: [3, 2, 4]
      c: [3, 2, 4]
      return: [4, 3, 2]
    ");
}

#[test]
fn transpose_out_of_bounds() {
    let input = indoc! {r#"
    flow f(x) { return x.T(5); }
    build f main { x => [3, 4]; }
    "#};

    let err = build_error(input, "main");

    assert_eq!(
        err.kind,
        InferErrorKind::InvalidTranspose("axis 5 is out of range for rank 2".to_string())
    );
    insta::assert_snapshot!(err, @"invalid transpose: axis 5 is out of range for rank 2");
}

#[test]
fn transpose_of_a_vector_is_out_of_bounds() {
    let input = indoc! {r#"
    flow f(x) { return x.T; }
    build f main { x => [3]; }
    "#};

    let err = build_error(input, "main");

    assert_eq!(
        err.kind,
        InferErrorKind::InvalidTranspose("axis -2 is out of range for rank 1".to_string())
    );
}

#[test]
fn transpose_arguments_are_literals() {
    let input = indoc! {r#"
    flow f(x)[k] { return x.T(k); }
    flow g(x) { return x.T(0, 1, 2); }
    build f a { x => [3, 4]; }
    build g b { x => [3, 4]; }
    "#};

    insta::assert_snapshot!(build_error(input, "a"), @"invalid transpose: axes are integer literals");
    insta::assert_snapshot!(build_error(input, "b"), @"invalid transpose: `T` takes at most two axes");
}

#[test]
fn unknown_and_invalid_members() {
    let input = indoc! {r#"
    flow f(x) { return x.mean; }
    flow g(x) { return x.(x + 1); }
    build f a { x => [3]; }
    build g b { x => [3]; }
    "#};

    assert_eq!(
        build_error(input, "a").kind,
        InferErrorKind::UnknownAttribute("mean".to_string())
    );
    assert_eq!(build_error(input, "b").kind, InferErrorKind::InvalidAttribute);
}

#[test]
fn attribute_of_a_number() {
    let input = indoc! {r#"
    flow f(x) { return (2).T; }
    build f a { x => [3]; }
    "#};

    let err = build_error(input, "a");

    assert_eq!(err.kind, InferErrorKind::UnshapedOperand("T".to_string()));
    insta::assert_snapshot!(err, @"attribute needs a shaped operand: `T` applied to an unshaped value");
}

#[test]
fn attribute_call_arguments_are_ignored() {
    let input = indoc! {r#"
    flow f(x) { return x.max(0); }
    build f a { x => [3]; }
    "#};

    insta::assert_snapshot!(build(input, "a"), @r"
    flow f
      x: [3]
      return: [1]
    ");
}
