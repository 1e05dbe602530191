use crate::Error;
use crate::parser::{Parser, lex, parse_with_parser};

use super::{cst, errors};

#[test]
fn missing_semicolon() {
    insta::assert_snapshot!(errors("flow f { a = b }"), @"error at 15..16: expected `;`: statements end with `;`");
}

#[test]
fn unclosed_body() {
    insta::assert_snapshot!(
        errors("flow f { a = b;"),
        @"error at 7..15: missing closing `}` (related: opened here at 7..8)"
    );
}

#[test]
fn missing_operand() {
    insta::assert_snapshot!(errors("flow f { a = b + ; }"), @"error at 17..18: expected an expression: after operator");
}

#[test]
fn stray_top_level_input() {
    insta::assert_snapshot!(
        errors("x = 1; flow f { }"),
        @"error at 0..1: expected `flow` or `build`: found stray input at the top level"
    );
}

#[test]
fn duplicate_parameter_list() {
    insta::assert_snapshot!(errors("flow f(a)(b) { }"), @"error at 9..10: duplicate parameter list");
}

#[test]
fn invalid_dimension() {
    insta::assert_snapshot!(
        errors("build f m { x => [3, +]; }"),
        @"error at 21..22: invalid dimension: axis sizes are integers or names"
    );
}

#[test]
fn missing_attribute() {
    insta::assert_snapshot!(
        errors("flow f { a = b.; }"),
        @"error at 15..16: expected an attribute after `.`: e.g. `x.T` or `x.shape`"
    );
}

#[test]
fn missing_assignment() {
    insta::assert_snapshot!(errors("flow f { a b; }"), @"error at 11..12: expected `=`");
}

#[test]
fn missing_flow_name() {
    insta::assert_snapshot!(errors("flow { }"), @"error at 5..6: expected a flow name after `flow`");
}

#[test]
fn recovery_continues_with_next_item() {
    let source = "flow f { a = ; } flow g { return 1; }";
    let (parse, diagnostics) = crate::parser::parse(source).expect("no fuel limits set");

    assert_eq!(diagnostics.error_count(), 1);
    let names: Vec<_> = parse
        .root()
        .flows()
        .filter_map(|f| f.name().map(|t| t.text().to_string()))
        .collect();
    assert_eq!(names, ["f", "g"]);
}

#[test]
fn empty_source_is_valid() {
    insta::assert_snapshot!(cst(""), @"Root");
}

#[test]
fn recursion_limit_is_fatal() {
    let source = "flow f { a = ((((b)))); }";
    let parser = Parser::new(source, lex(source)).with_recursion_fuel(Some(2));

    let result = parse_with_parser(parser);
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn exec_fuel_is_fatal() {
    let source = "flow f { a = b + c; return a; }";
    let parser = Parser::new(source, lex(source)).with_exec_fuel(Some(3));

    let result = parse_with_parser(parser);
    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn exec_fuel_consumed_is_reported() {
    let source = "flow f { }";
    let parser = Parser::new(source, lex(source)).with_exec_fuel(Some(100));

    let (parse, _) = parse_with_parser(parser).expect("enough fuel");
    assert_eq!(parse.exec_fuel_consumed(), 4);
}
