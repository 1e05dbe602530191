use indoc::indoc;

use super::*;
use crate::parser::parse;
use crate::program::lower;

fn program(source: &str) -> Program {
    let (parse, diagnostics) = parse(source).expect("no fuel limits set");
    assert!(!diagnostics.has_errors(), "unexpected parse errors");
    lower(&parse.root()).0
}

#[test]
fn later_declaration_wins() {
    let input = indoc! {r#"
    flow f(x) { return x; }
    flow f(x) { return x + x; }
    flow g(a) { let f h; return h(a); }
    "#};
    let program = program(input);
    let tables = SubflowTables::build(&program);

    let g = program.find_flow("g").expect("g is declared");
    let entry = tables.of(g).lookup("h", 1).expect("h is bound");
    assert_eq!(entry.flow, Some(FlowId::from_raw(1)));
}

#[test]
fn handle_visible_only_after_its_let() {
    let input = indoc! {r#"
    flow f(x) { return x; }
    flow g(a) { b = h(a); let f h; return h(b); }
    "#};
    let program = program(input);
    let tables = SubflowTables::build(&program);
    let table = tables.of(FlowId::from_raw(1));

    assert!(table.lookup("h", 0).is_none());
    assert!(table.lookup("h", 1).is_none());
    assert_eq!(table.lookup("h", 2).map(|e| e.stmt), Some(1));
}

#[test]
fn rebinding_a_handle_shadows() {
    let input = indoc! {r#"
    flow f(x) { return x; }
    flow k(x) { return x; }
    flow g(a) { let f h; b = h(a); let k h; return h(b); }
    "#};
    let program = program(input);
    let tables = SubflowTables::build(&program);
    let table = tables.of(FlowId::from_raw(2));

    assert_eq!(table.lookup("h", 1).and_then(|e| e.flow), Some(FlowId::from_raw(0)));
    assert_eq!(table.lookup("h", 3).and_then(|e| e.flow), Some(FlowId::from_raw(1)));
}

#[test]
fn unknown_flow_is_recorded_unresolved() {
    let program = program("flow g(a) { let missing h; return h(a); }");
    let tables = SubflowTables::build(&program);

    let entry = tables.of(FlowId::from_raw(0)).lookup("h", 1).expect("h is bound");
    assert_eq!(entry.flow, None);
    assert_eq!(tables.of(FlowId::from_raw(0)).callees().count(), 0);
}

#[test]
fn several_handles_share_one_flow() {
    let input = indoc! {r#"
    flow f(x) { return x; }
    flow g(a) { let f p, q; return p(q(a)); }
    "#};
    let program = program(input);
    let tables = SubflowTables::build(&program);
    let table = tables.of(FlowId::from_raw(1));

    let handles: Vec<_> = table.entries().iter().map(|e| e.handle.as_str()).collect();
    assert_eq!(handles, ["p", "q"]);
    assert_eq!(table.callees().collect::<Vec<_>>(), [FlowId::from_raw(0)]);
}

#[test]
fn reachable_follows_let_chains() {
    let input = indoc! {r#"
    flow a(x) { return x; }
    flow b(x) { let a h; return h(x); }
    flow c(x) { let b h; return h(x); }
    flow d(x) { return x; }
    "#};
    let program = program(input);
    let tables = SubflowTables::build(&program);

    let reachable = tables.reachable(FlowId::from_raw(2));
    assert_eq!(
        reachable,
        [FlowId::from_raw(2), FlowId::from_raw(1), FlowId::from_raw(0)]
    );
}

#[test]
fn reachable_terminates_on_cycles() {
    let input = indoc! {r#"
    flow a(x) { let a h; return h(x); }
    "#};
    let program = program(input);
    let tables = SubflowTables::build(&program);

    assert_eq!(tables.reachable(FlowId::from_raw(0)), [FlowId::from_raw(0)]);
}
