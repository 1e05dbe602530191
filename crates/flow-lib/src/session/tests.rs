use indoc::indoc;

use super::*;
use crate::infer::ContextPrinter;
use crate::{DiagnosticKind, Error};

impl<'src> ModuleAnalyzed<'src> {
    #[track_caller]
    fn expect_valid(src: &'src str) -> Self {
        let module = ModuleBuilder::new(src).parse().unwrap().analyze();
        if !module.is_valid() {
            panic!(
                "Expected valid module, got error:\n{}",
                module.diagnostics().render(src)
            );
        }
        module
    }

    #[track_caller]
    fn expect_invalid(src: &'src str) -> String {
        let module = ModuleBuilder::new(src).parse().unwrap().analyze();
        if module.is_valid() {
            panic!("Expected invalid module, got valid module");
        }
        module.diagnostics().printer(src).render_plain()
    }

    fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics().kinds().collect()
    }

    fn dump_build(&self, name: &str) -> String {
        let ctx = self.build_context(name).expect("build was inferred");
        ContextPrinter::new(self.program(), ctx).dump()
    }
}

#[test]
fn valid_module_exposes_contexts() {
    let input = indoc! {r#"
    flow add(x)[y] { z = x + y; return z; }
    build add main { x => [3, 4]; }
    "#};

    let module = ModuleAnalyzed::expect_valid(input);

    insta::assert_snapshot!(module.dump_build("main"), @r"
    flow add
      x: [3, 4]
      y: [3, 4]
      z: [3, 4]
      return: [3, 4]
    ");
    let flow = module.find_flow_context("add").expect("flow was inferred");
    insta::assert_snapshot!(ContextPrinter::new(module.program(), flow).dump(), @r"
    flow add
      x: rank ?r0
      y: rank ?r0
      z: rank ?r0
      return: rank ?r0
    ");
    assert_eq!(module.build_contexts().count(), 1);
}

#[test]
fn parse_errors_skip_analysis() {
    let module = ModuleBuilder::new("flow f { a = b }").parse().unwrap().analyze();

    assert_eq!(module.kinds(), vec![DiagnosticKind::ExpectedSemicolon]);
    assert!(module.find_flow_context("f").is_none());
}

#[test]
fn fuel_exhaustion_is_fatal() {
    let result = ModuleBuilder::new("flow f { a = b + c; return a; }")
        .with_parse_fuel(3)
        .parse();

    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn recursion_limit_is_fatal() {
    let result = ModuleBuilder::new("flow f { a = ((((b)))); }")
        .with_parse_recursion_limit(2)
        .parse();

    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn every_failing_flow_is_reported() {
    let input = indoc! {r#"
    flow f(x) { return w; }
    flow g(x) { return v; }
    "#};

    insta::assert_snapshot!(ModuleAnalyzed::expect_invalid(input), @r"
    error at 19..20: `w` is not defined (related: in flow `f` at 5..6)
    error at 43..44: `v` is not defined (related: in flow `g` at 29..30)
    ");
}

#[test]
fn stop_at_first_failure() {
    let input = indoc! {r#"
    flow f(x) { return w; }
    flow g(x) { return v; }
    "#};

    let module = ModuleBuilder::new(input)
        .with_failure_policy(FailurePolicy::StopAtFirst)
        .parse()
        .unwrap()
        .analyze();

    insta::assert_snapshot!(
        module.diagnostics().printer(input).render_plain(),
        @"error at 19..20: `w` is not defined (related: in flow `f` at 5..6)"
    );
}

#[test]
fn callee_errors_are_reported_once() {
    let input = indoc! {r#"
    flow g(a) { return b; }
    flow f(x) { let g h; return h(x); }
    "#};

    let module = ModuleBuilder::new(input).parse().unwrap().analyze();

    assert_eq!(module.kinds(), vec![DiagnosticKind::UnknownIdentifier]);
    assert!(module.find_flow_context("g").is_none());
    assert!(module.find_flow_context("f").is_none());
}

#[test]
fn build_failures_name_the_build() {
    let input = indoc! {r#"
    flow f(x)[y] { z = x + y; return z; }
    build f bad { x => [3, 4]; y => [3, 5]; }
    "#};

    let module = ModuleBuilder::new(input).parse().unwrap().analyze();

    assert_eq!(module.kinds(), vec![DiagnosticKind::DimensionClash]);
    assert!(module.find_flow_context("f").is_some());
    assert!(module.build_context("bad").is_none());
    let rendered = module.diagnostics().printer(input).render_plain();
    assert!(rendered.contains("(related: in build `bad` at"), "{rendered}");
}

#[test]
fn build_of_unknown_flow() {
    let input = indoc! {r#"
    flow f(x) { return x; }
    build missing main { x => [1]; }
    "#};

    let module = ModuleBuilder::new(input).parse().unwrap().analyze();

    assert_eq!(module.kinds(), vec![DiagnosticKind::UnknownFlow]);
}

#[test]
fn recursion_fails_inference_not_checking() {
    let input = indoc! {r#"
    flow f(x) { let f h; return h(x); }
    "#};

    let module = ModuleBuilder::new(input).parse().unwrap().analyze();

    assert_eq!(module.kinds(), vec![DiagnosticKind::RecursiveCall]);
}

#[test]
fn shadowed_flow_is_a_warning() {
    let input = indoc! {r#"
    flow f(a) { return a; }
    flow f(a) { return a.T; }
    build f main { a => [2, 3]; }
    "#};

    let module = ModuleAnalyzed::expect_valid(input);

    assert!(module.diagnostics().has_warnings());
    insta::assert_snapshot!(module.dump_build("main"), @r"
    flow f
      a: [2, 3]
      return: [3, 2]
    ");
}

#[test]
fn config_defaults() {
    let config = ModuleConfig::default();

    assert_eq!(config.parse_fuel, 1_000_000);
    assert_eq!(config.parse_max_depth, 4096);
    assert_eq!(config.failure_policy, FailurePolicy::CollectAll);
}
