mod grammar_tests;
mod recovery_tests;

use super::{CstPrinter, parse};

/// CST dump of a source that must parse without diagnostics.
fn cst(source: &str) -> String {
    let (parse, diagnostics) = parse(source).expect("no fuel limits set");
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics:\n{}",
        diagnostics.render(source)
    );
    CstPrinter::new(&parse.syntax()).dump()
}

/// CST dump including whitespace and comments.
fn cst_with_trivia(source: &str) -> String {
    let (parse, _) = parse(source).expect("no fuel limits set");
    CstPrinter::new(&parse.syntax()).with_trivia(true).dump()
}

/// One line per filtered diagnostic of a source that must fail to parse.
fn errors(source: &str) -> String {
    let (_, diagnostics) = parse(source).expect("no fuel limits set");
    assert!(diagnostics.has_errors(), "expected parse errors");
    diagnostics.filtered_printer(source).render_plain()
}
